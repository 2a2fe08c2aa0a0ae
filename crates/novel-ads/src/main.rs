mod cli;
mod commands;
mod scenario;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            scenario,
            config,
            log,
            session,
            quiet,
        } => commands::replay::run(
            &scenario,
            config.as_deref(),
            log.as_deref(),
            session,
            quiet,
        ),
        Commands::Init { path, force } => commands::init::run(path.as_deref(), force),
        Commands::History { log, stats } => commands::history::run(log.as_deref(), stats),
        Commands::Version => commands::version::run(),
    }
}
