use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "novel-ads")]
#[command(version)]
#[command(about = "Ad strategy decisions for paginated novel readers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a scenario file through the strategy engine
    Replay {
        /// Path to the scenario JSON
        scenario: PathBuf,

        /// Engine config (defaults to the user config when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Append emitted events to this JSONL log
        #[arg(short, long)]
        log: Option<PathBuf>,

        /// Session id recorded in the emission log
        #[arg(long)]
        session: Option<String>,

        /// Do not log each emitted event
        #[arg(short, long)]
        quiet: bool,
    },

    /// Write the default engine config
    Init {
        /// Destination (defaults to the user config path)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Inspect an emission log
    History {
        /// Path to the emission log (defaults to the user log)
        #[arg(short, long)]
        log: Option<PathBuf>,

        /// Show per-event counts
        #[arg(long)]
        stats: bool,
    },

    /// Print version information
    Version,
}
