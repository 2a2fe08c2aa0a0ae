use crate::scenario::{replay, Scenario, StepOutcome};
use anyhow::Context;
use novel_ads_core::EngineConfig;
use novel_ads_sinks::{JsonlSink, SinkRegistry, TracingSink};
use novel_ads_telemetry::Paths;
use std::path::Path;

/// Config from an explicit path, else the user config when present, else defaults
fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<EngineConfig> {
    if let Some(path) = explicit {
        return EngineConfig::load(path).context("loading engine config");
    }
    match Paths::new() {
        Ok(paths) if paths.config_file().exists() => {
            EngineConfig::load(&paths.config_file()).context("loading user engine config")
        }
        _ => Ok(EngineConfig::default()),
    }
}

fn build_sinks(log: Option<&Path>, session_id: &str, quiet: bool) -> SinkRegistry {
    let mut registry = SinkRegistry::new();
    registry.register("tracing", Box::new(TracingSink::new()));
    if let Some(path) = log {
        registry.register("jsonl", Box::new(JsonlSink::new(path, session_id)));
    }
    if quiet {
        registry.set_enabled("tracing", false);
    }
    registry
}

fn render(outcomes: &[StepOutcome]) -> anyhow::Result<Vec<String>> {
    let mut lines = Vec::new();
    for outcome in outcomes {
        for event in &outcome.events {
            let line = serde_json::json!({
                "step": outcome.step,
                "signal": outcome.signal,
                "event": event.name,
                "target": event.target,
                "data": event.data,
            });
            lines.push(serde_json::to_string(&line)?);
        }
    }
    Ok(lines)
}

pub fn run(
    scenario_path: &Path,
    config: Option<&Path>,
    log: Option<&Path>,
    session: Option<String>,
    quiet: bool,
) -> anyhow::Result<()> {
    let config = resolve_config(config)?;
    let scenario = Scenario::load(scenario_path)?;
    let session_id =
        session.unwrap_or_else(|| chrono::Utc::now().format("%Y%m%dT%H%M%S").to_string());

    tracing::info!(
        scenario = %scenario_path.display(),
        steps = scenario.steps.len(),
        session = %session_id,
        "replaying scenario"
    );

    let sinks = build_sinks(log, &session_id, quiet);
    tracing::debug!(sinks = ?sinks.names(), quiet, "sinks registered");

    let outcomes = replay(&scenario, config, sinks);
    for line in render(&outcomes)? {
        println!("{}", line);
    }
    Ok(())
}
