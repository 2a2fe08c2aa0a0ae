use novel_ads_telemetry::{read_emissions, EmissionLog, EmissionRecord, Paths};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

const RECENT_LIMIT: usize = 20;

fn compute_stats(log: &EmissionLog) -> String {
    let records: &[EmissionRecord] = &log.records;
    if records.is_empty() {
        return "No emissions to analyze.".to_string();
    }

    let mut by_event: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for record in records {
        *by_event
            .entry((record.event.as_str(), record.target.as_str()))
            .or_default() += 1;
    }
    let sessions: std::collections::BTreeSet<&str> =
        records.iter().map(|r| r.session_id.as_str()).collect();

    let mut out = format!(
        "Total emissions: {}\nSessions: {}",
        records.len(),
        sessions.len()
    );
    for ((event, target), count) in by_event {
        out.push_str(&format!("\n  {} -> {}: {}", event, target, count));
    }
    if log.skipped > 0 {
        out.push_str(&format!("\nSkipped lines: {}", log.skipped));
    }
    out
}

pub fn run(log: Option<&Path>, stats: bool) -> anyhow::Result<()> {
    let path = match log {
        Some(p) => p.to_path_buf(),
        None => Paths::new()?.emissions_file(),
    };
    let log = read_emissions(&path)?;
    if log.skipped > 0 {
        warn!(path = %path.display(), skipped = log.skipped, "malformed emission lines skipped");
    }

    if log.is_empty() {
        println!("No emission history");
        return Ok(());
    }

    if stats {
        println!("{}", compute_stats(&log));
        return Ok(());
    }

    let recent: Vec<_> = log.records.iter().rev().take(RECENT_LIMIT).collect();
    println!("Recent Emissions (last {})", recent.len());
    println!("==========================");
    for record in recent {
        println!(
            "  {} | {} | {} -> {}",
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record.session_id,
            record.event,
            record.target,
        );
    }
    Ok(())
}
