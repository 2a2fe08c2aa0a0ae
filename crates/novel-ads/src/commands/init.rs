use anyhow::Context;
use novel_ads_core::EngineConfig;
use novel_ads_telemetry::{atomic_write, Paths};
use std::path::{Path, PathBuf};

fn write_default_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite",
            path.display()
        );
    }
    let json = serde_json::to_string_pretty(&EngineConfig::default())?;
    atomic_write(path, json.as_bytes())
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn run(path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let target: PathBuf = match path {
        Some(p) => p.to_path_buf(),
        None => Paths::new()?.config_file(),
    };

    write_default_config(&target, force)?;
    println!("✓ Wrote default engine config to {}", target.display());
    Ok(())
}
