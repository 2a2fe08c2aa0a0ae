//! Emission log storage and atomic config writes

use crate::error::TelemetryError;
use crate::types::EmissionRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Contents of an emission log
#[derive(Debug, Default)]
pub struct EmissionLog {
    pub records: Vec<EmissionRecord>,
    /// Lines that were not valid emission records
    pub skipped: usize,
}

impl EmissionLog {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Append one emission as a JSON line, creating the log and its directory on demand
pub fn append_emission(path: &Path, record: &EmissionRecord) -> Result<(), TelemetryError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut line = serde_json::to_vec(record)?;
    line.push(b'\n');
    // One write per record keeps concurrent appenders from interleaving lines
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?
        .write_all(&line)?;
    Ok(())
}

/// Read an emission log. A missing log is empty; malformed lines are counted and skipped.
pub fn read_emissions(path: &Path) -> Result<EmissionLog, TelemetryError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(EmissionLog::default());
        }
        Err(err) => return Err(err.into()),
    };

    let mut log = EmissionLog::default();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<EmissionRecord>(&line) {
            Ok(record) => log.records.push(record),
            Err(_) => log.skipped += 1,
        }
    }
    Ok(log)
}

/// Replace `path` with `data` via a sibling temp file and rename
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<(), TelemetryError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let staged = path.with_extension("tmp");
    std::fs::write(&staged, data)?;
    std::fs::rename(&staged, path)?;
    Ok(())
}
