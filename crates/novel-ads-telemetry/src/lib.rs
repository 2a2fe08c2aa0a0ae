//! Emission records and JSONL storage for ad strategy events

mod error;
mod io;
mod paths;
mod types;

pub use error::TelemetryError;
pub use io::{append_emission, atomic_write, read_emissions, EmissionLog};
pub use paths::Paths;
pub use types::EmissionRecord;
