//! CLI command handlers for `acadtrack`.
//!
//! Each command family lives in its own submodule. Handlers return a
//! [`CommandResult`]; `main` reports failures.

pub mod config;
pub mod records;
pub mod risk;
pub mod roadmap;

use acad_track::config::Config;
use acad_track::core::memory::MemoryStore;
use acad_track::verbose;
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;

/// Outcome of a command handler
pub type CommandResult = Result<(), Box<dyn Error>>;

/// Dataset path from the effective configuration
pub fn data_path(config: &Config) -> PathBuf {
    PathBuf::from(&config.paths.data_file)
}

/// Load the dataset named by the configuration
pub fn open_store(config: &Config) -> Result<MemoryStore, Box<dyn Error>> {
    let path = data_path(config);
    verbose!("Loading dataset from {}", path.display());
    Ok(MemoryStore::load_json(&path)?)
}

/// Print `value` as pretty JSON when `json` is set, otherwise through `text`
pub fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T)) -> CommandResult {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        text(value);
    }
    Ok(())
}

/// Format an optional average for display
pub fn fmt_average(average: Option<f64>) -> String {
    average.map_or_else(|| "-".to_string(), |avg| format!("{avg:.2}"))
}
