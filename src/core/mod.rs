//! Academic analytics core: records in, derived reports out

pub mod error;
pub mod grading;
pub mod memory;
pub mod models;
pub mod performance;
pub mod planner;
pub mod prereq;
pub mod progress;
pub mod risk;
pub mod service;
pub mod store;

pub use error::{CoreError, Entity, Result};

/// Returns the current version of the `acad-track` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
