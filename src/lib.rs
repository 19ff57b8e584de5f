//! Shared library for `acad-track`
//! Contains the academic analytics core, configuration, and logging used by the CLI.

pub mod config;
pub mod core;
pub mod logger;

pub use crate::core::get_version;
