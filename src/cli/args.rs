//! CLI argument definitions for `acadtrack`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use acad_track::config::ConfigOverrides;
use acad_track::core::models::Term;
use acad_track::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to [`Level`] for
/// runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(Level::from(*self).as_str())
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `data_file`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

/// Term given as `--semester` and `--year`
#[derive(Debug, Clone, Copy, clap::Args)]
pub struct TermArgs {
    /// Semester number (1-3)
    #[arg(long, value_name = "N")]
    pub semester: u8,
    /// Four-digit academic year
    #[arg(long, value_name = "YEAR")]
    pub year: i32,
}

impl TermArgs {
    /// Validated term
    pub fn term(self) -> acad_track::core::Result<Term> {
        Term::new(self.semester, self.year)
    }
}

#[derive(Debug, Subcommand)]
pub enum RiskSubcommand {
    /// Replace every alert of a term with a fresh one per student.
    Regenerate {
        #[command(flatten)]
        term: TermArgs,
    },
    /// Generate and store one alert for a student.
    Generate {
        /// Student identifier
        #[arg(value_name = "STUDENT_ID")]
        student_id: String,
        #[command(flatten)]
        term: TermArgs,
    },
    /// List stored alerts, highest score first.
    List {
        /// Only alerts of this semester
        #[arg(long, value_name = "N")]
        semester: Option<u8>,
        /// Only alerts of this year
        #[arg(long, value_name = "YEAR")]
        year: Option<i32>,
    },
    /// Show the latest alert of a student with its breakdown.
    Show {
        /// Student identifier
        #[arg(value_name = "STUDENT_ID")]
        student_id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Show curriculum progress of a student.
    Progress {
        /// Student identifier
        #[arg(value_name = "STUDENT_ID")]
        student_id: String,
    },
    /// List the courses a student may take now.
    Available {
        /// Student identifier
        #[arg(value_name = "STUDENT_ID")]
        student_id: String,
    },
    /// Suggest courses for a student's next term.
    Suggest {
        /// Student identifier
        #[arg(value_name = "STUDENT_ID")]
        student_id: String,
    },
    /// Build the multi-term study roadmap of a student.
    Roadmap {
        /// Student identifier
        #[arg(value_name = "STUDENT_ID")]
        student_id: String,

        /// Also write a Markdown report into the configured reports directory
        #[arg(long)]
        report: bool,
    },
    /// Show term-by-term academic performance of a student.
    Performance {
        /// Student identifier
        #[arg(value_name = "STUDENT_ID")]
        student_id: String,
    },
    /// Show attendance counts of a student.
    Attendance {
        /// Student identifier
        #[arg(value_name = "STUDENT_ID")]
        student_id: String,

        /// Limit to one course
        #[arg(long, value_name = "CODE")]
        course: Option<String>,
    },
    /// Check the dataset for invalid records and unknown prerequisites.
    Validate,
    /// Generate and inspect risk alerts.
    Risk {
        #[command(subcommand)]
        subcommand: RiskSubcommand,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "acadtrack",
    about = "Academic records analytics: progress, roadmaps and risk alerts",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long)]
    pub json: bool,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config dataset path
    #[arg(long = "config-data-file", value_name = "PATH")]
    pub config_data_file: Option<PathBuf>,

    /// Override config dataset path (short form)
    #[arg(long = "data-file", value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--data-file`) take precedence over long-form
    /// flags (e.g., `--config-data-file`) when both are provided.
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: path_string(self.config_log_file.as_ref()),
            verbose: self.config_verbose,
            data_file: path_string(self.data_file.as_ref().or(self.config_data_file.as_ref())),
            reports_dir: path_string(
                self.reports_dir
                    .as_ref()
                    .or(self.config_reports_dir.as_ref()),
            ),
        }
    }
}
