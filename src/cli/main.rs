//! Command-line interface entry point for `acadtrack`

mod args;
mod commands;

use acad_track::config::Config;
use acad_track::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use acad_track::{debug, info};
use args::{Cli, Command};
use clap::Parser;
use std::path::PathBuf;

/// Apply log level, verbosity and file logging from CLI flags and config
fn init_logging(args: &Cli, config: &Config) {
    // CLI flag overrides config; fall back to warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    let config_log_path =
        (!config.logging.file.is_empty()).then(|| PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }
}

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    init_logging(&args, &config);

    let json = args.json;
    let result = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::Progress { student_id } => commands::records::progress(&config, &student_id, json),
        Command::Available { student_id } => {
            commands::records::available(&config, &student_id, json)
        }
        Command::Suggest { student_id } => commands::records::suggest(&config, &student_id, json),
        Command::Roadmap { student_id, report } => {
            commands::roadmap::run(&config, &student_id, report, json)
        }
        Command::Performance { student_id } => {
            commands::records::performance(&config, &student_id, json)
        }
        Command::Attendance { student_id, course } => {
            commands::records::attendance(&config, &student_id, course.as_deref(), json)
        }
        Command::Validate => commands::records::validate(&config),
        Command::Risk { subcommand } => commands::risk::run(subcommand, &config, json),
    };

    if let Err(e) = result {
        debug!("Command failed: {e:?}");
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}
