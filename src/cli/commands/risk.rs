//! Risk alert command handlers

use super::{data_path, emit, open_store, CommandResult};
use crate::args::RiskSubcommand;
use acad_track::config::Config;
use acad_track::core::risk::{AlertPayload, RiskAlert};
use acad_track::core::service;
use acad_track::core::store::AlertFilter;
use acad_track::info;

fn print_alerts(alerts: &[RiskAlert]) {
    if alerts.is_empty() {
        println!("No alerts");
        return;
    }
    println!("{:<12} {:<20} {:>6}  Level", "Student", "Term", "Score");
    for alert in alerts {
        println!(
            "{:<12} {:<20} {:>6.1}  {}",
            alert.student_id(),
            alert.term().to_string(),
            alert.score(),
            alert.level()
        );
    }
}

fn print_payload(payload: &AlertPayload) {
    println!("\n=== Risk: {} ({}) ===\n", payload.name, payload.student_id);
    println!("Term:  {}", payload.term);
    println!("Score: {:.1}", payload.score);
    println!("Level: {}", payload.level);

    let features = &payload.breakdown.features;
    println!("\nFeatures:");
    println!("  Overall GPA:         {:.2}", features.overall_gpa);
    println!(
        "  Last / previous GPA: {:.2} / {:.2} (trend {:+.2})",
        features.last_gpa, features.previous_gpa, features.gpa_trend
    );
    println!(
        "  Failed:              {} course(s), {} credits",
        features.failed_count, features.failed_credits
    );
    println!("  Attendance:          {:.1}%", features.attendance_rate);
    println!("  Latest term load:    {} credits", features.latest_term_credits);

    if payload.breakdown.factors.is_empty() {
        println!("\nNo risk factors");
    } else {
        println!("\nFactors:");
        for factor in &payload.breakdown.factors {
            println!("  - {factor}");
        }
    }
}

/// Dispatch risk subcommands
///
/// Subcommands that create alerts write the dataset back so later runs see them.
pub fn run(subcommand: RiskSubcommand, config: &Config, json: bool) -> CommandResult {
    let mut store = open_store(config)?;

    match subcommand {
        RiskSubcommand::Regenerate { term } => {
            let term = term.term()?;
            let (records, alerts) = store.split();
            let fresh = service::regenerate_alerts(records, alerts, term)?;
            store.save_json(&data_path(config))?;
            info!("Saved {} alert(s) for {term}", fresh.len());
            emit(json, &fresh, |alerts: &Vec<RiskAlert>| print_alerts(alerts))
        }
        RiskSubcommand::Generate { student_id, term } => {
            let term = term.term()?;
            let (records, alerts) = store.split();
            let alert = service::generate_alert(records, alerts, &student_id, term)?;
            store.save_json(&data_path(config))?;
            emit(json, &alert, |alert: &RiskAlert| {
                print_alerts(std::slice::from_ref(alert));
            })
        }
        RiskSubcommand::List { semester, year } => {
            let alerts = service::list_alerts(&store.alerts, AlertFilter { semester, year })?;
            emit(json, &alerts, |alerts: &Vec<RiskAlert>| print_alerts(alerts))
        }
        RiskSubcommand::Show { student_id } => {
            let payload = service::latest_alert_payload(&store.records, &store.alerts, &student_id)?;
            emit(json, &payload, print_payload)
        }
    }
}
