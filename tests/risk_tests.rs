//! Risk alert generation through the store-backed service

use acad_track::core::memory::MemoryStore;
use acad_track::core::models::Term;
use acad_track::core::risk::RiskLevel;
use acad_track::core::service;
use acad_track::core::store::{AlertFilter, AlertStore};
use std::path::Path;

const SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/samples/academic_records.json");

fn sample() -> MemoryStore {
    MemoryStore::load_json(Path::new(SAMPLE)).expect("sample dataset should load")
}

#[test]
fn test_struggling_student_is_high_risk() {
    let mut store = sample();
    let (records, alerts) = store.split();
    let alert =
        service::generate_alert(records, alerts, "2023CS002", Term::first_of(2024)).unwrap();

    assert_eq!(alert.level(), RiskLevel::High);
    let breakdown = alert.breakdown().unwrap();
    assert_eq!(breakdown.factors.len(), 4);
    assert_eq!(breakdown.features.failed_count, 3);
    assert_eq!(breakdown.features.failed_credits, 12);
    assert!((breakdown.features.attendance_rate - 30.0).abs() < 1e-9);
    assert_eq!(breakdown.features.latest_term_credits, 8);
}

#[test]
fn test_declining_but_passing_student_is_low_risk() {
    let mut store = sample();
    let (records, alerts) = store.split();
    let alert =
        service::generate_alert(records, alerts, "2023CS001", Term::first_of(2024)).unwrap();

    assert_eq!(alert.level(), RiskLevel::Low);
    let breakdown = alert.breakdown().unwrap();
    assert_eq!(breakdown.factors, vec!["Declining GPA trend (-0.44)".to_string()]);
    // The ungraded COMP201 record does not open a new term
    assert_eq!(breakdown.features.latest_term_credits, 7);
}

#[test]
fn test_student_without_grades_scores_gpa_gap() {
    let mut store = sample();
    let (records, alerts) = store.split();
    let alert =
        service::generate_alert(records, alerts, "2024CS001", Term::first_of(2024)).unwrap();

    assert!((alert.score() - 33.0).abs() < 1e-9);
    assert_eq!(alert.level(), RiskLevel::Low);
}

#[test]
fn test_regenerate_is_idempotent_per_term() {
    let mut store = sample();
    let term = Term::first_of(2024);

    let (records, alerts) = store.split();
    let first = service::regenerate_alerts(records, alerts, term).unwrap();
    let (records, alerts) = store.split();
    let second = service::regenerate_alerts(records, alerts, term).unwrap();

    assert_eq!(first, second);
    assert_eq!(store.alerts.len(), 3);
}

#[test]
fn test_regenerate_leaves_other_terms_alone() {
    let mut store = sample();
    let earlier = Term::new(2, 2023).unwrap();

    let (records, alerts) = store.split();
    service::generate_alert(records, alerts, "2023CS002", earlier).unwrap();
    service::regenerate_alerts(records, alerts, Term::first_of(2024)).unwrap();

    assert_eq!(store.alerts.len(), 4);
    let from_2023 = service::list_alerts(
        &store.alerts,
        AlertFilter {
            semester: None,
            year: Some(2023),
        },
    )
    .unwrap();
    assert_eq!(from_2023.len(), 1);
    assert_eq!(from_2023[0].term(), earlier);
}

#[test]
fn test_list_is_sorted_by_score() {
    let mut store = sample();
    let (records, alerts) = store.split();
    service::regenerate_alerts(records, alerts, Term::first_of(2024)).unwrap();

    let listed = service::list_alerts(&store.alerts, AlertFilter::default()).unwrap();
    let ids: Vec<&str> = listed.iter().map(|a| a.student_id()).collect();
    assert_eq!(ids, vec!["2023CS002", "2024CS001", "2023CS001"]);
}

#[test]
fn test_latest_alert_prefers_newest_term() {
    let mut store = sample();
    let (records, alerts) = store.split();
    service::generate_alert(records, alerts, "2023CS002", Term::first_of(2024)).unwrap();
    service::generate_alert(records, alerts, "2023CS002", Term::new(2, 2023).unwrap()).unwrap();

    let latest = store.alerts.latest_alert("2023CS002").unwrap().unwrap();
    assert_eq!(latest.term(), Term::first_of(2024));

    let payload =
        service::latest_alert_payload(&store.records, &store.alerts, "2023CS002").unwrap();
    assert_eq!(payload.term, Term::first_of(2024));
    assert_eq!(payload.level, RiskLevel::High);
}

#[test]
fn test_payload_missing_without_alert() {
    let store = sample();
    let err = service::latest_alert_payload(&store.records, &store.alerts, "2023CS001")
        .unwrap_err();
    assert!(err.is_not_found());
}
