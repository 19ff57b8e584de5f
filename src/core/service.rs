//! Store-backed entry points
//!
//! Each function loads what it needs from the injected stores, runs the pure
//! computation and returns its result. Missing students, curricula and alerts
//! come back as [`CoreError::NotFound`].

use crate::core::error::{CoreError, Entity, Result};
use crate::core::grading::{score_grades, AttendanceStats, ScoredGrade};
use crate::core::models::{Catalog, Course, Curriculum, Student, Term};
use crate::core::performance::{analyze_performance, PerformanceReport};
use crate::core::planner::{build_roadmap, suggest_next_term, NextTermSuggestion, Roadmap};
use crate::core::prereq;
use crate::core::progress::{track_progress, ProgressReport};
use crate::core::risk::{assess_student, AlertPayload, RiskAlert};
use crate::core::store::{AlertFilter, AlertStore, RecordStore};

/// Look up a student, failing with `NotFound`
///
/// # Errors
/// `NotFound` if the student does not exist, or the store's error.
pub fn find_student(records: &impl RecordStore, student_id: &str) -> Result<Student> {
    records
        .student(student_id)?
        .ok_or_else(|| CoreError::not_found(Entity::Student, student_id))
}

fn find_curriculum(records: &impl RecordStore, major: &str) -> Result<Curriculum> {
    records
        .curriculum(major)?
        .ok_or_else(|| CoreError::not_found(Entity::Curriculum, major))
}

/// Catalog of the student's program plus any other course they have grades in
fn grading_catalog(records: &impl RecordStore, student: &Student) -> Result<Catalog> {
    let mut catalog = records.courses_for_major(&student.major)?;
    for grade in records.grades_for(&student.student_id)? {
        if catalog.get_course(&grade.course_code).is_none() {
            if let Some(course) = records.course(&grade.course_code)? {
                catalog.add_course(course);
            }
        }
    }
    Ok(catalog)
}

/// Scored grades of a student
///
/// # Errors
/// The store's error.
pub fn scored_grades(records: &impl RecordStore, student: &Student) -> Result<Vec<ScoredGrade>> {
    let catalog = grading_catalog(records, student)?;
    let grades = records.grades_for(&student.student_id)?;
    let attendance = records.attendance_for(&student.student_id)?;
    Ok(score_grades(&grades, &catalog, &attendance))
}

/// Curriculum progress of a student
///
/// # Errors
/// `NotFound` if the student or their curriculum does not exist.
pub fn student_progress(records: &impl RecordStore, student_id: &str) -> Result<ProgressReport> {
    let student = find_student(records, student_id)?;
    let curriculum = find_curriculum(records, &student.major)?;
    let grades = scored_grades(records, &student)?;
    Ok(track_progress(&student, &grades, &curriculum))
}

/// Courses the student may take now, in catalog order
///
/// # Errors
/// `NotFound` if the student does not exist.
pub fn available_courses(records: &impl RecordStore, student_id: &str) -> Result<Vec<Course>> {
    let student = find_student(records, student_id)?;
    let grades = scored_grades(records, &student)?;
    let catalog = records.courses_for_major(&student.major)?;
    Ok(prereq::available_courses(&grades, &catalog)
        .into_iter()
        .cloned()
        .collect())
}

/// Next-term suggestion for a student
///
/// # Errors
/// `NotFound` if the student or their curriculum does not exist.
pub fn next_term_suggestion(
    records: &impl RecordStore,
    student_id: &str,
) -> Result<NextTermSuggestion> {
    let student = find_student(records, student_id)?;
    let curriculum = find_curriculum(records, &student.major)?;
    let grades = scored_grades(records, &student)?;
    let catalog = records.courses_for_major(&student.major)?;

    let available = prereq::available_courses(&grades, &catalog);
    Ok(suggest_next_term(&available, &catalog.build_graph(), &curriculum))
}

/// Multi-term roadmap of a student
///
/// # Errors
/// `NotFound` if the student does not exist.
pub fn study_roadmap(records: &impl RecordStore, student_id: &str) -> Result<Roadmap> {
    let student = find_student(records, student_id)?;
    let grades = scored_grades(records, &student)?;
    let catalog = records.courses_for_major(&student.major)?;
    Ok(build_roadmap(&student, &catalog, &grades))
}

/// Term-by-term performance of a student
///
/// # Errors
/// `NotFound` if the student does not exist.
pub fn performance_report(
    records: &impl RecordStore,
    student_id: &str,
) -> Result<PerformanceReport> {
    let student = find_student(records, student_id)?;
    let grades = scored_grades(records, &student)?;
    Ok(analyze_performance(&student, &grades))
}

/// Attendance counts of a student, optionally limited to one course
///
/// # Errors
/// `NotFound` if the student, or the requested course, does not exist.
pub fn attendance_stats(
    records: &impl RecordStore,
    student_id: &str,
    course_code: Option<&str>,
) -> Result<AttendanceStats> {
    let student = find_student(records, student_id)?;
    let attendance = records.attendance_for(&student.student_id)?;
    match course_code {
        Some(code) => {
            if records.course(code)?.is_none() {
                return Err(CoreError::not_found(Entity::Course, code));
            }
            Ok(AttendanceStats::for_course(&attendance, &student.student_id, code))
        }
        None => Ok(AttendanceStats::from_records(&attendance)),
    }
}

fn compute_alert(records: &impl RecordStore, student: &Student, term: Term) -> Result<RiskAlert> {
    let grades = scored_grades(records, student)?;
    let attendance = records.attendance_for(&student.student_id)?;
    assess_student(&student.student_id, term, &grades, &attendance)
}

/// Generate and store one alert for a student
///
/// # Errors
/// `NotFound` if the student does not exist, or the store's error.
pub fn generate_alert(
    records: &impl RecordStore,
    alerts: &mut impl AlertStore,
    student_id: &str,
    term: Term,
) -> Result<RiskAlert> {
    let student = find_student(records, student_id)?;
    let alert = compute_alert(records, &student, term)?;
    alerts.insert_alert(alert.clone())?;
    Ok(alert)
}

/// Replace every alert of `term` with a fresh one per student
///
/// All alerts are computed before the store is touched, so a failure leaves
/// the previous alerts of the term in place.
///
/// # Errors
/// The store's error, or a payload encoding error.
pub fn regenerate_alerts(
    records: &impl RecordStore,
    alerts: &mut impl AlertStore,
    term: Term,
) -> Result<Vec<RiskAlert>> {
    let fresh = records
        .students()?
        .iter()
        .map(|student| compute_alert(records, student, term))
        .collect::<Result<Vec<_>>>()?;

    alerts.replace_term_alerts(term, fresh.clone())?;
    crate::info!("Regenerated {} alert(s) for {term}", fresh.len());
    Ok(fresh)
}

/// Stored alerts, highest score first
///
/// # Errors
/// The store's error.
pub fn list_alerts(alerts: &impl AlertStore, filter: AlertFilter) -> Result<Vec<RiskAlert>> {
    alerts.list_alerts(filter)
}

/// Latest alert of a student with its decoded breakdown
///
/// # Errors
/// `NotFound` if the student or any alert for them does not exist.
pub fn latest_alert_payload(
    records: &impl RecordStore,
    alerts: &impl AlertStore,
    student_id: &str,
) -> Result<AlertPayload> {
    let student = find_student(records, student_id)?;
    let alert = alerts
        .latest_alert(student_id)?
        .ok_or_else(|| CoreError::not_found(Entity::Alert, student_id))?;
    AlertPayload::new(&student, &alert)
}
