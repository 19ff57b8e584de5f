//! Per-student risk features

use crate::core::grading::{weighted_gpa, AttendanceStats, ScoredGrade};
use crate::core::models::{Attendance, Term};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inputs of the risk scorer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskFeatures {
    /// Credit-weighted GPA over all graded courses
    pub overall_gpa: f64,
    /// GPA of the most recent graded term
    pub last_gpa: f64,
    /// GPA of the term before it; equals `last_gpa` with a single term
    pub previous_gpa: f64,
    /// `last_gpa - previous_gpa`
    pub gpa_trend: f64,
    /// Graded courses with an average below the pass mark
    pub failed_count: usize,
    /// Credits of those courses
    pub failed_credits: u32,
    /// Attendance rate over every session of the student, in percent
    pub attendance_rate: f64,
    /// Credits graded in the most recent term
    pub latest_term_credits: u32,
}

/// Extract risk features from a student's scored grades and attendance
///
/// Only graded entries take part; ungraded records neither open a term nor
/// add credits.
#[must_use]
pub fn extract_features(grades: &[ScoredGrade], attendance: &[Attendance]) -> RiskFeatures {
    let mut by_term: BTreeMap<Term, Vec<&ScoredGrade>> = BTreeMap::new();
    for grade in grades.iter().filter(|g| g.is_graded()) {
        by_term.entry(grade.term).or_default().push(grade);
    }

    let term_gpas: Vec<f64> = by_term
        .values()
        .map(|entries| weighted_gpa(entries.iter().copied()))
        .collect();
    let last_gpa = term_gpas.last().copied().unwrap_or(0.0);
    let previous_gpa = match term_gpas.len() {
        0 | 1 => last_gpa,
        n => term_gpas[n - 2],
    };

    let (failed_count, failed_credits) = grades
        .iter()
        .filter(|g| !g.is_passed() && g.is_graded())
        .fold((0, 0u32), |(count, credits), g| (count + 1, credits.saturating_add(g.credits)));

    let latest_term_credits = by_term
        .values()
        .next_back()
        .map_or(0, |entries| {
            entries.iter().fold(0u32, |sum, g| sum.saturating_add(g.credits))
        });

    RiskFeatures {
        overall_gpa: weighted_gpa(grades),
        last_gpa,
        previous_gpa,
        gpa_trend: last_gpa - previous_gpa,
        failed_count,
        failed_credits,
        attendance_rate: AttendanceStats::from_records(attendance).rate(),
        latest_term_credits,
    }
}
