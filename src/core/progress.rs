//! Curriculum progress: passed credits measured against a program's requirements

use crate::core::grading::{weighted_gpa, ScoredGrade};
use crate::core::models::{Curriculum, Student};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Required / earned / remaining credits for one requirement bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditSplit {
    /// Credits the curriculum requires
    pub required: u32,
    /// Credits earned from passed courses
    pub earned: u32,
    /// `required - earned`, floored at zero
    pub remaining: u32,
}

impl CreditSplit {
    const fn new(required: u32, earned: u32) -> Self {
        Self {
            required,
            earned,
            remaining: required.saturating_sub(earned),
        }
    }
}

/// Progress of one student through their curriculum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Student business identifier
    pub student_id: String,
    /// Student display name
    pub name: String,
    /// Program / major
    pub major: String,
    /// All credits
    pub total: CreditSplit,
    /// Credits from mandatory courses
    pub mandatory: CreditSplit,
    /// Credits from electives
    pub elective: CreditSplit,
    /// `earned / required * 100`, 0 when the curriculum requires no credits
    pub completion_percentage: f64,
    /// Credit-weighted GPA over all graded courses
    pub gpa: f64,
}

/// Measure passed credits against the curriculum
///
/// Each passed course counts once, even when several passing grade records
/// exist for it.
#[must_use]
pub fn track_progress(
    student: &Student,
    grades: &[ScoredGrade],
    curriculum: &Curriculum,
) -> ProgressReport {
    let mut seen = HashSet::new();
    let (mut mandatory_earned, mut elective_earned) = (0_u32, 0_u32);

    for grade in grades.iter().filter(|g| g.is_passed()) {
        if !seen.insert(grade.course_code.as_str()) {
            continue;
        }
        if grade.mandatory {
            mandatory_earned = mandatory_earned.saturating_add(grade.credits);
        } else {
            elective_earned = elective_earned.saturating_add(grade.credits);
        }
    }

    let earned = mandatory_earned.saturating_add(elective_earned);
    let completion_percentage = if curriculum.total_credits == 0 {
        0.0
    } else {
        f64::from(earned) / f64::from(curriculum.total_credits) * 100.0
    };

    ProgressReport {
        student_id: student.student_id.clone(),
        name: student.name.clone(),
        major: student.major.clone(),
        total: CreditSplit::new(curriculum.total_credits, earned),
        mandatory: CreditSplit::new(curriculum.mandatory_credits, mandatory_earned),
        elective: CreditSplit::new(curriculum.elective_credits, elective_earned),
        completion_percentage,
        gpa: weighted_gpa(grades),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grading::grade_status;
    use crate::core::models::Term;

    fn student() -> Student {
        Student::new("S1".into(), "Avery".into(), "CS".into(), 2023)
    }

    fn scored(code: &str, credits: u32, mandatory: bool, average: Option<f64>) -> ScoredGrade {
        ScoredGrade {
            course_code: code.to_string(),
            course_name: code.to_string(),
            credits,
            mandatory,
            term: Term::first_of(2023),
            average,
            status: grade_status(average),
        }
    }

    #[test]
    fn test_progress_splits_by_mandatory_flag() {
        let curriculum = Curriculum::new("CS", 30, 24, 6).unwrap();
        let grades = vec![
            scored("COMP101", 3, true, Some(8.0)),
            scored("COMP102", 4, true, Some(6.0)),
            scored("ENG101", 2, false, Some(7.0)),
            scored("MATH101", 4, true, Some(3.0)),
            scored("COMP201", 4, true, None),
        ];
        let report = track_progress(&student(), &grades, &curriculum);

        assert_eq!(report.total, CreditSplit::new(30, 9));
        assert_eq!(report.mandatory.earned, 7);
        assert_eq!(report.mandatory.remaining, 17);
        assert_eq!(report.elective.earned, 2);
        assert_eq!(report.elective.remaining, 4);
        assert!((report.completion_percentage - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_failed_course_not_counted() {
        let curriculum = Curriculum::new("CS", 10, 10, 0).unwrap();
        let grades = vec![scored("COMP201", 4, true, Some(4.0))];
        let report = track_progress(&student(), &grades, &curriculum);
        assert_eq!(report.total.earned, 0);
    }

    #[test]
    fn test_retaken_course_counted_once() {
        let curriculum = Curriculum::new("CS", 10, 10, 0).unwrap();
        let grades = vec![
            scored("COMP101", 3, true, Some(6.0)),
            scored("COMP101", 3, true, Some(9.0)),
        ];
        let report = track_progress(&student(), &grades, &curriculum);
        assert_eq!(report.total.earned, 3);
    }

    #[test]
    fn test_zero_total_credits_reports_zero_completion() {
        let curriculum = Curriculum::new("CS", 0, 0, 0).unwrap();
        let grades = vec![scored("COMP101", 3, true, Some(8.0))];
        let report = track_progress(&student(), &grades, &curriculum);
        assert!(report.completion_percentage.abs() < f64::EPSILON);
        assert_eq!(report.total.remaining, 0);
    }

    #[test]
    fn test_earned_credits_saturate() {
        let curriculum = Curriculum::new("CS", 10, 10, 0).unwrap();
        let grades = vec![
            scored("A", u32::MAX, true, Some(8.0)),
            scored("B", 3, false, Some(8.0)),
        ];
        let report = track_progress(&student(), &grades, &curriculum);
        assert_eq!(report.total.earned, u32::MAX);
        assert_eq!(report.total.remaining, 0);
    }

    #[test]
    fn test_gpa_included() {
        let curriculum = Curriculum::new("CS", 10, 10, 0).unwrap();
        let grades = vec![
            scored("A", 2, true, Some(8.0)),
            scored("B", 2, true, Some(6.0)),
        ];
        let report = track_progress(&student(), &grades, &curriculum);
        assert!((report.gpa - 7.0).abs() < 1e-9);
    }
}
