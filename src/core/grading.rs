//! Grade derivation: attendance component, course average, status and GPA
//!
//! Everything here is a pure function of its inputs. The average computed by
//! [`course_average`] is the ground truth every other component builds on.

use crate::core::models::{Attendance, AttendanceStatus, Catalog, Grade, GradeStatus, Term};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Average at or above which a course is passed
pub const PASS_MARK: f64 = 5.0;

/// Attendance rate assumed when no sessions were recorded
pub const NO_SESSIONS_RATE: f64 = 100.0;

/// Weight of the attendance component in the course average
pub const ATTENDANCE_WEIGHT: f64 = 0.1;

/// Weight of the midterm score in the course average
pub const MIDTERM_WEIGHT: f64 = 0.3;

/// Weight of the final score in the course average
pub const FINAL_WEIGHT: f64 = 0.6;

/// Session counts for a set of attendance records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceStats {
    /// Number of recorded sessions
    pub total_sessions: usize,
    /// Sessions attended on time
    pub present: usize,
    /// Sessions attended late
    pub late: usize,
    /// Sessions missed
    pub absent: usize,
}

impl AttendanceStats {
    /// Count sessions by status
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Attendance>) -> Self {
        records
            .into_iter()
            .fold(Self::default(), |mut stats, record| {
                stats.total_sessions += 1;
                match record.status {
                    AttendanceStatus::Present => stats.present += 1,
                    AttendanceStatus::Late => stats.late += 1,
                    AttendanceStatus::Absent => stats.absent += 1,
                }
                stats
            })
    }

    /// Count sessions of one student in one course
    #[must_use]
    pub fn for_course(attendance: &[Attendance], student_id: &str, course_code: &str) -> Self {
        Self::from_records(
            attendance
                .iter()
                .filter(|a| a.student_id == student_id && a.course_code == course_code),
        )
    }

    /// Attendance rate in percent: `(present + late) / total * 100`
    ///
    /// Returns [`NO_SESSIONS_RATE`] when no session was recorded.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rate(&self) -> f64 {
        if self.total_sessions == 0 {
            NO_SESSIONS_RATE
        } else {
            (self.present + self.late) as f64 / self.total_sessions as f64 * 100.0
        }
    }
}

/// Map an attendance rate (percent) to the attendance component score
#[must_use]
pub fn attendance_component(rate: f64) -> f64 {
    if rate >= 80.0 {
        10.0
    } else if rate >= 70.0 {
        8.0
    } else if rate >= 60.0 {
        6.0
    } else if rate >= 50.0 {
        4.0
    } else {
        0.0
    }
}

/// Course average from its components
///
/// `None` unless both midterm and final are present.
#[must_use]
pub fn course_average(
    midterm: Option<f64>,
    final_score: Option<f64>,
    attendance_rate: f64,
) -> Option<f64> {
    let (midterm, final_score) = (midterm?, final_score?);
    Some(
        ATTENDANCE_WEIGHT * attendance_component(attendance_rate)
            + MIDTERM_WEIGHT * midterm
            + FINAL_WEIGHT * final_score,
    )
}

/// Status for a derived average
#[must_use]
pub fn grade_status(average: Option<f64>) -> GradeStatus {
    match average {
        None => GradeStatus::Ungraded,
        Some(avg) if avg >= PASS_MARK => GradeStatus::Pass,
        Some(_) => GradeStatus::Fail,
    }
}

/// Derived average and status of one grade record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeOutcome {
    /// Course average, `None` while ungraded
    pub average: Option<f64>,
    /// Status derived from the average
    pub status: GradeStatus,
}

/// Evaluate one grade against the student's attendance for that course
#[must_use]
pub fn evaluate(grade: &Grade, attendance: &[Attendance]) -> GradeOutcome {
    let rate = AttendanceStats::for_course(attendance, &grade.student_id, &grade.course_code).rate();
    let average = course_average(grade.midterm, grade.final_score, rate);
    GradeOutcome {
        average,
        status: grade_status(average),
    }
}

/// A grade joined with its course and derived outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredGrade {
    /// Course code
    pub course_code: String,
    /// Course name
    pub course_name: String,
    /// Course credits
    pub credits: u32,
    /// Whether the course is mandatory
    pub mandatory: bool,
    /// Term the grade belongs to
    pub term: Term,
    /// Course average, `None` while ungraded
    pub average: Option<f64>,
    /// Derived status
    pub status: GradeStatus,
}

impl ScoredGrade {
    /// Whether the grade has a defined average
    #[must_use]
    pub const fn is_graded(&self) -> bool {
        self.average.is_some()
    }

    /// Whether the grade is a pass
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.status == GradeStatus::Pass
    }
}

/// Score every grade of a student
///
/// Grades whose course is missing from `catalog` are skipped and logged,
/// since they carry no credit information.
#[must_use]
pub fn score_grades(grades: &[Grade], catalog: &Catalog, attendance: &[Attendance]) -> Vec<ScoredGrade> {
    grades
        .iter()
        .filter_map(|grade| {
            let Some(course) = catalog.get_course(&grade.course_code) else {
                crate::warn!(
                    "Grade of {} references unknown course {}; skipped",
                    grade.student_id,
                    grade.course_code
                );
                return None;
            };
            let outcome = evaluate(grade, attendance);
            Some(ScoredGrade {
                course_code: course.code.clone(),
                course_name: course.name.clone(),
                credits: course.credits,
                mandatory: course.mandatory,
                term: grade.term,
                average: outcome.average,
                status: outcome.status,
            })
        })
        .collect()
}

/// Sum of credits, saturating at `u32::MAX`
#[must_use]
pub fn total_credits<'a>(grades: impl IntoIterator<Item = &'a ScoredGrade>) -> u32 {
    grades
        .into_iter()
        .fold(0, |sum, g| sum.saturating_add(g.credits))
}

/// Credit-weighted average over graded entries
///
/// Ungraded entries are ignored; returns 0.0 when no graded credits exist.
#[must_use]
pub fn weighted_gpa<'a>(grades: impl IntoIterator<Item = &'a ScoredGrade>) -> f64 {
    let (points, credits) = grades
        .into_iter()
        .filter_map(|g| g.average.map(|avg| (avg, g.credits)))
        .fold((0.0_f64, 0_u32), |(points, credits), (avg, c)| {
            (points + avg * f64::from(c), credits.saturating_add(c))
        });

    if credits == 0 {
        0.0
    } else {
        points / f64::from(credits)
    }
}

/// Codes of all courses with at least one passing grade
#[must_use]
pub fn passed_courses(grades: &[ScoredGrade]) -> HashSet<String> {
    grades
        .iter()
        .filter(|g| g.is_passed())
        .map(|g| g.course_code.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Course;
    use chrono::NaiveDate;

    fn term() -> Term {
        Term::first_of(2023)
    }

    fn session(course: &str, day: u32, status: AttendanceStatus) -> Attendance {
        Attendance::new(
            "S1",
            course,
            NaiveDate::from_ymd_opt(2023, 9, day).unwrap(),
            status,
            term(),
        )
    }

    fn scored(code: &str, credits: u32, average: Option<f64>) -> ScoredGrade {
        ScoredGrade {
            course_code: code.to_string(),
            course_name: code.to_string(),
            credits,
            mandatory: true,
            term: term(),
            average,
            status: grade_status(average),
        }
    }

    #[test]
    fn test_attendance_component_steps() {
        assert!((attendance_component(100.0) - 10.0).abs() < f64::EPSILON);
        assert!((attendance_component(80.0) - 10.0).abs() < f64::EPSILON);
        assert!((attendance_component(79.9) - 8.0).abs() < f64::EPSILON);
        assert!((attendance_component(70.0) - 8.0).abs() < f64::EPSILON);
        assert!((attendance_component(60.0) - 6.0).abs() < f64::EPSILON);
        assert!((attendance_component(50.0) - 4.0).abs() < f64::EPSILON);
        assert!(attendance_component(49.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_formula() {
        for (m, f, rate) in [(7.5, 8.0, 100.0), (3.0, 4.5, 65.0), (0.0, 10.0, 10.0)] {
            let expected = 0.1 * attendance_component(rate) + 0.3 * m + 0.6 * f;
            assert_eq!(course_average(Some(m), Some(f), rate), Some(expected));
        }
    }

    #[test]
    fn test_average_undefined_when_component_missing() {
        assert_eq!(course_average(None, Some(8.0), 100.0), None);
        assert_eq!(course_average(Some(8.0), None, 100.0), None);
        assert_eq!(course_average(None, None, 100.0), None);
    }

    #[test]
    fn test_status_boundaries() {
        assert_eq!(grade_status(Some(5.0)), GradeStatus::Pass);
        assert_eq!(grade_status(Some(4.999_999)), GradeStatus::Fail);
        assert_eq!(grade_status(None), GradeStatus::Ungraded);
    }

    #[test]
    fn test_attendance_stats_rate() {
        let records = vec![
            session("COMP101", 1, AttendanceStatus::Present),
            session("COMP101", 2, AttendanceStatus::Late),
            session("COMP101", 3, AttendanceStatus::Absent),
            session("COMP101", 4, AttendanceStatus::Present),
        ];
        let stats = AttendanceStats::from_records(&records);
        assert_eq!(stats.total_sessions, 4);
        assert_eq!(stats.present, 2);
        assert_eq!(stats.late, 1);
        assert_eq!(stats.absent, 1);
        assert!((stats.rate() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_sessions_means_full_attendance() {
        let stats = AttendanceStats::for_course(&[], "S1", "COMP101");
        assert!((stats.rate() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_evaluate_uses_only_course_sessions() {
        let grade = Grade::new("S1", "COMP101", Some(5.0), Some(5.0), term()).unwrap();
        // Absences in another course must not lower this course's component
        let attendance = vec![
            session("MATH101", 1, AttendanceStatus::Absent),
            session("MATH101", 2, AttendanceStatus::Absent),
        ];
        let outcome = evaluate(&grade, &attendance);
        assert_eq!(outcome.average, course_average(Some(5.0), Some(5.0), 100.0));
        assert_eq!(outcome.status, GradeStatus::Pass);

        let attendance = vec![
            session("COMP101", 1, AttendanceStatus::Absent),
            session("COMP101", 2, AttendanceStatus::Absent),
        ];
        let outcome = evaluate(&grade, &attendance);
        assert_eq!(outcome.average, course_average(Some(5.0), Some(5.0), 0.0));
        assert_eq!(outcome.status, GradeStatus::Fail);
    }

    #[test]
    fn test_score_grades_skips_unknown_courses() {
        let catalog = Catalog::from_courses(vec![Course::new("COMP101", "Intro", 3, "CS").unwrap()]);
        let grades = vec![
            Grade::new("S1", "COMP101", Some(7.0), Some(7.0), term()).unwrap(),
            Grade::new("S1", "GONE", Some(7.0), Some(7.0), term()).unwrap(),
        ];
        let scored = score_grades(&grades, &catalog, &[]);
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].credits, 3);
        assert!(scored[0].is_passed());
    }

    #[test]
    fn test_gpa_is_credit_weighted() {
        let grades = vec![scored("A", 4, Some(8.0)), scored("B", 2, Some(5.0))];
        assert!((weighted_gpa(&grades) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_gpa_ignores_ungraded_and_empty() {
        assert!(weighted_gpa(&Vec::<ScoredGrade>::new()).abs() < f64::EPSILON);
        let grades = vec![scored("A", 3, None)];
        assert!(weighted_gpa(&grades).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gpa_invariant_under_reordering_and_zero_credit() {
        let mut grades = vec![
            scored("A", 4, Some(8.0)),
            scored("B", 3, Some(4.0)),
            scored("C", 2, Some(6.5)),
        ];
        let base = weighted_gpa(&grades);

        grades.reverse();
        assert!((weighted_gpa(&grades) - base).abs() < 1e-12);

        grades.push(scored("Z", 0, Some(1.0)));
        assert!((weighted_gpa(&grades) - base).abs() < 1e-12);
    }

    #[test]
    fn test_credit_totals_saturate() {
        let grades = vec![scored("A", u32::MAX, Some(8.0)), scored("B", 3, Some(6.0))];
        assert_eq!(total_credits(&grades), u32::MAX);
        assert!(weighted_gpa(&grades).is_finite());
    }

    #[test]
    fn test_passed_courses() {
        let grades = vec![
            scored("A", 3, Some(8.0)),
            scored("B", 3, Some(4.0)),
            scored("C", 3, None),
        ];
        let passed = passed_courses(&grades);
        assert_eq!(passed.len(), 1);
        assert!(passed.contains("A"));
    }
}
