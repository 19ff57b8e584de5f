//! Academic performance breakdown by term

use crate::core::grading::{total_credits, weighted_gpa, ScoredGrade};
use crate::core::models::{GradeStatus, Student, Term};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Number of top courses listed in a performance report
pub const BEST_COURSE_COUNT: usize = 5;

/// One course result inside a term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseResult {
    /// Course code
    pub course_code: String,
    /// Course name
    pub course_name: String,
    /// Course credits
    pub credits: u32,
    /// Course average, `None` while ungraded
    pub average: Option<f64>,
    /// Derived status
    pub status: GradeStatus,
}

impl From<&ScoredGrade> for CourseResult {
    fn from(g: &ScoredGrade) -> Self {
        Self {
            course_code: g.course_code.clone(),
            course_name: g.course_name.clone(),
            credits: g.credits,
            average: g.average,
            status: g.status,
        }
    }
}

/// Results of one term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermPerformance {
    /// The term
    pub term: Term,
    /// Credits of graded courses in the term
    pub credits: u32,
    /// Credit-weighted average of graded courses in the term
    pub gpa: f64,
    /// Every course recorded in the term, graded or not
    pub courses: Vec<CourseResult>,
}

/// Full academic performance of one student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Student business identifier
    pub student_id: String,
    /// Student display name
    pub name: String,
    /// Program / major
    pub major: String,
    /// Entry year
    pub entry_year: i32,
    /// Credit-weighted GPA over all graded courses
    pub overall_gpa: f64,
    /// Credits of passed grade records
    pub credits_completed: u32,
    /// Credits of failed grade records
    pub credits_failed: u32,
    /// Credits of all graded records
    pub credits_attempted: u32,
    /// Number of failed grade records
    pub courses_failed: usize,
    /// Highest averages, best first
    pub best_courses: Vec<CourseResult>,
    /// Failed courses in record order
    pub failed_courses: Vec<CourseResult>,
    /// Per-term breakdown in chronological order
    pub terms: Vec<TermPerformance>,
}

/// Group grades by term in chronological order
#[must_use]
pub fn group_by_term(grades: &[ScoredGrade]) -> BTreeMap<Term, Vec<&ScoredGrade>> {
    let mut by_term: BTreeMap<Term, Vec<&ScoredGrade>> = BTreeMap::new();
    for grade in grades {
        by_term.entry(grade.term).or_default().push(grade);
    }
    by_term
}

/// Break a student's grades down by term and outcome
#[must_use]
pub fn analyze_performance(student: &Student, grades: &[ScoredGrade]) -> PerformanceReport {
    let terms = group_by_term(grades)
        .into_iter()
        .map(|(term, entries)| TermPerformance {
            term,
            credits: total_credits(entries.iter().copied().filter(|g| g.is_graded())),
            gpa: weighted_gpa(entries.iter().copied()),
            courses: entries.into_iter().map(CourseResult::from).collect(),
        })
        .collect();

    let sum_credits = |status: GradeStatus| -> u32 {
        total_credits(grades.iter().filter(|g| g.status == status))
    };

    let failed_courses: Vec<CourseResult> = grades
        .iter()
        .filter(|g| g.status == GradeStatus::Fail)
        .map(CourseResult::from)
        .collect();

    let mut graded: Vec<&ScoredGrade> = grades.iter().filter(|g| g.is_graded()).collect();
    graded.sort_by(|a, b| {
        b.average
            .partial_cmp(&a.average)
            .unwrap_or(Ordering::Equal)
    });
    let best_courses = graded
        .into_iter()
        .take(BEST_COURSE_COUNT)
        .map(CourseResult::from)
        .collect();

    PerformanceReport {
        student_id: student.student_id.clone(),
        name: student.name.clone(),
        major: student.major.clone(),
        entry_year: student.entry_year,
        overall_gpa: weighted_gpa(grades),
        credits_completed: sum_credits(GradeStatus::Pass),
        credits_failed: sum_credits(GradeStatus::Fail),
        credits_attempted: total_credits(grades.iter().filter(|g| g.is_graded())),
        courses_failed: failed_courses.len(),
        best_courses,
        failed_courses,
        terms,
    }
}
