//! Multi-term study roadmap
//!
//! The roadmap classifies every course of the student's program as
//! completed, in progress or remaining, then packs the remaining courses
//! into successive terms:
//! 1. Each remaining course gets a `prerequisites_met` flag computed once
//!    against the completed set
//! 2. Remaining courses are sorted once: met first, mandatory first, then by
//!    credits descending (stable, so catalog order breaks ties)
//! 3. Courses are packed in that order, opening the next regular term
//!    whenever the next course would push the current one past
//!    [`ROADMAP_TERM_CREDIT_CAP`]
//!
//! Flags are never re-evaluated against the terms being planned, so a course
//! can land in an earlier term than one of its own prerequisites.

use crate::core::grading::ScoredGrade;
use crate::core::models::{Catalog, Course, GradeStatus, Student, Term};
use crate::core::prereq::prerequisites_met;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashSet;

/// Credit cap per planned term, independent of the curriculum's bounds
pub const ROADMAP_TERM_CREDIT_CAP: u32 = 20;

/// Identification of the student a roadmap was built for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSummary {
    /// Student business identifier
    pub student_id: String,
    /// Display name
    pub name: String,
    /// Program / major
    pub major: String,
    /// Class or cohort, if recorded
    pub class_name: Option<String>,
    /// Entry year; the plan starts in its first semester
    pub entry_year: i32,
}

impl From<&Student> for StudentSummary {
    fn from(student: &Student) -> Self {
        Self {
            student_id: student.student_id.clone(),
            name: student.name.clone(),
            major: student.major.clone(),
            class_name: student.class_name.clone(),
            entry_year: student.entry_year,
        }
    }
}

/// A catalog course together with the grade that classified it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedCourse {
    /// Course code
    pub code: String,
    /// Course name
    pub name: String,
    /// Course credits
    pub credits: u32,
    /// Whether the course is mandatory
    pub mandatory: bool,
    /// Term of the grade record
    pub term: Term,
    /// Course average, `None` while ungraded
    pub average: Option<f64>,
    /// Grade status
    pub status: GradeStatus,
}

impl GradedCourse {
    fn new(course: &Course, grade: &ScoredGrade) -> Self {
        Self {
            code: course.code.clone(),
            name: course.name.clone(),
            credits: course.credits,
            mandatory: course.mandatory,
            term: grade.term,
            average: grade.average,
            status: grade.status,
        }
    }
}

/// A course with no grade record yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingCourse {
    /// Course code
    pub code: String,
    /// Course name
    pub name: String,
    /// Course credits
    pub credits: u32,
    /// Whether the course is mandatory
    pub mandatory: bool,
    /// Whether every prerequisite is already completed
    pub prerequisites_met: bool,
    /// Prerequisite course codes
    pub prerequisites: Vec<String>,
}

/// One term of the recommended path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedTerm {
    /// The term
    pub term: Term,
    /// Courses placed in the term, in placement order
    pub courses: Vec<RemainingCourse>,
    /// Sum of the placed courses' credits
    pub total_credits: u32,
}

/// Full study roadmap of one student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    /// The student
    pub student: StudentSummary,
    /// Courses with a passing grade
    pub completed: Vec<GradedCourse>,
    /// Courses with a grade record but no pass, with their latest grade
    pub in_progress: Vec<GradedCourse>,
    /// Courses without any grade record, in catalog order
    pub remaining: Vec<RemainingCourse>,
    /// Recommended path, in term order
    pub path: Vec<PlannedTerm>,
}

impl Roadmap {
    /// Total credits across the recommended path
    #[must_use]
    pub fn planned_credits(&self) -> u32 {
        self.path
            .iter()
            .fold(0, |sum, t| sum.saturating_add(t.total_credits))
    }

    /// Term the given course was placed in, if any
    #[must_use]
    pub fn term_of(&self, code: &str) -> Option<Term> {
        self.path
            .iter()
            .find(|t| t.courses.iter().any(|c| c.code == code))
            .map(|t| t.term)
    }
}

/// Build the roadmap of a student over their program's catalog
///
/// # Arguments
/// * `student` - The student; the plan starts at semester 1 of the entry year
/// * `catalog` - Courses of the student's program
/// * `grades` - The student's scored grades
#[must_use]
pub fn build_roadmap(student: &Student, catalog: &Catalog, grades: &[ScoredGrade]) -> Roadmap {
    let mut completed = Vec::new();
    let mut in_progress = Vec::new();
    let mut unrecorded: Vec<&Course> = Vec::new();

    for course in catalog {
        let records: Vec<&ScoredGrade> = grades
            .iter()
            .filter(|g| g.course_code == course.code)
            .collect();

        let passing = records.iter().filter(|g| g.is_passed()).max_by_key(|g| g.term);
        let latest = records.iter().max_by_key(|g| g.term);

        match (passing, latest) {
            (Some(grade), _) => completed.push(GradedCourse::new(course, grade)),
            (None, Some(grade)) => in_progress.push(GradedCourse::new(course, grade)),
            (None, None) => unrecorded.push(course),
        }
    }

    let completed_codes: HashSet<String> = completed.iter().map(|c| c.code.clone()).collect();
    let remaining: Vec<RemainingCourse> = unrecorded
        .into_iter()
        .map(|course| RemainingCourse {
            code: course.code.clone(),
            name: course.name.clone(),
            credits: course.credits,
            mandatory: course.mandatory,
            prerequisites_met: prerequisites_met(course, &completed_codes),
            prerequisites: course.prerequisites.clone(),
        })
        .collect();

    let path = pack_terms(Term::first_of(student.entry_year), &remaining);

    crate::debug!(
        "Roadmap for {}: {} completed, {} in progress, {} remaining over {} term(s)",
        student.student_id,
        completed.len(),
        in_progress.len(),
        remaining.len(),
        path.len()
    );

    Roadmap {
        student: StudentSummary::from(student),
        completed,
        in_progress,
        remaining,
        path,
    }
}

/// Pack remaining courses into terms starting at `start`
///
/// A term is only emitted once a course lands in it. The cursor advances
/// whenever the next course would exceed the cap, even if the current term
/// is still empty.
fn pack_terms(start: Term, remaining: &[RemainingCourse]) -> Vec<PlannedTerm> {
    let mut ordered: Vec<&RemainingCourse> = remaining.iter().collect();
    ordered.sort_by_key(|c| (!c.prerequisites_met, !c.mandatory, Reverse(c.credits)));

    let mut path: Vec<PlannedTerm> = Vec::new();
    let mut term = start;
    let mut credits = 0_u32;

    for course in ordered {
        if credits.saturating_add(course.credits) > ROADMAP_TERM_CREDIT_CAP {
            term = term.next_regular();
            credits = 0;
        }
        credits = credits.saturating_add(course.credits);

        match path.last_mut() {
            Some(planned) if planned.term == term => {
                planned.total_credits = planned.total_credits.saturating_add(course.credits);
                planned.courses.push(course.clone());
            }
            _ => path.push(PlannedTerm {
                term,
                courses: vec![course.clone()],
                total_credits: course.credits,
            }),
        }
    }

    path
}
