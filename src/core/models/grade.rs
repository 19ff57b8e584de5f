//! Grade model

use super::Term;
use crate::core::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest valid component score
pub const MIN_SCORE: f64 = 0.0;

/// Highest valid component score
pub const MAX_SCORE: f64 = 10.0;

/// Grade record for one (student, course) pair
///
/// Only raw component scores are stored; the average and status are always
/// derived by [`crate::core::grading`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    /// Business identifier of the student
    pub student_id: String,

    /// Code of the graded course
    pub course_code: String,

    /// Midterm score in `[0, 10]`, `None` while ungraded
    #[serde(default)]
    pub midterm: Option<f64>,

    /// Final exam score in `[0, 10]`, `None` while ungraded
    #[serde(default, rename = "final")]
    pub final_score: Option<f64>,

    /// Term the course was taken in
    pub term: Term,
}

impl Grade {
    /// Create a validated grade record
    ///
    /// # Errors
    /// Returns `InvalidInput` when a score lies outside `[0, 10]` or the term
    /// is invalid.
    pub fn new(
        student_id: &str,
        course_code: &str,
        midterm: Option<f64>,
        final_score: Option<f64>,
        term: Term,
    ) -> Result<Self> {
        let grade = Self {
            student_id: student_id.to_string(),
            course_code: course_code.to_string(),
            midterm,
            final_score,
            term,
        };
        grade.validate()?;
        Ok(grade)
    }

    /// Check the invariants of a grade built from raw fields
    ///
    /// # Errors
    /// Same conditions as [`Grade::new`].
    pub fn validate(&self) -> Result<()> {
        check_score("midterm", self.midterm)?;
        check_score("final", self.final_score)?;
        self.term.validate()
    }
}

fn check_score(field: &'static str, score: Option<f64>) -> Result<()> {
    match score {
        Some(value) if !(MIN_SCORE..=MAX_SCORE).contains(&value) => Err(CoreError::invalid(
            field,
            format!("{value} is outside [{MIN_SCORE}, {MAX_SCORE}]"),
        )),
        _ => Ok(()),
    }
}

/// Derived status of a grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeStatus {
    /// Midterm or final missing
    Ungraded,
    /// Average at or above the pass mark
    Pass,
    /// Average below the pass mark
    Fail,
}

impl fmt::Display for GradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ungraded => "ungraded",
            Self::Pass => "pass",
            Self::Fail => "fail",
        })
    }
}
