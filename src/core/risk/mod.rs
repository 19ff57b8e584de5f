//! Rule-based academic risk analysis
//!
//! [`extract_features`] turns a student's records into a [`RiskFeatures`]
//! vector, [`score_features`] turns that into a clamped score and level, and
//! [`assess_student`] wraps both into an immutable [`RiskAlert`].

pub mod alert;
pub mod features;
pub mod scoring;

pub use alert::{AlertPayload, RiskAlert, RiskBreakdown};
pub use features::{extract_features, RiskFeatures};
pub use scoring::{score_features, RiskAssessment, RiskLevel};

use crate::core::error::Result;
use crate::core::grading::ScoredGrade;
use crate::core::models::{Attendance, Term};

/// Compute the alert of one student for `term`
///
/// # Errors
/// Returns `Payload` if the breakdown cannot be encoded.
pub fn assess_student(
    student_id: &str,
    term: Term,
    grades: &[ScoredGrade],
    attendance: &[Attendance],
) -> Result<RiskAlert> {
    let features = extract_features(grades, attendance);
    let assessment = score_features(&features);
    crate::debug!(
        "Risk for {student_id} in {term}: {:.1} ({})",
        assessment.score,
        assessment.level
    );
    RiskAlert::new(student_id, term, &features, assessment)
}
