//! Attendance model

use super::Term;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status recorded for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// Attended on time
    Present,
    /// Attended late (counts as attended)
    Late,
    /// Did not attend
    Absent,
}

impl AttendanceStatus {
    /// Whether the session counts toward the attendance rate
    #[must_use]
    pub const fn attended(self) -> bool {
        matches!(self, Self::Present | Self::Late)
    }
}

/// Attendance for one (student, course, session date) triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    /// Business identifier of the student
    pub student_id: String,
    /// Code of the course the session belongs to
    pub course_code: String,
    /// Session date
    pub date: NaiveDate,
    /// Recorded status
    pub status: AttendanceStatus,
    /// Term of the session
    pub term: Term,
}

impl Attendance {
    /// Create an attendance record
    #[must_use]
    pub fn new(
        student_id: &str,
        course_code: &str,
        date: NaiveDate,
        status: AttendanceStatus,
        term: Term,
    ) -> Self {
        Self {
            student_id: student_id.to_string(),
            course_code: course_code.to_string(),
            date,
            status,
            term,
        }
    }
}
