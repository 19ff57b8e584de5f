//! Storage contracts consumed by the core
//!
//! The core never owns persistence. Callers hand it something implementing
//! [`RecordStore`] for reads and [`AlertStore`] for the alert log; keeping the
//! two apart lets a caller borrow records immutably while regenerating alerts.

use crate::core::error::Result;
use crate::core::models::{Attendance, Catalog, Course, Curriculum, Grade, Student, Term};
use crate::core::risk::RiskAlert;

/// Read access to academic records
pub trait RecordStore {
    /// Student by business identifier
    ///
    /// # Errors
    /// Returns `Storage` if the backend fails.
    fn student(&self, student_id: &str) -> Result<Option<Student>>;

    /// Every student
    ///
    /// # Errors
    /// Returns `Storage` if the backend fails.
    fn students(&self) -> Result<Vec<Student>>;

    /// Grade records of one student
    ///
    /// # Errors
    /// Returns `Storage` if the backend fails.
    fn grades_for(&self, student_id: &str) -> Result<Vec<Grade>>;

    /// Attendance records of one student
    ///
    /// # Errors
    /// Returns `Storage` if the backend fails.
    fn attendance_for(&self, student_id: &str) -> Result<Vec<Attendance>>;

    /// Course by code
    ///
    /// # Errors
    /// Returns `Storage` if the backend fails.
    fn course(&self, code: &str) -> Result<Option<Course>>;

    /// Catalog of one program, in stored order
    ///
    /// # Errors
    /// Returns `Storage` if the backend fails.
    fn courses_for_major(&self, major: &str) -> Result<Catalog>;

    /// Curriculum of one program
    ///
    /// # Errors
    /// Returns `Storage` if the backend fails.
    fn curriculum(&self, major: &str) -> Result<Option<Curriculum>>;
}

/// Term filter for listing alerts; `None` matches any value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertFilter {
    /// Semester to match
    pub semester: Option<u8>,
    /// Year to match
    pub year: Option<i32>,
}

impl AlertFilter {
    /// Filter matching exactly one term
    #[must_use]
    pub const fn term(term: Term) -> Self {
        Self {
            semester: Some(term.semester),
            year: Some(term.year),
        }
    }

    /// Whether `term` passes the filter
    #[must_use]
    pub fn matches(&self, term: Term) -> bool {
        self.semester.map_or(true, |s| s == term.semester)
            && self.year.map_or(true, |y| y == term.year)
    }
}

/// The risk alert log
pub trait AlertStore {
    /// Append one alert
    ///
    /// # Errors
    /// Returns `Storage` if the backend fails.
    fn insert_alert(&mut self, alert: RiskAlert) -> Result<()>;

    /// Delete every alert of `term` and insert `alerts` in its place
    ///
    /// Implementations must apply this as one unit: on failure the previous
    /// alerts of the term stay in place.
    ///
    /// # Errors
    /// Returns `Storage` if the backend fails.
    fn replace_term_alerts(&mut self, term: Term, alerts: Vec<RiskAlert>) -> Result<()>;

    /// Most recent alert of a student: latest term, then latest insertion
    ///
    /// # Errors
    /// Returns `Storage` if the backend fails.
    fn latest_alert(&self, student_id: &str) -> Result<Option<RiskAlert>>;

    /// Alerts matching `filter`, highest score first
    ///
    /// # Errors
    /// Returns `Storage` if the backend fails.
    fn list_alerts(&self, filter: AlertFilter) -> Result<Vec<RiskAlert>>;
}
