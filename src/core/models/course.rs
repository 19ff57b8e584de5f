//! Course model

use crate::core::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Represents a course in a program catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course code (e.g., "COMP101")
    pub code: String,

    /// Course name (e.g., "Data Structures")
    pub name: String,

    /// Credit count, `1..=MAX_COURSE_CREDITS`
    pub credits: u32,

    /// Whether the course is mandatory for its program
    #[serde(default = "default_mandatory")]
    pub mandatory: bool,

    /// Program / major the course belongs to
    pub major: String,

    /// Recommended term number within the program, if any
    #[serde(default)]
    pub recommended_term: Option<u32>,

    /// Prerequisites stored as course codes
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

/// Largest credit count a single course may carry
pub const MAX_COURSE_CREDITS: u32 = 60;

const fn default_mandatory() -> bool {
    true
}

impl Course {
    /// Create a new mandatory course without prerequisites
    ///
    /// # Errors
    /// Returns `InvalidInput` when `credits` is outside `1..=MAX_COURSE_CREDITS`
    /// or the code is blank.
    pub fn new(code: &str, name: &str, credits: u32, major: &str) -> Result<Self> {
        let course = Self {
            code: code.to_string(),
            name: name.to_string(),
            credits,
            mandatory: true,
            major: major.to_string(),
            recommended_term: None,
            prerequisites: Vec::new(),
        };
        course.validate()?;
        Ok(course)
    }

    /// Check the invariants of a course built from raw fields
    ///
    /// # Errors
    /// Returns `InvalidInput` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(CoreError::invalid("code", "course code must not be empty"));
        }
        if self.credits == 0 {
            return Err(CoreError::invalid(
                "credits",
                format!("course {} must have a positive credit count", self.code),
            ));
        }
        if self.credits > MAX_COURSE_CREDITS {
            return Err(CoreError::invalid(
                "credits",
                format!(
                    "course {} has {} credits, more than {MAX_COURSE_CREDITS}",
                    self.code, self.credits
                ),
            ));
        }
        Ok(())
    }

    /// Mark the course as an elective
    #[must_use]
    pub const fn elective(mut self) -> Self {
        self.mandatory = false;
        self
    }

    /// Set the recommended term
    #[must_use]
    pub const fn recommended_in(mut self, term: u32) -> Self {
        self.recommended_term = Some(term);
        self
    }

    /// Add a prerequisite by course code
    pub fn add_prerequisite(&mut self, prereq_code: &str) {
        if !self.prerequisites.iter().any(|p| p == prereq_code) {
            self.prerequisites.push(prereq_code.to_string());
        }
    }

    /// Builder form of [`add_prerequisite`](Self::add_prerequisite)
    #[must_use]
    pub fn requires(mut self, prereq_code: &str) -> Self {
        self.add_prerequisite(prereq_code);
        self
    }
}
