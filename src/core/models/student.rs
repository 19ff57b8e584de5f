//! Student model

use crate::core::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// A student record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Unique business identifier (e.g., "2023CN001")
    pub student_id: String,

    /// Display name
    pub name: String,

    /// Program / major the student is enrolled in
    pub major: String,

    /// Year the student entered the program
    pub entry_year: i32,

    /// Administrative class (e.g., "CN1")
    #[serde(default)]
    pub class_name: Option<String>,
}

impl Student {
    /// Create a new student
    #[must_use]
    pub const fn new(student_id: String, name: String, major: String, entry_year: i32) -> Self {
        Self {
            student_id,
            name,
            major,
            entry_year,
            class_name: None,
        }
    }

    /// Set the administrative class
    #[must_use]
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Check the identifier and that the entry year is a four-digit year
    ///
    /// # Errors
    /// Returns `InvalidInput` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.student_id.trim().is_empty() {
            return Err(CoreError::invalid("student_id", "must not be empty"));
        }
        if !(1000..=9999).contains(&self.entry_year) {
            return Err(CoreError::invalid(
                "entry_year",
                format!("{} is not a four-digit year", self.entry_year),
            ));
        }
        Ok(())
    }
}
