//! Academic term key

use crate::core::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest semester number accepted (two regular semesters plus a summer term)
pub const MAX_SEMESTER: u8 = 3;

/// An academic period identified by `(year, semester)`
///
/// Field order matters: the derived ordering compares the year first and
/// the semester second, which is chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Term {
    /// Four-digit academic year
    pub year: i32,
    /// Semester number within the year (1-based)
    pub semester: u8,
}

impl Term {
    /// Create a validated term
    ///
    /// # Errors
    /// Returns `InvalidInput` when the semester is outside `1..=3` or the
    /// year is not a four-digit number.
    pub fn new(semester: u8, year: i32) -> Result<Self> {
        let term = Self { year, semester };
        term.validate()?;
        Ok(term)
    }

    /// Check the invariants of a term built from raw fields
    ///
    /// # Errors
    /// Same conditions as [`Term::new`].
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_SEMESTER).contains(&self.semester) {
            return Err(CoreError::invalid(
                "semester",
                format!("{} is outside 1..={MAX_SEMESTER}", self.semester),
            ));
        }
        if !(1000..=9999).contains(&self.year) {
            return Err(CoreError::invalid(
                "year",
                format!("{} is not a four-digit year", self.year),
            ));
        }
        Ok(())
    }

    /// First regular semester of a year
    #[must_use]
    pub const fn first_of(year: i32) -> Self {
        Self { year, semester: 1 }
    }

    /// Next regular semester, alternating 1 and 2
    ///
    /// Semester 2 (and the summer term) wrap to semester 1 of the next year.
    #[must_use]
    pub const fn next_regular(self) -> Self {
        if self.semester == 1 {
            Self {
                year: self.year,
                semester: 2,
            }
        } else {
            Self {
                year: self.year + 1,
                semester: 1,
            }
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Semester {} - {}", self.semester, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_ordering_is_chronological() {
        let mut terms = vec![
            Term::new(1, 2024).unwrap(),
            Term::new(2, 2023).unwrap(),
            Term::new(1, 2023).unwrap(),
            Term::new(3, 2023).unwrap(),
        ];
        terms.sort();
        assert_eq!(
            terms,
            vec![
                Term::first_of(2023),
                Term {
                    year: 2023,
                    semester: 2
                },
                Term {
                    year: 2023,
                    semester: 3
                },
                Term::first_of(2024),
            ]
        );
    }

    #[test]
    fn test_invalid_semester_rejected() {
        let err = Term::new(4, 2023).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidInput {
                field: "semester",
                ..
            }
        ));
        assert!(Term::new(0, 2023).is_err());
    }

    #[test]
    fn test_invalid_year_rejected() {
        let err = Term::new(1, 23).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { field: "year", .. }));
    }

    #[test]
    fn test_next_regular_alternates() {
        let t = Term::first_of(2023);
        assert_eq!(
            t.next_regular(),
            Term {
                year: 2023,
                semester: 2
            }
        );
        assert_eq!(t.next_regular().next_regular(), Term::first_of(2024));
    }

    #[test]
    fn test_display() {
        assert_eq!(Term::first_of(2025).to_string(), "Semester 1 - 2025");
    }
}
