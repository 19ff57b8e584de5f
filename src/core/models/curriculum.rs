//! Curriculum model

use crate::core::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Default minimum credits per term
pub const DEFAULT_MIN_CREDITS_PER_TERM: u32 = 10;

/// Default maximum credits per term
pub const DEFAULT_MAX_CREDITS_PER_TERM: u32 = 25;

/// Credit requirements of a program (one per major)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curriculum {
    /// Program / major this curriculum describes
    pub major: String,
    /// Credits required to graduate
    pub total_credits: u32,
    /// Credits that must come from mandatory courses
    pub mandatory_credits: u32,
    /// Credits that must come from electives
    pub elective_credits: u32,
    /// Lowest credit load allowed in one term
    #[serde(default = "default_min")]
    pub min_credits_per_term: u32,
    /// Highest credit load allowed in one term
    #[serde(default = "default_max")]
    pub max_credits_per_term: u32,
}

const fn default_min() -> u32 {
    DEFAULT_MIN_CREDITS_PER_TERM
}

const fn default_max() -> u32 {
    DEFAULT_MAX_CREDITS_PER_TERM
}

impl Curriculum {
    /// Create a curriculum with the default per-term bounds
    ///
    /// # Errors
    /// Returns `InvalidInput` when the per-term bounds are inconsistent.
    pub fn new(
        major: &str,
        total_credits: u32,
        mandatory_credits: u32,
        elective_credits: u32,
    ) -> Result<Self> {
        let curriculum = Self {
            major: major.to_string(),
            total_credits,
            mandatory_credits,
            elective_credits,
            min_credits_per_term: DEFAULT_MIN_CREDITS_PER_TERM,
            max_credits_per_term: DEFAULT_MAX_CREDITS_PER_TERM,
        };
        curriculum.validate()?;
        Ok(curriculum)
    }

    /// Replace the per-term credit bounds
    ///
    /// # Errors
    /// Returns `InvalidInput` when `min > max` or `max` is zero.
    pub fn with_term_bounds(mut self, min: u32, max: u32) -> Result<Self> {
        self.min_credits_per_term = min;
        self.max_credits_per_term = max;
        self.validate()?;
        Ok(self)
    }

    /// Check the invariants of a curriculum built from raw fields
    ///
    /// # Errors
    /// Returns `InvalidInput` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.max_credits_per_term == 0 {
            return Err(CoreError::invalid(
                "max_credits_per_term",
                "must be positive",
            ));
        }
        if self.min_credits_per_term > self.max_credits_per_term {
            return Err(CoreError::invalid(
                "min_credits_per_term",
                format!(
                    "{} exceeds max_credits_per_term {}",
                    self.min_credits_per_term, self.max_credits_per_term
                ),
            ));
        }
        Ok(())
    }
}
