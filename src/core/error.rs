//! Error type shared by the academic core

use std::fmt;
use thiserror::Error;

/// Kind of record a lookup failed to find
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// Student, keyed by business identifier
    Student,
    /// Course, keyed by course code
    Course,
    /// Curriculum, keyed by major
    Curriculum,
    /// Risk alert, keyed by student identifier
    Alert,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Student => "student",
            Self::Course => "course",
            Self::Curriculum => "curriculum",
            Self::Alert => "risk alert",
        })
    }
}

/// Errors reported by core operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A required record does not exist
    #[error("{entity} '{key}' not found")]
    NotFound {
        /// What was looked up
        entity: Entity,
        /// The key that was used
        key: String,
    },

    /// Input rejected before any computation
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        /// Offending field name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// The storage collaborator failed to apply a change
    #[error("storage error: {0}")]
    Storage(String),

    /// A risk alert breakdown could not be encoded or decoded
    #[error("alert payload: {0}")]
    Payload(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Payload(err.to_string())
    }
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`]
    pub fn not_found(entity: Entity, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// Shorthand for [`CoreError::InvalidInput`]
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Whether this error reports a missing record
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias used throughout the core
pub type Result<T> = std::result::Result<T, CoreError>;
