//! Risk alerts and their stored breakdown

use super::features::RiskFeatures;
use super::scoring::{RiskAssessment, RiskLevel};
use crate::core::error::Result;
use crate::core::models::{Student, Term};
use serde::{Deserialize, Serialize};

/// Everything that produced an alert, as stored alongside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    /// Score in `[0, 100]`
    pub score: f64,
    /// Level derived from the score
    pub level: RiskLevel,
    /// Triggered rule descriptions
    pub factors: Vec<String>,
    /// Feature vector the score was computed from
    pub features: RiskFeatures,
}

/// Immutable risk record of one student for one term
///
/// Fields are only readable; a changed assessment means a new alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAlert {
    student_id: String,
    term: Term,
    score: f64,
    level: RiskLevel,
    /// JSON-encoded [`RiskBreakdown`]
    breakdown: String,
}

impl RiskAlert {
    /// Create an alert from a scored feature vector
    ///
    /// # Errors
    /// Returns `Payload` if the breakdown cannot be encoded.
    pub fn new(
        student_id: &str,
        term: Term,
        features: &RiskFeatures,
        assessment: RiskAssessment,
    ) -> Result<Self> {
        let breakdown = RiskBreakdown {
            score: assessment.score,
            level: assessment.level,
            factors: assessment.factors,
            features: *features,
        };
        Ok(Self {
            student_id: student_id.to_string(),
            term,
            score: breakdown.score,
            level: breakdown.level,
            breakdown: serde_json::to_string(&breakdown)?,
        })
    }

    /// Student business identifier
    #[must_use]
    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    /// Term the alert was generated for
    #[must_use]
    pub const fn term(&self) -> Term {
        self.term
    }

    /// Score in `[0, 100]`
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// Level derived from the score
    #[must_use]
    pub const fn level(&self) -> RiskLevel {
        self.level
    }

    /// Breakdown exactly as stored
    #[must_use]
    pub fn breakdown_json(&self) -> &str {
        &self.breakdown
    }

    /// Decode the stored breakdown
    ///
    /// # Errors
    /// Returns `Payload` if the stored JSON is malformed.
    pub fn breakdown(&self) -> Result<RiskBreakdown> {
        Ok(serde_json::from_str(&self.breakdown)?)
    }
}

/// Latest alert of a student, decoded for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertPayload {
    /// Student business identifier
    pub student_id: String,
    /// Student display name
    pub name: String,
    /// Alert score
    pub score: f64,
    /// Alert level
    pub level: RiskLevel,
    /// Alert term
    pub term: Term,
    /// Decoded breakdown
    pub breakdown: RiskBreakdown,
}

impl AlertPayload {
    /// Decode an alert of `student`
    ///
    /// # Errors
    /// Returns `Payload` if the alert's breakdown is malformed.
    pub fn new(student: &Student, alert: &RiskAlert) -> Result<Self> {
        Ok(Self {
            student_id: student.student_id.clone(),
            name: student.name.clone(),
            score: alert.score(),
            level: alert.level(),
            term: alert.term(),
            breakdown: alert.breakdown()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::CoreError;
    use crate::core::risk::scoring::score_features;

    fn features() -> RiskFeatures {
        RiskFeatures {
            overall_gpa: 4.2,
            last_gpa: 3.5,
            previous_gpa: 5.0,
            gpa_trend: -1.5,
            failed_count: 2,
            failed_credits: 7,
            attendance_rate: 62.5,
            latest_term_credits: 21,
        }
    }

    #[test]
    fn test_breakdown_round_trip() {
        let features = features();
        let assessment = score_features(&features);
        let alert = RiskAlert::new("S1", Term::first_of(2024), &features, assessment.clone())
            .unwrap();

        let decoded = alert.breakdown().unwrap();
        assert!((decoded.score - assessment.score).abs() < 1e-9);
        assert_eq!(decoded.level, assessment.level);
        assert_eq!(decoded.factors, assessment.factors);
        assert_eq!(decoded.features, features);
        assert!((alert.score() - assessment.score).abs() < f64::EPSILON);
    }

    #[test]
    fn test_breakdown_is_json_object() {
        let features = features();
        let alert =
            RiskAlert::new("S1", Term::first_of(2024), &features, score_features(&features))
                .unwrap();
        let value: serde_json::Value = serde_json::from_str(alert.breakdown_json()).unwrap();
        assert!(value.get("factors").is_some_and(serde_json::Value::is_array));
        assert_eq!(value["level"], "medium");
        assert_eq!(value["features"]["failed_count"], 2);
    }

    #[test]
    fn test_malformed_breakdown() {
        let features = features();
        let alert =
            RiskAlert::new("S1", Term::first_of(2024), &features, score_features(&features))
                .unwrap();
        // A stored alert whose breakdown was damaged on disk
        let mut value = serde_json::to_value(&alert).unwrap();
        value["breakdown"] = serde_json::Value::String("{not json".to_string());
        let damaged: RiskAlert = serde_json::from_value(value).unwrap();
        assert!(matches!(damaged.breakdown(), Err(CoreError::Payload(_))));
    }

    #[test]
    fn test_accessors_and_stored_shape() {
        let features = features();
        let alert =
            RiskAlert::new("S1", Term::first_of(2024), &features, score_features(&features))
                .unwrap();
        assert_eq!(alert.student_id(), "S1");
        assert_eq!(alert.term(), Term::first_of(2024));
        assert_eq!(alert.level(), RiskLevel::Medium);

        // Private fields keep their on-disk names
        let value = serde_json::to_value(&alert).unwrap();
        for key in ["student_id", "term", "score", "level", "breakdown"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        let reloaded: RiskAlert = serde_json::from_value(value).unwrap();
        assert_eq!(reloaded, alert);
    }

    #[test]
    fn test_payload_carries_student_name() {
        let student = Student::new("S1".into(), "Avery".into(), "CS".into(), 2023);
        let features = features();
        let alert =
            RiskAlert::new("S1", Term::first_of(2024), &features, score_features(&features))
                .unwrap();
        let payload = AlertPayload::new(&student, &alert).unwrap();
        assert_eq!(payload.name, "Avery");
        assert_eq!(payload.term, Term::first_of(2024));
        assert_eq!(payload.breakdown.features.latest_term_credits, 21);
    }
}
