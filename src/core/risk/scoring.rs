//! Rule-based risk score
//!
//! | Condition                  | Contribution                   | Cap |
//! |----------------------------|--------------------------------|-----|
//! | GPA < 5.5                  | (5.5 - GPA) x 6                | -   |
//! | trend < -0.3               | abs(trend) x 20                | 15  |
//! | failed courses             | count x 6 + failed credits     | 20  |
//! | attendance < 75%           | (75 - rate) x 0.4              | 20  |
//! | latest term credits >= 20  | 8                              | 8   |
//!
//! The sum is clamped to `[0, 100]`.

use super::features::RiskFeatures;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// GPA below which the GPA gap rule applies
pub const GPA_THRESHOLD: f64 = 5.5;
/// Points per GPA point below [`GPA_THRESHOLD`]
pub const GPA_GAP_WEIGHT: f64 = 6.0;
/// Trend below which the declining trend rule applies
pub const TREND_THRESHOLD: f64 = -0.3;
/// Points per GPA point of decline
pub const TREND_WEIGHT: f64 = 20.0;
/// Cap of the declining trend rule
pub const TREND_CAP: f64 = 15.0;
/// Points per failed course
pub const FAILED_COURSE_WEIGHT: f64 = 6.0;
/// Cap of the failed courses rule
pub const FAILED_CAP: f64 = 20.0;
/// Attendance rate below which the attendance rule applies
pub const ATTENDANCE_THRESHOLD: f64 = 75.0;
/// Points per attendance percent below [`ATTENDANCE_THRESHOLD`]
pub const ATTENDANCE_WEIGHT: f64 = 0.4;
/// Cap of the attendance rule
pub const ATTENDANCE_CAP: f64 = 20.0;
/// Latest term credits at or above which the load rule applies
pub const HEAVY_LOAD_CREDITS: u32 = 20;
/// Flat points of the load rule
pub const HEAVY_LOAD_POINTS: f64 = 8.0;
/// Lowest score of a high risk
pub const HIGH_RISK_SCORE: f64 = 60.0;
/// Lowest score of a medium risk
pub const MEDIUM_RISK_SCORE: f64 = 35.0;

/// Categorical risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Score below 35
    Low,
    /// Score from 35 up to 60
    Medium,
    /// Score of 60 or more
    High,
}

impl RiskLevel {
    /// Level for a clamped score
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_RISK_SCORE {
            Self::High
        } else if score >= MEDIUM_RISK_SCORE {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown risk level: {s}")),
        }
    }
}

/// Score, level and the factors that produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Score in `[0, 100]`
    pub score: f64,
    /// Level derived from the score
    pub level: RiskLevel,
    /// One human-readable line per triggered rule
    pub factors: Vec<String>,
}

/// Score a feature vector
#[must_use]
pub fn score_features(features: &RiskFeatures) -> RiskAssessment {
    let mut score = 0.0;
    let mut factors = Vec::new();

    if features.overall_gpa < GPA_THRESHOLD {
        score += (GPA_THRESHOLD - features.overall_gpa) * GPA_GAP_WEIGHT;
        factors.push(format!("Low GPA ({:.2})", features.overall_gpa));
    }

    if features.gpa_trend < TREND_THRESHOLD {
        score += (features.gpa_trend.abs() * TREND_WEIGHT).min(TREND_CAP);
        factors.push(format!("Declining GPA trend ({:.2})", features.gpa_trend));
    }

    if features.failed_count > 0 {
        #[allow(clippy::cast_precision_loss)]
        let failed = features.failed_count as f64 * FAILED_COURSE_WEIGHT
            + f64::from(features.failed_credits);
        score += failed.min(FAILED_CAP);
        factors.push(format!(
            "{} failed course(s) ({} credits)",
            features.failed_count, features.failed_credits
        ));
    }

    if features.attendance_rate < ATTENDANCE_THRESHOLD {
        score += ((ATTENDANCE_THRESHOLD - features.attendance_rate) * ATTENDANCE_WEIGHT)
            .min(ATTENDANCE_CAP);
        factors.push(format!("Low attendance ({:.1}%)", features.attendance_rate));
    }

    if features.latest_term_credits >= HEAVY_LOAD_CREDITS {
        score += HEAVY_LOAD_POINTS;
        factors.push(format!(
            "Heavy course load ({} credits)",
            features.latest_term_credits
        ));
    }

    let score = score.clamp(0.0, 100.0);
    RiskAssessment {
        score,
        level: RiskLevel::from_score(score),
        factors,
    }
}
