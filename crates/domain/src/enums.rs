use crate::error::AnalyticsError;
use serde::{Deserialize, Serialize};

/// Three-tier risk classification used by every engine that scores risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Qualitative rating attached to a Sharpe ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SharpeRating {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl SharpeRating {
    /// Rates a Sharpe ratio: `>2` Excellent, `>1` Good, `>0.5` Fair, else Poor.
    pub fn from_ratio(sharpe: f64) -> Self {
        if sharpe > 2.0 {
            SharpeRating::Excellent
        } else if sharpe > 1.0 {
            SharpeRating::Good
        } else if sharpe > 0.5 {
            SharpeRating::Fair
        } else {
            SharpeRating::Poor
        }
    }
}

impl std::fmt::Display for SharpeRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SharpeRating::Poor => write!(f, "Poor"),
            SharpeRating::Fair => write!(f, "Fair"),
            SharpeRating::Good => write!(f, "Good"),
            SharpeRating::Excellent => write!(f, "Excellent"),
        }
    }
}

/// Supported VaR confidence levels with their one-sided normal z-scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    Ninety,
    NinetyFive,
    NinetyNine,
}

impl ConfidenceLevel {
    /// The confidence level as a fraction (0.90, 0.95, 0.99).
    pub fn value(&self) -> f64 {
        match self {
            ConfidenceLevel::Ninety => 0.90,
            ConfidenceLevel::NinetyFive => 0.95,
            ConfidenceLevel::NinetyNine => 0.99,
        }
    }

    /// One-sided z-score for the level.
    pub fn z_score(&self) -> f64 {
        match self {
            ConfidenceLevel::Ninety => 1.282,
            ConfidenceLevel::NinetyFive => 1.645,
            ConfidenceLevel::NinetyNine => 2.326,
        }
    }
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = AnalyticsError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        // Exact match only; VaR z-scores are tabulated, not interpolated.
        if value == 0.90 {
            Ok(ConfidenceLevel::Ninety)
        } else if value == 0.95 {
            Ok(ConfidenceLevel::NinetyFive)
        } else if value == 0.99 {
            Ok(ConfidenceLevel::NinetyNine)
        } else {
            Err(AnalyticsError::validation(format!(
                "confidence level must be one of 0.90, 0.95, 0.99, got {value}"
            )))
        }
    }
}
