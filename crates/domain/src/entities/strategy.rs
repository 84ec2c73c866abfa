use crate::error::{AnalyticsError, Result};
use serde::{Deserialize, Serialize};

/// A candidate yield strategy offered to the allocation optimizer.
///
/// Immutable input: the optimizer reads it, never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Strategy {
    /// Human-readable strategy name, unique within one optimization run.
    pub name: String,
    /// Advertised annual percentage yield, in percent.
    pub apy: f64,
    /// Normalized risk score in `[0, 1]`.
    pub risk: f64,
    /// Liquidity score in `[0, 100]`.
    pub liquidity: f64,
}

impl Strategy {
    pub fn new(name: impl Into<String>, apy: f64, risk: f64, liquidity: f64) -> Self {
        Self {
            name: name.into(),
            apy,
            risk,
            liquidity,
        }
    }

    /// Checks field ranges before the strategy enters an optimization run.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(AnalyticsError::validation("strategy name must not be empty"));
        }
        if !self.apy.is_finite() || self.apy < 0.0 {
            return Err(AnalyticsError::validation(format!(
                "strategy {}: APY must be non-negative, got {}",
                self.name, self.apy
            )));
        }
        if !self.risk.is_finite() || !(0.0..=1.0).contains(&self.risk) {
            return Err(AnalyticsError::validation(format!(
                "strategy {}: risk must be within [0, 1], got {}",
                self.name, self.risk
            )));
        }
        if !self.liquidity.is_finite() || !(0.0..=100.0).contains(&self.liquidity) {
            return Err(AnalyticsError::validation(format!(
                "strategy {}: liquidity must be within [0, 100], got {}",
                self.name, self.liquidity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_well_formed_strategy() {
        assert!(Strategy::new("stable-lp", 8.5, 0.2, 90.0).validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_fields() {
        assert!(Strategy::new("a", -1.0, 0.2, 50.0).validate().is_err());
        assert!(Strategy::new("b", 10.0, 1.5, 50.0).validate().is_err());
        assert!(Strategy::new("c", 10.0, 0.5, 120.0).validate().is_err());
        assert!(Strategy::new("", 10.0, 0.5, 50.0).validate().is_err());
        assert!(Strategy::new("d", f64::NAN, 0.5, 50.0).validate().is_err());
    }
}
