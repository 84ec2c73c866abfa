use crate::enums::ConfidenceLevel;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Immutable configuration shared by the analytics engines.
///
/// Captured once at engine construction; engines never mutate it. All
/// fields have documented defaults so `EngineConfig::default()` is a
/// usable production configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Compounding frequency assumed when a caller does not specify one.
    pub default_compound_frequency: u32,
    /// Decimal digits retained on reported currency figures.
    pub precision: u32,
    /// Annual risk-free rate in percent, used for Sharpe ratios.
    pub risk_free_rate: f64,
    /// Confidence level for Value-at-Risk figures.
    pub confidence_level: ConfidenceLevel,
    /// Drawdown fraction above which a price series is flagged.
    pub max_drawdown_threshold: f64,
    /// Daily volume in currency units below which an asset counts as illiquid.
    pub liquidity_threshold: Decimal,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_compound_frequency: 365, // daily
            precision: 18,
            risk_free_rate: 2.0, // 2% annual
            confidence_level: ConfidenceLevel::NinetyFive,
            max_drawdown_threshold: 0.2, // 20% peak-to-trough
            liquidity_threshold: Decimal::from(100_000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_values() {
        let config = EngineConfig::default();
        assert_eq!(config.default_compound_frequency, 365);
        assert_eq!(config.precision, 18);
        assert_eq!(config.risk_free_rate, 2.0);
        assert_eq!(config.confidence_level, ConfidenceLevel::NinetyFive);
        assert_eq!(config.max_drawdown_threshold, 0.2);
        assert_eq!(config.liquidity_threshold, Decimal::from(100_000));
    }
}
