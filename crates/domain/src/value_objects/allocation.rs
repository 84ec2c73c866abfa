use crate::error::{AnalyticsError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Constraints bounding one optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationConstraints {
    /// Maximum acceptable strategy risk in `[0, 1]`.
    pub max_risk: f64,
    /// Minimum acceptable APY in percent.
    pub min_yield: f64,
    /// Per-strategy cap as a fraction of total capital, in `(0, 1]`.
    pub max_allocation_per_strategy: f64,
    /// Capital to allocate, strictly positive.
    pub total_capital: Decimal,
}

impl AllocationConstraints {
    pub fn validate(&self) -> Result<()> {
        if self.total_capital <= Decimal::ZERO {
            return Err(AnalyticsError::validation(
                "total capital must be positive",
            ));
        }
        if !self.max_allocation_per_strategy.is_finite()
            || self.max_allocation_per_strategy <= 0.0
            || self.max_allocation_per_strategy > 1.0
        {
            return Err(AnalyticsError::validation(format!(
                "max allocation per strategy must be within (0, 1], got {}",
                self.max_allocation_per_strategy
            )));
        }
        if !self.max_risk.is_finite() || !(0.0..=1.0).contains(&self.max_risk) {
            return Err(AnalyticsError::validation(format!(
                "max risk must be within [0, 1], got {}",
                self.max_risk
            )));
        }
        if !self.min_yield.is_finite() || self.min_yield < 0.0 {
            return Err(AnalyticsError::validation(format!(
                "min yield must be non-negative, got {}",
                self.min_yield
            )));
        }
        Ok(())
    }
}

/// One capital tranche assigned to a strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationResult {
    pub strategy_name: String,
    /// Allocated capital, non-negative.
    pub amount: Decimal,
    /// Share of total capital in percent.
    pub percentage: f64,
    /// Projected annual return on the allocated amount.
    pub expected_return: Decimal,
    /// The strategy's risk score, always within the run's `max_risk`.
    pub risk: f64,
    /// The strategy's APY in percent.
    pub apy: f64,
}

/// Aggregate figures over all emitted allocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioAllocationMetrics {
    pub total_allocated: Decimal,
    pub remaining_cash: Decimal,
    /// Capital-weighted APY in percent; zero when nothing was allocated.
    pub weighted_apy: f64,
    /// Sum of capital-weighted strategy risk contributions.
    pub portfolio_risk: f64,
}

/// Why an optimization run produced the allocations it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationStatus {
    /// At least one tranche was allocated.
    Allocated,
    /// No strategy survived the risk/yield filter.
    NoEligibleStrategies,
    /// Strategies were eligible but every tranche fell below the minimum
    /// allocation floor.
    NothingAboveFloor,
}

/// Full result of one optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationOutcome {
    pub allocations: Vec<AllocationResult>,
    pub metrics: PortfolioAllocationMetrics,
    pub status: AllocationStatus,
}
