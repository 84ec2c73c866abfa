//! Greedy capital allocator under risk/yield constraints.

use defi_lp_domain::EngineConfig;
use defi_lp_domain::entities::Strategy;
use defi_lp_domain::error::{AnalyticsError, Result, decimal_from_f64};
use defi_lp_domain::value_objects::{
    AllocationConstraints, AllocationOutcome, AllocationResult, AllocationStatus,
    PortfolioAllocationMetrics,
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use std::cmp::Ordering;
use tracing::debug;

/// Smallest tranche worth allocating, in currency units. Tranches below
/// this floor are skipped rather than emitted as dust.
pub const MIN_ALLOCATION: Decimal = dec!(1000);

/// At most this fraction of the remaining capital goes to any one tranche.
const REMAINING_CAPITAL_FRACTION: Decimal = dec!(0.3);

/// Greedy allocator over scored strategies.
#[derive(Debug, Clone, Default)]
pub struct AllocationOptimizer {
    config: EngineConfig,
}

impl AllocationOptimizer {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Allocates capital across `strategies` under `constraints`.
    ///
    /// Strategies failing the `min_yield`/`max_risk` filter never receive
    /// capital, so every emitted allocation's risk is within the
    /// constraint envelope. An empty post-filter set is reported through
    /// [`AllocationStatus::NoEligibleStrategies`], not an error.
    pub fn optimize(
        &self,
        strategies: &[Strategy],
        constraints: &AllocationConstraints,
    ) -> Result<AllocationOutcome> {
        constraints.validate()?;
        for strategy in strategies {
            strategy.validate()?;
        }

        let mut eligible: Vec<&Strategy> = strategies
            .iter()
            .filter(|s| s.apy >= constraints.min_yield && s.risk <= constraints.max_risk)
            .collect();
        if eligible.is_empty() {
            debug!(
                candidates = strategies.len(),
                "no strategy passed the risk/yield filter"
            );
            return Ok(Self::empty_outcome(
                constraints,
                AllocationStatus::NoEligibleStrategies,
            ));
        }

        // Stable sort keeps input order among equal scores.
        eligible.sort_by(|a, b| {
            score(b)
                .partial_cmp(&score(a))
                .unwrap_or(Ordering::Equal)
        });

        let total = constraints.total_capital;
        let per_strategy_cap = total
            * decimal_from_f64(
                constraints.max_allocation_per_strategy,
                "per-strategy allocation cap",
            )?;

        let mut remaining = total;
        let mut allocations: Vec<AllocationResult> = Vec::new();
        let mut portfolio_risk = 0.0;

        for strategy in eligible {
            if remaining <= Decimal::ZERO {
                break;
            }
            let tranche = remaining
                .min(per_strategy_cap)
                .min(remaining * REMAINING_CAPITAL_FRACTION)
                .round_dp(self.config.precision);
            if tranche < MIN_ALLOCATION {
                debug!(strategy = %strategy.name, %tranche, "tranche below floor, skipped");
                continue;
            }

            let weight = (tranche / total).to_f64().ok_or_else(|| {
                AnalyticsError::calculation("allocation weight is not representable")
            })?;
            let expected_return =
                (tranche * decimal_from_f64(strategy.apy / 100.0, "APY factor")?)
                    .round_dp(self.config.precision);

            debug!(strategy = %strategy.name, %tranche, "allocated");
            allocations.push(AllocationResult {
                strategy_name: strategy.name.clone(),
                amount: tranche,
                percentage: weight * 100.0,
                expected_return,
                risk: strategy.risk,
                apy: strategy.apy,
            });
            portfolio_risk += weight * strategy.risk;
            remaining -= tranche;
        }

        if allocations.is_empty() {
            return Ok(Self::empty_outcome(
                constraints,
                AllocationStatus::NothingAboveFloor,
            ));
        }

        let total_allocated = total - remaining;
        let total_return: Decimal = allocations.iter().map(|a| a.expected_return).sum();
        let weighted_apy = (total_return / total_allocated * Decimal::ONE_HUNDRED)
            .to_f64()
            .ok_or_else(|| AnalyticsError::calculation("weighted APY is not representable"))?;

        Ok(AllocationOutcome {
            allocations,
            metrics: PortfolioAllocationMetrics {
                total_allocated,
                remaining_cash: remaining,
                weighted_apy,
                portfolio_risk,
            },
            status: AllocationStatus::Allocated,
        })
    }

    fn empty_outcome(
        constraints: &AllocationConstraints,
        status: AllocationStatus,
    ) -> AllocationOutcome {
        AllocationOutcome {
            allocations: Vec::new(),
            metrics: PortfolioAllocationMetrics {
                total_allocated: Decimal::ZERO,
                remaining_cash: constraints.total_capital,
                weighted_apy: 0.0,
                portfolio_risk: 0.0,
            },
            status,
        }
    }
}

/// Risk-adjusted, liquidity-boosted desirability score.
///
/// Zero-risk strategies rank ahead of everything else but remain subject
/// to the same allocation caps.
fn score(strategy: &Strategy) -> f64 {
    if strategy.risk > 0.0 {
        (strategy.apy / strategy.risk) * (1.0 + strategy.liquidity / 100.0)
    } else {
        f64::INFINITY
    }
}
