//! Impermanent loss modeling for constant product pools.

use defi_lp_domain::EngineConfig;
use defi_lp_domain::entities::{PoolState, Scenario};
use defi_lp_domain::enums::RiskLevel;
use defi_lp_domain::error::{AnalyticsError, Result, decimal_from_f64, ensure_finite};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of one price-shift scenario applied to a pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub name: String,
    /// Shifted token0 price.
    pub token0_price: Decimal,
    /// Shifted token1 price.
    pub token1_price: Decimal,
    /// New price ratio divided by the initial price ratio.
    pub price_ratio_change: f64,
    /// Impermanent loss magnitude in percent.
    pub il_percent: f64,
    /// Re-derived token0 reserve preserving `x * y = k`.
    pub new_token0_amount: Decimal,
    /// Re-derived token1 reserve preserving `x * y = k`.
    pub new_token1_amount: Decimal,
    /// LP position value at shifted prices.
    pub pool_value: Decimal,
    /// Value had the tokens simply been held, unswapped.
    pub hold_value: Decimal,
    /// `pool_value - hold_value`.
    pub divergence: Decimal,
    pub severity: RiskLevel,
}

/// Multi-scenario impermanent loss simulation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IlSimulation {
    /// Pool TVL at unshifted prices.
    pub initial_value: Decimal,
    pub scenarios: Vec<ScenarioOutcome>,
    pub overall_risk_level: RiskLevel,
}

/// Impermanent loss calculator.
#[derive(Debug, Clone, Default)]
pub struct ImpermanentLossEngine {
    config: EngineConfig,
}

impl ImpermanentLossEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Closed-form impermanent loss for a price-ratio shift.
    ///
    /// With `r = current_ratio / initial_ratio`:
    /// `IL = 2 * sqrt(r) / (1 + r) - 1`, reported as `|IL| * 100`.
    /// Identical ratios produce exactly zero, and the result is symmetric
    /// under `r -> 1/r`.
    pub fn impermanent_loss(&self, initial_ratio: f64, current_ratio: f64) -> Result<f64> {
        if !initial_ratio.is_finite() || initial_ratio <= 0.0 {
            return Err(AnalyticsError::validation(
                "initial price ratio must be positive",
            ));
        }
        if !current_ratio.is_finite() || current_ratio <= 0.0 {
            return Err(AnalyticsError::validation(
                "current price ratio must be positive",
            ));
        }

        let r = current_ratio / initial_ratio;
        let il = 2.0 * r.sqrt() / (1.0 + r) - 1.0;
        ensure_finite(il.abs() * 100.0, "impermanent loss")
    }

    /// Re-simulates a pool under a set of named price-shift scenarios.
    ///
    /// For each scenario the pool composition is re-derived on the shocked
    /// price ratio while holding the constant product `k` fixed, as if the
    /// pool had repriced instantaneously without intermediate arbitrage
    /// trades. This mirrors the documented model; real pools converge to
    /// the new ratio through trades against the curve.
    pub fn advanced_impermanent_loss(
        &self,
        pool: &PoolState,
        scenarios: &[Scenario],
    ) -> Result<IlSimulation> {
        pool.validate()?;
        for scenario in scenarios {
            scenario.validate()?;
        }

        let initial_value = pool.total_value();
        let initial_ratio = pool.price_ratio()?;
        let k = pool
            .constant_product()
            .to_f64()
            .ok_or_else(|| AnalyticsError::calculation("constant product is not representable"))?;

        let mut outcomes = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            outcomes.push(self.run_scenario(pool, scenario, initial_ratio, k)?);
        }

        let overall_risk_level = overall_risk(&outcomes);
        debug!(
            scenarios = outcomes.len(),
            level = %overall_risk_level,
            "impermanent loss simulation complete"
        );

        Ok(IlSimulation {
            initial_value,
            scenarios: outcomes,
            overall_risk_level,
        })
    }

    fn run_scenario(
        &self,
        pool: &PoolState,
        scenario: &Scenario,
        initial_ratio: f64,
        k: f64,
    ) -> Result<ScenarioOutcome> {
        let token0_price =
            pool.token0_price * decimal_from_f64(1.0 + scenario.token0_price_delta, "price shift")?;
        let token1_price =
            pool.token1_price * decimal_from_f64(1.0 + scenario.token1_price_delta, "price shift")?;

        let shifted_ratio = (token0_price / token1_price)
            .to_f64()
            .ok_or_else(|| AnalyticsError::calculation("shifted price ratio is not representable"))?;
        let price_ratio_change = shifted_ratio / initial_ratio;
        let il_percent = self.impermanent_loss(initial_ratio, shifted_ratio)?;

        // Re-solve the composition on the shocked ratio with k held fixed.
        let new_token0 = ensure_finite((k * shifted_ratio).sqrt(), "re-derived token0 reserve")?;
        let new_token1 = ensure_finite(k / new_token0, "re-derived token1 reserve")?;
        let new_token0_amount = decimal_from_f64(new_token0, "re-derived token0 reserve")?;
        let new_token1_amount = decimal_from_f64(new_token1, "re-derived token1 reserve")?;

        let pool_value = (new_token0_amount * token0_price + new_token1_amount * token1_price)
            .round_dp(self.config.precision);
        let hold_value = (pool.token0_amount * token0_price + pool.token1_amount * token1_price)
            .round_dp(self.config.precision);

        Ok(ScenarioOutcome {
            name: scenario.name.clone(),
            token0_price,
            token1_price,
            price_ratio_change,
            il_percent,
            new_token0_amount,
            new_token1_amount,
            pool_value,
            hold_value,
            divergence: pool_value - hold_value,
            severity: severity(il_percent),
        })
    }
}

/// Severity of a single scenario: `|IL| > 20%` High, `> 10%` Medium, else Low.
fn severity(il_percent: f64) -> RiskLevel {
    if il_percent > 20.0 {
        RiskLevel::High
    } else if il_percent > 10.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Aggregates scenario severities: two High scenarios make the pool High
/// risk; one High or two Medium make it Medium; anything less is Low.
fn overall_risk(outcomes: &[ScenarioOutcome]) -> RiskLevel {
    let high = outcomes
        .iter()
        .filter(|o| o.severity == RiskLevel::High)
        .count();
    let medium = outcomes
        .iter()
        .filter(|o| o.severity == RiskLevel::Medium)
        .count();

    if high >= 2 {
        RiskLevel::High
    } else if high >= 1 || medium >= 2 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn engine() -> ImpermanentLossEngine {
        ImpermanentLossEngine::new(EngineConfig::default())
    }

    fn sample_pool() -> PoolState {
        // 100 token0 at 100, 10000 token1 at 1; k = 1e6, ratio = 100.
        PoolState::new(dec!(100), dec!(10000), dec!(100), dec!(1))
    }

    #[test]
    fn unchanged_ratio_has_zero_loss() {
        let engine = engine();
        for r in [0.5, 1.0, 2.0, 100.0] {
            assert_eq!(engine.impermanent_loss(r, r).unwrap(), 0.0);
        }
    }

    #[test]
    fn doubling_loses_about_5_72_percent() {
        let il = engine().impermanent_loss(100.0, 200.0).unwrap();
        assert!((il - 5.719).abs() < 0.001);
    }

    #[test]
    fn loss_is_symmetric_under_ratio_inversion() {
        let engine = engine();
        let up = engine.impermanent_loss(1.0, 2.0).unwrap();
        let down = engine.impermanent_loss(1.0, 0.5).unwrap();
        assert!((up - down).abs() < 1e-12);
    }

    #[test]
    fn non_positive_ratios_are_rejected() {
        let engine = engine();
        assert!(engine.impermanent_loss(0.0, 1.0).is_err());
        assert!(engine.impermanent_loss(1.0, -2.0).is_err());
    }

    #[test]
    fn scenarios_preserve_constant_product() {
        let pool = sample_pool();
        let scenarios = vec![
            Scenario::new("token0 +100%", 1.0, 0.0),
            Scenario::new("token0 -50%", -0.5, 0.0),
            Scenario::new("both +20%", 0.2, 0.2),
        ];
        let result = engine().advanced_impermanent_loss(&pool, &scenarios).unwrap();

        let k = pool.constant_product().to_f64().unwrap();
        for outcome in &result.scenarios {
            let product = (outcome.new_token0_amount * outcome.new_token1_amount)
                .to_f64()
                .unwrap();
            assert!(
                (product - k).abs() / k < 1e-9,
                "k drifted in scenario {}",
                outcome.name
            );
        }
    }

    #[test]
    fn equal_shift_on_both_tokens_is_lossless() {
        let result = engine()
            .advanced_impermanent_loss(&sample_pool(), &[Scenario::new("both +20%", 0.2, 0.2)])
            .unwrap();
        let outcome = &result.scenarios[0];
        assert!((outcome.price_ratio_change - 1.0).abs() < 1e-12);
        assert!(outcome.il_percent < 1e-9);
        assert_eq!(outcome.severity, RiskLevel::Low);
    }

    #[test]
    fn scenario_math_matches_closed_form() {
        // token0 halves: ratio change 0.5, IL about 5.72%, hold value 15000.
        let result = engine()
            .advanced_impermanent_loss(&sample_pool(), &[Scenario::new("token0 -50%", -0.5, 0.0)])
            .unwrap();
        assert_eq!(result.initial_value, dec!(20000));

        let outcome = &result.scenarios[0];
        assert_eq!(outcome.token0_price, dec!(50));
        assert!((outcome.price_ratio_change - 0.5).abs() < 1e-12);
        assert!((outcome.il_percent - 5.719).abs() < 0.001);
        assert_eq!(outcome.hold_value, dec!(15000));
        assert_eq!(outcome.divergence, outcome.pool_value - outcome.hold_value);
    }

    #[test]
    fn severity_tiers() {
        assert_eq!(severity(5.7), RiskLevel::Low);
        assert_eq!(severity(13.4), RiskLevel::Medium);
        assert_eq!(severity(30.0), RiskLevel::High);
    }

    #[test]
    fn overall_level_aggregation() {
        let engine = engine();
        let pool = sample_pool();

        // ratio x6 => ~30% IL (High); x3 => ~13% (Medium); x2 => ~5.7% (Low)
        let high = Scenario::new("x6", 5.0, 0.0);
        let medium = Scenario::new("x3", 2.0, 0.0);
        let low = Scenario::new("x2", 1.0, 0.0);

        let two_high = engine
            .advanced_impermanent_loss(&pool, &[high.clone(), high.clone(), low.clone()])
            .unwrap();
        assert_eq!(two_high.overall_risk_level, RiskLevel::High);

        let one_high = engine
            .advanced_impermanent_loss(&pool, &[high.clone(), low.clone()])
            .unwrap();
        assert_eq!(one_high.overall_risk_level, RiskLevel::Medium);

        let two_medium = engine
            .advanced_impermanent_loss(&pool, &[medium.clone(), medium.clone()])
            .unwrap();
        assert_eq!(two_medium.overall_risk_level, RiskLevel::Medium);

        let calm = engine
            .advanced_impermanent_loss(&pool, &[low.clone(), medium])
            .unwrap();
        assert_eq!(calm.overall_risk_level, RiskLevel::Low);
    }

    #[test]
    fn full_price_collapse_is_rejected() {
        let result = engine()
            .advanced_impermanent_loss(&sample_pool(), &[Scenario::new("rug", -1.0, 0.0)]);
        assert!(matches!(result, Err(AnalyticsError::Validation(_))));
    }
}
