//! Portfolio risk metrics.

use defi_lp_domain::EngineConfig;
use defi_lp_domain::entities::Portfolio;
use defi_lp_domain::enums::{ConfidenceLevel, RiskLevel, SharpeRating};
use defi_lp_domain::error::{AnalyticsError, Result, decimal_from_f64, ensure_finite};
use defi_lp_domain::value_objects::CorrelationTable;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Annualized volatility assumed for positions that do not report one.
pub const DEFAULT_VOLATILITY: f64 = 0.3;

/// Correlation-adjusted Value-at-Risk figures for a portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarReport {
    pub portfolio_value: Decimal,
    /// Annualized portfolio volatility as a fraction.
    pub portfolio_volatility: f64,
    /// One-day VaR in currency units.
    pub daily_var: Decimal,
    /// VaR over the requested horizon in currency units.
    pub period_var: Decimal,
    pub risk_level: RiskLevel,
}

/// Sharpe ratio with its qualitative rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharpeReport {
    pub sharpe_ratio: f64,
    /// Annual return minus the risk-free rate, in percent.
    pub excess_return: f64,
    pub rating: SharpeRating,
}

/// Maximum peak-to-trough decline of a price series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawdownReport {
    /// Deepest drawdown as a fraction of its peak.
    pub max_drawdown: f64,
    /// Index span from the peak that produced the drawdown to its trough.
    pub drawdown_period: (usize, usize),
    pub peak_value: Decimal,
    pub trough_value: Decimal,
}

/// Herfindahl concentration of portfolio weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcentrationReport {
    /// Sum of squared weights in `(0, 1]`.
    pub score: f64,
    pub level: RiskLevel,
}

/// Pairwise correlation exposure of a portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationReport {
    /// Largest absolute pairwise correlation.
    pub max_correlation: f64,
    /// Mean absolute pairwise correlation.
    pub average_correlation: f64,
    pub level: RiskLevel,
}

/// Stateless calculator for portfolio risk metrics.
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    config: EngineConfig,
}

impl RiskEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Parametric VaR from correlation-adjusted portfolio variance.
    ///
    /// Variance aggregates as
    /// `sum(w_i^2 s_i^2) + 2 * sum_{i<j}(w_i w_j s_i s_j rho_ij)` with
    /// annualized volatilities, then scales down to daily and out to the
    /// requested horizon by square-root-of-time.
    pub fn portfolio_var(
        &self,
        portfolio: &Portfolio,
        correlations: &CorrelationTable,
        confidence: ConfidenceLevel,
        horizon_days: u32,
    ) -> Result<VarReport> {
        if portfolio.is_empty() {
            return Err(AnalyticsError::validation("portfolio must not be empty"));
        }
        if horizon_days == 0 {
            return Err(AnalyticsError::validation(
                "horizon must be at least one day",
            ));
        }
        portfolio.validate()?;

        let weights = portfolio.weights()?;
        let sigmas: Vec<f64> = portfolio
            .positions
            .iter()
            .map(|p| p.volatility.unwrap_or(DEFAULT_VOLATILITY))
            .collect();

        let mut variance = 0.0;
        for i in 0..weights.len() {
            variance += weights[i].powi(2) * sigmas[i].powi(2);
            for j in (i + 1)..weights.len() {
                let rho = correlations.lookup(
                    &portfolio.positions[i].asset,
                    &portfolio.positions[j].asset,
                );
                variance += 2.0 * weights[i] * weights[j] * sigmas[i] * sigmas[j] * rho;
            }
        }
        // Anti-correlated legs can push the sum a few ulps below zero.
        let portfolio_volatility = ensure_finite(variance.max(0.0).sqrt(), "portfolio volatility")?;

        let daily_volatility = portfolio_volatility / 365.0_f64.sqrt();
        let period_volatility = daily_volatility * f64::from(horizon_days).sqrt();
        let z = confidence.z_score();

        let portfolio_value = portfolio.total_value();
        let daily_var = (portfolio_value * decimal_from_f64(daily_volatility * z, "daily VaR factor")?)
            .round_dp(self.config.precision);
        let period_var = (portfolio_value
            * decimal_from_f64(period_volatility * z, "period VaR factor")?)
        .round_dp(self.config.precision);

        let daily_loss_ratio = daily_volatility * z;
        let risk_level = if daily_loss_ratio > 0.05 {
            RiskLevel::High
        } else if daily_loss_ratio > 0.02 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };
        debug!(
            %portfolio_value,
            portfolio_volatility,
            level = %risk_level,
            "portfolio VaR computed"
        );

        Ok(VarReport {
            portfolio_value,
            portfolio_volatility,
            daily_var,
            period_var,
            risk_level,
        })
    }

    /// Sharpe ratio: excess annual return per unit of annual volatility.
    ///
    /// All three inputs are in percent.
    pub fn sharpe_ratio(
        &self,
        annual_return_pct: f64,
        risk_free_rate_pct: f64,
        annual_volatility_pct: f64,
    ) -> Result<SharpeReport> {
        for (name, value) in [
            ("annual return", annual_return_pct),
            ("risk-free rate", risk_free_rate_pct),
        ] {
            if !value.is_finite() {
                return Err(AnalyticsError::validation(format!("{name} must be finite")));
            }
        }
        if !annual_volatility_pct.is_finite() || annual_volatility_pct <= 0.0 {
            return Err(AnalyticsError::validation("volatility must be positive"));
        }

        let excess_return = annual_return_pct - risk_free_rate_pct;
        let sharpe_ratio = ensure_finite(excess_return / annual_volatility_pct, "Sharpe ratio")?;

        Ok(SharpeReport {
            sharpe_ratio,
            excess_return,
            rating: SharpeRating::from_ratio(sharpe_ratio),
        })
    }

    /// Maximum drawdown of a chronological price series in one scan.
    ///
    /// Series shorter than two points carry no drawdown and report zero.
    pub fn max_drawdown(&self, prices: &[Decimal]) -> Result<DrawdownReport> {
        if prices.iter().any(|p| *p <= Decimal::ZERO) {
            return Err(AnalyticsError::validation("prices must be positive"));
        }

        let first = prices.first().copied().unwrap_or(Decimal::ZERO);
        let mut report = DrawdownReport {
            max_drawdown: 0.0,
            drawdown_period: (0, 0),
            peak_value: first,
            trough_value: first,
        };
        if prices.len() < 2 {
            return Ok(report);
        }

        let mut peak = prices[0];
        let mut peak_index = 0;
        for (index, price) in prices.iter().copied().enumerate() {
            if price > peak {
                peak = price;
                peak_index = index;
            }
            let drawdown = ((peak - price) / peak)
                .to_f64()
                .ok_or_else(|| AnalyticsError::calculation("drawdown is not representable"))?;
            if drawdown > report.max_drawdown {
                report.max_drawdown = drawdown;
                report.drawdown_period = (peak_index, index);
                report.peak_value = peak;
                report.trough_value = price;
            }
        }

        Ok(report)
    }

    /// Herfindahl concentration index over portfolio weights.
    pub fn concentration_risk(&self, portfolio: &Portfolio) -> Result<ConcentrationReport> {
        let weights = portfolio.weights()?;
        let score: f64 = weights.iter().map(|w| w.powi(2)).sum();

        let level = if score > 0.5 {
            RiskLevel::High
        } else if score > 0.25 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        Ok(ConcentrationReport { score, level })
    }

    /// Pairwise correlation exposure over the distinct assets held.
    ///
    /// A single-asset portfolio has no pairs and reports zeros.
    pub fn correlation_risk(
        &self,
        portfolio: &Portfolio,
        correlations: &CorrelationTable,
    ) -> Result<CorrelationReport> {
        if portfolio.is_empty() {
            return Err(AnalyticsError::validation("portfolio must not be empty"));
        }

        let mut assets: Vec<&str> = Vec::new();
        for position in &portfolio.positions {
            if !assets.contains(&position.asset.as_str()) {
                assets.push(&position.asset);
            }
        }

        let mut max_correlation = 0.0_f64;
        let mut sum = 0.0;
        let mut pairs = 0usize;
        for i in 0..assets.len() {
            for j in (i + 1)..assets.len() {
                let rho = correlations.lookup(assets[i], assets[j]).abs();
                max_correlation = max_correlation.max(rho);
                sum += rho;
                pairs += 1;
            }
        }
        let average_correlation = if pairs > 0 { sum / pairs as f64 } else { 0.0 };

        let level = if max_correlation > 0.8 {
            RiskLevel::High
        } else if average_correlation > 0.5 {
            RiskLevel::High
        } else if average_correlation > 0.25 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        Ok(CorrelationReport {
            max_correlation,
            average_correlation,
            level,
        })
    }

    /// Assets whose reported daily volume falls below the configured
    /// liquidity threshold. Positions without volume data are not flagged.
    pub fn low_liquidity_positions(&self, portfolio: &Portfolio) -> Vec<String> {
        portfolio
            .positions
            .iter()
            .filter(|p| {
                p.daily_volume
                    .map(|v| v < self.config.liquidity_threshold)
                    .unwrap_or(false)
            })
            .map(|p| p.asset.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use defi_lp_domain::entities::Position;
    use rust_decimal_macros::dec;

    fn engine() -> RiskEngine {
        RiskEngine::new(EngineConfig::default())
    }

    fn position(asset: &str, value: Decimal, volatility: f64) -> Position {
        Position::new(asset, value, dec!(1)).with_volatility(volatility)
    }

    #[test]
    fn var_rejects_empty_portfolio() {
        let result = engine().portfolio_var(
            &Portfolio::default(),
            &CorrelationTable::new(),
            ConfidenceLevel::NinetyFive,
            1,
        );
        assert!(matches!(result, Err(AnalyticsError::Validation(_))));
    }

    #[test]
    fn single_asset_var_uses_its_volatility() {
        let portfolio = Portfolio::new(vec![position("SOL", dec!(15000), 0.6)]);
        let report = engine()
            .portfolio_var(
                &portfolio,
                &CorrelationTable::new(),
                ConfidenceLevel::NinetyFive,
                30,
            )
            .unwrap();

        assert_eq!(report.portfolio_value, dec!(15000));
        assert!((report.portfolio_volatility - 0.6).abs() < 1e-12);

        // daily vol 0.6/sqrt(365) = 0.031405..., z = 1.645
        let expected_daily = 15000.0 * (0.6 / 365.0_f64.sqrt()) * 1.645;
        let daily = report.daily_var.to_f64().unwrap();
        assert!((daily - expected_daily).abs() < 0.01);
        // 5.17% of value per day is high risk
        assert_eq!(report.risk_level, RiskLevel::High);

        let expected_period = expected_daily * 30.0_f64.sqrt();
        let period = report.period_var.to_f64().unwrap();
        assert!((period - expected_period).abs() < 0.01);
    }

    #[test]
    fn missing_volatility_defaults_to_30_percent() {
        let portfolio = Portfolio::new(vec![Position::new("USDT", dec!(10000), dec!(1))]);
        let report = engine()
            .portfolio_var(
                &portfolio,
                &CorrelationTable::new(),
                ConfidenceLevel::NinetyFive,
                1,
            )
            .unwrap();
        assert!((report.portfolio_volatility - DEFAULT_VOLATILITY).abs() < 1e-12);
        assert_eq!(report.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn perfect_correlation_matches_weighted_volatility_sum() {
        let portfolio = Portfolio::new(vec![
            position("A", dec!(5000), 0.4),
            position("B", dec!(5000), 0.2),
        ]);
        let mut table = CorrelationTable::new();
        table.set("A", "B", 1.0).unwrap();

        let report = engine()
            .portfolio_var(&portfolio, &table, ConfidenceLevel::NinetyFive, 1)
            .unwrap();
        // rho = 1 collapses the quadratic form to (0.5*0.4 + 0.5*0.2)^2
        assert!((report.portfolio_volatility - 0.3).abs() < 1e-12);
    }

    #[test]
    fn imperfect_correlation_reduces_portfolio_volatility() {
        let portfolio = Portfolio::new(vec![
            position("A", dec!(5000), 0.4),
            position("B", dec!(5000), 0.2),
        ]);
        let mut perfect = CorrelationTable::new();
        perfect.set("A", "B", 1.0).unwrap();
        let mut loose = CorrelationTable::new();
        loose.set("A", "B", 0.2).unwrap();

        let engine = engine();
        let tight = engine
            .portfolio_var(&portfolio, &perfect, ConfidenceLevel::NinetyFive, 1)
            .unwrap();
        let diversified = engine
            .portfolio_var(&portfolio, &loose, ConfidenceLevel::NinetyFive, 1)
            .unwrap();
        assert!(diversified.portfolio_volatility < tight.portfolio_volatility);
    }

    #[test]
    fn higher_confidence_widens_var() {
        let portfolio = Portfolio::new(vec![position("SOL", dec!(10000), 0.5)]);
        let engine = engine();
        let table = CorrelationTable::new();
        let p90 = engine
            .portfolio_var(&portfolio, &table, ConfidenceLevel::Ninety, 1)
            .unwrap();
        let p99 = engine
            .portfolio_var(&portfolio, &table, ConfidenceLevel::NinetyNine, 1)
            .unwrap();
        assert!(p99.daily_var > p90.daily_var);
    }

    #[test]
    fn sharpe_known_value() {
        let report = engine().sharpe_ratio(15.0, 2.0, 10.0).unwrap();
        assert!((report.sharpe_ratio - 1.3).abs() < 1e-12);
        assert!((report.excess_return - 13.0).abs() < 1e-12);
        assert_eq!(report.rating, SharpeRating::Good);
    }

    #[test]
    fn higher_risk_free_rate_lowers_sharpe() {
        let engine = engine();
        let low_rf = engine.sharpe_ratio(10.0, 1.0, 5.0).unwrap();
        let high_rf = engine.sharpe_ratio(10.0, 3.0, 5.0).unwrap();
        assert!(low_rf.sharpe_ratio > high_rf.sharpe_ratio);
    }

    #[test]
    fn sharpe_rejects_zero_volatility() {
        assert!(engine().sharpe_ratio(10.0, 2.0, 0.0).is_err());
    }

    #[test]
    fn short_series_have_zero_drawdown() {
        let engine = engine();
        let empty = engine.max_drawdown(&[]).unwrap();
        assert_eq!(empty.max_drawdown, 0.0);
        assert_eq!(empty.drawdown_period, (0, 0));

        let single = engine.max_drawdown(&[dec!(42)]).unwrap();
        assert_eq!(single.max_drawdown, 0.0);
        assert_eq!(single.peak_value, dec!(42));
        assert_eq!(single.trough_value, dec!(42));
    }

    #[test]
    fn monotone_series_has_zero_drawdown() {
        let prices = [dec!(100), dec!(100), dec!(105), dec!(110)];
        let report = engine().max_drawdown(&prices).unwrap();
        assert_eq!(report.max_drawdown, 0.0);
        assert_eq!(report.drawdown_period, (0, 0));
    }

    #[test]
    fn deepest_trough_wins() {
        let prices = [
            dec!(100),
            dec!(110),
            dec!(105),
            dec!(90),
            dec!(95),
            dec!(120),
            dec!(80),
            dec!(85),
        ];
        let report = engine().max_drawdown(&prices).unwrap();
        // global peak 120 at index 5, deepest trough 80 at index 6
        assert!((report.max_drawdown - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(report.peak_value, dec!(120));
        assert_eq!(report.trough_value, dec!(80));
        assert_eq!(report.drawdown_period, (5, 6));
    }

    #[test]
    fn drawdown_rejects_non_positive_prices() {
        assert!(engine().max_drawdown(&[dec!(100), dec!(0)]).is_err());
    }

    #[test]
    fn concentration_tiers() {
        let engine = engine();

        let solo = Portfolio::new(vec![position("A", dec!(1000), 0.3)]);
        let report = engine.concentration_risk(&solo).unwrap();
        assert!((report.score - 1.0).abs() < 1e-12);
        assert_eq!(report.level, RiskLevel::High);

        let skewed = Portfolio::new(vec![
            position("A", dec!(6000), 0.3),
            position("B", dec!(4000), 0.3),
        ]);
        let report = engine.concentration_risk(&skewed).unwrap();
        assert!((report.score - 0.52).abs() < 1e-12);
        assert_eq!(report.level, RiskLevel::High);

        let tilted = Portfolio::new(vec![
            position("A", dec!(4000), 0.3),
            position("B", dec!(3000), 0.3),
            position("C", dec!(3000), 0.3),
        ]);
        let report = engine.concentration_risk(&tilted).unwrap();
        assert!((report.score - 0.34).abs() < 1e-12);
        assert_eq!(report.level, RiskLevel::Medium);

        let spread = Portfolio::new(vec![
            position("A", dec!(2000), 0.3),
            position("B", dec!(2000), 0.3),
            position("C", dec!(2000), 0.3),
            position("D", dec!(2000), 0.3),
            position("E", dec!(2000), 0.3),
        ]);
        let report = engine.concentration_risk(&spread).unwrap();
        assert!((report.score - 0.2).abs() < 1e-12);
        assert_eq!(report.level, RiskLevel::Low);
    }

    #[test]
    fn correlation_risk_flags_tight_pairs() {
        let portfolio = Portfolio::new(vec![
            position("SOL", dec!(5000), 0.5),
            position("ETH", dec!(5000), 0.5),
        ]);
        let mut table = CorrelationTable::new();
        table.set("SOL", "ETH", 0.9).unwrap();

        let report = engine().correlation_risk(&portfolio, &table).unwrap();
        assert_eq!(report.max_correlation, 0.9);
        assert_eq!(report.level, RiskLevel::High);
    }

    #[test]
    fn correlation_risk_uses_absolute_values() {
        let portfolio = Portfolio::new(vec![
            position("SOL", dec!(5000), 0.5),
            position("SHORT-SOL", dec!(5000), 0.5),
        ]);
        let mut table = CorrelationTable::new();
        table.set("SOL", "SHORT-SOL", -0.9).unwrap();

        let report = engine().correlation_risk(&portfolio, &table).unwrap();
        assert_eq!(report.max_correlation, 0.9);
        assert_eq!(report.level, RiskLevel::High);
    }

    #[test]
    fn unknown_pairs_average_to_the_default() {
        let portfolio = Portfolio::new(vec![
            position("A", dec!(1000), 0.3),
            position("B", dec!(1000), 0.3),
            position("C", dec!(1000), 0.3),
        ]);
        let report = engine()
            .correlation_risk(&portfolio, &CorrelationTable::new())
            .unwrap();
        assert!((report.average_correlation - 0.3).abs() < 1e-12);
        assert_eq!(report.max_correlation, 0.3);
        assert_eq!(report.level, RiskLevel::Medium);
    }

    #[test]
    fn single_asset_portfolio_has_no_pairs() {
        let portfolio = Portfolio::new(vec![position("SOL", dec!(1000), 0.5)]);
        let report = engine()
            .correlation_risk(&portfolio, &CorrelationTable::new())
            .unwrap();
        assert_eq!(report.max_correlation, 0.0);
        assert_eq!(report.average_correlation, 0.0);
        assert_eq!(report.level, RiskLevel::Low);
    }

    #[test]
    fn low_liquidity_screen_uses_configured_threshold() {
        let portfolio = Portfolio::new(vec![
            Position::new("THIN", dec!(1000), dec!(1)).with_daily_volume(dec!(50000)),
            Position::new("DEEP", dec!(1000), dec!(1)).with_daily_volume(dec!(2000000)),
            Position::new("UNKNOWN", dec!(1000), dec!(1)),
        ]);
        let flagged = engine().low_liquidity_positions(&portfolio);
        assert_eq!(flagged, vec!["THIN".to_string()]);
    }
}
