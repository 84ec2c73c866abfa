//! Composes engine outputs into a single analysis report.

use defi_lp_analytics::impermanent_loss::{IlSimulation, ImpermanentLossEngine};
use defi_lp_analytics::risk::{
    ConcentrationReport, CorrelationReport, DrawdownReport, RiskEngine, SharpeReport, VarReport,
};
use defi_lp_analytics::yields::{FarmingParams, FarmingYield, YieldEngine};
use defi_lp_domain::EngineConfig;
use defi_lp_domain::entities::{PoolState, Portfolio, Scenario, Strategy};
use defi_lp_domain::error::Result;
use defi_lp_domain::value_objects::{AllocationConstraints, AllocationOutcome, CorrelationTable};
use defi_lp_optimization::AllocationOptimizer;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything one analysis run needs, resolved by the caller up front.
///
/// The assembler never fetches data: the portfolio, pool, price history,
/// and strategy list arrive as validated in-memory snapshots (see
/// `defi-lp-data` for the provider boundary).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub portfolio: Portfolio,
    pub correlations: CorrelationTable,
    /// Chronological daily prices used for drawdown analysis.
    pub price_series: Vec<Decimal>,
    pub pool: PoolState,
    pub scenarios: Vec<Scenario>,
    pub farming: FarmingParams,
    pub strategies: Vec<Strategy>,
    pub constraints: AllocationConstraints,
    /// VaR horizon in days.
    pub horizon_days: u32,
}

/// Merged output of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub farming: FarmingYield,
    pub impermanent_loss: IlSimulation,
    pub value_at_risk: VarReport,
    pub drawdown: DrawdownReport,
    /// Whether the observed drawdown breaches the configured threshold.
    pub drawdown_exceeds_threshold: bool,
    pub concentration: ConcentrationReport,
    pub correlation: CorrelationReport,
    /// Assets trading below the configured liquidity threshold.
    pub low_liquidity_assets: Vec<String>,
    /// Sharpe of the allocated portfolio; absent when nothing was
    /// allocated or volatility degenerates to zero.
    pub sharpe: Option<SharpeReport>,
    pub allocation: AllocationOutcome,
}

/// Stateless composer over the four engines.
///
/// All engines share the same immutable [`EngineConfig`] captured at
/// construction.
#[derive(Debug, Clone, Default)]
pub struct ReportAssembler {
    config: EngineConfig,
    yields: YieldEngine,
    impermanent_loss: ImpermanentLossEngine,
    risk: RiskEngine,
    optimizer: AllocationOptimizer,
}

impl ReportAssembler {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            yields: YieldEngine::new(config.clone()),
            impermanent_loss: ImpermanentLossEngine::new(config.clone()),
            risk: RiskEngine::new(config.clone()),
            optimizer: AllocationOptimizer::new(config.clone()),
            config,
        }
    }

    /// Runs every engine over the request and merges the outputs.
    ///
    /// Engines run in data-flow order; the first error aborts assembly and
    /// propagates unchanged.
    pub fn assemble(&self, request: &AnalysisRequest) -> Result<AnalysisReport> {
        info!(
            positions = request.portfolio.len(),
            scenarios = request.scenarios.len(),
            strategies = request.strategies.len(),
            "assembling analysis report"
        );

        let farming = self.yields.farming_yield(&request.farming)?;
        let impermanent_loss = self
            .impermanent_loss
            .advanced_impermanent_loss(&request.pool, &request.scenarios)?;

        let value_at_risk = self.risk.portfolio_var(
            &request.portfolio,
            &request.correlations,
            self.config.confidence_level,
            request.horizon_days,
        )?;
        let drawdown = self.risk.max_drawdown(&request.price_series)?;
        let drawdown_exceeds_threshold = drawdown.max_drawdown > self.config.max_drawdown_threshold;
        let concentration = self.risk.concentration_risk(&request.portfolio)?;
        let correlation = self
            .risk
            .correlation_risk(&request.portfolio, &request.correlations)?;
        let low_liquidity_assets = self.risk.low_liquidity_positions(&request.portfolio);

        let allocation = self
            .optimizer
            .optimize(&request.strategies, &request.constraints)?;

        // Sharpe of the allocated book against the portfolio's volatility.
        let annual_volatility_pct = value_at_risk.portfolio_volatility * 100.0;
        let sharpe = if allocation.metrics.weighted_apy > 0.0 && annual_volatility_pct > 0.0 {
            Some(self.risk.sharpe_ratio(
                allocation.metrics.weighted_apy,
                self.config.risk_free_rate,
                annual_volatility_pct,
            )?)
        } else {
            None
        };

        info!(
            il_level = %impermanent_loss.overall_risk_level,
            var_level = %value_at_risk.risk_level,
            allocations = allocation.allocations.len(),
            "analysis report assembled"
        );

        Ok(AnalysisReport {
            farming,
            impermanent_loss,
            value_at_risk,
            drawdown,
            drawdown_exceeds_threshold,
            concentration,
            correlation,
            low_liquidity_assets,
            sharpe,
            allocation,
        })
    }
}
