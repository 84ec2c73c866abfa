//! Yield and compounding math.

use defi_lp_domain::EngineConfig;
use defi_lp_domain::error::{AnalyticsError, Result, decimal_from_f64, ensure_finite};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Compounding frequencies evaluated by the optimal-frequency search:
/// yearly, quarterly, monthly, weekly, daily.
pub const COMPOUND_FREQUENCY_CANDIDATES: [u32; 5] = [1, 4, 12, 52, 365];

/// Result of compounding a principal at a fixed APY.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundYield {
    pub final_amount: Decimal,
    pub total_gain: Decimal,
}

/// Inputs for a farming yield projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmingParams {
    /// Capital entering the farm, strictly positive.
    pub principal: Decimal,
    /// Nominal annual rate in percent.
    pub apr: f64,
    /// Length of the farming period in days, at least 1.
    pub duration_days: u32,
    /// Compounding events per year, at least 1.
    pub compound_frequency: u32,
    /// Total fees paid over the period.
    pub fees: Decimal,
    /// Impermanent loss over the period in currency units.
    pub impermanent_loss: Decimal,
}

/// Result of a farming yield projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmingYield {
    pub final_amount: Decimal,
    pub gross_yield: Decimal,
    /// Gross yield minus fees and impermanent loss. May be negative.
    pub net_yield: Decimal,
    /// APY implied by the APR at the chosen compounding frequency, percent.
    pub effective_apy: f64,
}

/// Inputs for a pool fee yield estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeePoolParams {
    pub token0_amount: Decimal,
    pub token1_amount: Decimal,
    pub token0_price: Decimal,
    pub token1_price: Decimal,
    /// Pool fee rate as a fraction in `[0, 1]`.
    pub pool_fee_rate: f64,
    /// Trading volume observed over `timeframe_days`.
    pub trading_volume: Decimal,
    /// Window the volume was observed over. Defaults to a full year.
    pub timeframe_days: u32,
}

impl FeePoolParams {
    pub fn new(
        token0_amount: Decimal,
        token1_amount: Decimal,
        token0_price: Decimal,
        token1_price: Decimal,
        pool_fee_rate: f64,
        trading_volume: Decimal,
    ) -> Self {
        Self {
            token0_amount,
            token1_amount,
            token0_price,
            token1_price,
            pool_fee_rate,
            trading_volume,
            timeframe_days: 365,
        }
    }

    pub fn with_timeframe_days(mut self, timeframe_days: u32) -> Self {
        self.timeframe_days = timeframe_days;
        self
    }
}

/// Result of a pool fee yield estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolFeeYield {
    pub total_value: Decimal,
    pub daily_fees: Decimal,
    pub annual_fees: Decimal,
    /// Annual fee yield on pool TVL, percent.
    pub fee_apy: f64,
}

/// Result of the optimal compounding frequency search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimalCompounding {
    /// Compounding events per year maximizing net yield.
    pub optimal_frequency: u32,
    /// Net annual yield at that frequency, after gas.
    pub max_net_yield: Decimal,
}

/// Compound interest and APY calculator.
#[derive(Debug, Clone, Default)]
pub struct YieldEngine {
    config: EngineConfig,
}

impl YieldEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The configured fallback compounding frequency.
    pub fn default_compound_frequency(&self) -> u32 {
        self.config.default_compound_frequency
    }

    /// Converts a nominal APR (percent) into the APY (percent) realized by
    /// compounding `compound_frequency` times per year.
    ///
    /// `apy = ((1 + apr/100/n)^n - 1) * 100`
    pub fn apy_from_apr(&self, apr: f64, compound_frequency: u32) -> Result<f64> {
        if !apr.is_finite() || apr < 0.0 {
            return Err(AnalyticsError::validation("APR must be non-negative"));
        }
        if compound_frequency == 0 {
            return Err(AnalyticsError::validation(
                "compound frequency must be a positive integer",
            ));
        }
        let n = f64::from(compound_frequency);
        let apy = ((1.0 + apr / 100.0 / n).powf(n) - 1.0) * 100.0;
        ensure_finite(apy, "APY")
    }

    /// Projects a principal compounded at `apy_percent` for `years` years.
    pub fn compound_yield(
        &self,
        principal: Decimal,
        apy_percent: f64,
        compound_frequency: u32,
        years: f64,
    ) -> Result<CompoundYield> {
        if principal <= Decimal::ZERO {
            return Err(AnalyticsError::validation("principal must be positive"));
        }
        if !apy_percent.is_finite() || apy_percent < 0.0 {
            return Err(AnalyticsError::validation("APY must be non-negative"));
        }
        if compound_frequency == 0 {
            return Err(AnalyticsError::validation(
                "compound frequency must be a positive integer",
            ));
        }
        if !years.is_finite() || years <= 0.0 {
            return Err(AnalyticsError::validation("years must be positive"));
        }

        let growth = self.growth_factor(apy_percent, compound_frequency, years)?;
        let final_amount = (principal * growth).round_dp(self.config.precision);
        Ok(CompoundYield {
            total_gain: final_amount - principal,
            final_amount,
        })
    }

    /// Projects a farming position: compound growth on the APR over the
    /// duration, minus fees and impermanent loss.
    ///
    /// `net_yield` is intentionally not clamped at zero; a farm whose fees
    /// and IL exceed its yield reports a negative number.
    pub fn farming_yield(&self, params: &FarmingParams) -> Result<FarmingYield> {
        if params.principal <= Decimal::ZERO {
            return Err(AnalyticsError::validation("principal must be positive"));
        }
        if params.duration_days == 0 {
            return Err(AnalyticsError::validation("duration must be at least one day"));
        }
        if params.fees < Decimal::ZERO {
            return Err(AnalyticsError::validation("fees must be non-negative"));
        }
        if params.impermanent_loss < Decimal::ZERO {
            return Err(AnalyticsError::validation(
                "impermanent loss must be non-negative",
            ));
        }

        let effective_apy = self.apy_from_apr(params.apr, params.compound_frequency)?;
        let years = f64::from(params.duration_days) / 365.0;
        let growth = self.growth_factor(params.apr, params.compound_frequency, years)?;

        let final_amount = (params.principal * growth).round_dp(self.config.precision);
        let gross_yield = final_amount - params.principal;
        let net_yield = gross_yield - params.fees - params.impermanent_loss;

        Ok(FarmingYield {
            final_amount,
            gross_yield,
            net_yield,
            effective_apy,
        })
    }

    /// Estimates the fee yield of a two-asset pool from its trading volume.
    pub fn pool_fee_yield(&self, pool: &FeePoolParams) -> Result<PoolFeeYield> {
        if !pool.pool_fee_rate.is_finite() || !(0.0..=1.0).contains(&pool.pool_fee_rate) {
            return Err(AnalyticsError::validation(format!(
                "pool fee rate must be within [0, 1], got {}",
                pool.pool_fee_rate
            )));
        }
        if pool.trading_volume < Decimal::ZERO {
            return Err(AnalyticsError::validation(
                "trading volume must be non-negative",
            ));
        }
        if pool.timeframe_days == 0 {
            return Err(AnalyticsError::validation(
                "timeframe must be at least one day",
            ));
        }

        let total_value = pool.token0_amount * pool.token0_price
            + pool.token1_amount * pool.token1_price;
        if total_value <= Decimal::ZERO {
            return Err(AnalyticsError::validation(
                "pool total value must be positive",
            ));
        }

        let fee_rate = decimal_from_f64(pool.pool_fee_rate, "pool fee rate")?;
        let daily_fees = (pool.trading_volume * fee_rate / Decimal::from(pool.timeframe_days))
            .round_dp(self.config.precision);
        let annual_fees = daily_fees * Decimal::from(365);
        let fee_apy = (annual_fees / total_value * Decimal::ONE_HUNDRED)
            .to_f64()
            .ok_or_else(|| AnalyticsError::calculation("fee APY is not representable"))?;

        Ok(PoolFeeYield {
            total_value,
            daily_fees,
            annual_fees,
            fee_apy,
        })
    }

    /// Searches the candidate frequencies for the one maximizing yield net
    /// of per-compound gas.
    ///
    /// Candidates are evaluated in ascending order with a strict `>`
    /// comparison, so ties resolve to the lowest frequency.
    pub fn optimal_compounding_frequency(
        &self,
        apr: f64,
        gas_cost_per_compound: Decimal,
        principal: Decimal,
    ) -> Result<OptimalCompounding> {
        if principal <= Decimal::ZERO {
            return Err(AnalyticsError::validation("principal must be positive"));
        }
        if gas_cost_per_compound < Decimal::ZERO {
            return Err(AnalyticsError::validation(
                "gas cost must be non-negative",
            ));
        }

        let mut best: Option<OptimalCompounding> = None;
        for frequency in COMPOUND_FREQUENCY_CANDIDATES {
            let apy = self.apy_from_apr(apr, frequency)?;
            let annual_yield = principal * decimal_from_f64(apy / 100.0, "annual yield factor")?;
            let net_yield = annual_yield - gas_cost_per_compound * Decimal::from(frequency);
            debug!(frequency, %net_yield, "evaluated compounding candidate");

            let improves = match &best {
                Some(current) => net_yield > current.max_net_yield,
                None => true,
            };
            if improves {
                best = Some(OptimalCompounding {
                    optimal_frequency: frequency,
                    max_net_yield: net_yield,
                });
            }
        }

        // The candidate set is non-empty, so `best` is always populated.
        best.ok_or_else(|| AnalyticsError::calculation("no compounding candidate evaluated"))
    }

    /// Growth factor `(1 + rate/100/n)^(n * years)` computed in `f64` and
    /// returned as a `Decimal` multiplier.
    fn growth_factor(&self, rate_percent: f64, compound_frequency: u32, years: f64) -> Result<Decimal> {
        let n = f64::from(compound_frequency);
        let factor = (1.0 + rate_percent / 100.0 / n).powf(n * years);
        decimal_from_f64(factor, "growth factor")
    }
}
