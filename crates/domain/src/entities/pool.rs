use crate::error::{AnalyticsError, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Snapshot of a two-asset constant product pool (`x * y = k`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolState {
    /// Reserve of token0, strictly positive.
    pub token0_amount: Decimal,
    /// Reserve of token1, strictly positive.
    pub token1_amount: Decimal,
    /// Quote-currency price of token0, strictly positive.
    pub token0_price: Decimal,
    /// Quote-currency price of token1, strictly positive.
    pub token1_price: Decimal,
}

impl PoolState {
    pub fn new(
        token0_amount: Decimal,
        token1_amount: Decimal,
        token0_price: Decimal,
        token1_price: Decimal,
    ) -> Self {
        Self {
            token0_amount,
            token1_amount,
            token0_price,
            token1_price,
        }
    }

    /// Pool TVL at current prices.
    pub fn total_value(&self) -> Decimal {
        self.token0_amount * self.token0_price + self.token1_amount * self.token1_price
    }

    /// The constant product `k = token0_amount * token1_amount`.
    pub fn constant_product(&self) -> Decimal {
        self.token0_amount * self.token1_amount
    }

    /// Price ratio `token0_price / token1_price` as a dimensionless float.
    pub fn price_ratio(&self) -> Result<f64> {
        let ratio = self.token0_price / self.token1_price;
        ratio
            .to_f64()
            .ok_or_else(|| AnalyticsError::calculation("price ratio is not representable"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.token0_amount <= Decimal::ZERO || self.token1_amount <= Decimal::ZERO {
            return Err(AnalyticsError::validation(
                "pool reserves must be positive",
            ));
        }
        if self.token0_price <= Decimal::ZERO || self.token1_price <= Decimal::ZERO {
            return Err(AnalyticsError::validation("pool prices must be positive"));
        }
        Ok(())
    }
}

/// A named fractional price shift applied to both pool assets.
///
/// Deltas are fractions: `0.5` is a +50% move, `-0.3` a -30% move. A delta
/// of `-1` or below would zero or invert a price and is rejected at
/// simulation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub token0_price_delta: f64,
    pub token1_price_delta: f64,
}

impl Scenario {
    pub fn new(name: impl Into<String>, token0_price_delta: f64, token1_price_delta: f64) -> Self {
        Self {
            name: name.into(),
            token0_price_delta,
            token1_price_delta,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (token, delta) in [
            ("token0", self.token0_price_delta),
            ("token1", self.token1_price_delta),
        ] {
            if !delta.is_finite() || delta <= -1.0 {
                return Err(AnalyticsError::validation(format!(
                    "scenario {}: {token} price delta must be greater than -100%",
                    self.name
                )));
            }
        }
        Ok(())
    }
}
