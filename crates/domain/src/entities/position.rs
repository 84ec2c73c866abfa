use crate::error::{AnalyticsError, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A single asset position inside a portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Asset identifier (symbol or mint address).
    pub asset: String,
    /// Quantity held, non-negative.
    pub amount: Decimal,
    /// Unit price in the portfolio's quote currency, strictly positive.
    pub price: Decimal,
    /// Annualized volatility as a fraction (e.g. 0.6 for 60%), if known.
    pub volatility: Option<f64>,
    /// Observed daily traded volume in quote currency, if known.
    pub daily_volume: Option<Decimal>,
    /// Market capitalization in quote currency, if known.
    pub market_cap: Option<Decimal>,
}

impl Position {
    pub fn new(asset: impl Into<String>, amount: Decimal, price: Decimal) -> Self {
        Self {
            asset: asset.into(),
            amount,
            price,
            volatility: None,
            daily_volume: None,
            market_cap: None,
        }
    }

    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    pub fn with_daily_volume(mut self, daily_volume: Decimal) -> Self {
        self.daily_volume = Some(daily_volume);
        self
    }

    /// Position value: `amount * price`.
    pub fn value(&self) -> Decimal {
        self.amount * self.price
    }

    pub fn validate(&self) -> Result<()> {
        if self.asset.is_empty() {
            return Err(AnalyticsError::validation("position asset must not be empty"));
        }
        if self.amount < Decimal::ZERO {
            return Err(AnalyticsError::validation(format!(
                "position {}: amount must be non-negative",
                self.asset
            )));
        }
        if self.price <= Decimal::ZERO {
            return Err(AnalyticsError::validation(format!(
                "position {}: price must be positive",
                self.asset
            )));
        }
        if let Some(vol) = self.volatility {
            if !vol.is_finite() || vol < 0.0 {
                return Err(AnalyticsError::validation(format!(
                    "position {}: volatility must be non-negative",
                    self.asset
                )));
            }
        }
        Ok(())
    }
}

/// An ordered collection of positions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Portfolio {
    pub positions: Vec<Position>,
}

impl Portfolio {
    pub fn new(positions: Vec<Position>) -> Self {
        Self { positions }
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Sum of position values.
    pub fn total_value(&self) -> Decimal {
        self.positions.iter().map(Position::value).sum()
    }

    /// Validates every position and the portfolio as a whole.
    pub fn validate(&self) -> Result<()> {
        for position in &self.positions {
            position.validate()?;
        }
        Ok(())
    }

    /// Per-position weights `value_i / total_value`, summing to 1.
    ///
    /// Fails on an empty portfolio or one whose total value is zero, since
    /// weights are undefined in both cases.
    pub fn weights(&self) -> Result<Vec<f64>> {
        if self.is_empty() {
            return Err(AnalyticsError::validation("portfolio must not be empty"));
        }
        let total = self.total_value();
        if total <= Decimal::ZERO {
            return Err(AnalyticsError::validation(
                "portfolio total value must be positive",
            ));
        }
        self.positions
            .iter()
            .map(|p| {
                (p.value() / total).to_f64().ok_or_else(|| {
                    AnalyticsError::calculation(format!("weight of {} is not representable", p.asset))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_portfolio() -> Portfolio {
        Portfolio::new(vec![
            Position::new("SOL", dec!(100), dec!(150)),
            Position::new("USDC", dec!(5000), dec!(1)),
        ])
    }

    #[test]
    fn value_is_amount_times_price() {
        let p = Position::new("SOL", dec!(2.5), dec!(100));
        assert_eq!(p.value(), dec!(250));
    }

    #[test]
    fn weights_sum_to_one() {
        let portfolio = sample_portfolio();
        let weights = portfolio.weights().unwrap();
        let sum: f64 = weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        // 15000 / 20000 and 5000 / 20000
        assert!((weights[0] - 0.75).abs() < 1e-12);
        assert!((weights[1] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn weights_reject_empty_portfolio() {
        assert!(Portfolio::default().weights().is_err());
    }

    #[test]
    fn weights_reject_zero_value_portfolio() {
        let portfolio = Portfolio::new(vec![Position::new("SOL", dec!(0), dec!(150))]);
        assert!(portfolio.weights().is_err());
    }

    #[test]
    fn validate_rejects_non_positive_price() {
        let position = Position::new("SOL", dec!(1), dec!(0));
        assert!(position.validate().is_err());
    }
}
