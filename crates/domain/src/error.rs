//! Error types for the analytics core.
//!
//! Two kinds suffice: [`AnalyticsError::Validation`] for inputs rejected
//! before any computation runs, and [`AnalyticsError::Calculation`] for
//! numeric degeneracy reached through valid-looking inputs. Errors always
//! propagate to the immediate caller; nothing is retried or coerced to zero.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use thiserror::Error;

/// Errors produced by the analytics engines.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Malformed, missing, negative-where-disallowed, or zero-denominator
    /// input. Raised synchronously before any computation proceeds.
    #[error("validation error: {0}")]
    Validation(String),

    /// A computation over valid inputs produced a non-finite or
    /// unrepresentable result. Surfaced as a hard failure.
    #[error("calculation error: {0}")]
    Calculation(String),
}

impl AnalyticsError {
    /// Shorthand for a [`AnalyticsError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Shorthand for a [`AnalyticsError::Calculation`].
    pub fn calculation(msg: impl Into<String>) -> Self {
        Self::Calculation(msg.into())
    }
}

/// Result alias used throughout the analytics crates.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Rejects non-finite floating-point intermediates.
pub fn ensure_finite(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalyticsError::calculation(format!("{what} is not finite")))
    }
}

/// Converts a floating-point factor back into a `Decimal` currency leg.
///
/// Fails with a [`AnalyticsError::Calculation`] when the value is not finite
/// or does not fit the decimal range.
pub fn decimal_from_f64(value: f64, what: &str) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(AnalyticsError::calculation(format!("{what} is not finite")));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| AnalyticsError::calculation(format!("{what} does not fit a decimal")))
}
