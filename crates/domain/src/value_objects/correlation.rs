use crate::error::{AnalyticsError, Result};
use serde::{Deserialize, Serialize};

/// Correlation assumed for asset pairs absent from the table.
pub const DEFAULT_CORRELATION: f64 = 0.3;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CorrelationEntry {
    asset_a: String,
    asset_b: String,
    correlation: f64,
}

impl CorrelationEntry {
    fn matches(&self, a: &str, b: &str) -> bool {
        (self.asset_a == a && self.asset_b == b) || (self.asset_a == b && self.asset_b == a)
    }
}

/// Symmetric partial mapping from asset pairs to correlation coefficients.
///
/// Lookup is order-insensitive. An asset paired with itself is perfectly
/// correlated; pairs not present in the table fall back to
/// [`DEFAULT_CORRELATION`]. The table is an explicit parameter to every
/// engine that needs correlations; there is no hidden global fallback map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorrelationTable {
    entries: Vec<CorrelationEntry>,
}

impl CorrelationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the correlation for a pair, replacing any previous value.
    pub fn set(&mut self, asset_a: impl Into<String>, asset_b: impl Into<String>, correlation: f64) -> Result<()> {
        if !correlation.is_finite() || !(-1.0..=1.0).contains(&correlation) {
            return Err(AnalyticsError::validation(format!(
                "correlation must be within [-1, 1], got {correlation}"
            )));
        }
        let (asset_a, asset_b) = (asset_a.into(), asset_b.into());
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.matches(&asset_a, &asset_b))
        {
            entry.correlation = correlation;
        } else {
            self.entries.push(CorrelationEntry {
                asset_a,
                asset_b,
                correlation,
            });
        }
        Ok(())
    }

    /// Correlation between two assets.
    ///
    /// Identical assets resolve to 1.0; unknown pairs to
    /// [`DEFAULT_CORRELATION`].
    pub fn lookup(&self, asset_a: &str, asset_b: &str) -> f64 {
        if asset_a == asset_b {
            return 1.0;
        }
        self.entries
            .iter()
            .find(|e| e.matches(asset_a, asset_b))
            .map(|e| e.correlation)
            .unwrap_or(DEFAULT_CORRELATION)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
