//! Snapshot provider boundary.

use async_trait::async_trait;
use defi_lp_domain::entities::{PoolState, Portfolio};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors a snapshot provider may surface.
///
/// Retry policy belongs to the provider implementation, not to the
/// analytics core: by the time an engine runs, the snapshot either exists
/// or the whole analysis was aborted.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The underlying data source could not be reached.
    #[error("data source unavailable: {0}")]
    Unavailable(String),

    /// The source responded with data that fails domain validation.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Source of validated, in-memory market snapshots.
///
/// Implementations are expected to hand over fully validated domain
/// objects; the engines re-check invariants but will not repair or
/// partially consume a feed.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Current portfolio composition.
    async fn portfolio_snapshot(&self) -> Result<Portfolio, ProviderError>;

    /// Reserve and price state of one pool.
    async fn pool_snapshot(&self, pool: &str) -> Result<PoolState, ProviderError>;

    /// Chronological daily closing prices for an asset, oldest first.
    async fn price_history(&self, asset: &str, days: u32) -> Result<Vec<Decimal>, ProviderError>;
}
