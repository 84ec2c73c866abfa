//! Prelude module for convenient imports.
//!
//! ```rust
//! use defi_lp_domain::prelude::*;
//! ```

pub use crate::config::EngineConfig;
pub use crate::entities::{PoolState, Portfolio, Position, Scenario, Strategy};
pub use crate::enums::{ConfidenceLevel, RiskLevel, SharpeRating};
pub use crate::error::{AnalyticsError, Result};
pub use crate::value_objects::{
    AllocationConstraints, AllocationOutcome, AllocationResult, AllocationStatus,
    CorrelationTable, DEFAULT_CORRELATION, PortfolioAllocationMetrics,
};
