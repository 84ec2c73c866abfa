//! Prelude module for convenient imports.
//!
//! ```rust
//! use defi_lp_analytics::prelude::*;
//! ```

pub use crate::impermanent_loss::{IlSimulation, ImpermanentLossEngine, ScenarioOutcome};
pub use crate::risk::{
    ConcentrationReport, CorrelationReport, DEFAULT_VOLATILITY, DrawdownReport, RiskEngine,
    SharpeReport, VarReport,
};
pub use crate::yields::{
    COMPOUND_FREQUENCY_CANDIDATES, CompoundYield, FarmingParams, FarmingYield, FeePoolParams,
    OptimalCompounding, PoolFeeYield, YieldEngine,
};
