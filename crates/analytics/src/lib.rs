//! Quantitative analytics engines for liquidity and staking positions.
//!
//! Three stateless calculators, each holding only an immutable
//! [`defi_lp_domain::EngineConfig`]:
//!
//! - [`YieldEngine`]: compound interest, APR/APY conversion, farming yield
//!   projection, pool fee yield, optimal compounding frequency search.
//! - [`ImpermanentLossEngine`]: closed-form impermanent loss and
//!   multi-scenario constant product re-simulation.
//! - [`RiskEngine`]: correlation-adjusted portfolio variance and VaR,
//!   Sharpe ratio, max drawdown, concentration and correlation risk.
//!
//! Every function is pure and synchronous: inputs are caller-resolved
//! snapshots, outputs are value objects, and nothing here blocks on I/O.

/// Impermanent loss modeling.
pub mod impermanent_loss;
/// Prelude module for convenient imports.
pub mod prelude;
/// Portfolio risk metrics.
pub mod risk;
/// Yield and compounding math.
pub mod yields;

pub use impermanent_loss::ImpermanentLossEngine;
pub use risk::RiskEngine;
pub use yields::YieldEngine;
