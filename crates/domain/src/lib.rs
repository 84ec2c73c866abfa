//! Core domain model for yield and portfolio risk analytics.
//!
//! This crate defines the value objects and entities the analytics engines
//! operate on. It is a pure Layer-0 crate: no I/O, no async, no knowledge of
//! where the data came from.
//!
//! - Entities: [`entities::Strategy`], [`entities::Position`],
//!   [`entities::Portfolio`], [`entities::PoolState`], [`entities::Scenario`]
//! - Value objects: [`value_objects::CorrelationTable`],
//!   [`value_objects::AllocationResult`]
//! - Shared configuration: [`config::EngineConfig`], captured once at engine
//!   construction and never mutated afterwards.
//! - Errors: [`error::AnalyticsError`], the single error type for the whole
//!   analytics core.

/// Immutable engine configuration.
pub mod config;
/// Entities consumed by the engines.
pub mod entities;
/// Classification enums shared across engines.
pub mod enums;
/// Error types for the analytics core.
pub mod error;
/// Prelude module for convenient imports.
pub mod prelude;
/// Value objects produced and consumed by the engines.
pub mod value_objects;

pub use config::EngineConfig;
pub use enums::{ConfidenceLevel, RiskLevel, SharpeRating};
pub use error::{AnalyticsError, Result};
