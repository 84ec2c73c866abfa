//! Data acquisition boundary for the analytics core.
//!
//! The engines in `defi-lp-analytics` are pure functions over in-memory
//! snapshots. Whatever fetches those snapshots (RPC nodes, indexers, price
//! APIs) lives behind the [`SnapshotProvider`] trait and is resolved by the
//! caller *before* any engine is invoked: either the provider delivers a
//! validated snapshot, or it fails here and the engines never run. No
//! implementation ships in this crate; integrators bring their own.

/// Snapshot provider trait and errors.
pub mod providers;

pub use providers::{ProviderError, SnapshotProvider};
