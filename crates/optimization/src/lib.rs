//! Constrained greedy capital allocation across yield strategies.
//!
//! The optimizer consumes immutable [`defi_lp_domain::entities::Strategy`]
//! candidates plus an [`defi_lp_domain::value_objects::AllocationConstraints`]
//! envelope and produces an
//! [`defi_lp_domain::value_objects::AllocationOutcome`]. It is pure: same
//! inputs, same allocations.

/// Greedy allocator.
pub mod allocator;

pub use allocator::{AllocationOptimizer, MIN_ALLOCATION};
