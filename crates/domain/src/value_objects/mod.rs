mod allocation;
mod correlation;

pub use allocation::{
    AllocationConstraints, AllocationOutcome, AllocationResult, AllocationStatus,
    PortfolioAllocationMetrics,
};
pub use correlation::{CorrelationTable, DEFAULT_CORRELATION};
