//! Report assembly over the analytics engines.
//!
//! [`ReportAssembler`] is the composition layer: it takes one
//! caller-resolved [`assembler::AnalysisRequest`], invokes the yield, IL,
//! risk, and allocation engines in data-flow order, and merges their
//! outputs into a single serializable [`assembler::AnalysisReport`]. It
//! contains no numerical logic of its own and propagates engine errors
//! unchanged.

/// Request/report types and the assembler.
pub mod assembler;

pub use assembler::{AnalysisReport, AnalysisRequest, ReportAssembler};
