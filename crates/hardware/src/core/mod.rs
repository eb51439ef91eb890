//! Core out-of-order pipeline structures.
//!
//! This module contains the pipeline-side model the reorder buffer lives in:
//! the dynamic instruction handle, the shared active-thread list, and the ROB.

/// Pipeline structures (dynamic instructions, active threads, reorder buffer).
pub mod pipeline;

pub use self::pipeline::rob::Rob;
