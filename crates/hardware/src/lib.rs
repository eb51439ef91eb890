//! SMT reorder buffer model.
//!
//! This crate implements the reorder buffer of a speculative, simultaneous-multithreaded,
//! out-of-order pipeline simulator with the following:
//! 1. **Capacity:** `Dynamic`, `Partitioned`, and `Threshold` sharing of a global capacity.
//! 2. **Queues:** One program-ordered instruction queue per hardware thread context.
//! 3. **Commit:** Strict in-order retirement per thread, with a global oldest/youngest view.
//! 4. **Squash:** Cycle-incremental rollback bounded by a per-call squash width.
//! 5. **Simulation:** JSON configuration, read/write statistics, and a tracing dump.

/// Common types and constants (thread ids, sequence numbers, errors).
pub mod common;
/// Reorder buffer configuration (defaults, sharing policy).
pub mod config;
/// Pipeline structures (dynamic instructions, active threads, ROB).
pub mod core;
/// ROB activity statistics.
pub mod stats;

/// Identifier and error types used across the public API.
pub use crate::common::{ConfigError, RobError, SeqNum, ThreadId};
/// ROB configuration; use `RobConfig::default()` or deserialize from JSON.
pub use crate::config::{RobConfig, SmtPolicy};
/// Shared instruction handle and its constructor type.
pub use crate::core::pipeline::dyn_inst::{DynInst, DynInstPtr};
/// Scheduler-owned active-thread list.
pub use crate::core::pipeline::threads::ActiveThreads;
/// The reorder buffer; construct with `Rob::new`.
pub use crate::core::Rob;
/// Global head/tail handle and per-thread squash state.
pub use crate::core::pipeline::rob::{GlobalRef, SquashStatus};
/// ROB read/write counters.
pub use crate::stats::RobStats;
