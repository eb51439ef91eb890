//! Out-of-order pipeline structures.
//!
//! This module contains the components the commit side of an SMT pipeline is built on.
//! It includes the following components:
//! 1. **Dynamic Instructions:** Shared handles with status flags mutated by the ROB and execution.
//! 2. **Active Threads:** The scheduler-owned list of running thread contexts.
//! 3. **Reorder Buffer:** Per-thread in-order commit queues with incremental squash.

/// Dynamic instruction handle and status flags.
pub mod dyn_inst;

/// Reorder buffer.
pub mod rob;

/// Scheduler-owned active-thread list.
pub mod threads;
