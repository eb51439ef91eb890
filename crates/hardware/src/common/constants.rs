//! Global Reorder Buffer Constants.
//!
//! This module defines constants shared by the buffer, its configuration, and tests. It includes:
//! 1. **Thread Limits:** The fixed number of SMT slots every per-thread table is sized for.
//! 2. **Dump Formatting:** Column widths used by the human-readable buffer dump.

/// Maximum number of hardware thread contexts.
///
/// Per-thread queues, quotas, and squash state exist for every slot up to this
/// limit, whether or not the slot is configured or active.
pub const MAX_THREADS: usize = 4;

/// Width of the thread label column in a buffer dump.
pub const DUMP_LABEL_WIDTH: usize = 6;
