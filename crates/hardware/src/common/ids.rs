//! Thread and sequence-number identifiers.
//!
//! This module defines strong types for the two keys every buffered instruction carries:
//! 1. **Thread Identity:** Which hardware thread context (SMT slot) owns the instruction.
//! 2. **Program Order:** The per-thread sequence number assigned at dispatch.
//!
//! Both are plain `Copy` wrappers so they can be compared, hashed, and printed
//! without accidentally mixing one for the other.

use std::fmt;

/// Identifies a simulated hardware thread context.
///
/// This is an SMT slot index, not a host execution thread. Valid values are
/// `0..MAX_THREADS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ThreadId(pub usize);

/// Per-thread instruction sequence number.
///
/// Sequence numbers increase monotonically at dispatch and are the only key
/// used to decide which instruction is older.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SeqNum(pub u64);

impl ThreadId {
    /// Returns the slot index, suitable for indexing per-thread tables.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl SeqNum {
    /// Returns the raw sequence number.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }
}

impl From<usize> for ThreadId {
    fn from(tid: usize) -> Self {
        Self(tid)
    }
}

impl From<u64> for SeqNum {
    fn from(sn: u64) -> Self {
        Self(sn)
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tid:{}", self.0)
    }
}

impl fmt::Display for SeqNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sn:{}", self.0)
    }
}
