//! Reorder Buffer error definitions.
//!
//! This module defines the two error families of the crate:
//! 1. **Invariant Violations:** [`RobError`], raised when the surrounding pipeline calls the
//!    buffer in a state its contract forbids. These are programming errors in the caller and
//!    must abort the current simulation step.
//! 2. **Configuration Errors:** [`ConfigError`], raised when a [`RobConfig`](crate::config::RobConfig)
//!    cannot describe a buildable buffer.
//!
//! Lookup misses are not errors; they surface as `Option::None`.

use thiserror::Error;

use super::ids::{SeqNum, ThreadId};

/// Fatal contract violation reported by the reorder buffer.
///
/// Every variant names the thread involved and, where one exists, the
/// sequence number of the offending instruction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RobError {
    /// An instruction was inserted while every global entry was occupied.
    #[error("ROB full ({capacity} entries): cannot insert [{tid}] [{seq}]")]
    Full {
        /// Thread of the rejected instruction.
        tid: ThreadId,
        /// Sequence number of the rejected instruction.
        seq: SeqNum,
        /// Global capacity.
        capacity: usize,
    },

    /// A thread id outside `0..MAX_THREADS` was used.
    #[error("[{tid}] is out of range (max {max} thread contexts)")]
    InvalidThread {
        /// The rejected thread id.
        tid: ThreadId,
        /// Number of thread slots.
        max: usize,
    },

    /// An instruction already held by a queue was inserted again.
    #[error("[{tid}] [{seq}] is already in the ROB")]
    AlreadyInRob {
        /// Thread of the instruction.
        tid: ThreadId,
        /// Sequence number of the instruction.
        seq: SeqNum,
    },

    /// A retire was requested on a thread with no buffered instructions.
    #[error("[{tid}] cannot retire head: thread queue is empty")]
    ThreadEmpty {
        /// The empty thread.
        tid: ThreadId,
    },

    /// A retire was requested while the head was neither ready nor squashed.
    #[error("[{tid}] head [{seq}] is not ready to commit")]
    HeadNotReady {
        /// Thread whose head was retired.
        tid: ThreadId,
        /// Sequence number of the head.
        seq: SeqNum,
    },

    /// A squash step was requested with no squash cursor in place.
    #[error("[{tid}] no squash in progress (target [{target}])")]
    NoSquashInProgress {
        /// Thread that was stepped.
        tid: ThreadId,
        /// Last recorded squash target.
        target: SeqNum,
    },

    /// The buffer was expected to be drained but still holds instructions.
    #[error("[{tid}] still holds {count} instruction(s) after drain")]
    NotDrained {
        /// First thread found non-empty.
        tid: ThreadId,
        /// Number of instructions left in that thread.
        count: usize,
    },
}

/// Rejected reorder buffer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The buffer must hold at least one entry.
    #[error("num_entries must be non-zero")]
    ZeroEntries,

    /// The squash unit must invalidate at least one entry per call.
    #[error("squash_width must be non-zero")]
    ZeroSquashWidth,

    /// At least one thread context is required.
    #[error("num_threads must be non-zero")]
    ZeroThreads,

    /// More thread contexts were requested than the buffer has slots for.
    #[error("num_threads ({requested}) exceeds the {max} supported thread contexts")]
    TooManyThreads {
        /// Requested thread count.
        requested: usize,
        /// Supported maximum.
        max: usize,
    },

    /// The threshold policy needs a non-zero per-thread threshold.
    #[error("Threshold policy requires a non-zero threshold")]
    ZeroThreshold,

    /// The configuration text could not be parsed.
    #[error("invalid ROB configuration: {0}")]
    Parse(String),

    /// The configuration file could not be read.
    #[error("cannot read ROB configuration: {0}")]
    Io(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
