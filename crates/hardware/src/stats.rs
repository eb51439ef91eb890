//! ROB activity statistics.
//!
//! This module tracks the two counters the reorder buffer exposes for telemetry:
//! 1. **Reads:** Head-readiness checks and instruction lookups.
//! 2. **Writes:** Inserts, retires, and squash steps.
//!
//! The counters have no effect on buffer behavior.

use std::fmt;

use serde::Serialize;

/// ROB read/write counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RobStats {
    /// Number of ROB reads.
    pub reads: u64,
    /// Number of ROB writes.
    pub writes: u64,
}

impl RobStats {
    /// Serializes the counters as a JSON object for an external collector.
    ///
    /// # Errors
    ///
    /// Propagates the serializer error.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Prints the counters to stdout.
    pub fn print(&self) {
        print!("{self}");
    }
}

impl fmt::Display for RobStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rob.reads                {}", self.reads)?;
        writeln!(f, "rob.writes               {}", self.writes)
    }
}
