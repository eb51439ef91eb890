//! Common utilities and types used throughout the reorder buffer model.
//!
//! This module provides the building blocks shared by the buffer, its configuration,
//! and its collaborators. It includes:
//! 1. **Identifier Types:** Strong types for thread contexts and sequence numbers.
//! 2. **Constants:** Thread-slot limits and dump formatting widths.
//! 3. **Error Handling:** Invariant-violation and configuration error types.

/// Common constants used throughout the crate.
pub mod constants;

/// Error types for buffer contract violations and configuration.
pub mod error;

/// Thread and sequence-number identifier types.
pub mod ids;

pub use constants::MAX_THREADS;
pub use error::{ConfigError, RobError};
pub use ids::{SeqNum, ThreadId};
