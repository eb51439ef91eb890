//! Shared test infrastructure for reorder buffer tests.
//!
//! - **Harness**: `RobHarness` wires a ROB to an active-thread list and provides a
//!   minimal dispatcher and commit stage for cycle-by-cycle scenarios.
