//! # Unit Components
//!
//! Tests for the configuration layer, the pipeline structures, and the
//! statistics counters.


/// Unit tests for the pipeline structures (active threads, ROB).
pub mod core;
