//! # Reorder Buffer Tests
//!
//! Organized by responsibility: quota management, the insert/retire protocol,
//! the global head/tail view, the squash engine, the dump, and randomized
//! invariant checks.

pub mod aggregate;
