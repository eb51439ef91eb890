/// Reorder buffer tests.
pub mod rob;

/// Active-thread list tests.
pub mod threads;
