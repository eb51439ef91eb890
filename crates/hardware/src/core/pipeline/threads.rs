//! Active-thread list shared with the thread scheduler.
//!
//! The scheduler owns the list of currently scheduled hardware threads and
//! mutates it as threads start, stall, or exit. Pipeline structures such as the
//! ROB receive a clone of the handle and only ever read it; after a membership
//! change the scheduler calls the structure's explicit refresh hook
//! (e.g. [`Rob::reset_entries`](crate::Rob::reset_entries)).

use std::cell::RefCell;
use std::rc::Rc;

use crate::common::ids::ThreadId;

/// Shared, ordered list of active thread ids.
///
/// Cloning the handle shares the underlying list.
#[derive(Clone, Debug, Default)]
pub struct ActiveThreads {
    list: Rc<RefCell<Vec<ThreadId>>>,
}

impl ActiveThreads {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a list holding `tids` in the given order.
    pub fn from_tids(tids: impl IntoIterator<Item = ThreadId>) -> Self {
        let threads = Self::new();
        threads.set(tids);
        threads
    }

    /// Replaces the whole list.
    pub fn set(&self, tids: impl IntoIterator<Item = ThreadId>) {
        let mut list = self.list.borrow_mut();
        list.clear();
        list.extend(tids);
    }

    /// Appends `tid` if it is not already active.
    pub fn activate(&self, tid: ThreadId) {
        let mut list = self.list.borrow_mut();
        if !list.contains(&tid) {
            list.push(tid);
        }
    }

    /// Removes `tid` if present.
    pub fn deactivate(&self, tid: ThreadId) {
        self.list.borrow_mut().retain(|&t| t != tid);
    }

    /// Number of active threads.
    pub fn len(&self) -> usize {
        self.list.borrow().len()
    }

    /// Returns true if no thread is active.
    pub fn is_empty(&self) -> bool {
        self.list.borrow().is_empty()
    }

    /// Returns true if `tid` is active.
    pub fn contains(&self, tid: ThreadId) -> bool {
        self.list.borrow().contains(&tid)
    }

    /// Copies the current list.
    ///
    /// Callers iterate the snapshot so the scheduler is free to mutate the
    /// list between calls without tripping a borrow.
    pub fn snapshot(&self) -> Vec<ThreadId> {
        self.list.borrow().clone()
    }
}
