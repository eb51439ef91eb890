//! Per-thread capacity quotas.
//!
//! Every thread slot carries a `max_entries` quota derived from the sharing
//! policy. Quotas are advisory: the dispatcher checks
//! [`Rob::num_free_entries_for`] before inserting, and the buffer itself only
//! enforces the global capacity. Shrinking a quota below a thread's live
//! occupancy is allowed; that thread simply reports no free entries until it
//! drains.

use tracing::debug;

use super::Rob;
use crate::common::constants::MAX_THREADS;
use crate::common::ids::ThreadId;
use crate::config::{RobConfig, SmtPolicy};

/// Quotas at construction time, before any active-thread list is known.
pub(super) fn initial_quotas(config: &RobConfig) -> [usize; MAX_THREADS] {
    let per_thread = match config.policy {
        SmtPolicy::Dynamic => config.num_entries,
        SmtPolicy::Partitioned => {
            debug!("ROB sharing policy set to Partitioned");
            config.num_entries / config.num_threads
        }
        SmtPolicy::Threshold => {
            debug!("ROB sharing policy set to Threshold");
            config.threshold
        }
    };

    let mut quotas = [0; MAX_THREADS];
    for quota in quotas.iter_mut().take(config.num_threads) {
        *quota = per_thread;
    }
    quotas
}

impl Rob {
    /// Recomputes the quota of every active thread after the active set changed.
    ///
    /// Threads that left the active set keep their last quota. Idempotent.
    pub fn reset_entries(&mut self) {
        let active = self.active_threads.snapshot();
        let active_count = active.len();

        for tid in active {
            let Some(quota) = self.max_entries.get_mut(tid.index()) else {
                continue;
            };
            *quota = match self.policy {
                SmtPolicy::Dynamic => self.num_entries,
                SmtPolicy::Partitioned => self.num_entries / active_count,
                SmtPolicy::Threshold if active_count == 1 => self.num_entries,
                SmtPolicy::Threshold => self.threshold,
            };
        }

        debug!(
            policy = ?self.policy,
            active_count,
            max_entries = ?self.max_entries,
            "reset ROB entry quotas"
        );
    }

    /// Entries each of `num_threads` threads would get under the current policy.
    ///
    /// Only `Partitioned` divides capacity; every other policy (and a zero
    /// thread count) reports 0.
    pub const fn entry_amount(&self, num_threads: usize) -> usize {
        match self.policy {
            SmtPolicy::Partitioned if num_threads > 0 => self.num_entries / num_threads,
            _ => 0,
        }
    }

    /// Free global entries.
    pub const fn num_free_entries(&self) -> usize {
        self.num_entries - self.num_insts
    }

    /// Free entries left in thread `tid`'s quota; 0 when the thread is at or over quota.
    pub fn num_free_entries_for(&self, tid: ThreadId) -> usize {
        let idx = tid.index();
        match (self.max_entries.get(idx), self.thread_entries.get(idx)) {
            (Some(max), Some(used)) => max.saturating_sub(*used),
            _ => 0,
        }
    }

    /// Quota of thread `tid` (0 for out-of-range ids).
    pub fn max_entries(&self, tid: ThreadId) -> usize {
        self.max_entries.get(tid.index()).copied().unwrap_or(0)
    }
}
