//! Incremental squash engine.
//!
//! A squash walks one thread's queue from the youngest instruction toward the
//! oldest, marking everything younger than the rollback point as squashed and
//! ready to commit. The hardware squash unit can only invalidate a fixed number
//! of slots per cycle, so the walk is split into bounded steps:
//! 1. **Start:** [`Rob::squash`] records the target and parks the cursor on the thread's tail.
//! 2. **Step:** [`Rob::do_squash`] marks at most `squash_width` entries and parks the cursor again.
//! 3. **Finish:** The cursor is cleared once it reaches the queue front or an entry at or
//!    below the target.
//!
//! Squashed instructions stay in the queue and drain through ordinary retirement.

use std::collections::VecDeque;

use tracing::{debug, trace};

use super::Rob;
use crate::common::error::RobError;
use crate::common::ids::{SeqNum, ThreadId};
use crate::core::pipeline::dyn_inst::DynInstPtr;

/// Squash state of one thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SquashStatus {
    /// No rollback pending.
    #[default]
    Idle,
    /// A rollback has started and has entries left to mark.
    Squashing,
}

/// Outcome of one bounded squash step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) struct SquashStep {
    /// Entries marked during this step.
    pub(crate) squashed: usize,
    /// The rollback reached its terminal state.
    pub(crate) done: bool,
    /// The thread's tail was marked, so the global tail must be recomputed.
    pub(crate) tail_touched: bool,
}

/// Persisted per-thread squash cursor.
///
/// `pos` indexes the thread queue (front is 0). Only [`Rob::retire_head`]
/// removes from a queue, and always from the front, so a parked cursor stays
/// valid as long as it is shifted down by one on every retire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SquashCursor {
    pos: Option<usize>,
    target: SeqNum,
    done: bool,
    status: SquashStatus,
}

impl Default for SquashCursor {
    fn default() -> Self {
        Self {
            pos: None,
            target: SeqNum(0),
            done: true,
            status: SquashStatus::Idle,
        }
    }
}

impl SquashCursor {
    pub(crate) const fn status(&self) -> SquashStatus {
        self.status
    }

    pub(crate) const fn is_done(&self) -> bool {
        self.done
    }

    pub(crate) const fn target(&self) -> SeqNum {
        self.target
    }

    pub(crate) const fn position(&self) -> Option<usize> {
        self.pos
    }

    /// Parks the cursor on `tail_pos` for a rollback down to `target`.
    ///
    /// Any rollback already in progress is abandoned.
    const fn start(&mut self, target: SeqNum, tail_pos: usize) {
        self.pos = Some(tail_pos);
        self.target = target;
        self.done = false;
        self.status = SquashStatus::Squashing;
    }

    const fn finish(&mut self) {
        self.pos = None;
        self.done = true;
        self.status = SquashStatus::Idle;
    }

    /// Keeps the cursor aligned with a queue whose front entry was just removed.
    pub(crate) const fn on_retire_head(&mut self) {
        match self.pos {
            // Everything left in the queue is younger than the cursor and already marked.
            Some(0) => self.finish(),
            Some(pos) => self.pos = Some(pos - 1),
            None => {}
        }
    }

    /// Marks at most `quota` entries of `queue`, youngest first.
    ///
    /// Returns `None` when no cursor is parked.
    pub(crate) fn progress(
        &mut self,
        queue: &VecDeque<DynInstPtr>,
        quota: usize,
    ) -> Option<SquashStep> {
        let mut pos = self.pos?;
        let mut step = SquashStep::default();

        if queue[pos].seq_num() < self.target {
            self.finish();
            step.done = true;
            return Some(step);
        }

        let tail_pos = queue.len() - 1;

        while step.squashed < quota && queue[pos].seq_num() > self.target {
            let inst = &queue[pos];
            trace!(
                tid = inst.thread_id().0,
                sn = inst.seq_num().0,
                pc = format_args!("{:#x}", inst.pc()),
                "squashing instruction"
            );

            inst.set_squashed();
            inst.set_can_commit();
            step.squashed += 1;

            if pos == 0 {
                trace!("reached head of instruction list while squashing");
                self.finish();
                step.done = true;
                // Front reached: the global tail is left as is.
                step.tail_touched = false;
                return Some(step);
            }

            if pos == tail_pos {
                step.tail_touched = true;
            }

            pos -= 1;
        }

        if queue[pos].seq_num() <= self.target {
            self.finish();
            step.done = true;
        } else {
            self.pos = Some(pos);
        }

        Some(step)
    }
}

impl Rob {
    /// Starts rolling back thread `tid` to `squash_num`.
    ///
    /// Every instruction of the thread with a sequence number above `squash_num`
    /// will be marked squashed; the first bounded step runs immediately. Does
    /// nothing if the thread holds no instructions. A squash already in
    /// progress on the thread is restarted from its current tail.
    ///
    /// Returns whether the rollback already finished.
    ///
    /// # Errors
    ///
    /// [`RobError::InvalidThread`] for an out-of-range thread id.
    pub fn squash(&mut self, squash_num: SeqNum, tid: ThreadId) -> Result<bool, RobError> {
        let idx = Self::check_tid(tid)?;
        let len = self.inst_list[idx].len();
        if len == 0 {
            debug!(
                tid = tid.0,
                sn = squash_num.0,
                "does not need to squash due to being empty"
            );
            return Ok(true);
        }

        debug!(tid = tid.0, squash_num = squash_num.0, "starting to squash within the ROB");
        self.squash_state[idx].start(squash_num, len - 1);
        self.do_squash(tid)
    }

    /// Runs one bounded squash step on thread `tid`.
    ///
    /// Marks at most `squash_width` entries, or up to the full capacity while the
    /// thread is exiting. Returns whether the rollback finished.
    ///
    /// # Errors
    ///
    /// [`RobError::NoSquashInProgress`] if no cursor is parked on the thread.
    pub fn do_squash(&mut self, tid: ThreadId) -> Result<bool, RobError> {
        let idx = Self::check_tid(tid)?;
        self.record_write();

        let quota = if self.exiting[idx] {
            self.num_entries
        } else {
            self.squash_width
        };

        let cursor = &mut self.squash_state[idx];
        trace!(
            tid = tid.0,
            squash_num = cursor.target().0,
            quota,
            "squashing instructions until target"
        );
        let Some(step) = cursor.progress(&self.inst_list[idx], quota) else {
            return Err(RobError::NoSquashInProgress {
                tid,
                target: cursor.target(),
            });
        };

        if step.done {
            debug!(tid = tid.0, "done squashing instructions");
        }

        if step.tail_touched {
            self.recompute_tail();
        }

        Ok(step.done)
    }

    /// Current squash state of thread `tid` (`Idle` for out-of-range ids).
    pub fn squash_status(&self, tid: ThreadId) -> SquashStatus {
        self.squash_state
            .get(tid.index())
            .map_or(SquashStatus::Idle, SquashCursor::status)
    }

    /// Whether thread `tid` has no rollback left to perform.
    pub fn is_done_squashing(&self, tid: ThreadId) -> bool {
        self.squash_state
            .get(tid.index())
            .is_none_or(SquashCursor::is_done)
    }

    /// Rollback point most recently requested for thread `tid`.
    pub fn squash_target(&self, tid: ThreadId) -> Option<SeqNum> {
        self.squash_state.get(tid.index()).map(SquashCursor::target)
    }

    /// Queue position of the parked squash cursor of thread `tid`, if any.
    pub fn squash_cursor(&self, tid: ThreadId) -> Option<usize> {
        self.squash_state
            .get(tid.index())
            .and_then(SquashCursor::position)
    }
}
