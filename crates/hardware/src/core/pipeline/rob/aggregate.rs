//! Global head and tail across thread queues.
//!
//! No global list is kept. The "universal" head and tail are stored as
//! `(thread, sequence number)` handles and resolved against the owning queue
//! when read, so a handle can go stale but never dangle.
//!
//! The two are maintained asymmetrically:
//! 1. **Head:** always the lowest sequence number at the front of an active queue,
//!    recomputed after every retire.
//! 2. **Tail:** the most recently inserted instruction, replaced on every insert;
//!    only after a squash touches a thread's tail (or the tail itself retires) is it
//!    recomputed as the highest sequence number at the back of an active queue.

use super::Rob;
use crate::common::ids::{SeqNum, ThreadId};
use crate::core::pipeline::dyn_inst::{DynInst, DynInstPtr};

/// Handle to an instruction in one of the per-thread queues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GlobalRef {
    /// Owning thread.
    pub tid: ThreadId,
    /// Sequence number of the referenced instruction.
    pub seq: SeqNum,
}

impl GlobalRef {
    /// Builds a handle for `inst`.
    pub const fn of(inst: &DynInst) -> Self {
        Self {
            tid: inst.thread_id(),
            seq: inst.seq_num(),
        }
    }
}

impl Rob {
    /// Recomputes the global head: the oldest front instruction among active threads.
    pub fn recompute_head(&mut self) {
        let mut head: Option<GlobalRef> = None;

        for tid in self.active_threads.snapshot() {
            let Some(front) = self.inst_list.get(tid.index()).and_then(|l| l.front()) else {
                continue;
            };
            if head.is_none_or(|h| front.seq_num() < h.seq) {
                head = Some(GlobalRef::of(front));
            }
        }

        self.head = head;
    }

    /// Recomputes the global tail: the youngest back instruction among active threads.
    pub fn recompute_tail(&mut self) {
        let mut tail: Option<GlobalRef> = None;

        for tid in self.active_threads.snapshot() {
            let Some(back) = self.inst_list.get(tid.index()).and_then(|l| l.back()) else {
                continue;
            };
            if tail.is_none_or(|t| back.seq_num() > t.seq) {
                tail = Some(GlobalRef::of(back));
            }
        }

        self.tail = tail;
    }

    /// Raw global head handle, `None` when no active thread holds an instruction.
    pub const fn global_head(&self) -> Option<GlobalRef> {
        self.head
    }

    /// Raw global tail handle, `None` when the buffer is empty.
    pub const fn global_tail(&self) -> Option<GlobalRef> {
        self.tail
    }

    /// Resolves the global head to its instruction.
    pub fn read_global_head(&self) -> Option<&DynInstPtr> {
        let head = self.head?;
        self.inst_list
            .get(head.tid.index())?
            .front()
            .filter(|inst| inst.seq_num() == head.seq)
    }

    /// Resolves the global tail to its instruction.
    pub fn read_global_tail(&self) -> Option<&DynInstPtr> {
        let tail = self.tail?;
        self.inst_list
            .get(tail.tid.index())?
            .back()
            .filter(|inst| inst.seq_num() == tail.seq)
    }
}
