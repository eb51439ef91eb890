//! Dynamic instruction handle shared between the pipeline and the ROB.
//!
//! Instructions are created by the dispatch side of the pipeline and shared by
//! reference-counted handle ([`DynInstPtr`]). The reorder buffer holds a clone of
//! the handle while the instruction is in flight and mutates only its status flags:
//! 1. **Membership:** `in_rob` is set on insert and cleared on retire.
//! 2. **Squash:** `squashed` and `ready_to_commit` are set by the squash engine.
//! 3. **Completion:** `committed` is set on retire; `ready_to_commit` is normally set by execution.
//! 4. **Runahead:** `runahead` marks instructions executed past a long-latency miss.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::common::ids::{SeqNum, ThreadId};

/// Shared, non-owning (from the ROB's point of view) instruction handle.
pub type DynInstPtr = Rc<DynInst>;

/// Status bits carried by a dynamic instruction.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct InstStatus {
    /// Held by a per-thread ROB queue.
    pub in_rob: bool,
    /// Invalidated by a squash.
    pub squashed: bool,
    /// Allowed to leave the ROB head.
    pub ready_to_commit: bool,
    /// Retired from the ROB.
    pub committed: bool,
    /// Executed in runahead mode.
    pub runahead: bool,
}

/// An in-flight instruction.
///
/// Identity fields are fixed at construction; status is interior-mutable so the
/// ROB and the execution stages can update it through shared handles.
pub struct DynInst {
    seq_num: SeqNum,
    thread_id: ThreadId,
    pc: u64,
    status: Cell<InstStatus>,
}

impl DynInst {
    /// Creates a new instruction with all status bits clear.
    pub const fn new(seq_num: SeqNum, thread_id: ThreadId, pc: u64) -> Self {
        Self {
            seq_num,
            thread_id,
            pc,
            status: Cell::new(InstStatus {
                in_rob: false,
                squashed: false,
                ready_to_commit: false,
                committed: false,
                runahead: false,
            }),
        }
    }

    /// Creates a new instruction already wrapped in a shared handle.
    pub fn new_ptr(seq_num: SeqNum, thread_id: ThreadId, pc: u64) -> DynInstPtr {
        Rc::new(Self::new(seq_num, thread_id, pc))
    }

    /// Program-order sequence number.
    #[inline]
    pub const fn seq_num(&self) -> SeqNum {
        self.seq_num
    }

    /// Owning thread context.
    #[inline]
    pub const fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Instruction address.
    #[inline]
    pub const fn pc(&self) -> u64 {
        self.pc
    }

    /// Snapshot of all status bits.
    #[inline]
    pub const fn status(&self) -> InstStatus {
        self.status.get()
    }

    fn update(&self, f: impl FnOnce(&mut InstStatus)) {
        let mut status = self.status.get();
        f(&mut status);
        self.status.set(status);
    }

    /// Whether the instruction is currently held by the ROB.
    #[inline]
    pub const fn is_in_rob(&self) -> bool {
        self.status.get().in_rob
    }

    /// Whether the instruction has been squashed.
    #[inline]
    pub const fn is_squashed(&self) -> bool {
        self.status.get().squashed
    }

    /// Whether the instruction may retire from the ROB head.
    #[inline]
    pub const fn ready_to_commit(&self) -> bool {
        self.status.get().ready_to_commit
    }

    /// Whether the instruction has been retired.
    #[inline]
    pub const fn is_committed(&self) -> bool {
        self.status.get().committed
    }

    /// Whether the instruction was executed in runahead mode.
    #[inline]
    pub const fn is_runahead(&self) -> bool {
        self.status.get().runahead
    }

    pub(crate) fn set_in_rob(&self) {
        self.update(|s| s.in_rob = true);
    }

    pub(crate) fn clear_in_rob(&self) {
        self.update(|s| s.in_rob = false);
    }

    pub(crate) fn set_committed(&self) {
        self.update(|s| s.committed = true);
    }

    /// Marks the instruction squashed.
    pub fn set_squashed(&self) {
        self.update(|s| s.squashed = true);
    }

    /// Marks the instruction ready to commit (normally done by execution).
    pub fn set_can_commit(&self) {
        self.update(|s| s.ready_to_commit = true);
    }

    /// Marks the instruction as executed in runahead mode.
    pub fn set_runahead(&self) {
        self.update(|s| s.runahead = true);
    }

    /// Compact flag string used by the ROB dump: `s` squashed, `r` runahead, `c` ready.
    pub fn flag_string(&self) -> String {
        let s = self.status.get();
        let mut flags = String::with_capacity(3);
        if s.squashed {
            flags.push('s');
        }
        if s.runahead {
            flags.push('r');
        }
        if s.ready_to_commit {
            flags.push('c');
        }
        flags
    }
}

impl fmt::Debug for DynInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynInst")
            .field("seq_num", &self.seq_num.0)
            .field("thread_id", &self.thread_id.0)
            .field("pc", &format_args!("{:#x}", self.pc))
            .field("status", &self.status.get())
            .finish()
    }
}
