//! Reorder Buffer (ROB) for SMT out-of-order commit.
//!
//! The ROB holds every dispatched, not-yet-retired instruction in one FIFO queue
//! per hardware thread context. It provides:
//! 1. **Capacity:** A shared global capacity divided into per-thread quotas by the sharing policy.
//! 2. **Insertion:** Appends dispatched instructions to their thread's queue.
//! 3. **In-order Commit:** Retires instructions from the front of a thread's queue only.
//! 4. **Aggregation:** Tracks the oldest and youngest instruction across active threads.
//! 5. **Squash:** Rolls a thread back incrementally, a bounded number of entries per call.
//!
//! Instructions are shared handles ([`DynInstPtr`]). The ROB never destroys one:
//! [`Rob::retire_head`] hands the released handle back to the commit stage, which
//! owns any further teardown. Squashed instructions leave through the same path.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::trace;

use crate::common::constants::MAX_THREADS;
use crate::common::error::{ConfigError, RobError};
use crate::common::ids::{SeqNum, ThreadId};
use crate::config::{RobConfig, SmtPolicy};
use crate::core::pipeline::dyn_inst::DynInstPtr;
use crate::core::pipeline::threads::ActiveThreads;
use crate::stats::RobStats;

/// Global head/tail handles and their recomputation.
pub mod aggregate;

/// Per-thread quota management.
pub mod capacity;

/// Human-readable buffer dump.
pub mod dump;

/// Incremental squash engine.
pub mod squash;

pub use aggregate::GlobalRef;
pub use squash::SquashStatus;

use squash::SquashCursor;

/// Reorder Buffer: one FIFO instruction queue per thread context.
#[derive(Debug)]
pub struct Rob {
    policy: SmtPolicy,
    /// Global capacity.
    num_entries: usize,
    /// Entries the squash unit marks per step.
    squash_width: usize,
    /// Configured thread contexts.
    num_threads: usize,
    /// Per-thread cap for the threshold policy.
    threshold: usize,

    /// Instructions currently held across all threads.
    num_insts: usize,
    inst_list: [VecDeque<DynInstPtr>; MAX_THREADS],
    /// Cached queue lengths.
    thread_entries: [usize; MAX_THREADS],
    max_entries: [usize; MAX_THREADS],

    squash_state: [SquashCursor; MAX_THREADS],
    /// Threads being torn down; their squashes are not width-limited.
    exiting: [bool; MAX_THREADS],

    head: Option<GlobalRef>,
    tail: Option<GlobalRef>,

    active_threads: ActiveThreads,
    stats: Cell<RobStats>,
}

impl Rob {
    /// Creates an empty ROB from `config`.
    ///
    /// The active-thread list starts empty; install the scheduler's list with
    /// [`Rob::set_active_threads`].
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] reported by [`RobConfig::validate`].
    pub fn new(config: &RobConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            policy: config.policy,
            num_entries: config.num_entries,
            squash_width: config.squash_width,
            num_threads: config.num_threads,
            threshold: config.threshold,
            num_insts: 0,
            inst_list: std::array::from_fn(|_| VecDeque::with_capacity(config.num_entries)),
            thread_entries: [0; MAX_THREADS],
            max_entries: capacity::initial_quotas(config),
            squash_state: [SquashCursor::default(); MAX_THREADS],
            exiting: [false; MAX_THREADS],
            head: None,
            tail: None,
            active_threads: ActiveThreads::new(),
            stats: Cell::new(RobStats::default()),
        })
    }

    /// Installs the scheduler's active-thread list.
    pub fn set_active_threads(&mut self, active_threads: ActiveThreads) {
        trace!("setting active threads list");
        self.active_threads = active_threads;
    }

    /// The active-thread list the ROB reads from.
    pub const fn active_threads(&self) -> &ActiveThreads {
        &self.active_threads
    }

    /// Capacity sharing policy.
    pub const fn policy(&self) -> SmtPolicy {
        self.policy
    }

    /// Global capacity.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.num_entries
    }

    /// Entries marked per squash step.
    pub const fn squash_width(&self) -> usize {
        self.squash_width
    }

    /// Number of configured thread contexts.
    pub const fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Read/write activity counters.
    pub const fn stats(&self) -> RobStats {
        self.stats.get()
    }

    fn record_read(&self) {
        let mut stats = self.stats.get();
        stats.reads += 1;
        self.stats.set(stats);
    }

    fn record_write(&self) {
        let mut stats = self.stats.get();
        stats.writes += 1;
        self.stats.set(stats);
    }

    const fn check_tid(tid: ThreadId) -> Result<usize, RobError> {
        if tid.index() < MAX_THREADS {
            Ok(tid.index())
        } else {
            Err(RobError::InvalidThread {
                tid,
                max: MAX_THREADS,
            })
        }
    }

    /// Appends `inst` to the tail of its thread's queue.
    ///
    /// The instruction becomes the global tail; if the buffer was empty it also
    /// becomes the global head. Per-thread quotas are not checked here.
    ///
    /// # Errors
    ///
    /// [`RobError::Full`] when every global entry is occupied,
    /// [`RobError::InvalidThread`] for an out-of-range thread id, and
    /// [`RobError::AlreadyInRob`] if the instruction is already buffered.
    pub fn insert(&mut self, inst: &DynInstPtr) -> Result<(), RobError> {
        self.record_write();

        let tid = inst.thread_id();
        let seq = inst.seq_num();
        let idx = Self::check_tid(tid)?;

        if self.num_insts >= self.num_entries {
            return Err(RobError::Full {
                tid,
                seq,
                capacity: self.num_entries,
            });
        }
        if inst.is_in_rob() {
            return Err(RobError::AlreadyInRob { tid, seq });
        }

        self.inst_list[idx].push_back(Rc::clone(inst));
        inst.set_in_rob();

        let handle = GlobalRef::of(inst);
        if self.num_insts == 0 {
            self.head = Some(handle);
        }
        self.tail = Some(handle);

        self.num_insts += 1;
        self.thread_entries[idx] += 1;

        trace!(
            tid = tid.0,
            sn = seq.0,
            pc = format_args!("{:#x}", inst.pc()),
            thread_entries = self.thread_entries[idx],
            "adding inst to ROB"
        );

        Ok(())
    }

    /// Removes and returns the oldest instruction of thread `tid`.
    ///
    /// The head must be ready to commit, unless it was squashed or executed in
    /// runahead mode; those drain unconditionally. The released instruction is
    /// marked committed and no longer in the ROB.
    ///
    /// # Errors
    ///
    /// [`RobError::ThreadEmpty`] if the thread holds nothing and
    /// [`RobError::HeadNotReady`] if the head cannot leave yet.
    pub fn retire_head(&mut self, tid: ThreadId) -> Result<DynInstPtr, RobError> {
        self.record_write();
        let idx = Self::check_tid(tid)?;

        let list = &mut self.inst_list[idx];
        let Some(front) = list.front() else {
            return Err(RobError::ThreadEmpty { tid });
        };
        if !front.is_squashed() && !front.is_runahead() && !front.ready_to_commit() {
            return Err(RobError::HeadNotReady {
                tid,
                seq: front.seq_num(),
            });
        }
        let Some(head_inst) = list.pop_front() else {
            return Err(RobError::ThreadEmpty { tid });
        };

        trace!(
            tid = tid.0,
            sn = head_inst.seq_num().0,
            pc = format_args!("{:#x}", head_inst.pc()),
            squashed = head_inst.is_squashed(),
            runahead = head_inst.is_runahead(),
            "retiring head instruction"
        );

        self.num_insts -= 1;
        self.thread_entries[idx] -= 1;
        self.squash_state[idx].on_retire_head();

        head_inst.clear_in_rob();
        head_inst.set_committed();

        self.recompute_head();
        if self.tail == Some(GlobalRef::of(&head_inst)) {
            self.recompute_tail();
        }

        Ok(head_inst)
    }

    /// Whether thread `tid` has a head instruction ready to commit.
    pub fn is_head_ready(&self, tid: ThreadId) -> bool {
        self.record_read();
        self.inst_list
            .get(tid.index())
            .and_then(VecDeque::front)
            .is_some_and(|inst| inst.ready_to_commit())
    }

    /// Whether any active thread can commit its head this cycle.
    pub fn can_commit(&self) -> bool {
        self.active_threads
            .snapshot()
            .into_iter()
            .any(|tid| self.is_head_ready(tid))
    }

    /// Oldest instruction of thread `tid`, if any.
    pub fn read_head_inst(&self, tid: ThreadId) -> Option<&DynInstPtr> {
        self.record_read();
        self.inst_list.get(tid.index())?.front()
    }

    /// Youngest instruction of thread `tid`, if any.
    pub fn read_tail_inst(&self, tid: ThreadId) -> Option<&DynInstPtr> {
        self.record_read();
        self.inst_list.get(tid.index())?.back()
    }

    /// Looks up the instruction of thread `tid` with sequence number `seq`.
    pub fn find_inst(&self, tid: ThreadId, seq: SeqNum) -> Option<&DynInstPtr> {
        self.record_read();
        self.inst_list
            .get(tid.index())?
            .iter()
            .find(|inst| inst.seq_num() == seq)
    }

    /// Iterates over thread `tid`'s instructions, oldest first.
    pub fn iter_thread(&self, tid: ThreadId) -> impl Iterator<Item = &DynInstPtr> + '_ {
        self.inst_list.get(tid.index()).into_iter().flatten()
    }

    /// Instructions held across all configured threads.
    pub fn count_insts(&self) -> usize {
        self.inst_list
            .iter()
            .take(self.num_threads)
            .map(VecDeque::len)
            .sum()
    }

    /// Instructions held by thread `tid`.
    pub fn count_insts_for(&self, tid: ThreadId) -> usize {
        self.inst_list.get(tid.index()).map_or(0, VecDeque::len)
    }

    /// Cached entry count of thread `tid`.
    pub fn thread_entries(&self, tid: ThreadId) -> usize {
        self.thread_entries.get(tid.index()).copied().unwrap_or(0)
    }

    /// Instructions held across every thread slot.
    #[inline]
    pub const fn len(&self) -> usize {
        self.num_insts
    }

    /// Returns true if no instruction is buffered.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.num_insts == 0
    }

    /// Returns true if thread `tid` holds no instructions.
    pub fn is_empty_for(&self, tid: ThreadId) -> bool {
        self.thread_entries(tid) == 0
    }

    /// Returns true if every global entry is occupied.
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.num_insts >= self.num_entries
    }

    /// Returns true if thread `tid` has used up its quota.
    pub fn is_full_for(&self, tid: ThreadId) -> bool {
        self.thread_entries(tid) >= self.max_entries(tid)
    }

    /// Marks thread `tid` as exiting (or not).
    ///
    /// Squash steps on an exiting thread mark up to the full capacity at once.
    ///
    /// # Errors
    ///
    /// [`RobError::InvalidThread`] for an out-of-range thread id.
    pub fn set_thread_exiting(&mut self, tid: ThreadId, exiting: bool) -> Result<(), RobError> {
        let idx = Self::check_tid(tid)?;
        self.exiting[idx] = exiting;
        Ok(())
    }

    /// Whether thread `tid` is marked as exiting.
    pub fn is_thread_exiting(&self, tid: ThreadId) -> bool {
        self.exiting.get(tid.index()).copied().unwrap_or(false)
    }

    /// Flags every buffered instruction as executed in runahead mode.
    ///
    /// Runahead instructions retire without the readiness check.
    pub fn mark_all_runahead(&self) {
        for inst in self.inst_list.iter().flatten() {
            inst.set_runahead();
        }
    }

    /// Checks that a drained pipeline left nothing in the ROB.
    ///
    /// # Errors
    ///
    /// [`RobError::NotDrained`] naming the first non-empty thread.
    pub fn drain_sanity_check(&self) -> Result<(), RobError> {
        for (idx, list) in self.inst_list.iter().enumerate() {
            if !list.is_empty() {
                return Err(RobError::NotDrained {
                    tid: ThreadId(idx),
                    count: list.len(),
                });
            }
        }
        Ok(())
    }

    /// Returns the ROB to its just-constructed occupancy state.
    ///
    /// Any instruction still queued loses its membership, and every thread
    /// leaves exiting mode. Quotas, the policy, the active-thread list, and the
    /// activity counters are kept.
    pub fn reset_state(&mut self) {
        for list in &mut self.inst_list {
            for inst in list.drain(..) {
                inst.clear_in_rob();
            }
        }
        self.thread_entries = [0; MAX_THREADS];
        self.squash_state = [SquashCursor::default(); MAX_THREADS];
        self.exiting = [false; MAX_THREADS];
        self.num_insts = 0;
        self.head = None;
        self.tail = None;
    }
}
