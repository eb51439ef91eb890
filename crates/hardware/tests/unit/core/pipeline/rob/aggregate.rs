//! Global Head / Tail Tests.
//!
//! Verifies the cross-thread view of the buffer:
//! 1. The head is the lowest front sequence number among active threads.
//! 2. The tail follows the most recent insert until a squash forces a recompute,
//!    which picks the highest back sequence number instead.
//! 3. Equal front sequence numbers resolve in active-list order.
//! 4. An empty buffer reports no head and no tail.

use crate::common::harness::{PC_BASE, RobHarness};
use robsim_core::{DynInst, GlobalRef, RobConfig, SeqNum, SmtPolicy, ThreadId};

const T0: ThreadId = ThreadId(0);
const T1: ThreadId = ThreadId(1);
const T2: ThreadId = ThreadId(2);

fn three_threads() -> RobHarness {
    let config = RobConfig {
        num_entries: 24,
        squash_width: 8,
        num_threads: 3,
        policy: SmtPolicy::Dynamic,
        ..RobConfig::default()
    };
    RobHarness::new(&config, &[0, 1, 2])
}

#[test]
fn empty_buffer_has_no_head_or_tail() {
    let mut h = three_threads();
    assert!(h.rob.global_head().is_none());
    assert!(h.rob.global_tail().is_none());
    assert!(h.rob.read_global_head().is_none());
    assert!(h.rob.read_global_tail().is_none());

    h.rob.recompute_head();
    h.rob.recompute_tail();
    assert!(h.rob.global_head().is_none());
    assert!(h.rob.global_tail().is_none());
}

#[test]
fn first_insert_becomes_head_and_tail() {
    let mut h = three_threads();
    let inst = h.dispatch(2);

    let head = h.rob.global_head().unwrap();
    assert_eq!((head.tid, head.seq), (T2, SeqNum(1)));
    assert_eq!(h.rob.global_tail(), Some(head));
    assert!(std::rc::Rc::ptr_eq(h.rob.read_global_head().unwrap(), &inst));
}

#[test]
fn head_is_oldest_front_across_threads() {
    let mut h = three_threads();
    let _ = h.dispatch(1); // 1
    let _ = h.dispatch(0); // 2
    let _ = h.dispatch(2); // 3
    let _ = h.dispatch(1); // 4

    assert_eq!(h.rob.read_global_head().unwrap().seq_num(), SeqNum(1));

    h.rob.read_head_inst(T1).unwrap().set_can_commit();
    let _ = h.rob.retire_head(T1).unwrap();

    // Thread 1's new front is 4; thread 0's front (2) is now the oldest.
    let head = h.rob.global_head().unwrap();
    assert_eq!((head.tid, head.seq), (T0, SeqNum(2)));
}

#[test]
fn head_ignores_inactive_threads() {
    let mut h = three_threads();
    let _ = h.dispatch(0); // 1
    let _ = h.dispatch(1); // 2

    h.active.deactivate(T0);
    h.rob.recompute_head();

    assert_eq!(h.rob.global_head().map(|r| r.tid), Some(T1));
}

#[test]
fn tail_follows_most_recent_insert() {
    let mut h = three_threads();
    let _ = h.dispatch(0);
    let _ = h.dispatch(1);
    assert_eq!(h.rob.global_tail().map(|r| r.tid), Some(T1));

    let last = h.dispatch(0);
    assert!(std::rc::Rc::ptr_eq(h.rob.read_global_tail().unwrap(), &last));
}

#[test]
fn tail_is_recomputed_after_squash_touches_it() {
    let mut h = three_threads();
    let _ = h.dispatch(0); // 1
    let _ = h.dispatch(1); // 2
    let _ = h.dispatch(0); // 3
    let _ = h.dispatch(0); // 4

    // Squashing above 2 marks 4 (the thread tail) and 3, then stops at 1.
    assert!(h.rob.squash(SeqNum(2), T0).unwrap());

    // Squashed entries are still queued, so the youngest back is still 4.
    let tail = h.rob.global_tail().unwrap();
    assert_eq!((tail.tid, tail.seq), (T0, SeqNum(4)));

    // Draining thread 0 retires its tail, and the recompute lands on thread 1.
    h.rob.read_head_inst(T0).unwrap().set_can_commit();
    while h.rob.read_head_inst(T0).is_some() {
        let _ = h.rob.retire_head(T0).unwrap();
    }
    let tail = h.rob.global_tail().unwrap();
    assert_eq!((tail.tid, tail.seq), (T1, SeqNum(2)));
}

#[test]
fn tail_recompute_picks_youngest_active_back() {
    let mut h = three_threads();
    let _ = h.dispatch(2); // 1
    let _ = h.dispatch(0); // 2
    let _ = h.dispatch(1); // 3

    // Only a recompute can move the tail away from the latest insert.
    h.active.deactivate(T1);
    h.rob.recompute_tail();
    let tail = h.rob.global_tail().unwrap();
    assert_eq!((tail.tid, tail.seq), (T0, SeqNum(2)));
}

/// Two threads numbering their instructions independently, squashing one
/// entry per step.
fn per_thread_numbering() -> RobHarness {
    let config = RobConfig {
        num_entries: 8,
        squash_width: 1,
        num_threads: 2,
        policy: SmtPolicy::Dynamic,
        ..RobConfig::default()
    };
    let mut h = RobHarness::new(&config, &[0, 1]);
    for (tid, seq) in [(T0, 1), (T0, 2), (T0, 3), (T1, 1)] {
        let inst = DynInst::new_ptr(SeqNum(seq), tid, PC_BASE + seq * 4);
        h.rob.insert(&inst).unwrap();
    }
    h
}

#[test]
fn tail_insert_and_recompute_disagree_with_per_thread_numbering() {
    let mut h = per_thread_numbering();

    // Inserting tracks recency: thread 1's lone entry came last.
    assert_eq!(
        h.rob.global_tail(),
        Some(GlobalRef {
            tid: T1,
            seq: SeqNum(1)
        })
    );

    // The first single-entry step marks thread 0's back, which forces a
    // recompute by highest sequence number.
    assert!(!h.rob.squash(SeqNum(0), T0).unwrap());
    assert!(h.rob.read_tail_inst(T0).unwrap().is_squashed());
    assert_eq!(
        h.rob.global_tail(),
        Some(GlobalRef {
            tid: T0,
            seq: SeqNum(3)
        })
    );
    h.assert_consistent();
}

#[test]
fn head_tie_resolves_in_active_order() {
    let mut h = per_thread_numbering();
    let t0_front = GlobalRef {
        tid: T0,
        seq: SeqNum(1),
    };
    let t1_front = GlobalRef {
        tid: T1,
        seq: SeqNum(1),
    };

    // Only the first insert into the empty buffer set the head.
    assert_eq!(h.rob.global_head(), Some(t0_front));

    h.rob.recompute_head();
    assert_eq!(h.rob.global_head(), Some(t0_front));

    h.active.set([T1, T0]);
    h.rob.recompute_head();
    assert_eq!(h.rob.global_head(), Some(t1_front));
}

#[test]
fn reset_state_clears_handles() {
    let mut h = three_threads();
    let _ = h.dispatch(0);
    let _ = h.dispatch(0);

    h.rob.reset_state();
    assert!(h.rob.read_global_head().is_none());

    let _ = h.dispatch(1);
    let head = h.rob.read_global_head().unwrap();
    assert_eq!(head.thread_id(), T1);
}
