//! Active-Thread List Tests.

use robsim_core::{ActiveThreads, ThreadId};

fn tids(list: &ActiveThreads) -> Vec<usize> {
    list.snapshot().into_iter().map(ThreadId::index).collect()
}

#[test]
fn new_list_is_empty() {
    let list = ActiveThreads::new();
    assert!(list.is_empty());
    assert_eq!(list.len(), 0);
    assert!(list.snapshot().is_empty());
}

#[test]
fn from_tids_keeps_order() {
    let list = ActiveThreads::from_tids([ThreadId(2), ThreadId(0), ThreadId(3)]);
    assert_eq!(tids(&list), vec![2, 0, 3]);
    assert!(list.contains(ThreadId(0)));
    assert!(!list.contains(ThreadId(1)));
}

#[test]
fn activate_does_not_duplicate() {
    let list = ActiveThreads::new();
    list.activate(ThreadId(1));
    list.activate(ThreadId(0));
    list.activate(ThreadId(1));
    assert_eq!(tids(&list), vec![1, 0]);
}

#[test]
fn deactivate_removes_only_that_thread() {
    let list = ActiveThreads::from_tids((0..4).map(ThreadId));
    list.deactivate(ThreadId(2));
    list.deactivate(ThreadId(7));
    assert_eq!(tids(&list), vec![0, 1, 3]);
}

#[test]
fn clones_share_the_list() {
    let scheduler = ActiveThreads::new();
    let reader = scheduler.clone();

    scheduler.activate(ThreadId(3));
    assert_eq!(tids(&reader), vec![3]);

    scheduler.set([ThreadId(0), ThreadId(1)]);
    assert_eq!(tids(&reader), vec![0, 1]);
    assert_eq!(reader.len(), 2);
}

#[test]
fn snapshot_is_detached_from_later_changes() {
    let list = ActiveThreads::from_tids([ThreadId(0), ThreadId(1)]);
    let snap = list.snapshot();
    list.deactivate(ThreadId(0));
    assert_eq!(snap, vec![ThreadId(0), ThreadId(1)]);
    assert_eq!(tids(&list), vec![1]);
}
