use std::sync::Arc;

use cp_api::v1::{
    Node,
    Pod,
    PodPhase,
};
use rstest::rstest;

use super::*;

#[rstest]
fn test_create_pod_normalizes_caller_input() {
    let store = ObjectStore::new();
    let mut dirty = Pod::new("default", "p1", "nginx");
    dirty.phase = PodPhase::Running;
    dirty.node_name = "sneaky".into();
    dirty.deletion_timestamp = Some(cp_core::time::now());

    let created = store.create_pod(dirty).expect("create should succeed");

    assert_eq!(created.phase, PodPhase::Pending);
    assert_eq!(created.node_name, "");
    assert_eq!(created.deletion_timestamp, None);
}

#[rstest]
fn test_create_pod_rejects_duplicate_key() {
    let store = ObjectStore::new();
    store.create_pod(Pod::new("default", "p1", "nginx")).unwrap();

    let err = store.create_pod(Pod::new("default", "p1", "other-image")).unwrap_err();

    assert!(matches!(err, StoreError::PodAlreadyExists { .. }));
}

#[rstest]
fn test_get_pod_not_found() {
    let store = ObjectStore::new();
    let err = store.get_pod("default", "missing").unwrap_err();
    assert!(matches!(err, StoreError::PodNotFound { .. }));
}

#[rstest]
fn test_update_terminating_pod_rejects_unrelated_change() {
    let store = ObjectStore::new();
    store.create_pod(Pod::new("default", "p1", "nginx")).unwrap();
    let terminating = store.delete_pod("default", "p1").unwrap();

    let mut attempt = terminating.clone();
    attempt.phase = PodPhase::Running;

    let err = store.update_pod(attempt).unwrap_err();
    assert!(matches!(err, StoreError::PodConflictTerminating { .. }));

    // the stored object is unchanged (P3)
    let stored = store.get_pod("default", "p1").unwrap();
    assert_eq!(stored, terminating);
}

#[rstest]
fn test_update_terminating_pod_allows_finalizing_delete() {
    let store = ObjectStore::new();
    store.create_pod(Pod::new("default", "p1", "nginx")).unwrap();
    let terminating = store.delete_pod("default", "p1").unwrap();

    let mut finalize = terminating.clone();
    finalize.phase = PodPhase::Deleted;

    let updated = store.update_pod(finalize).expect("finalizing delete must be accepted (I4)");
    assert_eq!(updated.phase, PodPhase::Deleted);
    assert_eq!(updated.deletion_timestamp, terminating.deletion_timestamp);
}

#[rstest]
fn test_delete_pod_sets_terminating_and_is_irreversible() {
    let store = ObjectStore::new();
    store.create_pod(Pod::new("default", "p1", "nginx")).unwrap();

    let terminating = store.delete_pod("default", "p1").unwrap();
    assert_eq!(terminating.phase, PodPhase::Terminating);
    assert!(terminating.deletion_timestamp.is_some());

    // deletionTimestamp never clears, and a second delete is itself a conflict (P2)
    let err = store.delete_pod("default", "p1").unwrap_err();
    assert!(matches!(err, StoreError::PodConflictTerminating { .. }));
}

#[rstest]
fn test_delete_pod_not_found() {
    let store = ObjectStore::new();
    assert!(matches!(store.delete_pod("default", "missing").unwrap_err(), StoreError::PodNotFound { .. }));
}

#[rstest]
fn test_list_pods_filters_by_namespace_and_includes_terminal_states() {
    let store = ObjectStore::new();
    store.create_pod(Pod::new("default", "p1", "nginx")).unwrap();
    store.create_pod(Pod::new("default", "p2", "nginx")).unwrap();
    store.create_pod(Pod::new("other", "p3", "nginx")).unwrap();
    store.delete_pod("default", "p1").unwrap();

    let listed = store.list_pods("default");
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().any(|p| p.name == "p1" && p.phase == PodPhase::Terminating));
    assert!(listed.iter().any(|p| p.name == "p2"));
}

#[rstest]
fn test_node_create_get_update_delete() {
    let store = ObjectStore::new();
    let created = store.create_node(Node::new("n1", "http://n1:8081")).unwrap();
    assert_eq!(created.name, "n1");

    assert!(matches!(store.create_node(Node::new("n1", "http://dup:8081")).unwrap_err(), StoreError::NodeAlreadyExists { .. }));

    let fetched = store.get_node("n1").unwrap();
    assert_eq!(fetched.address, "http://n1:8081");

    let mut updated = fetched;
    updated.address = "http://n1-new:8081".into();
    store.update_node(updated.clone()).unwrap();
    assert_eq!(store.get_node("n1").unwrap().address, "http://n1-new:8081");

    store.delete_node("n1").unwrap();
    assert!(matches!(store.get_node("n1").unwrap_err(), StoreError::NodeNotFound { .. }));
}

#[rstest]
fn test_update_node_not_found() {
    let store = ObjectStore::new();
    assert!(matches!(store.update_node(Node::new("ghost", "http://x")).unwrap_err(), StoreError::NodeNotFound { .. }));
}

/// P5: under N concurrent `CreatePod` calls for the same key, exactly one succeeds.
#[rstest]
fn test_concurrent_create_pod_exactly_one_wins() {
    let store = Arc::new(ObjectStore::new());
    let handles: Vec<_> = (0..10)
        .map(|i| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || store.create_pod(Pod::new("default", "same-name", format!("image-{i}"))))
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let successes = results.iter().filter(|r| r.is_ok()).count();
    let failures = results.iter().filter(|r| matches!(r, Err(StoreError::PodAlreadyExists { .. }))).count();

    assert_eq!(successes, 1);
    assert_eq!(failures, 9);
}
