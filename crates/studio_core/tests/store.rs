use std::collections::HashSet;

use studio_core::{GenerationResult, JobStore};

fn pending(urls: &[&str]) -> GenerationResult {
    GenerationResult::new(Vec::new(), urls.iter().map(|u| u.to_string()).collect())
}

fn ready_set(urls: &[&str]) -> HashSet<String> {
    urls.iter().map(|u| u.to_string()).collect()
}

#[test]
fn empty_store_has_no_job() {
    let store = JobStore::new();
    assert!(store.current().is_none());
    assert!(!store.has_pending());
    assert!(store.view().is_none());
}

#[test]
fn submit_result_tracks_a_job_with_zero_attempts() {
    let mut store = JobStore::new();
    store.submit_result(pending(&["a"]));

    let job = store.current().expect("active job");
    assert_eq!(job.attempts_made, 0);
    assert_eq!(job.result.pending, vec!["a"]);
    assert!(store.has_pending());
}

#[test]
fn resolve_moves_only_ready_urls_and_preserves_order() {
    let mut store = JobStore::new();
    store.submit_result(pending(&["a", "b", "c"]));

    store.resolve(&ready_set(&["b"]));

    let job = store.current().unwrap();
    assert_eq!(job.result.ready, vec!["b"]);
    assert_eq!(job.result.pending, vec!["a", "c"]);
}

#[test]
fn resolve_ignores_urls_that_were_never_pending() {
    let mut store = JobStore::new();
    store.submit_result(pending(&["a"]));

    store.resolve(&ready_set(&["stranger"]));

    let job = store.current().unwrap();
    assert!(job.result.ready.is_empty());
    assert_eq!(job.result.pending, vec!["a"]);
}

#[test]
fn ready_and_pending_stay_disjoint_across_resolves() {
    studio_logging::initialize_for_tests();
    let mut store = JobStore::new();
    store.submit_result(pending(&["a", "b", "c"]));

    store.resolve(&ready_set(&["a"]));
    store.resolve(&ready_set(&["a", "c"]));

    let job = store.current().unwrap();
    assert_eq!(job.result.ready, vec!["a", "c"]);
    assert_eq!(job.result.pending, vec!["b"]);
    for url in &job.result.ready {
        assert!(!job.result.pending.contains(url));
    }
}

#[test]
fn record_attempt_counts_and_resets_on_new_submission() {
    let mut store = JobStore::new();
    store.submit_result(pending(&["a"]));
    store.record_attempt();
    store.record_attempt();
    assert_eq!(store.current().unwrap().attempts_made, 2);

    store.submit_result(pending(&["b"]));
    assert_eq!(store.current().unwrap().attempts_made, 0);
}

#[test]
fn new_submission_discards_previous_pending_urls() {
    let mut store = JobStore::new();
    store.submit_result(pending(&["old-1", "old-2"]));

    store.submit_result(GenerationResult::new(
        vec!["fresh".to_string()],
        Vec::new(),
    ));

    let job = store.current().unwrap();
    assert_eq!(job.result.ready, vec!["fresh"]);
    assert!(job.result.pending.is_empty());
    assert!(!store.has_pending());
}

#[test]
fn view_reflects_partition_and_awaiting_flag() {
    let mut store = JobStore::new();
    store.submit_result(pending(&["a", "b"]));
    store.resolve(&ready_set(&["a"]));
    store.record_attempt();

    let view = store.view().expect("snapshot");
    assert_eq!(view.ready, vec!["a"]);
    assert_eq!(view.pending, vec!["b"]);
    assert_eq!(view.attempts_made, 1);
    assert!(view.awaiting);

    store.resolve(&ready_set(&["b"]));
    assert!(!store.view().unwrap().awaiting);
}
