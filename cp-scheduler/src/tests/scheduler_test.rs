use cp_api::v1::{
    EventType,
    Node,
    Pod,
    PodPhase,
    WatchEvent,
};
use httpmock::Method::{
    GET,
    PUT,
};
use rstest::rstest;
use serde_json::json;

use super::*;

#[rstest]
fn test_schedulable_pod_accepts_added_pending() {
    let pod = Pod::new("default", "p1", "nginx");
    let event = WatchEvent::pod(EventType::Added, pod.clone());
    assert_eq!(Scheduler::schedulable_pod(event), Some(pod));
}

#[rstest]
fn test_schedulable_pod_ignores_non_added() {
    let pod = Pod::new("default", "p1", "nginx");
    let event = WatchEvent::pod(EventType::Modified, pod);
    assert_eq!(Scheduler::schedulable_pod(event), None);
}

#[rstest]
fn test_schedulable_pod_ignores_non_pending() {
    let mut pod = Pod::new("default", "p1", "nginx");
    pod.phase = PodPhase::Running;
    let event = WatchEvent::pod(EventType::Added, pod);
    assert_eq!(Scheduler::schedulable_pod(event), None);
}

#[rstest]
fn test_schedulable_pod_ignores_terminating() {
    let mut pod = Pod::new("default", "p1", "nginx");
    pod.deletion_timestamp = Some(cp_core::time::now());
    let event = WatchEvent::pod(EventType::Added, pod);
    assert_eq!(Scheduler::schedulable_pod(event), None);
}

#[rstest(tokio::test)]
async fn test_handle_event_assigns_ready_node() {
    let (mut fake_api, client) = make_fake_api_server();
    fake_api.handle(|when, then| {
        when.method(GET).path("/api/v1/nodes").query_param("status", "Ready");
        then.json_body(json!([Node::new("n1", "http://n1:8081")]));
    });
    fake_api.handle(|when, then| {
        when.method(PUT).path("/api/v1/namespaces/default/pods/p1");
        then.json_body(json!({
            "name": "p1",
            "namespace": "default",
            "image": "nginx",
            "nodeName": "n1",
            "phase": "Scheduled",
        }));
    });
    fake_api.build();

    let mut scheduler = Scheduler::new(client);
    let event = WatchEvent::pod(EventType::Added, Pod::new("default", "p1", "nginx"));
    scheduler.handle_event(event).await;

    fake_api.assert();
}

#[rstest(tokio::test)]
async fn test_handle_event_skips_when_no_ready_nodes() {
    let (mut fake_api, client) = make_fake_api_server();
    fake_api.handle(|when, then| {
        when.method(GET).path("/api/v1/nodes").query_param("status", "Ready");
        then.json_body(json!(Vec::<Node>::new()));
    });
    fake_api.build();

    let mut scheduler = Scheduler::new(client);
    let event = WatchEvent::pod(EventType::Added, Pod::new("default", "p1", "nginx"));
    scheduler.handle_event(event).await;

    fake_api.assert();
}

#[rstest(tokio::test)]
async fn test_handle_event_ignores_unschedulable_event() {
    let (mut fake_api, client) = make_fake_api_server();
    fake_api.build();

    let mut scheduler = Scheduler::new(client);
    let mut pod = Pod::new("default", "p1", "nginx");
    pod.phase = PodPhase::Running;
    scheduler.handle_event(WatchEvent::pod(EventType::Added, pod)).await;

    fake_api.assert();
}
