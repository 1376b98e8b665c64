use cp_api::v1::{
    EventType,
    Node,
    Pod,
    WatchEvent,
};
use rstest::rstest;

use super::*;

#[rstest(tokio::test)]
async fn test_publish_delivers_in_order_to_single_subscriber() {
    let hub = WatchHub::new();
    let (_id, mut rx) = hub.subscribe_pods("default");

    for i in 0..5 {
        let pod = Pod::new("default", format!("p{i}"), "nginx");
        hub.publish_pod("default", WatchEvent::pod(EventType::Added, pod));
    }

    for i in 0..5 {
        let event = rx.recv().await.expect("event should be delivered");
        assert_eq!(event.pod.unwrap().name, format!("p{i}"));
    }
}

#[rstest(tokio::test)]
async fn test_publish_does_not_cross_namespaces() {
    let hub = WatchHub::new();
    let (_id, mut default_rx) = hub.subscribe_pods("default");
    let (_other_id, mut other_rx) = hub.subscribe_pods("other");

    hub.publish_pod("default", WatchEvent::pod(EventType::Added, Pod::new("default", "p1", "nginx")));

    let event = default_rx.recv().await.expect("default subscriber gets its own namespace's event");
    assert_eq!(event.pod.unwrap().namespace, "default");
    assert!(other_rx.try_recv().is_err());
}

#[rstest(tokio::test)]
async fn test_unsubscribe_stops_delivery() {
    let hub = WatchHub::new();
    let (id, mut rx) = hub.subscribe_pods("default");
    hub.unsubscribe_pods("default", id);

    hub.publish_pod("default", WatchEvent::pod(EventType::Added, Pod::new("default", "p1", "nginx")));

    assert!(rx.try_recv().is_err());
}

/// Slow-watcher drop: the 101st event into a 100-capacity queue is dropped, not blocked.
#[rstest(tokio::test)]
async fn test_full_queue_drops_event_instead_of_blocking() {
    let hub = WatchHub::new();
    let (_id, rx) = hub.subscribe_pods("default");

    for i in 0..101 {
        hub.publish_pod("default", WatchEvent::pod(EventType::Added, Pod::new("default", format!("p{i}"), "nginx")));
    }

    let mut rx = rx;
    let mut seen = Vec::new();
    while let Ok(event) = rx.try_recv() {
        seen.push(event.pod.unwrap().name);
    }

    assert_eq!(seen.len(), 100);
    assert_eq!(seen[0], "p0");
    assert_eq!(seen[99], "p99");
}

#[rstest(tokio::test)]
async fn test_node_events_are_cluster_wide() {
    let hub = WatchHub::new();
    let (_id, mut rx) = hub.subscribe_nodes();

    hub.publish_node(WatchEvent::node(EventType::Added, Node::new("n1", "http://n1:8081")));

    let event = rx.recv().await.unwrap();
    assert_eq!(event.node.unwrap().name, "n1");
}

#[rstest(tokio::test)]
async fn test_publish_with_no_subscribers_is_a_noop() {
    let hub = WatchHub::new();
    hub.publish_pod("default", WatchEvent::pod(EventType::Added, Pod::new("default", "p1", "nginx")));
    hub.publish_node(WatchEvent::node(EventType::Added, Node::new("n1", "http://n1:8081")));
}
