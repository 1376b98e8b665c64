use std::collections::HashMap;
use std::sync::Mutex;

use cp_api::v1::WatchEvent;
use cp_core::constants::WATCH_QUEUE_CAPACITY;
use tokio::sync::mpsc;
use tracing::warn;

/// The receiving half of a watch subscription, handed back to callers of [`WatchHub::subscribe`].
pub type Subscription = mpsc::Receiver<WatchEvent>;

struct Subscriber {
    id: u64,
    tx: mpsc::Sender<WatchEvent>,
}

/// Multiplexes object mutation events to any number of concurrent subscribers, per §4.2.
///
/// Pod events are partitioned by namespace; node events are cluster-wide and delivered to every
/// node subscriber regardless of namespace, since nodes carry no namespace of their own. Each
/// table is a flat list behind its own `Mutex` -- the design note in §4.2 only requires a coarse
/// lock, and the two tables are never locked together.
#[derive(Default)]
pub struct WatchHub {
    pod_subs: Mutex<HashMap<String, Vec<Subscriber>>>,
    node_subs: Mutex<Vec<Subscriber>>,
    next_id: Mutex<u64>,
}

impl WatchHub {
    pub fn new() -> WatchHub {
        WatchHub::default()
    }

    fn alloc_id(&self) -> u64 {
        let mut next_id = self.next_id.lock().expect("lock poisoned");
        let id = *next_id;
        *next_id += 1;
        id
    }

    /// Registers a new subscriber for pod events in `namespace` and returns the receiving half of
    /// its bounded queue (capacity per [`WATCH_QUEUE_CAPACITY`]).
    pub fn subscribe_pods(&self, namespace: &str) -> (u64, Subscription) {
        let id = self.alloc_id();
        let (tx, rx) = mpsc::channel(WATCH_QUEUE_CAPACITY);
        self.pod_subs
            .lock()
            .expect("lock poisoned")
            .entry(namespace.to_string())
            .or_default()
            .push(Subscriber { id, tx });
        (id, rx)
    }

    /// Registers a new subscriber for node events and returns the receiving half of its bounded
    /// queue.
    pub fn subscribe_nodes(&self) -> (u64, Subscription) {
        let id = self.alloc_id();
        let (tx, rx) = mpsc::channel(WATCH_QUEUE_CAPACITY);
        self.node_subs.lock().expect("lock poisoned").push(Subscriber { id, tx });
        (id, rx)
    }

    pub fn unsubscribe_pods(&self, namespace: &str, id: u64) {
        if let Some(subs) = self.pod_subs.lock().expect("lock poisoned").get_mut(namespace) {
            subs.retain(|s| s.id != id);
        }
    }

    pub fn unsubscribe_nodes(&self, id: u64) {
        self.node_subs.lock().expect("lock poisoned").retain(|s| s.id != id);
    }

    /// Delivers `event` to every current pod subscriber of `namespace`. Never blocks: a
    /// subscriber whose queue is full has the event dropped and logged, per §4.2.
    ///
    /// The subscriber list is snapshotted (cloned senders) under the lock and then released
    /// before any delivery attempt, so a slow or disconnected subscriber never makes a writer
    /// wait on the hub's lock.
    pub fn publish_pod(&self, namespace: &str, event: WatchEvent) {
        let senders: Vec<mpsc::Sender<WatchEvent>> = {
            let subs = self.pod_subs.lock().expect("lock poisoned");
            match subs.get(namespace) {
                Some(subs) => subs.iter().map(|s| s.tx.clone()).collect(),
                None => return,
            }
        };
        for tx in senders {
            if let Err(e) = tx.try_send(event.clone()) {
                warn!("dropping watch event for namespace {namespace}: {e}");
            }
        }
    }

    /// Delivers `event` to every current node subscriber, with the same non-blocking,
    /// drop-on-full discipline as [`WatchHub::publish_pod`].
    pub fn publish_node(&self, event: WatchEvent) {
        let senders: Vec<mpsc::Sender<WatchEvent>> = {
            let subs = self.node_subs.lock().expect("lock poisoned");
            subs.iter().map(|s| s.tx.clone()).collect()
        };
        for tx in senders {
            if let Err(e) = tx.try_send(event.clone()) {
                warn!("dropping node watch event: {e}");
            }
        }
    }
}
