use std::collections::HashMap;
use std::sync::RwLock;

use cp_api::v1::{
    Node,
    Pod,
    PodPhase,
};
use cp_core::time;
use tracing::debug;

use crate::error::StoreError;

/// The authoritative, in-memory object store for pods and nodes (§4.1).
///
/// A single `RwLock` per object kind gives a single-writer/many-reader model: readers observe a
/// consistent snapshot of any single object, and composite check-then-write operations (create,
/// update) are atomic with respect to all other store operations on that kind. Pods and nodes
/// never need to be locked together, so their locks are independent.
#[derive(Default)]
pub struct ObjectStore {
    pods: RwLock<HashMap<(String, String), Pod>>,
    nodes: RwLock<HashMap<String, Node>>,
}

impl ObjectStore {
    pub fn new() -> ObjectStore {
        ObjectStore::default()
    }

    /// Inserts `pod`, normalized per I5, failing with `PodAlreadyExists` if its key is taken.
    pub fn create_pod(&self, pod: Pod) -> Result<Pod, StoreError> {
        let pod = pod.normalized_for_create();
        let key = pod.key();
        let mut pods = self.pods.write().expect("lock poisoned");
        if pods.contains_key(&key) {
            return Err(StoreError::pod_already_exists(&key.0, &key.1));
        }
        pods.insert(key, pod.clone());
        Ok(pod)
    }

    pub fn get_pod(&self, namespace: &str, name: &str) -> Result<Pod, StoreError> {
        let pods = self.pods.read().expect("lock poisoned");
        pods.get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::pod_not_found(namespace, name))
    }

    /// Replaces the stored pod at `pod.key()` with `pod`, enforcing I3/I4: once the stored pod is
    /// terminating, the only accepted write is the transition `Terminating -> Deleted` with every
    /// other field unchanged from the stored copy.
    pub fn update_pod(&self, pod: Pod) -> Result<Pod, StoreError> {
        let key = pod.key();
        let mut pods = self.pods.write().expect("lock poisoned");
        let Some(current) = pods.get(&key) else {
            return Err(StoreError::pod_not_found(&key.0, &key.1));
        };

        if current.is_terminating() && !is_finalizing_delete(current, &pod) {
            return Err(StoreError::pod_conflict_terminating(&key.0, &key.1));
        }

        pods.insert(key, pod.clone());
        Ok(pod)
    }

    /// Logical delete: stamps `deletionTimestamp` and moves the pod to `Terminating`. The object
    /// remains queryable -- finalization to `Deleted` is a node agent's job (§4.5).
    pub fn delete_pod(&self, namespace: &str, name: &str) -> Result<Pod, StoreError> {
        let key = (namespace.to_string(), name.to_string());
        let mut pods = self.pods.write().expect("lock poisoned");
        let Some(current) = pods.get(&key) else {
            return Err(StoreError::pod_not_found(namespace, name));
        };
        if current.is_terminating() {
            return Err(StoreError::pod_conflict_terminating(namespace, name));
        }

        let mut terminating = current.clone();
        terminating.deletion_timestamp = Some(time::now());
        terminating.phase = PodPhase::Terminating;
        pods.insert(key, terminating.clone());
        Ok(terminating)
    }

    /// Returns every pod in `namespace`, including terminating and deleted ones, in unspecified
    /// order.
    pub fn list_pods(&self, namespace: &str) -> Vec<Pod> {
        let pods = self.pods.read().expect("lock poisoned");
        pods.values().filter(|p| p.namespace == namespace).cloned().collect()
    }

    pub fn create_node(&self, node: Node) -> Result<Node, StoreError> {
        let mut nodes = self.nodes.write().expect("lock poisoned");
        if nodes.contains_key(&node.name) {
            return Err(StoreError::node_already_exists(&node.name));
        }
        nodes.insert(node.name.clone(), node.clone());
        Ok(node)
    }

    pub fn get_node(&self, name: &str) -> Result<Node, StoreError> {
        let nodes = self.nodes.read().expect("lock poisoned");
        nodes.get(name).cloned().ok_or_else(|| StoreError::node_not_found(name))
    }

    pub fn update_node(&self, node: Node) -> Result<Node, StoreError> {
        let mut nodes = self.nodes.write().expect("lock poisoned");
        if !nodes.contains_key(&node.name) {
            return Err(StoreError::node_not_found(&node.name));
        }
        nodes.insert(node.name.clone(), node.clone());
        Ok(node)
    }

    /// Hard delete: the node is removed outright, no tombstone.
    pub fn delete_node(&self, name: &str) -> Result<Node, StoreError> {
        let mut nodes = self.nodes.write().expect("lock poisoned");
        nodes.remove(name).ok_or_else(|| StoreError::node_not_found(name))
    }

    pub fn list_nodes(&self) -> Vec<Node> {
        let nodes = self.nodes.read().expect("lock poisoned");
        nodes.values().cloned().collect()
    }
}

/// I4's carve-out: a terminating pod accepts exactly one further write, the finalizing
/// `Terminating -> Deleted` phase change with every other field left as stored.
fn is_finalizing_delete(stored: &Pod, incoming: &Pod) -> bool {
    if stored.phase != PodPhase::Terminating || incoming.phase != PodPhase::Deleted {
        debug!(
            "rejecting update to terminating pod {}/{}: not the finalizing transition",
            stored.namespace, stored.name
        );
        return false;
    }
    incoming.namespace == stored.namespace
        && incoming.node_name == stored.node_name
        && incoming.image == stored.image
        && incoming.deletion_timestamp == stored.deletion_timestamp
}
