use serde::{
    Deserialize,
    Serialize,
};

use crate::v1::node::Node;
use crate::v1::pod::Pod;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    Added,
    Modified,
    Deleted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Pod,
    Node,
}

/// A single mutation event delivered to watch subscribers.  Exactly one of `pod`/`node` is
/// populated, matching `objectType`.  `Deleted` events carry only the identifying fields of the
/// object that was logically (pods) or hard (nodes) removed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WatchEvent {
    #[serde(rename = "eventType")]
    pub event_type: EventType,
    #[serde(rename = "objectType")]
    pub object_type: ObjectType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod: Option<Pod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<Node>,
}

impl WatchEvent {
    pub fn pod(event_type: EventType, pod: Pod) -> WatchEvent {
        WatchEvent { event_type, object_type: ObjectType::Pod, pod: Some(pod), node: None }
    }

    pub fn node(event_type: EventType, node: Node) -> WatchEvent {
        WatchEvent { event_type, object_type: ObjectType::Node, pod: None, node: Some(node) }
    }
}
