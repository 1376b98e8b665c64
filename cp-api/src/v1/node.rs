use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// A registered worker's readiness.  `NotReady` is reachable only via an explicit `UpdateNode`
/// call (e.g. a future heartbeat component); nothing in this workspace transitions a node into
/// it automatically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeStatus {
    #[default]
    Ready,
    NotReady,
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeStatus::Ready => "Ready",
            NodeStatus::NotReady => "NotReady",
        };
        write!(f, "{s}")
    }
}

/// A registered worker host, identified by `name` (unique cluster-wide).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub status: NodeStatus,
}

impl Node {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Node {
        Node { name: name.into(), address: address.into(), status: NodeStatus::Ready }
    }
}
