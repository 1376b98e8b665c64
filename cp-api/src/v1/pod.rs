use std::fmt;

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

/// A pod's position in its lifecycle state machine.  The only legal forward transitions are
/// `Pending -> Scheduled -> Running -> Terminating -> Deleted`; nothing ever moves backwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PodPhase {
    #[default]
    Pending,
    Scheduled,
    Running,
    Terminating,
    Deleted,
}

impl fmt::Display for PodPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PodPhase::Pending => "Pending",
            PodPhase::Scheduled => "Scheduled",
            PodPhase::Running => "Running",
            PodPhase::Terminating => "Terminating",
            PodPhase::Deleted => "Deleted",
        };
        write!(f, "{s}")
    }
}

/// A unit of workload identified by `(namespace, name)`.
///
/// `namespace` defaults to `"default"` when omitted on the wire.  `nodeName` is empty until the
/// scheduler assigns it, and `deletionTimestamp` is unset until a delete request marks the pod
/// for termination; once set, it is never cleared (see `ObjectStore::update_pod`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pod {
    pub name: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, rename = "nodeName")]
    pub node_name: String,
    #[serde(default)]
    pub phase: PodPhase,
    #[serde(default, rename = "deletionTimestamp", skip_serializing_if = "Option::is_none")]
    pub deletion_timestamp: Option<DateTime<Utc>>,
}

fn default_namespace() -> String {
    cp_core::constants::DEFAULT_NAMESPACE.to_string()
}

impl Pod {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, image: impl Into<String>) -> Pod {
        Pod {
            name: name.into(),
            namespace: namespace.into(),
            image: image.into(),
            node_name: String::new(),
            phase: PodPhase::Pending,
            deletion_timestamp: None,
        }
    }

    pub fn key(&self) -> (String, String) {
        (self.namespace.clone(), self.name.clone())
    }

    pub fn is_terminating(&self) -> bool {
        self.deletion_timestamp.is_some()
    }

    /// Normalizes a client-supplied pod per store invariant I5: on create, `phase` is always
    /// `Pending`, `nodeName` is always empty, and `deletionTimestamp` is always unset,
    /// regardless of what the caller sent.
    pub fn normalized_for_create(mut self) -> Pod {
        self.phase = PodPhase::Pending;
        self.node_name = String::new();
        self.deletion_timestamp = None;
        self
    }
}
