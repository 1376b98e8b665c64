mod event;
mod node;
mod pod;

pub use event::{
    EventType,
    ObjectType,
    WatchEvent,
};
pub use node::{
    Node,
    NodeStatus,
};
pub use pod::{
    Pod,
    PodPhase,
};
