use cp_api::v1::{
    EventType,
    NodeStatus,
    Pod,
    PodPhase,
    WatchEvent,
};
use cp_api::Client;
use tracing::{
    info,
    warn,
};

/// Round-robin pod scheduler per §4.4: reacts only to `ADDED` events for `Pending` pods, assigns
/// them across the current `Ready` node list using a process-local cursor. The cursor is never
/// persisted -- a restart loses round-robin position, which the design accepts.
pub struct Scheduler {
    client: Client,
    cursor: usize,
}

impl Scheduler {
    pub fn new(client: Client) -> Scheduler {
        Scheduler { client, cursor: 0 }
    }

    /// Filters an incoming watch event down to a pod this scheduler should act on, per steps 1-3
    /// of §4.4's algorithm.
    pub(crate) fn schedulable_pod(event: WatchEvent) -> Option<Pod> {
        if event.event_type != EventType::Added {
            return None;
        }
        let pod = event.pod?;
        if pod.phase != PodPhase::Pending {
            return None;
        }
        if pod.is_terminating() {
            info!("pod {}/{} is terminating, skipping scheduling", pod.namespace, pod.name);
            return None;
        }
        Some(pod)
    }

    /// Handles one watch event, scheduling the pod it names if it qualifies. Never returns an
    /// error -- client failures are logged and the attempt is dropped, per §7's propagation
    /// policy for the scheduler.
    pub async fn handle_event(&mut self, event: WatchEvent) {
        let Some(pod) = Self::schedulable_pod(event) else {
            return;
        };

        let nodes = match self.client.list_nodes(Some(NodeStatus::Ready)).await {
            Ok(nodes) => nodes,
            Err(e) => {
                warn!("could not list ready nodes: {e}");
                return;
            },
        };
        if nodes.is_empty() {
            warn!("no ready nodes, leaving pod {}/{} pending", pod.namespace, pod.name);
            return;
        }

        let picked = &nodes[self.cursor % nodes.len()];
        let mut assigned = pod.clone();
        assigned.node_name = picked.name.clone();
        assigned.phase = PodPhase::Scheduled;

        match self.client.update_pod(&pod.namespace, &assigned).await {
            Ok(_) => {
                info!("scheduled pod {}/{} onto node {}", pod.namespace, pod.name, picked.name);
                self.cursor = self.cursor.wrapping_add(1);
            },
            Err(e) => warn!("could not assign pod {}/{}: {e}", pod.namespace, pod.name),
        }
    }
}
