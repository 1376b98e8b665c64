use cp_api::v1::{
    Node,
    Pod,
    PodPhase,
    WatchEvent,
};
use cp_api::{
    ApiErrorKind,
    Client,
    ClientError,
};
use cp_core::prelude::*;
use tracing::{
    info,
    warn,
};

/// Registers this node with the API server, per §4.5's startup contract: create, falling back to
/// an idempotent update if the node was already registered (e.g. a prior crash-restart of this
/// same agent).
pub async fn register(client: &Client, name: &str, address: &str) -> EmptyResult {
    match client.create_node(&Node::new(name, address)).await {
        Ok(_) => {
            info!("registered node {name}");
            Ok(())
        },
        Err(ClientError::Api(body)) if body.kind == ApiErrorKind::AlreadyExists => {
            info!("node {name} already registered, re-announcing address");
            client.update_node(&Node::new(name, address)).await?;
            Ok(())
        },
        Err(e) => Err(e.into()),
    }
}

/// Reconciles the subset of pods bound to `node_name` toward their declared next phase (§4.5).
/// Safe to call repeatedly: each transition is gated by the pod's current phase, so a pod that's
/// already converged is simply skipped on the next call.
pub struct Agent {
    client: Client,
    node_name: String,
}

impl Agent {
    pub fn new(client: Client, node_name: impl Into<String>) -> Agent {
        Agent { client, node_name: node_name.into() }
    }

    /// True if `event` concerns a pod bound to this agent's node -- the watch-trigger half of
    /// §4.5's reconcile trigger.
    pub fn watch_event_is_relevant(&self, event: &WatchEvent) -> bool {
        event.pod.as_ref().is_some_and(|p| p.node_name == self.node_name)
    }

    /// The single-pod transition rule from §4.5 step 2. Returns `None` if `pod` needs no action.
    pub(crate) fn next_phase(pod: &Pod) -> Option<PodPhase> {
        match pod.phase {
            PodPhase::Scheduled => Some(PodPhase::Running),
            PodPhase::Terminating if pod.deletion_timestamp.is_some() => Some(PodPhase::Deleted),
            _ => None,
        }
    }

    pub async fn reconcile(&self) {
        let pods = match self.client.list_pods(DEFAULT_NAMESPACE).await {
            Ok(pods) => pods,
            Err(e) => {
                warn!("could not list pods for reconcile: {e}");
                return;
            },
        };

        for pod in pods {
            if pod.node_name != self.node_name {
                continue;
            }
            let Some(next_phase) = Self::next_phase(&pod) else {
                continue;
            };

            let mut updated = pod.clone();
            updated.phase = next_phase;
            match self.client.update_pod(&pod.namespace, &updated).await {
                Ok(_) => info!("pod {}/{} -> {next_phase}", pod.namespace, pod.name),
                Err(e) => warn!("could not reconcile pod {}/{}: {e}", pod.namespace, pod.name),
            }
        }
    }
}
