pub mod nodes;
pub mod pods;

use std::sync::Arc;

use cp_store::WatchHub;

/// Deregisters a watch subscription when the handling stream ends or the client disconnects,
/// whichever Rocket notices first -- either way the generator this guard lives in gets dropped,
/// so this is the only cleanup path the watch routes need.
pub(crate) struct UnsubscribeGuard {
    hub: Arc<WatchHub>,
    namespace: Option<String>,
    id: u64,
}

impl UnsubscribeGuard {
    pub(crate) fn pods(hub: Arc<WatchHub>, namespace: &str, id: u64) -> UnsubscribeGuard {
        UnsubscribeGuard { hub, namespace: Some(namespace.to_string()), id }
    }

    pub(crate) fn nodes(hub: Arc<WatchHub>, id: u64) -> UnsubscribeGuard {
        UnsubscribeGuard { hub, namespace: None, id }
    }
}

impl Drop for UnsubscribeGuard {
    fn drop(&mut self) {
        match &self.namespace {
            Some(ns) => self.hub.unsubscribe_pods(ns, self.id),
            None => self.hub.unsubscribe_nodes(self.id),
        }
    }
}
