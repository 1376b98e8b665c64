use std::sync::Arc;

use cp_api::v1::{
    EventType,
    Pod,
    WatchEvent,
};
use cp_store::{
    ObjectStore,
    WatchHub,
};
use rocket::response::status::Created;
use rocket::response::stream::ByteStream;
use rocket::serde::json::Json;
use rocket::{
    delete,
    get,
    post,
    put,
    State,
};
use tracing::{
    info,
    warn,
};

use crate::error::ApiError;
use crate::routes::UnsubscribeGuard;

/// A pod create/update body's namespace must agree with the path namespace, per §6's PUT
/// contract; we apply the same rule to POST so a created pod always lives where its URL says.
fn validate_namespace(path_ns: &str, body_ns: &str) -> Result<(), ApiError> {
    if body_ns != path_ns {
        return Err(ApiError::invalid_argument(format!(
            "namespace mismatch: path has {path_ns}, body has {body_ns}"
        )));
    }
    Ok(())
}

#[post("/namespaces/<ns>/pods", data = "<pod>")]
pub fn create_pod(
    ns: &str,
    mut pod: Json<Pod>,
    store: &State<Arc<ObjectStore>>,
    hub: &State<Arc<WatchHub>>,
) -> Result<Created<Json<Pod>>, ApiError> {
    if pod.name.is_empty() {
        return Err(ApiError::invalid_argument("pod name must not be empty"));
    }
    pod.namespace = ns.to_string();
    let created = store.create_pod(pod.into_inner())?;
    info!("created pod {}/{}", created.namespace, created.name);
    hub.publish_pod(ns, WatchEvent::pod(EventType::Added, created.clone()));
    Ok(Created::new("").body(Json(created)))
}

#[get("/namespaces/<ns>/pods", rank = 2)]
pub fn list_pods(ns: &str, store: &State<Arc<ObjectStore>>) -> Json<Vec<Pod>> {
    Json(store.list_pods(ns))
}

#[get("/namespaces/<ns>/pods?watch=true", rank = 1)]
pub fn watch_pods(ns: &str, hub: &State<Arc<WatchHub>>) -> ByteStream![Vec<u8>] {
    let hub: Arc<WatchHub> = hub.inner().clone();
    let (id, mut rx) = hub.subscribe_pods(ns);
    let guard = UnsubscribeGuard::pods(Arc::clone(&hub), ns, id);

    ByteStream! {
        let _guard = guard;
        while let Some(event) = rx.recv().await {
            match serde_json::to_vec(&event) {
                Ok(mut line) => {
                    line.push(b'\n');
                    yield line;
                },
                Err(e) => warn!("could not serialize watch event: {e}"),
            }
        }
    }
}

#[get("/namespaces/<ns>/pods/<name>")]
pub fn get_pod(ns: &str, name: &str, store: &State<Arc<ObjectStore>>) -> Result<Json<Pod>, ApiError> {
    Ok(Json(store.get_pod(ns, name)?))
}

#[put("/namespaces/<ns>/pods/<name>", data = "<pod>")]
pub fn update_pod(
    ns: &str,
    name: &str,
    pod: Json<Pod>,
    store: &State<Arc<ObjectStore>>,
    hub: &State<Arc<WatchHub>>,
) -> Result<Json<Pod>, ApiError> {
    validate_namespace(ns, &pod.namespace)?;
    if pod.name != name {
        return Err(ApiError::invalid_argument(format!("name mismatch: path has {name}, body has {}", pod.name)));
    }

    let updated = store.update_pod(pod.into_inner())?;
    hub.publish_pod(ns, WatchEvent::pod(EventType::Modified, updated.clone()));
    Ok(Json(updated))
}

#[delete("/namespaces/<ns>/pods/<name>")]
pub fn delete_pod(
    ns: &str,
    name: &str,
    store: &State<Arc<ObjectStore>>,
    hub: &State<Arc<WatchHub>>,
) -> Result<Json<Pod>, ApiError> {
    let terminating = store.delete_pod(ns, name)?;
    info!("pod {ns}/{name} marked terminating");
    hub.publish_pod(ns, WatchEvent::pod(EventType::Deleted, terminating.clone()));
    Ok(Json(terminating))
}
