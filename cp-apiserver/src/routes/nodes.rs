use std::sync::Arc;

use cp_api::v1::{
    EventType,
    Node,
    NodeStatus,
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

#[post("/nodes", data = "<node>")]
pub fn create_node(
    node: Json<Node>,
    store: &State<Arc<ObjectStore>>,
    hub: &State<Arc<WatchHub>>,
) -> Result<Created<Json<Node>>, ApiError> {
    if node.name.is_empty() {
        return Err(ApiError::invalid_argument("node name must not be empty"));
    }
    let created = store.create_node(node.into_inner())?;
    info!("registered node {}", created.name);
    hub.publish_node(WatchEvent::node(EventType::Added, created.clone()));
    Ok(Created::new("").body(Json(created)))
}

#[get("/nodes?<status>", rank = 2)]
pub fn list_nodes(status: Option<&str>, store: &State<Arc<ObjectStore>>) -> Json<Vec<Node>> {
    let wanted = match status {
        Some("Ready") => Some(NodeStatus::Ready),
        Some("NotReady") => Some(NodeStatus::NotReady),
        _ => None,
    };
    let nodes = store.list_nodes().into_iter().filter(|n| wanted.is_none_or(|s| n.status == s)).collect();
    Json(nodes)
}

#[get("/nodes?watch=true", rank = 1)]
pub fn watch_nodes(hub: &State<Arc<WatchHub>>) -> ByteStream![Vec<u8>] {
    let hub: Arc<WatchHub> = hub.inner().clone();
    let (id, mut rx) = hub.subscribe_nodes();
    let guard = UnsubscribeGuard::nodes(Arc::clone(&hub), id);

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

#[get("/nodes/<name>")]
pub fn get_node(name: &str, store: &State<Arc<ObjectStore>>) -> Result<Json<Node>, ApiError> {
    Ok(Json(store.get_node(name)?))
}

#[put("/nodes/<name>", data = "<node>")]
pub fn update_node(
    name: &str,
    node: Json<Node>,
    store: &State<Arc<ObjectStore>>,
    hub: &State<Arc<WatchHub>>,
) -> Result<Json<Node>, ApiError> {
    if node.name != name {
        return Err(ApiError::invalid_argument(format!("name mismatch: path has {name}, body has {}", node.name)));
    }
    let updated = store.update_node(node.into_inner())?;
    hub.publish_node(WatchEvent::node(EventType::Modified, updated.clone()));
    Ok(Json(updated))
}

#[delete("/nodes/<name>")]
pub fn delete_node(name: &str, store: &State<Arc<ObjectStore>>, hub: &State<Arc<WatchHub>>) -> Result<Json<Node>, ApiError> {
    let deleted = store.delete_node(name)?;
    info!("deleted node {name}");
    hub.publish_node(WatchEvent::node(EventType::Deleted, deleted.clone()));
    Ok(Json(deleted))
}
