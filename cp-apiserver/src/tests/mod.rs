use std::sync::Arc;

use cp_store::{
    ObjectStore,
    WatchHub,
};
use rocket::local::blocking::Client;


fn test_client() -> Client {
    let rocket = rocket::build()
        .manage(Arc::new(ObjectStore::new()))
        .manage(Arc::new(WatchHub::new()))
        .mount("/api/v1", rocket::routes![
            crate::routes::pods::create_pod,
            crate::routes::pods::list_pods,
            crate::routes::pods::get_pod,
            crate::routes::pods::update_pod,
            crate::routes::pods::delete_pod,
            crate::routes::nodes::create_node,
            crate::routes::nodes::list_nodes,
            crate::routes::nodes::get_node,
            crate::routes::nodes::update_node,
            crate::routes::nodes::delete_node,
        ]);
    Client::tracked(rocket).expect("valid rocket instance")
}
