mod error;
mod routes;

use std::sync::Arc;

use anyhow::Result as AnyResult;
use clap::Parser;
use cp_core::constants::DEFAULT_API_SERVER_PORT;
use cp_core::{
    fatal,
    logging,
};
use cp_store::{
    ObjectStore,
    WatchHub,
};
use tracing::instrument;

#[derive(Parser, Debug)]
struct Options {
    #[arg(long, default_value_t = DEFAULT_API_SERVER_PORT)]
    port: u16,

    #[arg(short, long, default_value = "info")]
    verbosity: String,
}

#[instrument(ret, err)]
async fn run(opts: Options) -> AnyResult<()> {
    let store = Arc::new(ObjectStore::new());
    let hub = Arc::new(WatchHub::new());

    let rkt_config = rocket::Config { port: opts.port, ..Default::default() };
    rocket::custom(&rkt_config)
        .manage(store)
        .manage(hub)
        .mount("/api/v1", rocket::routes![
            routes::pods::create_pod,
            routes::pods::list_pods,
            routes::pods::watch_pods,
            routes::pods::get_pod,
            routes::pods::update_pod,
            routes::pods::delete_pod,
            routes::nodes::create_node,
            routes::nodes::list_nodes,
            routes::nodes::watch_nodes,
            routes::nodes::get_node,
            routes::nodes::update_node,
            routes::nodes::delete_node,
        ])
        .launch()
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Options::parse();
    logging::setup(&format!("{},rocket=warn", args.verbosity));
    if let Err(err) = run(args).await {
        fatal!(err, "API server failed");
    }
}

#[cfg(test)]
mod tests;
