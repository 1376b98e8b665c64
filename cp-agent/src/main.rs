mod agent;

use std::time::Duration;

use agent::Agent;
use anyhow::Result as AnyResult;
use clap::Parser;
use cp_api::Client;
use cp_core::constants::{
    DEFAULT_API_SERVER_URL,
    DEFAULT_NAMESPACE,
    DEFAULT_NODE_ADDRESS,
    RECONCILE_TICK_SECONDS,
};
use cp_core::{
    fatal,
    logging,
};
use tracing::{
    info,
    instrument,
};

#[derive(Parser, Debug)]
struct Options {
    #[arg(long)]
    node_name: String,

    #[arg(long, default_value = DEFAULT_NODE_ADDRESS)]
    node_address: String,

    #[arg(long, default_value = DEFAULT_API_SERVER_URL)]
    api_server_url: String,

    #[arg(short, long, default_value = "info")]
    verbosity: String,
}

#[instrument(ret, err)]
async fn run(opts: Options) -> AnyResult<()> {
    let client = Client::new(&opts.api_server_url)?;
    agent::register(&client, &opts.node_name, &opts.node_address).await?;

    let mut watch_rx = client.watch_pods(DEFAULT_NAMESPACE).await?;
    let agent = Agent::new(client, opts.node_name.clone());
    let mut ticker = tokio::time::interval(Duration::from_secs(RECONCILE_TICK_SECONDS));

    info!("node agent for {} reconciling against {}", opts.node_name, opts.api_server_url);
    loop {
        tokio::select! {
            maybe_event = watch_rx.recv() => {
                match maybe_event {
                    Some(event) if agent.watch_event_is_relevant(&event) => agent.reconcile().await,
                    Some(_) => {},
                    None => break,
                }
            },
            _ = ticker.tick() => agent.reconcile().await,
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Options::parse();
    logging::setup(&args.verbosity);
    if let Err(err) = run(args).await {
        fatal!(err, "node agent failed");
    }
}

#[cfg(test)]
mod tests;
