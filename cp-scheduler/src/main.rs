mod scheduler;

use anyhow::Result as AnyResult;
use clap::Parser;
use cp_api::Client;
use cp_core::constants::{
    DEFAULT_API_SERVER_URL,
    DEFAULT_NAMESPACE,
};
use cp_core::{
    fatal,
    logging,
};
use scheduler::Scheduler;
use tracing::{
    info,
    instrument,
};

#[derive(Parser, Debug)]
struct Options {
    #[arg(long, default_value = DEFAULT_API_SERVER_URL)]
    api_server_url: String,

    #[arg(short, long, default_value = "info")]
    verbosity: String,
}

#[instrument(ret, err)]
async fn run(opts: Options) -> AnyResult<()> {
    let client = Client::new(&opts.api_server_url)?;
    let mut rx = client.watch_pods(DEFAULT_NAMESPACE).await?;
    let mut scheduler = Scheduler::new(client);

    info!("scheduler watching namespace {DEFAULT_NAMESPACE}");
    while let Some(event) = rx.recv().await {
        scheduler.handle_event(event).await;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Options::parse();
    logging::setup(&args.verbosity);
    if let Err(err) = run(args).await {
        fatal!(err, "scheduler failed");
    }
}

#[cfg(test)]
mod tests;
