mod nodes;
mod pods;

use clap::{
    Parser,
    Subcommand,
};
use cp_api::Client;
use cp_core::prelude::*;
use cp_core::{
    fatal,
    logging,
};

#[derive(Parser, Debug)]
#[command(name = "cpctl", about = "operator client for the control plane API server")]
struct Options {
    #[arg(long, global = true, default_value = DEFAULT_API_SERVER_URL)]
    api_server_url: String,

    #[arg(short, long, global = true, default_value = "warn")]
    verbosity: String,

    #[command(subcommand)]
    command: CpCommand,
}

#[derive(Subcommand, Debug)]
enum CpCommand {
    #[command(about = "create a pod")]
    CreatePod(pods::CreateArgs),
    #[command(about = "fetch a single pod")]
    GetPod(pods::GetArgs),
    #[command(about = "list pods in a namespace")]
    ListPods(pods::ListArgs),
    #[command(about = "mark a pod for deletion")]
    DeletePod(pods::DeleteArgs),
    #[command(about = "stream pod events as they occur")]
    WatchPods(pods::WatchArgs),

    #[command(about = "register a node")]
    CreateNode(nodes::CreateArgs),
    #[command(about = "fetch a single node")]
    GetNode(nodes::GetArgs),
    #[command(about = "list nodes, optionally filtered by status")]
    ListNodes(nodes::ListArgs),
    #[command(about = "remove a node")]
    DeleteNode(nodes::DeleteArgs),
    #[command(about = "stream node events as they occur")]
    WatchNodes(nodes::WatchArgs),
}

async fn run(opts: Options) -> EmptyResult {
    let client = Client::new(&opts.api_server_url)?;
    match &opts.command {
        CpCommand::CreatePod(args) => pods::create_cmd(args, &client).await,
        CpCommand::GetPod(args) => pods::get_cmd(args, &client).await,
        CpCommand::ListPods(args) => pods::list_cmd(args, &client).await,
        CpCommand::DeletePod(args) => pods::delete_cmd(args, &client).await,
        CpCommand::WatchPods(args) => pods::watch_cmd(args, &client).await,

        CpCommand::CreateNode(args) => nodes::create_cmd(args, &client).await,
        CpCommand::GetNode(args) => nodes::get_cmd(args, &client).await,
        CpCommand::ListNodes(args) => nodes::list_cmd(args, &client).await,
        CpCommand::DeleteNode(args) => nodes::delete_cmd(args, &client).await,
        CpCommand::WatchNodes(args) => nodes::watch_cmd(args, &client).await,
    }
}

#[tokio::main]
async fn main() {
    let args = Options::parse();
    logging::setup_for_cli(&args.verbosity);
    if let Err(err) = run(args).await {
        fatal!(err, "cpctl command failed");
    }
}

#[cfg(test)]
mod tests;
