use anyhow::bail;
use clap::Args;
use cp_api::v1::{
    Node,
    NodeStatus,
};
use cp_api::Client;
use cp_core::prelude::*;

#[derive(Args, Debug)]
pub struct CreateArgs {
    pub name: String,
    pub address: String,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    pub name: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// filter by "Ready" or "NotReady"
    #[arg(long)]
    pub status: Option<String>,
}

fn parse_status(s: &str) -> anyhow::Result<NodeStatus> {
    match s {
        "Ready" => Ok(NodeStatus::Ready),
        "NotReady" => Ok(NodeStatus::NotReady),
        other => bail!("unrecognized node status {other}, expected Ready or NotReady"),
    }
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub name: String,
}

#[derive(Args, Debug)]
pub struct WatchArgs {}

pub async fn create_cmd(args: &CreateArgs, client: &Client) -> EmptyResult {
    let node = client.create_node(&Node::new(&args.name, &args.address)).await?;
    println!("{}", serde_json::to_string_pretty(&node)?);
    Ok(())
}

pub async fn get_cmd(args: &GetArgs, client: &Client) -> EmptyResult {
    let node = client.get_node(&args.name).await?;
    println!("{}", serde_json::to_string_pretty(&node)?);
    Ok(())
}

pub async fn list_cmd(args: &ListArgs, client: &Client) -> EmptyResult {
    let status = args.status.as_deref().map(parse_status).transpose()?;
    let nodes = client.list_nodes(status).await?;
    println!("{}", serde_json::to_string_pretty(&nodes)?);
    Ok(())
}

pub async fn delete_cmd(args: &DeleteArgs, client: &Client) -> EmptyResult {
    client.delete_node(&args.name).await?;
    println!("node {} deleted", args.name);
    Ok(())
}

pub async fn watch_cmd(_args: &WatchArgs, client: &Client) -> EmptyResult {
    let mut rx = client.watch_nodes().await?;
    while let Some(event) = rx.recv().await {
        println!("{}", serde_json::to_string(&event)?);
    }
    Ok(())
}
