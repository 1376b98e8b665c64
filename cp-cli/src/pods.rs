use clap::Args;
use cp_api::v1::Pod;
use cp_api::Client;
use cp_core::prelude::*;

#[derive(Args, Debug)]
pub struct CreateArgs {
    pub name: String,
    pub image: String,
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    pub name: String,
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub name: String,
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,
}

pub async fn create_cmd(args: &CreateArgs, client: &Client) -> EmptyResult {
    let pod = client.create_pod(&args.namespace, &Pod::new(&args.namespace, &args.name, &args.image)).await?;
    println!("{}", serde_json::to_string_pretty(&pod)?);
    Ok(())
}

pub async fn get_cmd(args: &GetArgs, client: &Client) -> EmptyResult {
    let pod = client.get_pod(&args.namespace, &args.name).await?;
    println!("{}", serde_json::to_string_pretty(&pod)?);
    Ok(())
}

pub async fn list_cmd(args: &ListArgs, client: &Client) -> EmptyResult {
    let pods = client.list_pods(&args.namespace).await?;
    println!("{}", serde_json::to_string_pretty(&pods)?);
    Ok(())
}

pub async fn delete_cmd(args: &DeleteArgs, client: &Client) -> EmptyResult {
    client.delete_pod(&args.namespace, &args.name).await?;
    println!("pod {}/{} marked for deletion", args.namespace, args.name);
    Ok(())
}

pub async fn watch_cmd(args: &WatchArgs, client: &Client) -> EmptyResult {
    let mut rx = client.watch_pods(&args.namespace).await?;
    while let Some(event) = rx.recv().await {
        println!("{}", serde_json::to_string(&event)?);
    }
    Ok(())
}
