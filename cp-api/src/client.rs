use std::time::Duration;

use cp_core::constants::HTTP_CLIENT_TIMEOUT_SECONDS;
use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::warn;
use url::Url;

use crate::error::{
    ApiErrorBody,
    ClientError,
};
use crate::v1::{
    Node,
    NodeStatus,
    Pod,
    WatchEvent,
};

/// A blocking-HTTP-with-a-timeout client for the control plane API server, used by the
/// scheduler, the node agent, and the operator CLI.  Every call respects a 10-second timeout and
/// never retries -- convergence is the caller's job (a watch event or the next tick), not this
/// client's.
#[derive(Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Client, ClientError> {
        let base_url = Url::parse(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_CLIENT_TIMEOUT_SECONDS))
            .build()?;
        Ok(Client { base_url, http })
    }

    fn pods_url(&self, namespace: &str) -> Url {
        self.base_url.join(&format!("api/v1/namespaces/{namespace}/pods/")).expect("valid URL segment")
    }

    fn pod_url(&self, namespace: &str, name: &str) -> Url {
        self.pods_url(namespace).join(name).expect("valid URL segment")
    }

    fn nodes_url(&self) -> Url {
        self.base_url.join("api/v1/nodes/").expect("valid URL segment")
    }

    fn node_url(&self, name: &str) -> Url {
        self.nodes_url().join(name).expect("valid URL segment")
    }

    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body_text = resp.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiErrorBody>(&body_text) {
            Ok(body) => Err(ClientError::Api(body)),
            Err(_) => Err(ClientError::UnexpectedStatus { status: status.as_u16(), body: body_text }),
        }
    }

    pub async fn create_pod(&self, namespace: &str, pod: &Pod) -> Result<Pod, ClientError> {
        let resp = self.http.post(self.pods_url(namespace)).json(pod).send().await?;
        Self::check_status(resp).await?.json().await.map_err(ClientError::from)
    }

    pub async fn get_pod(&self, namespace: &str, name: &str) -> Result<Pod, ClientError> {
        let resp = self.http.get(self.pod_url(namespace, name)).send().await?;
        Self::check_status(resp).await?.json().await.map_err(ClientError::from)
    }

    pub async fn update_pod(&self, namespace: &str, pod: &Pod) -> Result<Pod, ClientError> {
        let resp = self.http.put(self.pod_url(namespace, &pod.name)).json(pod).send().await?;
        Self::check_status(resp).await?.json().await.map_err(ClientError::from)
    }

    pub async fn delete_pod(&self, namespace: &str, name: &str) -> Result<(), ClientError> {
        let resp = self.http.delete(self.pod_url(namespace, name)).send().await?;
        Self::check_status(resp).await?;
        Ok(())
    }

    pub async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>, ClientError> {
        let resp = self.http.get(self.pods_url(namespace)).send().await?;
        Self::check_status(resp).await?.json().await.map_err(ClientError::from)
    }

    /// Opens a watch stream for `namespace` and returns the receiving half of a channel that is
    /// fed by a background task reading newline-delimited JSON events off the response body.
    /// The channel closes when the stream ends or the server drops the connection; the caller
    /// should re-`list_pods` and re-`watch_pods` to reconverge, per §7.
    pub async fn watch_pods(&self, namespace: &str) -> Result<mpsc::Receiver<WatchEvent>, ClientError> {
        let resp = self
            .http
            .get(self.pods_url(namespace))
            .query(&[("watch", "true")])
            .send()
            .await?;
        let resp = Self::check_status(resp).await?;
        Ok(Self::spawn_watch_reader(resp, format!("pods/{namespace}")))
    }

    /// Spawns the background task that turns a streaming NDJSON response body into a channel of
    /// parsed events. Shared by `watch_pods` and `watch_nodes`; `label` is only used for logging.
    fn spawn_watch_reader(resp: reqwest::Response, label: String) -> mpsc::Receiver<WatchEvent> {
        let (tx, rx) = mpsc::channel(cp_core::constants::WATCH_QUEUE_CAPACITY);
        tokio::spawn(async move {
            let mut stream = resp.bytes_stream();
            let mut buf: Vec<u8> = Vec::new();
            while let Some(chunk) = stream.next().await {
                let chunk = match chunk {
                    Ok(c) => c,
                    Err(e) => {
                        warn!("watch stream for {label} errored: {e}");
                        break;
                    },
                };
                buf.extend_from_slice(&chunk);
                while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                    let line: Vec<u8> = buf.drain(..=pos).collect();
                    let line = &line[..line.len() - 1];
                    if line.is_empty() {
                        continue;
                    }
                    match serde_json::from_slice::<WatchEvent>(line) {
                        Ok(event) if tx.send(event).await.is_err() => return,
                        Ok(_) => {},
                        Err(e) => warn!("could not parse watch event: {e}"),
                    }
                }
            }
        });
        rx
    }

    pub async fn create_node(&self, node: &Node) -> Result<Node, ClientError> {
        let resp = self.http.post(self.nodes_url()).json(node).send().await?;
        Self::check_status(resp).await?.json().await.map_err(ClientError::from)
    }

    pub async fn get_node(&self, name: &str) -> Result<Node, ClientError> {
        let resp = self.http.get(self.node_url(name)).send().await?;
        Self::check_status(resp).await?.json().await.map_err(ClientError::from)
    }

    pub async fn update_node(&self, node: &Node) -> Result<Node, ClientError> {
        let resp = self.http.put(self.node_url(&node.name)).json(node).send().await?;
        Self::check_status(resp).await?.json().await.map_err(ClientError::from)
    }

    pub async fn delete_node(&self, name: &str) -> Result<(), ClientError> {
        let resp = self.http.delete(self.node_url(name)).send().await?;
        Self::check_status(resp).await?;
        Ok(())
    }

    pub async fn list_nodes(&self, status: Option<NodeStatus>) -> Result<Vec<Node>, ClientError> {
        let mut req = self.http.get(self.nodes_url());
        if let Some(status) = status {
            req = req.query(&[("status", status.to_string_query())]);
        }
        let resp = req.send().await?;
        Self::check_status(resp).await?.json().await.map_err(ClientError::from)
    }

    /// Opens a watch stream over the cluster-wide node collection. See `watch_pods` for the
    /// channel/reconnect contract.
    pub async fn watch_nodes(&self) -> Result<mpsc::Receiver<WatchEvent>, ClientError> {
        let resp = self.http.get(self.nodes_url()).query(&[("watch", "true")]).send().await?;
        let resp = Self::check_status(resp).await?;
        Ok(Self::spawn_watch_reader(resp, "nodes".to_string()))
    }
}

impl NodeStatus {
    fn to_string_query(self) -> &'static str {
        match self {
            NodeStatus::Ready => "Ready",
            NodeStatus::NotReady => "NotReady",
        }
    }
}
