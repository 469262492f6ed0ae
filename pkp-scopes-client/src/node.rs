//! Connection to the node network.
//!
//! The lookup only needs to know that enough nodes are reachable before the
//! auth client is bound to them; the node protocol itself is not spoken here
//! beyond the handshake.

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use url::Url;
use uuid::Uuid;

use crate::{config::NetworkSettings, PkpScopesClientError, Result};

const HANDSHAKE_PATH: &str = "web/handshake";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HandshakeRequest<'a> {
    client_public_key: &'a str,
    challenge: String,
}

/// A set of nodes that answered the handshake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeConnection {
    network: String,
    connected_nodes: Vec<Url>,
}

impl NodeConnection {
    /// Handshake with every bootstrap node. Fails unless at least
    /// `min_node_count` of them answer successfully.
    #[instrument(skip_all, fields(network = %settings.name))]
    pub async fn connect(settings: &NetworkSettings, http: &Client) -> Result<Self> {
        let mut connected_nodes = Vec::new();

        for node_url in &settings.bootstrap_urls {
            match handshake(http, node_url).await {
                Ok(()) => {
                    debug!(node = %node_url, "Handshake succeeded");
                    connected_nodes.push(node_url.clone());
                }
                Err(e) => warn!(node = %node_url, "Handshake failed: {e}"),
            }
        }

        Self::from_handshakes(settings, connected_nodes)
    }

    pub(crate) fn from_handshakes(settings: &NetworkSettings, connected_nodes: Vec<Url>) -> Result<Self> {
        if connected_nodes.len() < settings.min_node_count {
            return Err(PkpScopesClientError::NodeConnection(format!(
                "{} of {} nodes answered, {} required",
                connected_nodes.len(),
                settings.bootstrap_urls.len(),
                settings.min_node_count
            )));
        }

        info!(
            "Connected to {} of {} nodes",
            connected_nodes.len(),
            settings.bootstrap_urls.len()
        );
        Ok(Self {
            network: settings.name.clone(),
            connected_nodes,
        })
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn connected_nodes(&self) -> &[Url] {
        &self.connected_nodes
    }
}

async fn handshake(http: &Client, node_url: &Url) -> Result<()> {
    let request = HandshakeRequest {
        client_public_key: "test",
        challenge: Uuid::new_v4().simple().to_string(),
    };

    let _ = http
        .post(node_url.join(HANDSHAKE_PATH)?)
        .json(&request)
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}
