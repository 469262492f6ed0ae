//! Acquiring the external handles a lookup needs.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument};

use crate::{
    auth::{AuthClient, PkpAuthClient},
    config::Config,
    node::NodeConnection,
    registry::{PermissionsRegistry, PkpPermissionsContract},
    Result,
};

/// The connected collaborators for a single lookup.
pub struct LookupContext {
    pub auth_client: Box<dyn AuthClient>,
    pub registry: Box<dyn PermissionsRegistry>,
}

impl std::fmt::Debug for LookupContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupContext")
            .field("auth_client", &"[dyn AuthClient]")
            .field("registry", &"[dyn PermissionsRegistry]")
            .finish()
    }
}

#[async_trait]
pub trait Connector: Send + Sync {
    /// Establish every connection a lookup needs. A failure of any of them
    /// fails the whole lookup.
    async fn connect(&self) -> Result<LookupContext>;
}

/// Connects to the node network, the auth service and the registry described
/// by a [`Config`]. Every call opens fresh connections.
#[derive(Debug)]
pub struct NetworkConnector {
    config: Config,
    http: Client,
}

impl NetworkConnector {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl Connector for NetworkConnector {
    #[instrument(skip_all, fields(network = %self.config.network.name))]
    async fn connect(&self) -> Result<LookupContext> {
        // 1. connect to the node network
        let node = NodeConnection::connect(&self.config.network, &self.http).await?;

        // 2. bind the auth client to it
        let auth_client = PkpAuthClient::new(
            node,
            self.config.relay_api_key.clone(),
            self.config.discord.clone(),
            self.http.clone(),
        )?;

        // 3. connect to the permissions registry
        let registry = PkpPermissionsContract::connect(&self.config.registry).await?;

        info!("Lookup context ready");
        Ok(LookupContext {
            auth_client: Box::new(auth_client),
            registry: Box::new(registry),
        })
    }
}
