use ethers::{types::Address, utils::to_checksum};
use pkp_scopes::{
    constants::DEFAULT_DISCORD_CLIENT_ID,
    infrastructure::sensitive_info::redact_option,
};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::Level;
use url::Url;

use crate::PkpScopesClientError;

pub const DEFAULT_DISCORD_API_URL: &str = "https://discord.com/api/";

/// Client configuration with all fields ready to use.
#[derive(Clone)]
pub struct Config {
    pub network: NetworkSettings,
    /// API key for the relay the auth client is bound to.
    pub relay_api_key: Option<String>,
    pub discord: DiscordSettings,
    pub registry: RegistrySettings,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkSettings {
    pub name: String,
    pub bootstrap_urls: Vec<Url>,
    /// Minimum number of nodes that must answer the handshake.
    pub min_node_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscordSettings {
    pub client_id: String,
    pub api_url: Url,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrySettings {
    pub rpc_url: Url,
    pub pkp_permissions_address: Address,
    pub chain_id: Option<u64>,
}

impl Config {
    pub const RELAY_API_KEY: &'static str = "PKP_SCOPES_RELAY_API_KEY";

    /// Read a config file. A `relay_api_key` passed here takes precedence over
    /// the one in the file.
    pub fn from_file(
        config_path: impl AsRef<Path>,
        relay_api_key: Option<String>,
    ) -> Result<Self, PkpScopesClientError> {
        let config_string = std::fs::read_to_string(&config_path).map_err(|e| {
            PkpScopesClientError::FileIo(e, config_path.as_ref().to_path_buf())
        })?;
        let config_file = ConfigFile::from_str(&config_string)?;
        Self::from_config_file(config_file, relay_api_key)
    }

    pub fn from_config_file(
        config: ConfigFile,
        relay_api_key: Option<String>,
    ) -> Result<Self, PkpScopesClientError> {
        let ConfigFile {
            network,
            auth,
            registry,
            logging,
        } = config;

        Ok(Self {
            network: network.into_settings()?,
            relay_api_key: relay_api_key.or(auth.relay_api_key),
            discord: DiscordSettings {
                client_id: auth
                    .discord_client_id
                    .unwrap_or_else(|| DEFAULT_DISCORD_CLIENT_ID.to_string()),
                api_url: parse_base_url(
                    auth.discord_api_url
                        .as_deref()
                        .unwrap_or(DEFAULT_DISCORD_API_URL),
                )?,
            },
            registry: registry.into_settings()?,
            logging,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("network", &self.network)
            .field("relay_api_key", &redact_option(&self.relay_api_key))
            .field("discord", &self.discord)
            .field("registry", &self.registry)
            .field("logging", &self.logging)
            .finish()
    }
}

impl std::fmt::Display for RegistrySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}",
            to_checksum(&self.pkp_permissions_address, None),
            self.rpc_url
        )
    }
}

/// Client configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
#[non_exhaustive]
pub struct ConfigFile {
    pub network: NetworkConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    pub registry: RegistryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
#[non_exhaustive]
pub struct NetworkConfig {
    pub name: String,
    pub bootstrap_urls: Vec<String>,
    /// Defaults to every bootstrap node.
    pub min_node_count: Option<usize>,
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
#[non_exhaustive]
pub struct AuthConfig {
    /// The relay API key can be provided here or passed to the [`Config`]
    /// constructors.
    pub relay_api_key: Option<String>,
    pub discord_client_id: Option<String>,
    pub discord_api_url: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("relay_api_key", &redact_option(&self.relay_api_key))
            .field("discord_client_id", &self.discord_client_id)
            .field("discord_api_url", &self.discord_api_url)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
#[non_exhaustive]
pub struct RegistryConfig {
    pub rpc_url: String,
    pub pkp_permissions_address: String,
    pub chain_id: Option<u64>,
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct LoggingConfig {
    #[serde_as(as = "DisplayFromStr")]
    pub stdout_log_level: Level,
    /// When set, every event is also written to this file as JSON.
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stdout_log_level: Level::INFO,
            log_file: None,
        }
    }
}

impl NetworkConfig {
    fn into_settings(self) -> Result<NetworkSettings, PkpScopesClientError> {
        if self.bootstrap_urls.is_empty() {
            return Err(PkpScopesClientError::InvalidConfig(
                "network.bootstrap_urls must not be empty".to_string(),
            ));
        }

        let bootstrap_urls = self
            .bootstrap_urls
            .iter()
            .map(|url| parse_base_url(url))
            .collect::<Result<Vec<_>, _>>()?;

        let min_node_count = self.min_node_count.unwrap_or(bootstrap_urls.len());
        if min_node_count == 0 || min_node_count > bootstrap_urls.len() {
            return Err(PkpScopesClientError::InvalidConfig(format!(
                "network.min_node_count must be between 1 and {}",
                bootstrap_urls.len()
            )));
        }

        Ok(NetworkSettings {
            name: self.name,
            bootstrap_urls,
            min_node_count,
        })
    }
}

impl RegistryConfig {
    fn into_settings(self) -> Result<RegistrySettings, PkpScopesClientError> {
        let invalid_address = || {
            PkpScopesClientError::InvalidConfig(format!(
                "registry.pkp_permissions_address is not a 20-byte hex address: {}",
                self.pkp_permissions_address
            ))
        };
        let pkp_permissions_address = self
            .pkp_permissions_address
            .parse::<Address>()
            .map_err(|_| invalid_address())?;
        if pkp_permissions_address.is_zero() {
            return Err(PkpScopesClientError::InvalidConfig(
                "registry.pkp_permissions_address must be set to the deployed PKPPermissions contract"
                    .to_string(),
            ));
        }

        Ok(RegistrySettings {
            rpc_url: Url::parse(&self.rpc_url)?,
            pkp_permissions_address,
            chain_id: self.chain_id,
        })
    }
}

/// Parse a URL that other paths will be joined onto, making sure it ends in a
/// slash so that joining keeps its last path segment.
fn parse_base_url(url: &str) -> Result<Url, PkpScopesClientError> {
    let mut url = Url::parse(url)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

impl FromStr for ConfigFile {
    type Err = PkpScopesClientError;

    fn from_str(config_string: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(config_string)?)
    }
}
