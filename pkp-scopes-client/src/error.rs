use pkp_scopes::{constants::alerts, types::AuthMethodType, PkpScopesError};
use std::path::PathBuf;
use thiserror::Error;

use crate::auth::ProviderType;

#[derive(Debug, Error)]
pub enum PkpScopesClientError {
    // Connection errors
    #[error("Could not connect to the node network: {0}")]
    NodeConnection(String),
    #[error("Could not connect to the auth service: {0}")]
    AuthServiceConnection(String),
    #[error("Could not connect to the permissions registry: {0}")]
    RegistryConnection(String),
    #[error("Permissions registry is on chain {found}, expected {expected}")]
    ChainIdMismatch { expected: u64, found: u64 },

    // Auth provider errors
    #[error("The {provider} provider cannot handle {found} credentials")]
    ProviderMismatch {
        provider: ProviderType,
        found: AuthMethodType,
    },
    #[error("Auth provider request failed: {0}")]
    AuthProvider(String),

    // Registry errors
    #[error("Permissions registry call failed: {0}")]
    RegistryCall(String),

    // Config errors
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Could not read config file {1:?}: {0}")]
    FileIo(std::io::Error, PathBuf),

    // Wrapped errors
    #[error(transparent)]
    PkpScopes(#[from] PkpScopesError),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

impl PkpScopesClientError {
    /// The message to alert the user with, for the errors that abort a lookup
    /// at the boundary. Every other error propagates without an alert.
    pub fn alert_message(&self) -> Option<&'static str> {
        match self {
            Self::PkpScopes(PkpScopesError::InvalidCredential(_)) => {
                Some(alerts::INVALID_AUTH_METHOD)
            }
            Self::PkpScopes(PkpScopesError::UnsupportedAuthMethod(_)) => {
                Some(alerts::UNSUPPORTED_AUTH_METHOD)
            }
            _ => None,
        }
    }

    /// True for errors that were already reported to the user with an alert.
    pub fn is_recoverable(&self) -> bool {
        self.alert_message().is_some()
    }
}
