//! The auth client and its per-method providers.
//!
//! Dispatch is a closed match from [`AuthMethodType`] to [`ProviderType`];
//! each provider implements [`AuthProvider`] to turn a [`Credential`] into the
//! [`AuthIdentifier`] the permissions registry is keyed by.

mod discord;
mod eth_wallet;
mod google;
mod stytch_otp;
mod webauthn;

pub use self::{
    discord::DiscordProvider, eth_wallet::EthWalletProvider, google::GoogleProvider,
    stytch_otp::StytchOtpProvider, webauthn::WebAuthnProvider,
};

use async_trait::async_trait;
use pkp_scopes::{
    infrastructure::sensitive_info::REDACTED_INFO_LABEL,
    types::{AuthIdentifier, AuthMethodType, Credential},
};
use reqwest::Client;
use std::fmt::Display;
use tracing::debug;

use crate::{config::DiscordSettings, node::NodeConnection, PkpScopesClientError, Result};

/// The provider kinds an [`AuthClient`] can initialize.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProviderType {
    EthWallet,
    Google,
    Discord,
    StytchOtp,
    WebAuthn,
}

impl ProviderType {
    /// The provider that handles credentials of the given type.
    pub fn for_auth_method(auth_method_type: AuthMethodType) -> Self {
        match auth_method_type {
            AuthMethodType::EthWallet => ProviderType::EthWallet,
            AuthMethodType::GoogleJwt => ProviderType::Google,
            AuthMethodType::Discord => ProviderType::Discord,
            AuthMethodType::StytchOtp => ProviderType::StytchOtp,
            AuthMethodType::WebAuthn => ProviderType::WebAuthn,
        }
    }

    /// The credential type this provider accepts.
    pub fn auth_method_type(self) -> AuthMethodType {
        match self {
            ProviderType::EthWallet => AuthMethodType::EthWallet,
            ProviderType::Google => AuthMethodType::GoogleJwt,
            ProviderType::Discord => AuthMethodType::Discord,
            ProviderType::StytchOtp => AuthMethodType::StytchOtp,
            ProviderType::WebAuthn => AuthMethodType::WebAuthn,
        }
    }
}

impl Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProviderType::EthWallet => "EthWallet",
            ProviderType::Google => "Google",
            ProviderType::Discord => "Discord",
            ProviderType::StytchOtp => "StytchOtp",
            ProviderType::WebAuthn => "WebAuthn",
        };
        f.write_str(name)
    }
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    fn provider_type(&self) -> ProviderType;

    /// Derive the registry lookup key for `credential`. Deriving twice from
    /// the same credential yields the same identifier.
    async fn auth_method_id(&self, credential: &Credential) -> Result<AuthIdentifier>;

    /// Error for a credential this provider does not handle.
    fn mismatch(&self, credential: &Credential) -> PkpScopesClientError {
        PkpScopesClientError::ProviderMismatch {
            provider: self.provider_type(),
            found: credential.auth_method_type(),
        }
    }
}

pub trait AuthClient: Send + Sync {
    fn init_provider(&self, provider_type: ProviderType) -> Box<dyn AuthProvider>;
}

/// Auth client bound to a node connection and a relay API key.
pub struct PkpAuthClient {
    node: NodeConnection,
    relay_api_key: String,
    discord: DiscordSettings,
    http: Client,
}

impl std::fmt::Debug for PkpAuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PkpAuthClient")
            .field("node", &self.node)
            .field("relay_api_key", &REDACTED_INFO_LABEL)
            .field("discord", &self.discord)
            .finish_non_exhaustive()
    }
}

impl PkpAuthClient {
    pub fn new(
        node: NodeConnection,
        relay_api_key: Option<String>,
        discord: DiscordSettings,
        http: Client,
    ) -> Result<Self> {
        let relay_api_key = relay_api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                PkpScopesClientError::AuthServiceConnection(
                    "relay API key is missing".to_string(),
                )
            })?;
        debug!(network = node.network(), "Auth client bound to node network");

        Ok(Self {
            node,
            relay_api_key,
            discord,
            http,
        })
    }

    pub fn node(&self) -> &NodeConnection {
        &self.node
    }

    pub fn relay_api_key(&self) -> &str {
        &self.relay_api_key
    }
}

impl AuthClient for PkpAuthClient {
    fn init_provider(&self, provider_type: ProviderType) -> Box<dyn AuthProvider> {
        match provider_type {
            ProviderType::EthWallet => Box::new(EthWalletProvider),
            ProviderType::Google => Box::new(GoogleProvider),
            ProviderType::Discord => Box::new(DiscordProvider::new(
                self.http.clone(),
                self.discord.clone(),
            )),
            ProviderType::StytchOtp => Box::new(StytchOtpProvider),
            ProviderType::WebAuthn => Box::new(WebAuthnProvider),
        }
    }
}
