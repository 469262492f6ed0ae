use async_trait::async_trait;
use pkp_scopes::types::{AuthIdentifier, Credential};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{AuthProvider, ProviderType};
use crate::{config::DiscordSettings, PkpScopesClientError, Result};

const CURRENT_USER_PATH: &str = "users/@me";

#[derive(Debug, Deserialize)]
struct DiscordUser {
    id: String,
}

/// Derives `keccak256("{user_id}:{client_id}")`, looking the user id up with
/// the OAuth access token.
#[derive(Debug)]
pub struct DiscordProvider {
    http: Client,
    settings: DiscordSettings,
}

impl DiscordProvider {
    pub fn new(http: Client, settings: DiscordSettings) -> Self {
        Self { http, settings }
    }

    #[instrument(skip_all, err(Debug))]
    async fn fetch_user_id(&self, access_token: &str) -> Result<String> {
        let response = self
            .http
            .get(self.settings.api_url.join(CURRENT_USER_PATH)?)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PkpScopesClientError::AuthProvider(format!(
                "Discord returned {status} for the current user"
            )));
        }

        let user: DiscordUser = response.json().await?;
        debug!("Resolved Discord user");
        Ok(user.id)
    }
}

#[async_trait]
impl AuthProvider for DiscordProvider {
    fn provider_type(&self) -> ProviderType {
        ProviderType::Discord
    }

    async fn auth_method_id(&self, credential: &Credential) -> Result<AuthIdentifier> {
        match credential {
            Credential::Discord(token) => {
                let user_id = self.fetch_user_id(token.bearer()).await?;
                Ok(AuthIdentifier::derive_pair(
                    &user_id,
                    &self.settings.client_id,
                ))
            }
            other => Err(self.mismatch(other)),
        }
    }
}
