use async_trait::async_trait;
use pkp_scopes::{
    constants::LIT_SUFFIX,
    types::{AuthIdentifier, Credential},
};

use super::{AuthProvider, ProviderType};
use crate::Result;

/// Derives `keccak256("{rawId}:lit")` from a WebAuthn credential.
#[derive(Debug, Default)]
pub struct WebAuthnProvider;

#[async_trait]
impl AuthProvider for WebAuthnProvider {
    fn provider_type(&self) -> ProviderType {
        ProviderType::WebAuthn
    }

    async fn auth_method_id(&self, credential: &Credential) -> Result<AuthIdentifier> {
        match credential {
            Credential::WebAuthn(webauthn) => {
                let raw_id = webauthn.raw_id()?;
                Ok(AuthIdentifier::derive_pair(&raw_id, LIT_SUFFIX))
            }
            other => Err(self.mismatch(other)),
        }
    }
}
