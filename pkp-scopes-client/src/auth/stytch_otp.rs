use async_trait::async_trait;
use pkp_scopes::{
    types::{AuthIdentifier, Credential},
    PkpScopesError,
};

use super::{AuthProvider, ProviderType};
use crate::Result;

/// Derives `keccak256("{sub}:{aud[0]}")`, lowercased, from a Stytch session
/// JWT.
#[derive(Debug, Default)]
pub struct StytchOtpProvider;

#[async_trait]
impl AuthProvider for StytchOtpProvider {
    fn provider_type(&self) -> ProviderType {
        ProviderType::StytchOtp
    }

    async fn auth_method_id(&self, credential: &Credential) -> Result<AuthIdentifier> {
        match credential {
            Credential::StytchOtp(jwt) => {
                let claims = jwt.claims()?;
                let project_id = claims.aud.first().ok_or_else(|| {
                    PkpScopesError::InvalidAccessToken("Stytch token has no audience".to_string())
                })?;
                Ok(AuthIdentifier::derive_pair(
                    &claims.sub.to_lowercase(),
                    &project_id.to_lowercase(),
                ))
            }
            other => Err(self.mismatch(other)),
        }
    }
}
