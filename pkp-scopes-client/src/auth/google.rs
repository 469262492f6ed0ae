use async_trait::async_trait;
use pkp_scopes::types::{AuthIdentifier, Credential};

use super::{AuthProvider, ProviderType};
use crate::Result;

/// Derives `keccak256("{sub}:{aud}")` from a Google id token.
#[derive(Debug, Default)]
pub struct GoogleProvider;

#[async_trait]
impl AuthProvider for GoogleProvider {
    fn provider_type(&self) -> ProviderType {
        ProviderType::Google
    }

    async fn auth_method_id(&self, credential: &Credential) -> Result<AuthIdentifier> {
        match credential {
            Credential::GoogleJwt(jwt) => {
                let claims = jwt.claims()?;
                Ok(AuthIdentifier::derive_pair(&claims.sub, &claims.aud.joined()))
            }
            other => Err(self.mismatch(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use pkp_scopes::types::AuthMethodType;

    fn id_token(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[tokio::test]
    async fn derives_from_subject_and_audience() -> Result<()> {
        let token = id_token(r#"{"sub":"10769150350006150715113082367","aud":"app.apps.googleusercontent.com","iss":"https://accounts.google.com"}"#);
        let credential = Credential::new(AuthMethodType::GoogleJwt, token);
        let auth_id = GoogleProvider.auth_method_id(&credential).await?;
        assert_eq!(
            auth_id,
            AuthIdentifier::derive("10769150350006150715113082367:app.apps.googleusercontent.com")
        );
        Ok(())
    }

    #[tokio::test]
    async fn same_identity_yields_same_identifier() -> Result<()> {
        let first = id_token(r#"{"sub":"user","aud":"app","iat":1}"#);
        let second = id_token(r#"{"sub":"user","aud":"app","iat":2}"#);
        let first = GoogleProvider
            .auth_method_id(&Credential::new(AuthMethodType::GoogleJwt, first))
            .await?;
        let second = GoogleProvider
            .auth_method_id(&Credential::new(AuthMethodType::GoogleJwt, second))
            .await?;
        assert_eq!(first, second);
        Ok(())
    }

    #[tokio::test]
    async fn rejects_stytch_credentials() {
        let token = id_token(r#"{"sub":"user","aud":"app"}"#);
        let credential = Credential::new(AuthMethodType::StytchOtp, token);
        assert!(GoogleProvider.auth_method_id(&credential).await.is_err());
    }
}
