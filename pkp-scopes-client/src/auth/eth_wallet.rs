use async_trait::async_trait;
use pkp_scopes::{
    constants::LIT_SUFFIX,
    types::{AuthIdentifier, Credential},
};

use super::{AuthProvider, ProviderType};
use crate::Result;

/// Derives `keccak256("{address}:lit")` from a wallet auth signature.
#[derive(Debug, Default)]
pub struct EthWalletProvider;

#[async_trait]
impl AuthProvider for EthWalletProvider {
    fn provider_type(&self) -> ProviderType {
        ProviderType::EthWallet
    }

    async fn auth_method_id(&self, credential: &Credential) -> Result<AuthIdentifier> {
        match credential {
            Credential::EthWallet(auth_sig) => {
                let address = auth_sig.address()?;
                Ok(AuthIdentifier::derive_pair(&address, LIT_SUFFIX))
            }
            other => Err(self.mismatch(other)),
        }
    }
}
