use std::{fmt, sync::Arc};

use async_trait::async_trait;
use ethers::{
    contract::{abigen, ContractError},
    providers::{Http, Middleware, Provider},
    types::{Address, Bytes, U256},
    utils::to_checksum,
};
use pkp_scopes::types::{AuthIdentifier, AuthMethodType, PublicKey, TokenId};
use tracing::{debug, info, instrument};

use super::PermissionsRegistry;
use crate::{config::RegistrySettings, PkpScopesClientError, Result};

abigen!(
    PkpPermissions,
    r#"[
        function getTokenIdsForAuthMethod(uint256 authMethodType, bytes id) external view returns (uint256[])
        function getPubkey(uint256 tokenId) external view returns (bytes)
        function getPermittedAuthMethodScopes(uint256 tokenId, uint256 authMethodType, bytes id, uint256 maxScopeId) external view returns (bool[])
    ]"#
);

/// Connected handle to the deployed PKP permissions contract.
pub struct PkpPermissionsContract<M = Provider<Http>> {
    contract: PkpPermissions<M>,
    chain_id: u64,
}

impl<M: Middleware> fmt::Debug for PkpPermissionsContract<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PkpPermissionsContract")
            .field("address", &to_checksum(&self.contract.address(), None))
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

impl PkpPermissionsContract<Provider<Http>> {
    /// Connect to the chain over HTTP JSON-RPC.
    #[instrument(skip_all, fields(registry = %settings))]
    pub async fn connect(settings: &RegistrySettings) -> Result<Self> {
        let provider = Provider::new(Http::new(settings.rpc_url.clone()));
        Self::with_provider(provider, settings).await
    }
}

impl<M: Middleware + 'static> PkpPermissionsContract<M> {
    /// Bind the contract to `provider`, checking the chain id against the
    /// configured one and that code is deployed at the configured address.
    pub async fn with_provider(provider: M, settings: &RegistrySettings) -> Result<Self> {
        let chain_id = provider
            .get_chainid()
            .await
            .map_err(|e| PkpScopesClientError::RegistryConnection(e.to_string()))?;
        let chain_id = u64::try_from(chain_id).map_err(|_| {
            PkpScopesClientError::RegistryConnection(format!("chain id {chain_id} is out of range"))
        })?;

        if let Some(expected) = settings.chain_id {
            if expected != chain_id {
                return Err(PkpScopesClientError::ChainIdMismatch {
                    expected,
                    found: chain_id,
                });
            }
        }

        let address = settings.pkp_permissions_address;
        let code = provider
            .get_code(address, None)
            .await
            .map_err(|e| PkpScopesClientError::RegistryConnection(e.to_string()))?;
        if code.is_empty() {
            return Err(PkpScopesClientError::RegistryConnection(format!(
                "no contract at {} on chain {chain_id}",
                to_checksum(&address, None)
            )));
        }

        info!(chain_id, "Connected to permissions registry");
        Ok(Self::new(provider, address, chain_id))
    }

    pub(crate) fn new(provider: M, address: Address, chain_id: u64) -> Self {
        Self {
            contract: PkpPermissions::new(address, Arc::new(provider)),
            chain_id,
        }
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

fn call_failed<M: Middleware>(error: ContractError<M>) -> PkpScopesClientError {
    PkpScopesClientError::RegistryCall(error.to_string())
}

#[async_trait]
impl<M: Middleware + 'static> PermissionsRegistry for PkpPermissionsContract<M> {
    #[instrument(skip(self, auth_id))]
    async fn token_ids_for_auth_method(
        &self,
        auth_method_type: AuthMethodType,
        auth_id: &AuthIdentifier,
    ) -> Result<Vec<TokenId>> {
        let token_ids = self
            .contract
            .get_token_ids_for_auth_method(
                U256::from(auth_method_type.as_u64()),
                Bytes::from(auth_id.as_bytes().to_vec()),
            )
            .call()
            .await
            .map_err(call_failed)?
            .into_iter()
            .map(TokenId::from)
            .collect::<Vec<_>>();
        debug!(count = token_ids.len(), "Fetched token ids");
        Ok(token_ids)
    }

    #[instrument(skip(self, token_id), fields(token_id = %token_id))]
    async fn pubkey(&self, token_id: &TokenId) -> Result<Option<PublicKey>> {
        let public_key = self
            .contract
            .get_pubkey(token_id.as_u256())
            .call()
            .await
            .map_err(call_failed)?;

        // The contract returns empty bytes for tokens without a key.
        Ok((!public_key.is_empty()).then(|| PublicKey::from_bytes(public_key.to_vec())))
    }

    #[instrument(skip(self, token_id, auth_id), fields(token_id = %token_id))]
    async fn permitted_auth_method_scopes(
        &self,
        token_id: &TokenId,
        auth_method_type: AuthMethodType,
        auth_id: &AuthIdentifier,
        max_scope_id: u64,
    ) -> Result<Vec<bool>> {
        self.contract
            .get_permitted_auth_method_scopes(
                token_id.as_u256(),
                U256::from(auth_method_type.as_u64()),
                Bytes::from(auth_id.as_bytes().to_vec()),
                U256::from(max_scope_id),
            )
            .call()
            .await
            .map_err(call_failed)
    }
}
