//! The permissions registry: which PKPs an auth method is bound to, their
//! public keys, and the scopes granted on each.

mod contract;

pub use self::contract::PkpPermissionsContract;

use async_trait::async_trait;
use pkp_scopes::types::{AuthIdentifier, AuthMethodType, PublicKey, TokenId};

use crate::Result;

#[async_trait]
pub trait PermissionsRegistry: Send + Sync {
    /// Every token id bound to the auth method, in registry order.
    async fn token_ids_for_auth_method(
        &self,
        auth_method_type: AuthMethodType,
        auth_id: &AuthIdentifier,
    ) -> Result<Vec<TokenId>>;

    /// The public key of a token, or `None` if the token has none.
    async fn pubkey(&self, token_id: &TokenId) -> Result<Option<PublicKey>>;

    /// The scope flags the auth method holds on a token, indexed by scope id
    /// from `0` to `max_scope_id - 1`.
    async fn permitted_auth_method_scopes(
        &self,
        token_id: &TokenId,
        auth_method_type: AuthMethodType,
        auth_id: &AuthIdentifier,
        max_scope_id: u64,
    ) -> Result<Vec<bool>>;
}
