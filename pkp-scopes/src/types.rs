//! Domain types shared by the client and the CLI.

pub mod auth_id;
pub mod auth_method;
pub mod credential;
pub mod pkp;
pub mod token;

pub use auth_id::AuthIdentifier;
pub use auth_method::AuthMethodType;
pub use credential::{AuthSigToken, Credential, JwtClaims, JwtToken, OAuthToken, WebAuthnToken};
pub use pkp::{PermissionScopes, PkpRecord};
pub use token::{EthAddress, PublicKey, TokenId};
