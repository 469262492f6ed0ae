use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::PkpScopesError;

/// The auth method types this tool can resolve, with the numeric values the
/// permissions registry uses for them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum AuthMethodType {
    /// An auth signature produced by an Ethereum wallet.
    EthWallet,
    /// A WebAuthn (passkey) credential.
    WebAuthn,
    /// A Discord OAuth access token.
    Discord,
    /// A Google OIDC id token.
    GoogleJwt,
    /// A Stytch one-time-password session JWT.
    StytchOtp,
}

impl AuthMethodType {
    pub const ALL: [AuthMethodType; 5] = [
        AuthMethodType::EthWallet,
        AuthMethodType::WebAuthn,
        AuthMethodType::Discord,
        AuthMethodType::GoogleJwt,
        AuthMethodType::StytchOtp,
    ];

    pub fn as_u64(self) -> u64 {
        match self {
            AuthMethodType::EthWallet => 1,
            AuthMethodType::WebAuthn => 3,
            AuthMethodType::Discord => 4,
            AuthMethodType::GoogleJwt => 6,
            AuthMethodType::StytchOtp => 9,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AuthMethodType::EthWallet => "EthWallet",
            AuthMethodType::WebAuthn => "WebAuthn",
            AuthMethodType::Discord => "Discord",
            AuthMethodType::GoogleJwt => "GoogleJwt",
            AuthMethodType::StytchOtp => "StytchOtp",
        }
    }
}

impl TryFrom<u64> for AuthMethodType {
    type Error = PkpScopesError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_u64() == value)
            .ok_or_else(|| PkpScopesError::UnsupportedAuthMethod(value.to_string()))
    }
}

impl From<AuthMethodType> for u64 {
    fn from(method: AuthMethodType) -> Self {
        method.as_u64()
    }
}

impl Display for AuthMethodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_u64())
    }
}
