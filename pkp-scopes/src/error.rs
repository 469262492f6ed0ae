use thiserror::Error;

#[derive(Debug, Error)]
pub enum PkpScopesError {
    // Credential errors
    #[error("Invalid auth method: {0}")]
    InvalidCredential(String),
    #[error("Unsupported auth method type: {0}")]
    UnsupportedAuthMethod(String),
    #[error("Invalid access token: {0}")]
    InvalidAccessToken(String),

    // Key and identifier errors
    #[error("Invalid public key")]
    InvalidPublicKey,
    #[error("Expected {expected} bytes, found {found}")]
    InvalidLength { expected: usize, found: usize },
    #[error("Invalid token id: {0}")]
    InvalidTokenId(String),

    // Wrapped errors
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

impl From<k256::ecdsa::Error> for PkpScopesError {
    fn from(_: k256::ecdsa::Error) -> Self {
        Self::InvalidPublicKey
    }
}
