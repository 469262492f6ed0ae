use serde::{Serialize, Serializer};
use std::{fmt::Display, str::FromStr};

use crate::{
    crypto::{decode_hex, keccak256},
    PkpScopesError,
};

/// Stable lookup key for an auth method in the permissions registry.
///
/// Every provider derives it by hashing a provider-specific identity string,
/// so two credentials for the same identity always produce the same value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AuthIdentifier([u8; 32]);

impl AuthIdentifier {
    /// Hash an identity string into an [`AuthIdentifier`].
    pub fn derive(identity: &str) -> Self {
        Self(keccak256(identity.as_bytes()))
    }

    /// Hash a pair of identity components joined by `:`.
    pub fn derive_pair(left: &str, right: &str) -> Self {
        Self::derive(&format!("{left}:{right}"))
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl Display for AuthIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for AuthIdentifier {
    type Err = PkpScopesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_hex(s)?;
        let found = bytes.len();
        let bytes = bytes
            .try_into()
            .map_err(|_| PkpScopesError::InvalidLength {
                expected: 32,
                found,
            })?;
        Ok(Self(bytes))
    }
}

impl Serialize for AuthIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
