use ethers::types::{Address, U256};
use serde::{Serialize, Serializer};
use std::{fmt::Display, str::FromStr};

use crate::{
    crypto::{decode_hex, eth_address_from_public_key, to_checksum},
    PkpScopesError,
};

/// Identifier of a PKP in the registry: an unsigned 256-bit integer, shown in
/// decimal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(U256);

impl TokenId {
    pub fn as_u256(&self) -> U256 {
        self.0
    }
}

impl From<U256> for TokenId {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<u64> for TokenId {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TokenId {
    type Err = PkpScopesError;

    /// Accepts a decimal string or a `0x`-prefixed hex string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || PkpScopesError::InvalidTokenId(s.to_string());

        let value = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some("") => return Err(invalid()),
            Some(digits) => U256::from_str_radix(digits, 16).map_err(|_| invalid())?,
            None if s.is_empty() => return Err(invalid()),
            None => U256::from_dec_str(s).map_err(|_| invalid())?,
        };
        Ok(Self(value))
    }
}

impl Serialize for TokenId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Raw public key bytes of a PKP, as returned by the registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey(Vec<u8>);

impl PublicKey {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Derive the account address controlled by this key.
    pub fn eth_address(&self) -> Result<EthAddress, PkpScopesError> {
        Ok(EthAddress(eth_address_from_public_key(&self.0)?))
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl FromStr for PublicKey {
    type Err = PkpScopesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(decode_hex(s)?))
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An account address, displayed with its EIP-55 checksum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EthAddress(Address);

impl EthAddress {
    pub fn as_address(&self) -> &Address {
        &self.0
    }
}

impl From<Address> for EthAddress {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl Display for EthAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&to_checksum(&self.0, None))
    }
}

impl Serialize for EthAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
