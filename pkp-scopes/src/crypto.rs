//! Hashing and key derivations used to build lookup keys and display records.

use ethers::{types::Address, utils::public_key_to_address};
use k256::ecdsa::VerifyingKey;

use crate::PkpScopesError;

pub use ethers::utils::{keccak256, to_checksum};

/// Derive the account address of a secp256k1 public key, SEC1 encoded in
/// either compressed or uncompressed form.
pub fn eth_address_from_public_key(sec1_bytes: &[u8]) -> Result<Address, PkpScopesError> {
    let verifying_key = VerifyingKey::from_sec1_bytes(sec1_bytes)?;
    Ok(public_key_to_address(&verifying_key))
}

/// Decode a hex string with or without a `0x` prefix.
pub fn decode_hex(value: &str) -> Result<Vec<u8>, PkpScopesError> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    Ok(hex::decode(digits)?)
}
