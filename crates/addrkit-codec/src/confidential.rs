//! Confidential (blinded) addresses for Elements/Liquid
//!
//! A confidential address is a legacy Base58Check address with a blinding
//! public key appended and an extra network prefix in front:
//!
//! ```text
//! base58check([ca_prefix][version][hash160 (20)][blinding pubkey (33)])
//! ```
//!
//! The prefix is always supplied by the caller (e.g. [`CA_PREFIX_LIQUID`]);
//! it is never inferred from the address.

use secp256k1::PublicKey;

use crate::base58check::{decode_check, encode_check, VersionedPayload};
use crate::error::{AddressError, Result};
use crate::hash::HASH160_LEN;
use crate::wif::PUBLIC_KEY_LEN;

/// Liquid v1 confidential address prefix
pub const CA_PREFIX_LIQUID: u8 = 0x0c;

/// Liquid v1 confidential address prefix for regtest
pub const CA_PREFIX_LIQUID_REGTEST: u8 = 0x04;

/// `[version][hash160]`
const UNCONFIDENTIAL_LEN: usize = 1 + HASH160_LEN;

/// `[ca_prefix][version][hash160][blinding pubkey]`
const CONFIDENTIAL_LEN: usize = 1 + UNCONFIDENTIAL_LEN + PUBLIC_KEY_LEN;

/// A decoded confidential address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfidentialAddress {
    pub prefix: u8,
    pub unconfidential: VersionedPayload,
    pub blinding_pub_key: [u8; PUBLIC_KEY_LEN],
}

impl ConfidentialAddress {
    /// Attach a blinding key to a plain address.
    pub fn new(prefix: u8, address: &str, blinding_pub_key: &[u8]) -> Result<Self> {
        let blinding_pub_key = parse_blinding_key(blinding_pub_key)?;

        let raw = decode_check(address)?;
        if raw.len() != UNCONFIDENTIAL_LEN {
            return Err(AddressError::InvalidLength {
                expected: UNCONFIDENTIAL_LEN,
                found: raw.len(),
            });
        }

        Ok(Self {
            prefix,
            unconfidential: VersionedPayload::from_bytes(&raw)?,
            blinding_pub_key,
        })
    }

    /// Decode a confidential address carrying `prefix`.
    pub fn parse(address: &str, prefix: u8) -> Result<Self> {
        let raw = decode_check(address)?;

        let found = raw[0];
        if found != prefix {
            log::debug!(
                "confidential address prefix 0x{:02x} does not match 0x{:02x}",
                found,
                prefix
            );
            return Err(AddressError::WrongPrefix {
                expected: prefix,
                found,
            });
        }
        if raw.len() != CONFIDENTIAL_LEN {
            return Err(AddressError::InvalidLength {
                expected: CONFIDENTIAL_LEN,
                found: raw.len(),
            });
        }

        let (plain, key) = raw[1..].split_at(UNCONFIDENTIAL_LEN);
        let mut blinding_pub_key = [0u8; PUBLIC_KEY_LEN];
        blinding_pub_key.copy_from_slice(key);

        Ok(Self {
            prefix,
            unconfidential: VersionedPayload::from_bytes(plain)?,
            blinding_pub_key,
        })
    }

    /// Base58Check encoding of the full confidential payload.
    pub fn to_address(&self) -> Result<String> {
        let mut payload = Vec::with_capacity(CONFIDENTIAL_LEN);
        payload.push(self.prefix);
        payload.extend_from_slice(&self.unconfidential.to_bytes());
        payload.extend_from_slice(&self.blinding_pub_key);
        encode_check(&payload)
    }

    /// The plain address with the blinding key removed.
    pub fn unconfidential_address(&self) -> Result<String> {
        self.unconfidential.to_address()
    }
}

/// Build a confidential address from a plain Base58Check address and a
/// 33-byte blinding public key.
pub fn from_unconfidential(address: &str, prefix: u8, blinding_pub_key: &[u8]) -> Result<String> {
    ConfidentialAddress::new(prefix, address, blinding_pub_key)?.to_address()
}

/// Strip the blinding key, returning the plain address.
pub fn to_unconfidential(address: &str, prefix: u8) -> Result<String> {
    ConfidentialAddress::parse(address, prefix)?.unconfidential_address()
}

/// Extract the blinding public key from a confidential address.
pub fn extract_blinding_key(address: &str, prefix: u8) -> Result<[u8; PUBLIC_KEY_LEN]> {
    Ok(ConfidentialAddress::parse(address, prefix)?.blinding_pub_key)
}

fn parse_blinding_key(key: &[u8]) -> Result<[u8; PUBLIC_KEY_LEN]> {
    let key: [u8; PUBLIC_KEY_LEN] = key.try_into().map_err(|_| AddressError::InvalidLength {
        expected: PUBLIC_KEY_LEN,
        found: key.len(),
    })?;
    // A 33-byte slice only parses as a compressed point
    PublicKey::from_slice(&key).map_err(|e| {
        AddressError::InvalidArgument(format!("blinding key is not a valid public key: {}", e))
    })?;
    Ok(key)
}
