//! Address derivation from extended keys
//!
//! Turns a BIP-32 key (or anything exposing a compressed public key) into
//! each supported address type:
//!
//! - P2PKH: `base58check([version] || hash160(pubkey))`
//! - P2SH-P2WPKH: `base58check([version] || hash160(OP_0 0x14 hash160(pubkey)))`
//! - P2WPKH: `bech32(family, 0, hash160(pubkey))`

use bitcoin::bip32::Xpub;
use zeroize::Zeroizing;

use crate::base58check::encode_check;
use crate::error::{AddressError, Result};
use crate::hash::{hash160, HASH160_LEN};
use crate::segwit::{self, WitnessProgram, OP_0};
use crate::wif::{self, KeyCompression, PUBLIC_KEY_LEN};

/// Version byte of mainnet P2PKH addresses ("1...")
pub const ADDRESS_VERSION_P2PKH_MAINNET: u8 = 0x00;

/// Version byte of testnet P2PKH addresses ("m..."/"n...")
pub const ADDRESS_VERSION_P2PKH_TESTNET: u8 = 0x6f;

/// Version byte of mainnet P2SH addresses ("3...")
pub const ADDRESS_VERSION_P2SH_MAINNET: u8 = 0x05;

/// Version byte of testnet P2SH addresses ("2...")
pub const ADDRESS_VERSION_P2SH_TESTNET: u8 = 0xc4;

/// Source of the compressed public key an address commits to.
///
/// The key is only read for the duration of one derivation call.
pub trait ExtendedKey {
    /// 33-byte compressed SEC encoding of the public key
    fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_LEN];
}

impl ExtendedKey for Xpub {
    fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.public_key.serialize()
    }
}

impl ExtendedKey for bitcoin::secp256k1::PublicKey {
    fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.serialize()
    }
}

impl ExtendedKey for bitcoin::CompressedPublicKey {
    fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_LEN] {
        self.0.serialize()
    }
}

impl ExtendedKey for [u8; PUBLIC_KEY_LEN] {
    fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_LEN] {
        *self
    }
}

/// Address types a key can be turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressType {
    /// Legacy pay-to-pubkey-hash ("1...")
    P2pkh,
    /// P2WPKH wrapped in P2SH ("3...")
    P2shP2wpkh,
    /// Native segwit v0 pay-to-witness-pubkey-hash ("bc1q...")
    P2wpkh,
}

impl AddressType {
    pub const FLAG_P2PKH: u32 = 0x01;
    pub const FLAG_P2SH_P2WPKH: u32 = 0x02;
    pub const FLAG_P2WPKH: u32 = 0x04;

    /// Parse a type flag word. Exactly one defined bit must be set.
    pub fn from_flags(flags: u32) -> Result<Self> {
        match flags {
            Self::FLAG_P2PKH => Ok(AddressType::P2pkh),
            Self::FLAG_P2SH_P2WPKH => Ok(AddressType::P2shP2wpkh),
            Self::FLAG_P2WPKH => Ok(AddressType::P2wpkh),
            other => Err(AddressError::InvalidArgument(format!(
                "address type flags 0x{:x} must name exactly one type",
                other
            ))),
        }
    }

    pub fn flags(self) -> u32 {
        match self {
            AddressType::P2pkh => Self::FLAG_P2PKH,
            AddressType::P2shP2wpkh => Self::FLAG_P2SH_P2WPKH,
            AddressType::P2wpkh => Self::FLAG_P2WPKH,
        }
    }

    /// Reject version bytes known to belong to the other legacy type.
    ///
    /// Best effort only: unknown (custom network) versions are accepted.
    fn check_version(self, version: u8) -> Result<()> {
        let mismatched = match self {
            AddressType::P2pkh => {
                version == ADDRESS_VERSION_P2SH_MAINNET || version == ADDRESS_VERSION_P2SH_TESTNET
            }
            AddressType::P2shP2wpkh => {
                version == ADDRESS_VERSION_P2PKH_MAINNET
                    || version == ADDRESS_VERSION_P2PKH_TESTNET
            }
            AddressType::P2wpkh => false,
        };
        if mismatched {
            log::debug!("version 0x{:02x} rejected for {:?}", version, self);
            return Err(AddressError::InvalidArgument(format!(
                "version 0x{:02x} is not valid for {:?} addresses",
                version, self
            )));
        }
        Ok(())
    }
}

/// Legacy (P2PKH) or wrapped segwit (P2SH-P2WPKH) address for a key.
pub fn bip32_key_to_address<K: ExtendedKey + ?Sized>(
    key: &K,
    address_type: AddressType,
    version: u8,
) -> Result<String> {
    if address_type == AddressType::P2wpkh {
        return Err(AddressError::InvalidArgument(
            "native segwit addresses need an address family, use bip32_key_to_addr_segwit".into(),
        ));
    }
    address_type.check_version(version)?;

    let key_hash = hash160(&key.public_key_bytes());
    match address_type {
        AddressType::P2pkh => versioned_hash160(version, &key_hash),
        _ => {
            let script = p2wpkh_redeem_script(&key_hash);
            versioned_hash160(version, &hash160(&script[..]))
        }
    }
}

/// Native segwit v0 (P2WPKH) address for a key under `family` (e.g. "bc").
///
/// The flag-word form of this operation takes a `flags` argument that must
/// be zero. It selects nothing, so there is no parameter here; callers
/// holding a raw flag word should reject non-zero values before calling.
pub fn bip32_key_to_addr_segwit<K: ExtendedKey + ?Sized>(
    key: &K,
    family: &str,
) -> Result<String> {
    let key_hash = hash160(&key.public_key_bytes());
    let program = WitnessProgram::new(0, key_hash.to_vec())?;
    segwit::encode(&program, family)
}

/// P2PKH address for a WIF private key.
///
/// The public key is serialized compressed or uncompressed as the WIF says,
/// so both forms reproduce the address the key was exported from.
pub fn wif_to_address(wif: &str, prefix: u8, version: u8) -> Result<String> {
    AddressType::P2pkh.check_version(version)?;

    let (pk, compression) = wif::public_key_of(wif, prefix)?;
    let key_hash = match compression {
        KeyCompression::Compressed => hash160(&pk.serialize()),
        KeyCompression::Uncompressed => hash160(&pk.serialize_uncompressed()),
    };
    versioned_hash160(version, &key_hash)
}

/// `OP_0 <push 20> <key hash>`
fn p2wpkh_redeem_script(key_hash: &[u8; HASH160_LEN]) -> Zeroizing<[u8; HASH160_LEN + 2]> {
    let mut script = Zeroizing::new([0u8; HASH160_LEN + 2]);
    script[0] = OP_0;
    script[1] = HASH160_LEN as u8;
    script[2..].copy_from_slice(key_hash);
    script
}

fn versioned_hash160(version: u8, hash: &[u8; HASH160_LEN]) -> Result<String> {
    let mut payload = Zeroizing::new([0u8; HASH160_LEN + 1]);
    payload[0] = version;
    payload[1..].copy_from_slice(hash);
    encode_check(&payload[..])
}
