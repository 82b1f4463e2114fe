//! Wallet Import Format private keys
//!
//! `base58check([prefix][32-byte key][0x01 if compressed])`
//!
//! Decoded payloads are held in zeroizing buffers and never logged.

use secp256k1::{PublicKey, SecretKey};
use zeroize::Zeroizing;

use crate::base58check::{self, Base58Mode};
use crate::error::{write_into, AddressError, Result};
use crate::memory::SecretBuffer;

/// Length of a raw secp256k1 private key
pub const PRIVATE_KEY_LEN: usize = 32;

/// Length of a compressed SEC public key
pub const PUBLIC_KEY_LEN: usize = 33;

/// Length of an uncompressed SEC public key
pub const UNCOMPRESSED_PUBLIC_KEY_LEN: usize = 65;

/// Trailing byte marking a key whose public key is compressed
pub const COMPRESSION_MARKER: u8 = 0x01;

/// WIF prefix for Bitcoin mainnet keys
pub const WIF_PREFIX_MAINNET: u8 = 0x80;

/// WIF prefix for Bitcoin testnet/regtest keys
pub const WIF_PREFIX_TESTNET: u8 = 0xef;

const UNCOMPRESSED_PAYLOAD_LEN: usize = 1 + PRIVATE_KEY_LEN;
const COMPRESSED_PAYLOAD_LEN: usize = 1 + PRIVATE_KEY_LEN + 1;

/// Whether the public key matching a WIF key is serialized compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCompression {
    Compressed,
    Uncompressed,
}

impl KeyCompression {
    /// Flag word value for compressed keys
    pub const FLAG_COMPRESSED: u32 = 0x0;
    /// Flag word value for uncompressed keys
    pub const FLAG_UNCOMPRESSED: u32 = 0x1;

    /// Parse a WIF flag word; anything but the two defined values is rejected.
    pub fn from_flags(flags: u32) -> Result<Self> {
        match flags {
            Self::FLAG_COMPRESSED => Ok(KeyCompression::Compressed),
            Self::FLAG_UNCOMPRESSED => Ok(KeyCompression::Uncompressed),
            other => Err(AddressError::InvalidArgument(format!(
                "unknown WIF flags 0x{:x}",
                other
            ))),
        }
    }

    pub fn flags(self) -> u32 {
        match self {
            KeyCompression::Compressed => Self::FLAG_COMPRESSED,
            KeyCompression::Uncompressed => Self::FLAG_UNCOMPRESSED,
        }
    }

    fn payload_len(self) -> usize {
        match self {
            KeyCompression::Compressed => COMPRESSED_PAYLOAD_LEN,
            KeyCompression::Uncompressed => UNCOMPRESSED_PAYLOAD_LEN,
        }
    }
}

impl From<bool> for KeyCompression {
    fn from(compressed: bool) -> Self {
        if compressed {
            KeyCompression::Compressed
        } else {
            KeyCompression::Uncompressed
        }
    }
}

/// Encode a private key as WIF.
pub fn encode(
    priv_key: &[u8; PRIVATE_KEY_LEN],
    prefix: u8,
    compression: KeyCompression,
) -> Result<String> {
    verify_private_key(priv_key)?;

    let mut payload = SecretBuffer::new(compression.payload_len());
    let buf = payload.as_mut_slice();
    buf[0] = prefix;
    buf[1..1 + PRIVATE_KEY_LEN].copy_from_slice(priv_key);
    if compression == KeyCompression::Compressed {
        buf[COMPRESSED_PAYLOAD_LEN - 1] = COMPRESSION_MARKER;
    }

    base58check::encode(payload.as_slice(), Base58Mode::Checksum)
}

/// Decode a WIF string, requiring `prefix` and the given compression.
pub fn decode(
    wif: &str,
    prefix: u8,
    compression: KeyCompression,
) -> Result<Zeroizing<[u8; PRIVATE_KEY_LEN]>> {
    let (key, found) = decode_any(wif, prefix)?;
    if found != compression {
        return Err(AddressError::InvalidLength {
            expected: compression.payload_len(),
            found: found.payload_len(),
        });
    }
    Ok(key)
}

/// Decode a WIF string into a caller-supplied buffer of at least 32 bytes.
pub fn decode_into(
    wif: &str,
    prefix: u8,
    compression: KeyCompression,
    out: &mut [u8],
) -> Result<usize> {
    let key = decode(wif, prefix, compression)?;
    write_into(&key[..], out)
}

/// Whether a WIF key's public key is uncompressed.
///
/// Looks only at the payload length and trailing marker; neither the prefix
/// nor the key value is checked.
pub fn is_uncompressed(wif: &str) -> Result<bool> {
    let payload = base58check::decode_zeroizing(wif, Base58Mode::Checksum)?;
    Ok(compression_of(&payload)? == KeyCompression::Uncompressed)
}

/// Public key for a WIF private key, serialized compressed (33 bytes) or
/// uncompressed (65 bytes) as the WIF marker says.
pub fn to_public_key(wif: &str, prefix: u8) -> Result<Vec<u8>> {
    let (pk, compression) = public_key_of(wif, prefix)?;
    Ok(match compression {
        KeyCompression::Compressed => pk.serialize().to_vec(),
        KeyCompression::Uncompressed => pk.serialize_uncompressed().to_vec(),
    })
}

/// [`to_public_key`] into a caller-supplied buffer (33 or 65 bytes needed).
pub fn to_public_key_into(wif: &str, prefix: u8, out: &mut [u8]) -> Result<usize> {
    write_into(&to_public_key(wif, prefix)?, out)
}

/// Decode a WIF key and derive its public key on the global context.
pub(crate) fn public_key_of(wif: &str, prefix: u8) -> Result<(PublicKey, KeyCompression)> {
    let (key, compression) = decode_any(wif, prefix)?;
    let mut sk =
        SecretKey::from_slice(&key[..]).map_err(|_| AddressError::InvalidPrivateKey)?;
    let pk = PublicKey::from_secret_key_global(&sk);
    sk.non_secure_erase();
    Ok((pk, compression))
}

/// Decode without constraining compression; returns the key and what the
/// payload says about compression.
fn decode_any(
    wif: &str,
    prefix: u8,
) -> Result<(Zeroizing<[u8; PRIVATE_KEY_LEN]>, KeyCompression)> {
    let payload = base58check::decode_zeroizing(wif, Base58Mode::Checksum)?;
    key_from_payload(&payload, prefix)
}

/// Split a checksum-stripped WIF payload. The caller owns `payload` and
/// clears it whatever this returns.
fn key_from_payload(
    payload: &[u8],
    prefix: u8,
) -> Result<(Zeroizing<[u8; PRIVATE_KEY_LEN]>, KeyCompression)> {
    let found = payload[0];
    if found != prefix {
        log::debug!("WIF prefix 0x{:02x} does not match 0x{:02x}", found, prefix);
        return Err(AddressError::WrongPrefix {
            expected: prefix,
            found,
        });
    }
    let compression = compression_of(payload)?;

    let mut key = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
    key.copy_from_slice(&payload[1..1 + PRIVATE_KEY_LEN]);
    verify_private_key(&key)?;

    Ok((key, compression))
}

fn compression_of(payload: &[u8]) -> Result<KeyCompression> {
    match payload.len() {
        UNCOMPRESSED_PAYLOAD_LEN => Ok(KeyCompression::Uncompressed),
        COMPRESSED_PAYLOAD_LEN => match payload[COMPRESSED_PAYLOAD_LEN - 1] {
            COMPRESSION_MARKER => Ok(KeyCompression::Compressed),
            other => Err(AddressError::InvalidCompressionMarker(other)),
        },
        found => Err(AddressError::InvalidLength {
            expected: COMPRESSED_PAYLOAD_LEN,
            found,
        }),
    }
}

fn verify_private_key(key: &[u8; PRIVATE_KEY_LEN]) -> Result<()> {
    let mut sk = SecretKey::from_slice(key).map_err(|_| AddressError::InvalidPrivateKey)?;
    sk.non_secure_erase();
    Ok(())
}
