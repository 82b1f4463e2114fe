//! Base58Check codec
//!
//! Base58 text with a trailing 4-byte checksum: the first four bytes of
//! SHA256d over the payload. This is the framing underneath legacy
//! P2PKH/P2SH addresses, WIF keys and confidential addresses.
//!
//! Encoding and checksum verification come from `bitcoin::base58`; this module
//! owns the error reporting, the empty-payload rule and the buffer handling.

use bitcoin::base58;
use zeroize::Zeroizing;

use crate::error::{write_into, AddressError, Result};
use crate::hash::HASH160_LEN;

/// Bitcoin Base58 alphabet (no 0, O, I, l)
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Number of checksum bytes appended in checksummed mode
pub const CHECKSUM_LEN: usize = 4;

/// Whether a Base58 string carries the 4-byte checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base58Mode {
    /// Raw Base58, no checksum
    Plain,
    /// Base58Check: checksum appended on encode, verified and stripped on decode
    Checksum,
}

/// Encode bytes as Base58, optionally with a checksum.
///
/// Leading zero bytes become leading `'1'` characters.
pub fn encode(payload: &[u8], mode: Base58Mode) -> Result<String> {
    if payload.is_empty() {
        return Err(AddressError::EmptyInput);
    }

    Ok(match mode {
        Base58Mode::Plain => base58::encode(payload),
        Base58Mode::Checksum => base58::encode_check(payload),
    })
}

/// Base58Check-encode a payload.
pub fn encode_check(payload: &[u8]) -> Result<String> {
    encode(payload, Base58Mode::Checksum)
}

/// Decode a Base58 string, verifying and stripping the checksum in
/// [`Base58Mode::Checksum`].
pub fn decode(s: &str, mode: Base58Mode) -> Result<Vec<u8>> {
    let decoded = decode_zeroizing(s, mode)?;
    Ok(decoded.to_vec())
}

/// Base58Check-decode a string.
pub fn decode_check(s: &str) -> Result<Vec<u8>> {
    decode(s, Base58Mode::Checksum)
}

/// Decode into a caller-supplied buffer, returning the number of bytes written.
///
/// `out` is not written unless decoding succeeds and the payload fits.
pub fn decode_into(s: &str, mode: Base58Mode, out: &mut [u8]) -> Result<usize> {
    let decoded = decode_zeroizing(s, mode)?;
    write_into(&decoded, out)
}

/// Decode into a buffer that is wiped when dropped. Used for WIF payloads.
pub(crate) fn decode_zeroizing(s: &str, mode: Base58Mode) -> Result<Zeroizing<Vec<u8>>> {
    if s.is_empty() {
        return Err(AddressError::EmptyInput);
    }
    if let Some(c) = s.chars().find(|c| !BASE58_ALPHABET.contains(*c)) {
        return Err(AddressError::InvalidCharacter(c));
    }

    match mode {
        Base58Mode::Plain => {
            let raw = base58::decode(s).map_err(|e| {
                log::debug!("base58 decode rejected input: {}", e);
                AddressError::InvalidArgument(e.to_string())
            })?;
            Ok(Zeroizing::new(raw))
        }
        Base58Mode::Checksum => {
            let payload = Zeroizing::new(base58::decode_check(s).map_err(check_error)?);
            // Valid checksum over nothing
            if payload.is_empty() {
                return Err(AddressError::PayloadTooShort(CHECKSUM_LEN));
            }
            Ok(payload)
        }
    }
}

fn check_error(err: base58::Error) -> AddressError {
    match err {
        base58::Error::IncorrectChecksum(_) => {
            log::debug!("base58check checksum mismatch");
            AddressError::ChecksumMismatch
        }
        base58::Error::TooShort(e) => AddressError::PayloadTooShort(e.invalid_base58_length()),
        other => AddressError::InvalidArgument(other.to_string()),
    }
}

/// A decoded legacy address: one version byte followed by a payload
/// (a 20-byte hash160 for P2PKH/P2SH).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedPayload {
    pub version: u8,
    pub payload: Vec<u8>,
}

impl VersionedPayload {
    /// A version byte plus a hash160, the shape of every P2PKH/P2SH address.
    pub fn hash160(version: u8, hash: [u8; HASH160_LEN]) -> Self {
        Self {
            version,
            payload: hash.to_vec(),
        }
    }

    /// `[version] || payload`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(1 + self.payload.len());
        bytes.push(self.version);
        bytes.extend_from_slice(&self.payload);
        bytes
    }

    /// Split raw `[version] || payload` bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match bytes.split_first() {
            Some((&version, payload)) if !payload.is_empty() => Ok(Self {
                version,
                payload: payload.to_vec(),
            }),
            _ => Err(AddressError::PayloadTooShort(bytes.len())),
        }
    }

    /// Base58Check-encode as an address string.
    pub fn to_address(&self) -> Result<String> {
        encode_check(&self.to_bytes())
    }

    /// Decode a Base58Check address into its version and payload.
    pub fn from_address(address: &str) -> Result<Self> {
        Self::from_bytes(&decode_check(address)?)
    }
}
