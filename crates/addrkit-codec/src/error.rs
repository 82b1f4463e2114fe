//! Codec errors
//!
//! Every failure in this crate is an [`AddressError`]. Each variant belongs to
//! exactly one [`ErrorKind`], which is coarse enough for a wallet to tell
//! "wrong network" apart from "not an address" apart from "wrong length".

use thiserror::Error;

/// Coarse classification of an [`AddressError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad caller input: unsupported flags, too-small buffer, mismatched type/version
    InvalidArgument,
    /// Not valid Base58/Bech32: bad character, checksum, case or HRP
    MalformedEncoding,
    /// Payload, program or key length outside the allowed set
    LengthMismatch,
    /// Prefix byte belongs to another network or format
    WrongPrefix,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Invalid character {0:?}")]
    InvalidCharacter(char),
    #[error("Base58Check checksum mismatch")]
    ChecksumMismatch,
    #[error("Invalid Bech32 checksum")]
    InvalidChecksum,
    #[error("Mixed-case Bech32 string")]
    MixedCase,
    #[error("Missing Bech32 separator")]
    MissingSeparator,
    #[error("Invalid human-readable part: {0}")]
    InvalidHrp(String),
    #[error("Human-readable part mismatch: expected {expected}, found {found}")]
    HrpMismatch { expected: String, found: String },
    #[error("Malformed Bech32 string: {0}")]
    MalformedBech32(String),
    #[error("Invalid padding in 5-bit data")]
    InvalidPadding,
    #[error("Invalid witness version {0}")]
    InvalidWitnessVersion(u8),
    #[error("Invalid program length {length} for witness version {version}")]
    InvalidProgramLength { version: u8, length: usize },
    #[error("Decoded payload too short ({0} bytes)")]
    PayloadTooShort(usize),
    #[error("Invalid length: expected {expected}, found {found}")]
    InvalidLength { expected: usize, found: usize },
    #[error("Invalid compression marker 0x{0:02x}")]
    InvalidCompressionMarker(u8),
    #[error("Wrong prefix: expected 0x{expected:02x}, found 0x{found:02x}")]
    WrongPrefix { expected: u8, found: u8 },
    #[error("Output buffer too small: need {needed}, have {available}")]
    BufferTooSmall { needed: usize, available: usize },
    #[error("Invalid private key")]
    InvalidPrivateKey,
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl AddressError {
    /// Which of the four error classes this error falls into.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AddressError::BufferTooSmall { .. }
            | AddressError::InvalidPrivateKey
            | AddressError::InvalidArgument(_) => ErrorKind::InvalidArgument,

            AddressError::EmptyInput
            | AddressError::InvalidCharacter(_)
            | AddressError::ChecksumMismatch
            | AddressError::InvalidChecksum
            | AddressError::MixedCase
            | AddressError::MissingSeparator
            | AddressError::InvalidHrp(_)
            | AddressError::HrpMismatch { .. }
            | AddressError::MalformedBech32(_)
            | AddressError::InvalidPadding
            | AddressError::InvalidWitnessVersion(_) => ErrorKind::MalformedEncoding,

            AddressError::InvalidProgramLength { .. }
            | AddressError::PayloadTooShort(_)
            | AddressError::InvalidLength { .. }
            | AddressError::InvalidCompressionMarker(_) => ErrorKind::LengthMismatch,

            AddressError::WrongPrefix { .. } => ErrorKind::WrongPrefix,
        }
    }
}

pub type Result<T> = std::result::Result<T, AddressError>;

/// Copy `src` into the front of `out`, or fail without touching `out`.
pub(crate) fn write_into(src: &[u8], out: &mut [u8]) -> Result<usize> {
    if out.len() < src.len() {
        return Err(AddressError::BufferTooSmall {
            needed: src.len(),
            available: out.len(),
        });
    }
    out[..src.len()].copy_from_slice(src);
    Ok(src.len())
}
