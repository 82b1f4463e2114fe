//! Bech32 / Bech32m segwit addresses
//!
//! BIP-173 (Bech32) and BIP-350 (Bech32m) native segwit addresses:
//! `<hrp> 1 <witness version> <program in 5-bit groups> <checksum>`.
//!
//! Witness version 0 uses the original Bech32 checksum constant; versions
//! 1 through 16 use Bech32m. An address whose checksum constant does not match
//! its witness version is rejected.
//!
//! Checksums and bit regrouping come from the `bech32` crate re-exported by
//! `bitcoin`. This module adds the checks a wallet needs on top: mixed case is
//! reported before anything else, the HRP must match the caller's family, and
//! every failure maps onto an [`AddressError`].

use bitcoin::bech32::primitives::decode::{
    CharError, ChecksumError, SegwitHrpstringError, UncheckedHrpstringError,
};
use bitcoin::bech32::segwit::{self as bech32_segwit, DecodeError, EncodeError};
use bitcoin::bech32::{Fe32, Hrp};

use crate::error::{write_into, AddressError, Result};

/// Longest valid segwit address
pub const MAX_ADDRESS_LEN: usize = bitcoin::bech32::primitives::segwit::MAX_STRING_LENGTH;

const CHECKSUM_LEN: usize = 6;

/// Highest witness version
pub const MAX_WITNESS_VERSION: u8 = 16;

/// Script opcode for witness version 0
pub const OP_0: u8 = 0x00;

/// Script opcode for witness version 1; versions 1..=16 are `OP_1 + (v - 1)`
pub const OP_1: u8 = 0x51;

/// A segwit witness program: version 0..=16 plus 2..=40 program bytes.
///
/// Version 0 programs are exactly 20 (P2WPKH) or 32 (P2WSH) bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WitnessProgram {
    version: u8,
    program: Vec<u8>,
}

impl WitnessProgram {
    /// Validate and build a witness program.
    pub fn new(version: u8, program: Vec<u8>) -> Result<Self> {
        if version > MAX_WITNESS_VERSION {
            return Err(AddressError::InvalidWitnessVersion(version));
        }
        let length = program.len();
        let valid = if version == 0 {
            length == 20 || length == 32
        } else {
            (2..=40).contains(&length)
        };
        if !valid {
            return Err(AddressError::InvalidProgramLength { version, length });
        }
        Ok(Self { version, program })
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn program(&self) -> &[u8] {
        &self.program
    }

    /// Parse the scriptPubKey form `[OP_n][push_len][program]`.
    pub fn from_script_bytes(script: &[u8]) -> Result<Self> {
        if script.len() < 2 {
            return Err(AddressError::InvalidLength {
                expected: 2,
                found: script.len(),
            });
        }
        let version = match script[0] {
            OP_0 => 0,
            op @ OP_1..=0x60 => op - OP_1 + 1,
            op => return Err(AddressError::InvalidWitnessVersion(op)),
        };
        let push_len = script[1] as usize;
        if push_len != script.len() - 2 {
            return Err(AddressError::InvalidLength {
                expected: push_len + 2,
                found: script.len(),
            });
        }
        Self::new(version, script[2..].to_vec())
    }

    /// Serialize as `[OP_n][push_len][program]`.
    pub fn to_script_bytes(&self) -> Vec<u8> {
        let op = if self.version == 0 {
            OP_0
        } else {
            OP_1 + self.version - 1
        };
        let mut script = Vec::with_capacity(2 + self.program.len());
        script.push(op);
        script.push(self.program.len() as u8);
        script.extend_from_slice(&self.program);
        script
    }

    /// Encode as a segwit address for `family`.
    pub fn to_address(&self, family: &str) -> Result<String> {
        encode(self, family)
    }
}

/// Encode a witness program as a segwit address for `family` (e.g. "bc", "tb").
///
/// Output is always lowercase.
pub fn encode(program: &WitnessProgram, family: &str) -> Result<String> {
    let hrp = parse_family(family)?;
    let version = Fe32::try_from(program.version)
        .map_err(|_| AddressError::InvalidWitnessVersion(program.version))?;

    bech32_segwit::encode(hrp, version, &program.program).map_err(|e| match e {
        EncodeError::TooLong(e) => AddressError::InvalidLength {
            expected: MAX_ADDRESS_LEN,
            found: e.0,
        },
        EncodeError::WitnessLength(_) => AddressError::InvalidProgramLength {
            version: program.version,
            length: program.program.len(),
        },
        EncodeError::WitnessVersion(_) => AddressError::InvalidWitnessVersion(program.version),
        other => AddressError::MalformedBech32(other.to_string()),
    })
}

/// Decode a segwit address, requiring its HRP to match `family`
/// (case-insensitively).
pub fn decode(address: &str, family: &str) -> Result<WitnessProgram> {
    let expected = parse_family(family)?;

    if address.is_empty() {
        return Err(AddressError::EmptyInput);
    }
    if let Some(c) = address.chars().find(|c| !(33..=126).contains(&(*c as u32))) {
        return Err(AddressError::InvalidCharacter(c));
    }
    let has_lower = address.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = address.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(AddressError::MixedCase);
    }
    if address.len() > MAX_ADDRESS_LEN {
        return Err(AddressError::InvalidLength {
            expected: MAX_ADDRESS_LEN,
            found: address.len(),
        });
    }

    // HRP before checksum, so an address for another network says so
    let sep = address.rfind('1').ok_or(AddressError::MissingSeparator)?;
    let hrp_part = &address[..sep];
    let hrp = Hrp::parse(hrp_part).map_err(|_| AddressError::InvalidHrp(hrp_part.to_string()))?;
    if hrp != expected {
        log::debug!("segwit address hrp {:?} does not match {:?}", hrp_part, family);
        return Err(AddressError::HrpMismatch {
            expected: expected.to_lowercase(),
            found: hrp.to_lowercase(),
        });
    }

    let (_, version, program) = bech32_segwit::decode(address)
        .map_err(|e| decode_error(e, &address[sep + 1..]))?;
    WitnessProgram::new(version.to_u8(), program)
}

/// Build a segwit address from scriptPubKey bytes `[OP_n][push_len][program]`.
pub fn from_bytes(script: &[u8], family: &str) -> Result<String> {
    encode(&WitnessProgram::from_script_bytes(script)?, family)
}

/// Decode a segwit address to its scriptPubKey bytes `[OP_n][push_len][program]`.
pub fn to_bytes(address: &str, family: &str) -> Result<Vec<u8>> {
    Ok(decode(address, family)?.to_script_bytes())
}

/// Decode a segwit address into a caller-supplied buffer, returning the
/// number of script bytes written.
pub fn to_bytes_into(address: &str, family: &str, out: &mut [u8]) -> Result<usize> {
    write_into(&to_bytes(address, family)?, out)
}

fn parse_family(family: &str) -> Result<Hrp> {
    Hrp::parse(family).map_err(|_| AddressError::InvalidHrp(family.to_string()))
}

/// Map a `bech32` decode failure onto our errors. `data` is everything after
/// the separator, checksum included.
fn decode_error(err: DecodeError, data: &str) -> AddressError {
    use SegwitHrpstringError as E;

    match err.0 {
        E::Unchecked(UncheckedHrpstringError::Char(CharError::MissingSeparator)) => {
            AddressError::MissingSeparator
        }
        E::Unchecked(UncheckedHrpstringError::Char(CharError::InvalidChar(c))) => {
            AddressError::InvalidCharacter(c)
        }
        E::Unchecked(UncheckedHrpstringError::Char(CharError::MixedCase)) => AddressError::MixedCase,
        E::Unchecked(UncheckedHrpstringError::Hrp(e)) => AddressError::InvalidHrp(e.to_string()),
        E::NoData => AddressError::InvalidLength {
            expected: 1,
            found: 0,
        },
        E::TooLong(found) => AddressError::InvalidLength {
            expected: MAX_ADDRESS_LEN,
            found,
        },
        E::InvalidWitnessVersion(v) => AddressError::InvalidWitnessVersion(v.to_u8()),
        E::Padding(_) => AddressError::InvalidPadding,
        E::WitnessLength(_) => {
            // Version group, then 5-bit program groups, then the checksum
            let version = data
                .chars()
                .next()
                .and_then(|c| Fe32::from_char(c).ok())
                .map_or(0, Fe32::to_u8);
            let groups = data.len().saturating_sub(1 + CHECKSUM_LEN);
            AddressError::InvalidProgramLength {
                version,
                length: groups * 5 / 8,
            }
        }
        E::Checksum(ChecksumError::InvalidLength) => AddressError::InvalidLength {
            expected: CHECKSUM_LEN,
            found: data.len(),
        },
        E::Checksum(_) => {
            log::debug!("segwit address failed checksum verification");
            AddressError::InvalidChecksum
        }
        other => AddressError::MalformedBech32(other.to_string()),
    }
}
