//! Hashing primitives used by the address codecs

use bitcoin::hashes::{hash160, sha256d, Hash};

/// Length of a RIPEMD160(SHA256(x)) digest
pub const HASH160_LEN: usize = 20;

/// Length of a double-SHA256 digest
pub const SHA256D_LEN: usize = 32;

/// RIPEMD160(SHA256(data))
pub fn hash160(data: &[u8]) -> [u8; HASH160_LEN] {
    hash160::Hash::hash(data).to_byte_array()
}

/// SHA256(SHA256(data))
pub fn sha256d(data: &[u8]) -> [u8; SHA256D_LEN] {
    sha256d::Hash::hash(data).to_byte_array()
}
