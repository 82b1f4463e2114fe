//! addrkit codec
//!
//! Address and key text encodings for Bitcoin-family chains.
//!
//! # Codecs
//!
//! - Base58Check: legacy P2PKH/P2SH addresses, the framing under WIF
//! - Bech32/Bech32m: native segwit addresses (BIP-173, BIP-350)
//! - WIF: private key import/export
//! - Confidential addresses: Elements/Liquid blinded addresses
//!   (cargo feature `elements`)
//!
//! # Derivation
//!
//! From a BIP-32 key to P2PKH, P2SH-P2WPKH or P2WPKH addresses, and from a
//! WIF key to its P2PKH address.
//!
//! Every function is a pure transformation of its arguments. Network
//! prefixes and HRPs are always passed in; see [`params`] for the common sets.
//!
//! # Example
//!
//! ```
//! use addrkit_codec::{bip32_key_to_addr_segwit, segwit, wif, KeyCompression};
//!
//! let key = [0x01u8; 32];
//! let encoded = wif::encode(&key, wif::WIF_PREFIX_MAINNET, KeyCompression::Compressed).unwrap();
//! assert!(!wif::is_uncompressed(&encoded).unwrap());
//!
//! let pubkey = wif::to_public_key(&encoded, wif::WIF_PREFIX_MAINNET).unwrap();
//! let pubkey: [u8; 33] = pubkey.try_into().unwrap();
//! let address = bip32_key_to_addr_segwit(&pubkey, "bc").unwrap();
//! assert_eq!(segwit::decode(&address, "bc").unwrap().version(), 0);
//! ```

pub mod base58check;
#[cfg(feature = "elements")]
pub mod confidential;
pub mod derive;
pub mod error;
pub mod hash;
pub mod memory;
pub mod params;
pub mod segwit;
pub mod wif;

pub use base58check::{Base58Mode, VersionedPayload};
pub use derive::{
    bip32_key_to_addr_segwit, bip32_key_to_address, wif_to_address, AddressType, ExtendedKey,
};
pub use error::{AddressError, ErrorKind, Result};
pub use params::NetworkParams;
pub use segwit::WitnessProgram;
pub use wif::KeyCompression;

#[cfg(feature = "elements")]
pub use confidential::ConfidentialAddress;
