//! Property-based tests using proptest.
//!
//! Round-trips for every codec and single-character corruption detection
//! for the checksummed encodings.

use addrkit_codec::base58check::{self, BASE58_ALPHABET};
use addrkit_codec::segwit::{self, WitnessProgram};
use addrkit_codec::wif;
use addrkit_codec::{ErrorKind, KeyCompression, VersionedPayload};
use bitcoin::secp256k1::SecretKey;
use proptest::prelude::*;

const BECH32_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

// ============================================================================
// Strategies
// ============================================================================

fn arb_hash160() -> impl Strategy<Value = [u8; 20]> {
    prop::array::uniform20(any::<u8>())
}

/// Private keys that are valid secp256k1 scalars
fn arb_private_key() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform32(any::<u8>()).prop_filter("valid secp256k1 scalar", |k| {
        SecretKey::from_slice(k).is_ok()
    })
}

/// Witness programs obeying the version/length rules
fn arb_witness_program() -> impl Strategy<Value = WitnessProgram> {
    let v0 = prop_oneof![
        prop::collection::vec(any::<u8>(), 20),
        prop::collection::vec(any::<u8>(), 32),
    ]
    .prop_map(|p| (0u8, p));
    let v1_16 = (1u8..=16, prop::collection::vec(any::<u8>(), 2..=40));

    prop_oneof![v0, v1_16].prop_map(|(v, p)| WitnessProgram::new(v, p).unwrap())
}

fn arb_family() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("bc".to_string()),
        Just("tb".to_string()),
        Just("bcrt".to_string()),
        Just("ex".to_string()),
        "[a-z]{1,10}",
    ]
}

// ============================================================================
// Round-trips
// ============================================================================

proptest! {
    #[test]
    fn prop_base58check_roundtrip(version in any::<u8>(), hash in arb_hash160()) {
        let vp = VersionedPayload::hash160(version, hash);
        let addr = vp.to_address().unwrap();
        prop_assert_eq!(base58check::decode_check(&addr).unwrap(), vp.to_bytes());
        prop_assert_eq!(VersionedPayload::from_address(&addr).unwrap(), vp);
    }

    #[test]
    fn prop_segwit_roundtrip(wp in arb_witness_program(), family in arb_family()) {
        let addr = segwit::encode(&wp, &family).unwrap();
        prop_assert_eq!(&segwit::decode(&addr, &family).unwrap(), &wp);

        // Upper-case form decodes to the same program
        let upper = addr.to_uppercase();
        prop_assert_eq!(segwit::decode(&upper, &family).unwrap(), wp);
    }

    #[test]
    fn prop_segwit_script_bytes_roundtrip(wp in arb_witness_program()) {
        let script = wp.to_script_bytes();
        prop_assert_eq!(WitnessProgram::from_script_bytes(&script).unwrap(), wp);
    }

    #[test]
    fn prop_wif_roundtrip(key in arb_private_key(), prefix in any::<u8>(), compressed in any::<bool>()) {
        let compression = KeyCompression::from(compressed);
        let encoded = wif::encode(&key, prefix, compression).unwrap();
        let decoded = wif::decode(&encoded, prefix, compression).unwrap();
        prop_assert_eq!(*decoded, key);
        prop_assert_eq!(wif::is_uncompressed(&encoded).unwrap(), !compressed);
    }

    #[test]
    fn prop_wif_prefix_checked(key in arb_private_key(), prefix in any::<u8>(), other in any::<u8>()) {
        prop_assume!(prefix != other);
        let encoded = wif::encode(&key, prefix, KeyCompression::Compressed).unwrap();
        let err = wif::decode(&encoded, other, KeyCompression::Compressed).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::WrongPrefix);
    }
}

// ============================================================================
// Checksum sensitivity
// ============================================================================

proptest! {
    #[test]
    fn prop_base58check_single_char_change_detected(
        hash in arb_hash160(),
        pos in any::<prop::sample::Index>(),
        replacement in any::<prop::sample::Index>(),
    ) {
        let addr = VersionedPayload::hash160(0x00, hash).to_address().unwrap();
        let mut chars: Vec<char> = addr.chars().collect();
        let i = pos.index(chars.len());
        let alphabet: Vec<char> = BASE58_ALPHABET.chars().collect();
        let c = alphabet[replacement.index(alphabet.len())];
        prop_assume!(chars[i] != c);
        chars[i] = c;
        let corrupted: String = chars.into_iter().collect();

        let err = base58check::decode_check(&corrupted).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::MalformedEncoding);
    }

    #[test]
    fn prop_segwit_single_char_change_detected(
        wp in arb_witness_program(),
        pos in any::<prop::sample::Index>(),
        replacement in any::<prop::sample::Index>(),
    ) {
        let addr = segwit::encode(&wp, "bc").unwrap();
        // Only touch the data part; changing the HRP is a different error
        let data_start = 3;
        let mut chars: Vec<char> = addr.chars().collect();
        let i = data_start + pos.index(chars.len() - data_start);
        let charset: Vec<char> = BECH32_CHARSET.chars().collect();
        let c = charset[replacement.index(charset.len())];
        prop_assume!(chars[i] != c);
        chars[i] = c;
        let corrupted: String = chars.into_iter().collect();

        // Either the checksum or (for the version character) the version
        // range catches it, both encoding errors
        let err = segwit::decode(&corrupted, "bc").unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::MalformedEncoding);
    }
}
