#![no_main]

use addrkit_codec::base58check::{self, Base58Mode};
use addrkit_codec::VersionedPayload;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding must never panic, whatever the input.
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = base58check::decode(s, Base58Mode::Plain);
        let mut out = [0u8; 64];
        let _ = base58check::decode_into(s, Base58Mode::Checksum, &mut out);

        // Anything that decodes must re-encode to the same string
        if let Ok(payload) = base58check::decode_check(s) {
            assert_eq!(base58check::encode_check(&payload).unwrap(), s);
            let _ = VersionedPayload::from_bytes(&payload);
        }
    }
});
