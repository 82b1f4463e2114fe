#![no_main]

use addrkit_codec::{wif, wif_to_address, KeyCompression};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = wif::decode(s, 0x80, KeyCompression::Compressed);
        let _ = wif::decode(s, 0xef, KeyCompression::Uncompressed);
        let _ = wif::is_uncompressed(s);
        let _ = wif::to_public_key(s, 0x80);
        let _ = wif_to_address(s, 0x80, 0x00);
    }
});
