#![no_main]

use addrkit_codec::confidential::{CA_PREFIX_LIQUID, CA_PREFIX_LIQUID_REGTEST};
use addrkit_codec::ConfidentialAddress;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        for prefix in [CA_PREFIX_LIQUID, CA_PREFIX_LIQUID_REGTEST] {
            if let Ok(ca) = ConfidentialAddress::parse(s, prefix) {
                assert_eq!(ca.to_address().unwrap(), s);
                let _ = ca.unconfidential_address();
            }
        }
    }
});
