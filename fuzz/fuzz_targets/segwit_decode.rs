#![no_main]

use addrkit_codec::segwit::{self, WitnessProgram};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Lowercase addresses that decode must re-encode byte for byte
        if let Ok(program) = segwit::decode(s, "bc") {
            let reencoded = segwit::encode(&program, "bc").unwrap();
            assert_eq!(reencoded, s.to_lowercase());
        }

        let prefixed = format!("tb1{}", s);
        let _ = segwit::decode(&prefixed, "tb");
    }

    // Raw bytes as a witness script
    if let Ok(program) = WitnessProgram::from_script_bytes(data) {
        assert_eq!(program.to_script_bytes(), data);
    }
});
