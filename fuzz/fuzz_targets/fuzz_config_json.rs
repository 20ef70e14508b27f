#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Parsing arbitrary JSON must never panic.
        let _ = oxxo_barcode::core::Configuration::from_json_str(s);
    }
});
