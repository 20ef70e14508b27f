#![no_main]

use libfuzzer_sys::fuzz_target;
use oxxo_barcode::core::{CheckDigitBoundary, ChecksumAlgorithm};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Arbitrary text is either rejected or yields a single digit.
        for algorithm in [ChecksumAlgorithm::Mod10Weighted, ChecksumAlgorithm::Cyclic137] {
            if let Ok(d) = algorithm.check_digit(s, CheckDigitBoundary::Wrap) {
                assert!(d <= 9);
            }
        }
    }
});
