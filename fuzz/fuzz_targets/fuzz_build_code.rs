#![no_main]

use chrono::{Days, NaiveDate};
use libfuzzer_sys::fuzz_target;
use oxxo_barcode::core::{ChecksumAlgorithm, Configuration, build_code};
use rust_decimal::Decimal;

fuzz_target!(|input: ([u8; 4], u16, u16, u64, i64, u32, bool)| {
    let ([length, amount_length, amount_decimal, reference_length], prefix, days, reference, units, offset, cyclic) =
        input;
    let decimals = u32::from(amount_decimal % 6);
    let config = Configuration {
        length: length as usize,
        amount_length: amount_length as usize % 16,
        amount_decimal: decimals,
        reference_length: reference_length as usize % 24,
        prefix_identifier: u64::from(prefix),
        validity_days: u64::from(days),
        width: 400,
        height: 40,
    };
    let amount = Decimal::new(units, decimals);
    let Some(issued) = NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.checked_add_days(Days::new(u64::from(offset % 20_000))))
    else {
        return;
    };
    let algorithm = if cyclic {
        ChecksumAlgorithm::Cyclic137
    } else {
        ChecksumAlgorithm::Mod10Weighted
    };

    // Any accepted input produces exactly `length` decimal digits.
    if let Ok(code) = build_code(&config, reference, amount, algorithm, issued) {
        assert_eq!(code.len(), config.length);
        assert!(code.as_str().bytes().all(|b| b.is_ascii_digit()));
    }
});
