//! Fixed-width rendering of the reference and amount fields.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::error::BarcodeError;

/// Left-pad `value` with `'0'` up to `width`.
///
/// Values that are already `width` characters or longer come back
/// unchanged; nothing is ever truncated. Callers that need a hard width
/// compare the result against the field size themselves.
///
/// ```
/// use oxxo_barcode::core::format_field;
///
/// assert_eq!(format_field("7", 5), "00007");
/// assert_eq!(format_field("123456", 5), "123456");
/// ```
pub fn format_field(value: &str, width: usize) -> String {
    format!("{value:0>width$}")
}

/// Render a reference number padded to `width` digits.
pub fn format_reference(reference: u64, width: usize) -> String {
    format_field(&reference.to_string(), width)
}

/// Render an amount for the amount field.
///
/// With `amount_decimal > 0` the amount is rounded to that many places
/// (ties to even), printed with exactly that many decimals, stripped of
/// its decimal point and padded to `amount_length + amount_decimal`:
/// `345.00` with two decimals becomes `"34500"`.
///
/// With `amount_decimal == 0` the truncated integer part is printed in
/// lowercase hexadecimal and padded to `amount_length`. Payment codes in
/// the field were issued this way, so the encoding is kept as is; any
/// amount whose hex form contains `a`-`f` is refused later by the code
/// builder because the code must stay purely decimal.
pub fn format_amount(
    mut amount: Decimal,
    amount_length: usize,
    amount_decimal: u32,
) -> Result<String, BarcodeError> {
    if amount.is_zero() {
        amount = Decimal::ZERO;
    } else if amount.is_sign_negative() {
        return Err(BarcodeError::InvalidAmount(format!(
            "amount must not be negative, got {amount}"
        )));
    }

    if amount_decimal == 0 {
        let whole = amount.trunc().to_u128().ok_or_else(|| {
            BarcodeError::InvalidAmount(format!("cannot take integer part of {amount}"))
        })?;
        return Ok(format_field(&format!("{whole:x}"), amount_length));
    }

    let places = amount_decimal as usize;
    let rounded = amount.round_dp(amount_decimal);
    let text = format!("{rounded:.places$}").replacen('.', "", 1);
    Ok(format_field(&text, amount_length + places))
}
