use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use super::checksum::{CheckDigitBoundary, ChecksumAlgorithm};
use super::config::Configuration;
use super::error::BarcodeError;
use super::format::{format_amount, format_reference};
use super::reconcile::{ExpiryDate, LengthBudget};

/// A finished payment code and the segments it was assembled from.
///
/// `digits` is always `prefix + reference + expiry + filler + amount +
/// check_digit`, exactly `Configuration::length` ASCII digits long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentCode {
    pub digits: String,
    pub prefix: String,
    pub reference: String,
    pub expiry: ExpiryDate,
    pub filler: String,
    pub amount: String,
    pub check_digit: u8,
    pub algorithm: ChecksumAlgorithm,
}

impl PaymentCode {
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Everything except the trailing check digit.
    pub fn body(&self) -> &str {
        &self.digits[..self.digits.len().saturating_sub(1)]
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}

impl std::fmt::Display for PaymentCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.digits)
    }
}

/// Builder for payment codes sharing one configuration.
///
/// ```
/// use chrono::NaiveDate;
/// use oxxo_barcode::core::*;
/// use rust_decimal_macros::dec;
///
/// let config = Configuration {
///     length: 20,
///     amount_length: 2,
///     amount_decimal: 2,
///     reference_length: 5,
///     prefix_identifier: 1,
///     validity_days: 30,
///     width: 200,
///     height: 50,
/// };
///
/// let code = CodeBuilder::new(&config)
///     .algorithm(ChecksumAlgorithm::Cyclic137)
///     .build(12345, dec!(34.50), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
///     .unwrap();
///
/// assert_eq!(code.len(), 20);
/// assert_eq!(code.body(), "1123452024021403450");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder<'a> {
    config: &'a Configuration,
    algorithm: ChecksumAlgorithm,
    boundary: CheckDigitBoundary,
}

impl<'a> CodeBuilder<'a> {
    pub fn new(config: &'a Configuration) -> Self {
        Self {
            config,
            algorithm: ChecksumAlgorithm::default(),
            boundary: CheckDigitBoundary::default(),
        }
    }

    pub fn algorithm(mut self, algorithm: ChecksumAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// How a mod-10 checksum of 10 is turned into a digit.
    pub fn boundary(mut self, boundary: CheckDigitBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Build a code whose expiry date counts from today's local date.
    ///
    /// The clock is read once; the same date feeds both the filler
    /// computation and the embedded expiry date.
    pub fn build_today(&self, reference: u64, amount: Decimal) -> Result<PaymentCode, BarcodeError> {
        self.build(reference, amount, Local::now().date_naive())
    }

    /// Build a code whose expiry date counts from `issued_on`.
    pub fn build(
        &self,
        reference: u64,
        amount: Decimal,
        issued_on: NaiveDate,
    ) -> Result<PaymentCode, BarcodeError> {
        let config = self.config;
        config.validate()?;

        let expiry = ExpiryDate::from_issue_date(issued_on, config.validity_days)?;
        let budget = LengthBudget::new(config, &expiry);
        budget.ensure_fits()?;
        let filler = budget.filler().render();

        let prefix = config.prefix();
        let reference = format_reference(reference, config.reference_length);
        ensure_width("reference", &reference, config.reference_length)?;

        let amount = format_amount(amount, config.amount_length, config.amount_decimal)?;
        ensure_width("amount", &amount, config.amount_width())?;
        if !amount.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BarcodeError::InvalidAmount(format!(
                "amount field '{amount}' is not decimal; with amount_decimal = 0 the amount is hex encoded"
            )));
        }

        let expiry_digits = expiry.digits();
        let body = [
            prefix.as_str(),
            reference.as_str(),
            expiry_digits.as_str(),
            filler.as_str(),
            amount.as_str(),
        ]
        .concat();
        tracing::debug!(code = %body, "code without check digit");

        let check_digit = self.algorithm.check_digit(&body, self.boundary)?;
        let digits = format!("{body}{check_digit}");
        if digits.len() != config.length {
            return Err(BarcodeError::Length {
                required: digits.len(),
                available: config.length,
                detail: format!("assembled code '{digits}' does not match configured length"),
            });
        }
        tracing::debug!(code = %digits, algorithm = %self.algorithm, "code with check digit");

        Ok(PaymentCode {
            digits,
            prefix,
            reference,
            expiry,
            filler,
            amount,
            check_digit,
            algorithm: self.algorithm,
        })
    }
}

/// Build one code with the default boundary handling.
pub fn build_code(
    config: &Configuration,
    reference: u64,
    amount: Decimal,
    algorithm: ChecksumAlgorithm,
    issued_on: NaiveDate,
) -> Result<PaymentCode, BarcodeError> {
    CodeBuilder::new(config)
        .algorithm(algorithm)
        .build(reference, amount, issued_on)
}

fn ensure_width(field: &'static str, value: &str, width: usize) -> Result<(), BarcodeError> {
    if value.len() > width {
        return Err(BarcodeError::FieldOverflow {
            field,
            width,
            actual: value.len(),
        });
    }
    Ok(())
}
