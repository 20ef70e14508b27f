use serde::{Deserialize, Serialize};

use super::error::{BarcodeError, ValidationError};

/// Longest code accepted, check digit included.
pub const MAX_CODE_LENGTH: usize = 128;

/// Layout of a payment code, loaded once per run.
///
/// Field names on the wire follow the `oxxo_barcode.json` file format:
///
/// ```json
/// {
///   "length": 20,
///   "amount_length": 2,
///   "amount_decimal": 2,
///   "reference_length": 5,
///   "prefix_identifier": 1,
///   "validity_days": 30,
///   "barcode_width": 200,
///   "barcode_height": 50
/// }
/// ```
///
/// Every field is required. Negative numbers fail to deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Total digits in the final code, check digit included.
    pub length: usize,
    /// Digit width of the integer part of the amount.
    pub amount_length: usize,
    /// Digit width of the decimal part of the amount (0 = no decimals).
    pub amount_decimal: u32,
    /// Digit width of the reference number.
    pub reference_length: usize,
    /// Numeric tag printed at the start of every code.
    pub prefix_identifier: u64,
    /// Days added to the issue date to get the expiry date.
    pub validity_days: u64,
    /// Rendered barcode width in pixels.
    #[serde(rename = "barcode_width")]
    pub width: u32,
    /// Rendered barcode height in pixels.
    #[serde(rename = "barcode_height")]
    pub height: u32,
}

impl Configuration {
    /// Decimal rendering of the prefix identifier.
    pub fn prefix(&self) -> String {
        self.prefix_identifier.to_string()
    }

    /// Total width of the amount field. Saturates at `usize::MAX`.
    pub fn amount_width(&self) -> usize {
        self.amount_length.saturating_add(self.amount_decimal as usize)
    }

    /// Check field ranges. Returns all problems at once.
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.length == 0 {
            errors.push(ValidationError::new("length", "must be at least 1"));
        }
        if self.length > MAX_CODE_LENGTH {
            errors.push(ValidationError::new(
                "length",
                format!("must not exceed {MAX_CODE_LENGTH} digits"),
            ));
        }
        for (field, width) in [
            ("amount_length", self.amount_length),
            ("reference_length", self.reference_length),
        ] {
            if self.length > 0 && width >= self.length {
                errors.push(ValidationError::new(
                    field,
                    format!("{width} digits cannot fit in a {}-digit code", self.length),
                ));
            }
        }
        if self.width == 0 {
            errors.push(ValidationError::new("barcode_width", "must be greater than 0"));
        }
        if self.height == 0 {
            errors.push(ValidationError::new("barcode_height", "must be greater than 0"));
        }
        // rust_decimal holds at most 28 fractional digits.
        if self.amount_decimal > 28 {
            errors.push(ValidationError::new(
                "amount_decimal",
                "must not exceed 28 decimal places",
            ));
        }
        errors
    }

    /// Fail fast on an invalid configuration.
    pub fn validate(&self) -> Result<(), BarcodeError> {
        let errors = self.validation_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.into())
        }
    }

    /// Parse and validate a configuration from JSON text.
    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self, BarcodeError> {
        let config: Configuration = serde_json::from_str(json)
            .map_err(|e| BarcodeError::Configuration(format!("malformed configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    #[cfg(feature = "json")]
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, BarcodeError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            BarcodeError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Self::from_json_str(&raw)
    }
}
