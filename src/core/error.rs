use thiserror::Error;

/// Errors that can occur while building or rendering a payment code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BarcodeError {
    /// Configuration fields are missing, malformed, or out of range.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The fixed-width fields do not fit in `length - 1` digits.
    #[error("length error: fields need {required} digits but only {available} fit ({detail})")]
    Length {
        /// Digits required by prefix, reference, expiry date and amount.
        required: usize,
        /// Digits available before the check digit (`length - 1`).
        available: usize,
        /// Per-field breakdown of `required`.
        detail: String,
    },

    /// A formatted input is wider than its configured field.
    #[error("field overflow: {field} needs {actual} digits but is configured for {width}")]
    FieldOverflow {
        /// Name of the overflowing field.
        field: &'static str,
        /// Configured width of the field.
        width: usize,
        /// Width of the formatted value.
        actual: usize,
    },

    /// A checksum produced a value that is not a single decimal digit.
    #[error("check digit out of range: {value}")]
    ChecksumRange {
        /// The raw checksum result.
        value: u32,
    },

    /// Checksum input contains something other than ASCII decimal digits.
    #[error("invalid digit string: {0}")]
    InvalidDigits(String),

    /// The amount cannot be encoded into the amount field.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Barcode rendering failed.
    #[error("render error: {0}")]
    Render(String),

    /// Reading configuration or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single configuration problem with the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Configuration field name as it appears in the JSON file.
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<Vec<ValidationError>> for BarcodeError {
    fn from(errors: Vec<ValidationError>) -> Self {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        BarcodeError::Configuration(joined)
    }
}
