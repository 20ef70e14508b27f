//! # oxxo-barcode
//!
//! Fixed-length numeric payment reference codes for OXXO-style barcodes.
//!
//! A code is assembled from a configured layout, a reference number, an
//! amount and an expiry date, then closed with a check digit:
//!
//! ```text
//! prefix + reference + YYYYMMDD + filler + amount + check digit
//! ```
//!
//! Amounts use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use oxxo_barcode::core::*;
//! use rust_decimal_macros::dec;
//!
//! let config = Configuration {
//!     length: 20,
//!     amount_length: 2,
//!     amount_decimal: 2,
//!     reference_length: 5,
//!     prefix_identifier: 1,
//!     validity_days: 30,
//!     width: 200,
//!     height: 50,
//! };
//!
//! let code = build_code(
//!     &config,
//!     12345,
//!     dec!(34.50),
//!     ChecksumAlgorithm::Mod10Weighted,
//!     NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
//! )
//! .unwrap();
//!
//! assert_eq!(code.as_str(), "11234520240214034501");
//! assert!(verify(code.as_str(), ChecksumAlgorithm::Mod10Weighted, CheckDigitBoundary::Wrap));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Field formatting, filler, check digits, code builder |
//! | `json` | Load `Configuration` from JSON files |
//! | `render` | Code 128 PNG rendering and the base64 JSON output record |
//! | `cli` | The `oxxo-barcode` command-line tool |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "render")]
pub mod render;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
