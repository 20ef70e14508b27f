//! Barcode rendering and the JSON output record.
//!
//! Turns a finished [`PaymentCode`](crate::core::PaymentCode) into a
//! Code 128 PNG of the configured size, then wraps the code and the
//! base64-encoded image into the record written to `output.json`.
//!
//! # Example
//!
//! ```ignore
//! use oxxo_barcode::core::*;
//! use oxxo_barcode::render::*;
//!
//! let config = Configuration::from_path("oxxo_barcode.json")?;
//! let code = CodeBuilder::new(&config).build_today(12345, dec!(34.50))?;
//! let output = BarcodeOutput::render(&code, &config)?;
//! output.write_to("output.json")?;
//! ```

mod barcode;
mod output;

pub use barcode::{encode_png, render_code128};
pub use output::BarcodeOutput;
