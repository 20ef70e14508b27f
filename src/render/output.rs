use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

use super::barcode::{encode_png, render_code128};
use crate::core::{BarcodeError, Configuration, PaymentCode};

/// The record handed to downstream consumers: the code and its barcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeOutput {
    /// The full payment code, check digit included.
    #[serde(rename = "number_bar_code")]
    pub code: String,
    /// Base64-encoded PNG of the barcode.
    pub image: String,
}

impl BarcodeOutput {
    /// Render `code` at the configured size and wrap it with its digits.
    pub fn render(code: &PaymentCode, config: &Configuration) -> Result<Self, BarcodeError> {
        let image = render_code128(code.as_str(), config.width, config.height)?;
        let png = encode_png(&image)?;
        tracing::debug!(
            code = %code,
            width = config.width,
            height = config.height,
            png_bytes = png.len(),
            "rendered barcode"
        );
        Ok(Self::from_png(code, &png))
    }

    /// Wrap already encoded PNG bytes.
    pub fn from_png(code: &PaymentCode, png: &[u8]) -> Self {
        Self {
            code: code.to_string(),
            image: BASE64.encode(png),
        }
    }

    /// Decode the base64 image back to PNG bytes.
    pub fn png_bytes(&self) -> Result<Vec<u8>, BarcodeError> {
        BASE64
            .decode(&self.image)
            .map_err(|e| BarcodeError::Render(format!("image is not valid base64: {e}")))
    }

    pub fn to_json(&self) -> Result<String, BarcodeError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Write the record as JSON, replacing any existing file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), BarcodeError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_vec(self)?)?;
        tracing::info!(path = %path.display(), "wrote barcode output");
        Ok(())
    }
}
