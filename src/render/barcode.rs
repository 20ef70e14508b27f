use barcoders::sym::code128::Code128;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, GrayImage, ImageEncoder};

use crate::core::BarcodeError;

/// Code 128 character set C, two digits per symbol.
const CHARSET_C: char = '\u{0106}';
/// Code 128 character set B, used when set C cannot encode the data.
const CHARSET_B: char = '\u{0181}';

const BAR: u8 = 0;
const SPACE: u8 = 255;

/// Render `data` as a Code 128 barcode of exactly `width` x `height` pixels.
///
/// Numeric data is encoded with character set C; odd-length or
/// non-numeric data falls back to set B. Each module is scaled by the
/// largest integer factor that fits `width`, and the symbol is centred
/// horizontally on a white background.
pub fn render_code128(data: &str, width: u32, height: u32) -> Result<GrayImage, BarcodeError> {
    if width == 0 || height == 0 {
        return Err(BarcodeError::Render(format!(
            "barcode size must be non-zero, got {width}x{height}"
        )));
    }

    let barcode = Code128::new(format!("{CHARSET_C}{data}"))
        .or_else(|_| Code128::new(format!("{CHARSET_B}{data}")))
        .map_err(|e| BarcodeError::Render(format!("cannot encode '{data}' as Code 128: {e}")))?;
    let modules = barcode.encode();

    let module_count = modules.len() as u32;
    if width < module_count {
        return Err(BarcodeError::Render(format!(
            "barcode needs at least {module_count} pixels of width, configured {width}"
        )));
    }
    let scale = width / module_count;
    let offset = (width - module_count * scale) / 2;

    let mut row = vec![SPACE; width as usize];
    for (i, &module) in modules.iter().enumerate() {
        if module == 1 {
            let start = (offset + i as u32 * scale) as usize;
            row[start..start + scale as usize].fill(BAR);
        }
    }

    let pixels = row.repeat(height as usize);
    GrayImage::from_raw(width, height, pixels)
        .ok_or_else(|| BarcodeError::Render("pixel buffer does not match image size".into()))
}

/// Encode a grayscale image as PNG bytes.
pub fn encode_png(image: &GrayImage) -> Result<Vec<u8>, BarcodeError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(image.as_raw(), image.width(), image.height(), ExtendedColorType::L8)
        .map_err(|e| BarcodeError::Render(format!("PNG encoding failed: {e}")))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn renders_configured_size() {
        let img = render_code128("11234520240214034501", 400, 50).unwrap();
        assert_eq!(img.dimensions(), (400, 50));
    }

    #[test]
    fn has_bars_and_quiet_edges() {
        let img = render_code128("11234520240214034501", 400, 10).unwrap();
        assert!(img.pixels().any(|p| p.0[0] == BAR));
        assert!(img.pixels().any(|p| p.0[0] == SPACE));
        // Bars run the full height.
        let first_row: Vec<u8> = (0..400).map(|x| img.get_pixel(x, 0).0[0]).collect();
        let last_row: Vec<u8> = (0..400).map(|x| img.get_pixel(x, 9).0[0]).collect();
        assert_eq!(first_row, last_row);
    }

    #[test]
    fn odd_length_falls_back_to_set_b() {
        let img = render_code128("1123452024021403450", 400, 10).unwrap();
        assert_eq!(img.width(), 400);
    }

    #[test]
    fn too_narrow_is_render_error() {
        assert!(matches!(
            render_code128("11234520240214034501", 20, 50),
            Err(BarcodeError::Render(_))
        ));
    }

    #[test]
    fn zero_size_is_render_error() {
        assert!(render_code128("12", 0, 50).is_err());
        assert!(render_code128("12", 100, 0).is_err());
    }

    #[test]
    fn png_bytes_have_signature() {
        let img = render_code128("1234", 200, 20).unwrap();
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[..8], &PNG_MAGIC);
    }
}
