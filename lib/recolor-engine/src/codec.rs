//! Image decoding and lossless encoding
//!
//! Only formats that round-trip 8-bit channel values exactly are accepted for
//! output, so the pixels written are the pixels the engine produced.

use crate::{Error, Result};
use image::{DynamicImage, ImageFormat};
use std::{fs, io::Cursor, path::Path};

pub const LOSSLESS_FORMATS: [ImageFormat; 3] =
    [ImageFormat::Png, ImageFormat::Bmp, ImageFormat::Tiff];

pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image::load_from_memory(bytes)?)
}

pub fn open(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let image = decode(&bytes)?;

    log::info!(
        "decoded {}: {}x{} {:?}",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );

    Ok(image)
}

/// Output format chosen from the file extension.
pub fn format_for_path(path: impl AsRef<Path>) -> Result<ImageFormat> {
    let format = ImageFormat::from_path(path)?;
    ensure_lossless(format)?;
    Ok(format)
}

pub fn encode(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    ensure_lossless(format)?;

    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, format)?;
    Ok(buffer.into_inner())
}

fn ensure_lossless(format: ImageFormat) -> Result<()> {
    if LOSSLESS_FORMATS.contains(&format) {
        return Ok(());
    }

    Err(Error::Configuration(format!(
        "output format {format:?} is not lossless; use png, bmp or tiff"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn gradient() -> RgbaImage {
        RgbaImage::from_fn(16, 9, |x, y| {
            Rgba([(x * 16) as u8, (y * 28) as u8, ((x + y) * 7) as u8, (x * y) as u8])
        })
    }

    #[test]
    fn test_png_preserves_rgba_values() -> anyhow::Result<()> {
        let image = DynamicImage::ImageRgba8(gradient());
        let bytes = encode(&image, ImageFormat::Png)?;
        let decoded = decode(&bytes)?;

        assert_eq!(decoded.to_rgba8(), gradient());
        Ok(())
    }

    #[test]
    fn test_png_keeps_rgb_layout() -> anyhow::Result<()> {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 3, Rgb([1, 2, 3])));
        let decoded = decode(&encode(&image, ImageFormat::Png)?)?;

        assert!(matches!(decoded, DynamicImage::ImageRgb8(_)));
        Ok(())
    }

    #[test]
    fn test_decode_garbage() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_open_missing_file() {
        let err = open("/nonexistent/recolor/input.png").unwrap_err();
        assert!(matches!(err, Error::IO(_)));
    }

    #[test]
    fn test_format_for_path() {
        assert_eq!(format_for_path("out.png").unwrap(), ImageFormat::Png);
        assert_eq!(format_for_path("OUT.BMP").unwrap(), ImageFormat::Bmp);
        assert!(format_for_path("out.jpg").unwrap_err().is_configuration());
        assert!(matches!(format_for_path("out"), Err(Error::Format(_))));
    }

    #[test]
    fn test_encode_rejects_lossy() {
        let image = DynamicImage::ImageRgba8(gradient());
        let err = encode(&image, ImageFormat::Jpeg).unwrap_err();
        assert!(err.is_configuration());

        let message = err.to_string();
        assert_eq!(
            message,
            "Invalid configuration: output format Jpeg is not lossless; use png, bmp or tiff"
        );
        assert_eq!(message.matches("Jpeg").count(), 1);
    }
}
