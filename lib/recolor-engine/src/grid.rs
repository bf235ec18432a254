//! Row-major pixel grids
//!
//! Decoders hand over flat buffers, but tests and callers that assemble
//! pixels by hand work with rows. These helpers reject the shapes an image
//! cannot have: no rows, empty rows, or rows of differing length.

use crate::{Error, Result};
use image::{ImageBuffer, Pixel, RgbImage, RgbaImage};

/// Fail unless the image has at least one row and one column.
pub fn ensure_non_empty(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidInput(format!(
            "image must be at least 1x1, got {width}x{height}"
        )));
    }

    Ok(())
}

pub fn rgba_from_rows(rows: &[Vec<[u8; 4]>]) -> Result<RgbaImage> {
    from_rows(rows)
}

pub fn rgb_from_rows(rows: &[Vec<[u8; 3]>]) -> Result<RgbImage> {
    from_rows(rows)
}

fn from_rows<P, const N: usize>(rows: &[Vec<[u8; N]>]) -> Result<ImageBuffer<P, Vec<u8>>>
where
    P: Pixel<Subpixel = u8>,
{
    let height = rows.len();
    let width = rows.first().map(Vec::len).unwrap_or(0);

    if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
        return Err(Error::InvalidInput(format!(
            "grid is not rectangular: row {index} has {} pixels, expected {width}",
            row.len()
        )));
    }

    let (width, height) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(Error::InvalidInput(format!(
                "grid of {width}x{height} exceeds the supported image size"
            )));
        }
    };
    ensure_non_empty(width, height)?;

    let raw: Vec<u8> = rows.iter().flatten().flatten().copied().collect();
    ImageBuffer::from_raw(width, height, raw).ok_or_else(|| {
        Error::InvalidInput(format!(
            "{N}-channel grid does not fit a {}-channel pixel layout",
            P::CHANNEL_COUNT
        ))
    })
}
