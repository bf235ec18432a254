use crate::{Color, Effect, Error, Metric, Result, grid};
use derivative::Derivative;
use derive_setters::Setters;
use image::{DynamicImage, ImageBuffer, Pixel, Rgb, Rgba};
use rayon::prelude::*;

pub const DEFAULT_SOURCE: Color = Color::new(0, 0, 0);
pub const DEFAULT_TARGET: Color = Color::new(6, 145, 15);
pub const DEFAULT_TOLERANCE: f64 = 0.30;

mod sealed {
    pub trait Sealed {}
    impl Sealed for image::Rgb<u8> {}
    impl Sealed for image::Rgba<u8> {}
}

/// 8-bit pixel layouts whose first three channels are red, green and blue.
pub trait RgbPixel: Pixel<Subpixel = u8> + Send + Sync + sealed::Sealed {
    const ALPHA_INDEX: Option<usize>;
}

impl RgbPixel for Rgb<u8> {
    const ALPHA_INDEX: Option<usize> = None;
}

impl RgbPixel for Rgba<u8> {
    const ALPHA_INDEX: Option<usize> = Some(3);
}

/// Recolor parameters
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct RecolorConfig {
    /// Color to match against
    #[derivative(Default(value = "DEFAULT_SOURCE"))]
    source: Color,

    /// Replacement color
    #[derivative(Default(value = "DEFAULT_TARGET"))]
    target: Color,

    /// Match threshold (0.0 - 1.0) on the normalized metric distance
    #[derivative(Default(value = "DEFAULT_TOLERANCE"))]
    tolerance: f64,

    #[derivative(Default(value = "Metric::Euclidean"))]
    metric: Metric,

    /// Leave fully transparent pixels alone. No effect on RGB images.
    #[derivative(Default(value = "false"))]
    skip_transparent: bool,
}

impl RecolorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> Color {
        self.source
    }

    pub fn target(&self) -> Color {
        self.target
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn skip_transparent(&self) -> bool {
        self.skip_transparent
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.tolerance) {
            return Err(Error::Configuration(format!(
                "tolerance must be between 0.0 and 1.0, got {}",
                self.tolerance
            )));
        }

        Ok(())
    }

    /// Number of pixels a call to `apply` would replace.
    pub fn count_matches<P: RgbPixel>(&self, image: &ImageBuffer<P, Vec<u8>>) -> Result<usize> {
        self.validate()?;
        grid::ensure_non_empty(image.width(), image.height())?;

        let channels = P::CHANNEL_COUNT as usize;
        let row_stride = image.width() as usize * channels;
        let pixels: &[u8] = image;

        Ok(pixels[..row_stride * image.height() as usize]
            .par_chunks_exact(row_stride)
            .map(|row| {
                row.chunks_exact(channels)
                    .filter(|pixel| self.is_match::<P>(pixel))
                    .count()
            })
            .sum())
    }

    pub fn count_matches_dynamic(&self, image: &DynamicImage) -> Result<usize> {
        match image {
            DynamicImage::ImageRgb8(buffer) => self.count_matches(buffer),
            DynamicImage::ImageRgba8(buffer) => self.count_matches(buffer),
            other => self.count_matches(&other.to_rgba8()),
        }
    }

    fn is_match<P: RgbPixel>(&self, pixel: &[u8]) -> bool {
        if self.skip_transparent && P::ALPHA_INDEX.is_some_and(|i| pixel[i] == 0) {
            return false;
        }

        let color = Color::new(pixel[0], pixel[1], pixel[2]);
        self.metric.matches(color, self.source, self.tolerance)
    }
}

impl<P: RgbPixel> Effect<ImageBuffer<P, Vec<u8>>> for RecolorConfig {
    fn apply(&self, image: &ImageBuffer<P, Vec<u8>>) -> Result<ImageBuffer<P, Vec<u8>>> {
        self.validate()?;
        grid::ensure_non_empty(image.width(), image.height())?;

        log::debug!(
            "recolor {}x{} image: source={}, target={}, tolerance={}, metric={}",
            image.width(),
            image.height(),
            self.source,
            self.target,
            self.tolerance,
            self.metric
        );

        let channels = P::CHANNEL_COUNT as usize;
        let row_stride = image.width() as usize * channels;
        let len = row_stride * image.height() as usize;
        let target = self.target.channels();

        let mut output = image.clone();
        let pixels: &mut [u8] = &mut output;

        pixels[..len]
            .par_chunks_exact_mut(row_stride)
            .for_each(|row| {
                for pixel in row.chunks_exact_mut(channels) {
                    if self.is_match::<P>(pixel) {
                        pixel[..3].copy_from_slice(&target);
                    }
                }
            });

        Ok(output)
    }
}

impl Effect<DynamicImage> for RecolorConfig {
    /// RGB8 and RGBA8 images keep their layout, anything else becomes RGBA8.
    fn apply(&self, image: &DynamicImage) -> Result<DynamicImage> {
        Ok(match image {
            DynamicImage::ImageRgb8(buffer) => DynamicImage::ImageRgb8(self.apply(buffer)?),
            DynamicImage::ImageRgba8(buffer) => DynamicImage::ImageRgba8(self.apply(buffer)?),
            other => {
                log::debug!("converting {:?} image to rgba8", other.color());
                DynamicImage::ImageRgba8(self.apply(&other.to_rgba8())?)
            }
        })
    }
}

/// Replace every pixel within `tolerance` of `source` with `target`.
///
/// # Example
/// ```
/// use image::{Rgba, RgbaImage};
/// use recolor_engine::{Color, Metric, recolor};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let image = RgbaImage::from_pixel(2, 2, Rgba([10, 10, 10, 128]));
/// let output = recolor(&image, Color::new(0, 0, 0), Color::new(6, 145, 15), 0.3, Metric::Euclidean)?;
/// assert_eq!(output.get_pixel(0, 0).0, [6, 145, 15, 128]);
/// # Ok(())
/// # }
/// ```
pub fn recolor<P: RgbPixel>(
    image: &ImageBuffer<P, Vec<u8>>,
    source: Color,
    target: Color,
    tolerance: f64,
    metric: Metric,
) -> Result<ImageBuffer<P, Vec<u8>>> {
    RecolorConfig::new()
        .with_source(source)
        .with_target(target)
        .with_tolerance(tolerance)
        .with_metric(metric)
        .apply(image)
}
