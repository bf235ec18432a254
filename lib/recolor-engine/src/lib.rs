//! # Recolor Engine
//!
//! Replaces every pixel whose color lies within a tolerance of a source color
//! with a target color. Everything else, alpha included, passes through.
//!
//! ## Modules
//!
//! - `color`: the RGB triple and its `#RRGGBB` / `R,G,B` text forms
//! - `metric`: the two normalized distance functions
//! - `recolor`: the validated parameter set and the parallel pixel pass
//! - `grid`: building images from row-major pixel grids
//! - `codec`: decoding and lossless encoding through the `image` crate

pub mod codec;
pub mod color;
pub mod grid;
pub mod metric;
pub mod recolor;

pub use color::{Color, parse_color};
pub use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
pub use metric::Metric;
pub use recolor::{RecolorConfig, RgbPixel, recolor};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid input image: {0}")]
    InvalidInput(String),
    #[error("Image format error: {0}")]
    Format(#[from] image::ImageError),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

impl Error {
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }
}

/// An image transformation that leaves its input untouched.
pub trait Effect<I> {
    fn apply(&self, image: &I) -> Result<I>;
}
