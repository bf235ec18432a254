//! Normalized color distance
//!
//! Both metrics look at the RGB triple only and return a value in `[0, 1]`.

use crate::{Color, Error, Result};
use std::{fmt, str::FromStr};

/// `255² × 3`, the squared length of the RGB cube diagonal.
const MAX_EUCLIDEAN_SQUARED: f64 = 3.0 * 255.0 * 255.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    /// Straight-line distance divided by the cube diagonal `sqrt(255² × 3)`.
    #[default]
    Euclidean,

    /// Largest single-channel difference divided by 255.
    Channel,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Euclidean, Metric::Channel];

    pub fn distance(self, a: Color, b: Color) -> f64 {
        match self {
            Metric::Euclidean => euclidean_distance(a, b),
            Metric::Channel => channel_distance(a, b),
        }
    }

    pub fn matches(self, color: Color, reference: Color, tolerance: f64) -> bool {
        self.distance(color, reference) <= tolerance
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Euclidean => "euclidean",
            Metric::Channel => "channel",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Metric::Euclidean),
            "channel" => Ok(Metric::Channel),
            other => Err(Error::Configuration(format!(
                "metric must be 'euclidean' or 'channel', got '{other}'"
            ))),
        }
    }
}

fn channel_deltas(a: Color, b: Color) -> [u32; 3] {
    let (a, b) = (a.channels(), b.channels());
    [0usize, 1, 2].map(|i| a[i].abs_diff(b[i]) as u32)
}

fn euclidean_distance(a: Color, b: Color) -> f64 {
    let squared: u32 = channel_deltas(a, b).iter().map(|d| d * d).sum();

    // Same sqrt on both sides so opposite cube corners land on exactly 1.0.
    (squared as f64).sqrt() / MAX_EUCLIDEAN_SQUARED.sqrt()
}

fn channel_distance(a: Color, b: Color) -> f64 {
    let max_delta = channel_deltas(a, b).into_iter().max().unwrap_or(0);
    max_delta as f64 / 255.0
}
