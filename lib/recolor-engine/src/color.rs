//! RGB color triple
//!
//! Parses the two accepted text forms: `#RRGGBB` hex (the `#` is optional,
//! digits are case-insensitive) and a decimal `R,G,B` triple. Whitespace may
//! separate the decimal components instead of commas.

use crate::{Error, Result};
use std::{fmt, str::FromStr};

const FORMAT_HINT: &str = "Color must be in #RRGGBB or 'R,G,B' (0-255) format";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from wider integers, rejecting components outside 0-255.
    pub fn from_components(r: i64, g: i64, b: i64) -> Result<Self> {
        let component = |name: &str, value: i64| {
            u8::try_from(value).map_err(|_| {
                Error::Configuration(format!(
                    "{name} component {value} is outside the range 0-255"
                ))
            })
        };

        Ok(Self::new(
            component("red", r)?,
            component("green", g)?,
            component("blue", b)?,
        ))
    }

    pub fn r(&self) -> u8 {
        self.r
    }

    pub fn g(&self) -> u8 {
        self.g
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_color(s)
    }
}

/// Parse a color from `#RRGGBB` or `R,G,B` text.
///
/// # Examples
///
/// ```
/// use recolor_engine::{Color, parse_color};
///
/// assert_eq!(parse_color("#06910F").unwrap(), Color::new(6, 145, 15));
/// assert_eq!(parse_color("6, 145, 15").unwrap(), Color::new(6, 145, 15));
/// assert!(parse_color("6,145").is_err());
/// ```
pub fn parse_color(text: &str) -> Result<Color> {
    let s = text.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    if s.len() == 6 && s.chars().all(|c| c.is_ascii_hexdigit()) {
        return parse_hex(s);
    }

    let parts: Vec<&str> = if s.contains(',') {
        s.split(',').map(str::trim).collect()
    } else {
        s.split_whitespace().collect()
    };

    if parts.len() != 3 {
        return Err(Error::Parse(format!("{FORMAT_HINT}, got '{text}'")));
    }

    let mut components = [0i64; 3];
    for (slot, part) in components.iter_mut().zip(&parts) {
        *slot = part.parse::<i64>().map_err(|_| {
            Error::Parse(format!(
                "Color components must be integers between 0 and 255, got '{part}'"
            ))
        })?;
    }

    let [r, g, b] = components;
    Color::from_components(r, g, b).map_err(|_| {
        Error::Parse(format!(
            "Color components must be in the range 0-255, got '{text}'"
        ))
    })
}

fn parse_hex(digits: &str) -> Result<Color> {
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|_| Error::Parse(format!("Invalid hex color '#{digits}'")))
    };

    Ok(Color::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_color("#000000").unwrap(), Color::new(0, 0, 0));
        assert_eq!(parse_color("#06910F").unwrap(), Color::new(6, 145, 15));
        assert_eq!(parse_color("#06910f").unwrap(), Color::new(6, 145, 15));
        assert_eq!(parse_color("FFffFF").unwrap(), Color::new(255, 255, 255));
        assert_eq!(parse_color("  #00FF00 ").unwrap(), Color::new(0, 255, 0));
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_color("6,145,15").unwrap(), Color::new(6, 145, 15));
        assert_eq!(parse_color(" 12 , 12 ,12 ").unwrap(), Color::new(12, 12, 12));
        assert_eq!(parse_color("1 2 3").unwrap(), Color::new(1, 2, 3));
        assert_eq!(parse_color("0,0,0").unwrap(), Color::default());
    }

    #[test]
    fn test_six_digit_decimal_is_read_as_hex() {
        assert_eq!(parse_color("100200").unwrap(), Color::new(0x10, 0x02, 0x00));
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "#", "#zz0000", "#12345", "1,2", "1,2,3,4", "a,b,c", "1.5,2,3"] {
            assert!(
                matches!(parse_color(bad), Err(Error::Parse(_))),
                "'{bad}' should not parse"
            );
        }
    }

    #[test]
    fn test_parse_out_of_range() {
        assert!(matches!(parse_color("1,2,300"), Err(Error::Parse(_))));
        assert!(matches!(parse_color("-1,0,0"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_from_components() {
        assert_eq!(
            Color::from_components(255, 0, 128).unwrap(),
            Color::new(255, 0, 128)
        );

        let err = Color::from_components(0, 256, 0).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("green"));
    }

    #[test]
    fn test_display_and_hex() {
        let color = Color::new(6, 145, 15);
        assert_eq!(color.to_string(), "6,145,15");
        assert_eq!(color.to_hex(), "#06910F");
        assert_eq!(color.to_hex().parse::<Color>().unwrap(), color);
    }
}
