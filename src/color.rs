//! Color types and color parsing.
//!
//! Plot colors are plain 8-bit RGBA values. Highlight colors supplied as text
//! (hex notation or a CSS color name) go through [`Rgba::parse`].

use crate::error::{Error, Result};
use std::str::FromStr;

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create an opaque color from unit-interval channels (0.0-1.0).
    ///
    /// Values outside the interval are clamped.
    #[must_use]
    pub fn from_unit(r: f32, g: f32, b: f32) -> Self {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgb(channel(r), channel(g), channel(b))
    }

    /// Opaque gray at the given lightness (0.0 = black, 1.0 = white).
    #[must_use]
    pub fn gray(level: f32) -> Self {
        Self::from_unit(level, level, level)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Parse a color from text.
    ///
    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa` and a handful of CSS color names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for anything else.
    ///
    /// # Example
    ///
    /// ```
    /// use upset_viz::color::Rgba;
    ///
    /// assert_eq!(Rgba::parse("#ff0000").unwrap(), Rgba::RED);
    /// assert_eq!(Rgba::parse("steelblue").unwrap(), Rgba::rgb(70, 130, 180));
    /// assert!(Rgba::parse("not-a-color").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| Error::InvalidColor(text.to_string()));
        }
        named_color(&trimmed.to_ascii_lowercase())
            .ok_or_else(|| Error::InvalidColor(text.to_string()))
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Rgba {
    /// Hex notation, with alpha only when not fully opaque.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

#[cfg(feature = "config")]
impl serde::Serialize for Rgba {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "config")]
impl<'de> serde::Deserialize<'de> for Rgba {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.is_ascii() {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    let nibble = |i: usize| {
        let v = u8::from_str_radix(hex.get(i..=i)?, 16).ok()?;
        Some(v * 17)
    };

    match hex.len() {
        3 => Some(Rgba::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        6 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Rgba> {
    let color = match name {
        "black" => Rgba::BLACK,
        "white" => Rgba::WHITE,
        "red" => Rgba::RED,
        "lime" => Rgba::GREEN,
        "green" => Rgba::rgb(0, 128, 0),
        "blue" => Rgba::BLUE,
        "gray" | "grey" => Rgba::rgb(128, 128, 128),
        "lightgray" | "lightgrey" => Rgba::rgb(211, 211, 211),
        "orange" => Rgba::rgb(255, 165, 0),
        "purple" => Rgba::rgb(128, 0, 128),
        "steelblue" => Rgba::rgb(70, 130, 180),
        "crimson" => Rgba::rgb(220, 20, 60),
        "gold" => Rgba::rgb(255, 215, 0),
        "teal" => Rgba::rgb(0, 128, 128),
        "transparent" | "none" => Rgba::TRANSPARENT,
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK, Rgba::rgb(0, 0, 0));
        assert_eq!(Rgba::WHITE, Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::RED.r, 255);
        assert_eq!(Rgba::GREEN.g, 255);
        assert_eq!(Rgba::BLUE.b, 255);
    }

    #[test]
    fn test_gray_levels() {
        assert_eq!(Rgba::gray(0.4), Rgba::rgb(102, 102, 102));
        assert_eq!(Rgba::gray(0.5), Rgba::rgb(128, 128, 128));
        assert_eq!(Rgba::gray(2.0), Rgba::WHITE);
    }

    #[test]
    fn test_rgba_with_alpha() {
        let semi_red = Rgba::RED.with_alpha(128);
        assert_eq!(semi_red.r, 255);
        assert_eq!(semi_red.a, 128);
    }

    #[test]
    fn test_rgba_to_array_from_array() {
        let color = Rgba::new(10, 20, 30, 40);
        assert_eq!(Rgba::from_array(color.to_array()), color);
    }

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Rgba::parse("#f00").unwrap(), Rgba::RED);
        assert_eq!(Rgba::parse("#4682B4").unwrap(), Rgba::rgb(70, 130, 180));
        assert_eq!(Rgba::parse("#00000080").unwrap(), Rgba::new(0, 0, 0, 128));
    }

    #[test]
    fn test_parse_names_case_insensitive() {
        assert_eq!(Rgba::parse("Crimson").unwrap(), Rgba::rgb(220, 20, 60));
        assert_eq!("grey".parse::<Rgba>().unwrap(), Rgba::rgb(128, 128, 128));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(Rgba::parse("#12"), Err(Error::InvalidColor(_))));
        assert!(matches!(Rgba::parse("#gggggg"), Err(Error::InvalidColor(_))));
        assert!(matches!(Rgba::parse("chartreuse-ish"), Err(Error::InvalidColor(_))));
        assert!(Rgba::parse("#ééé").is_err());
    }

    #[test]
    fn test_display_hex_round_trips_through_parse() {
        assert_eq!(Rgba::rgb(70, 130, 180).to_string(), "#4682b4");
        assert_eq!(Rgba::new(0, 0, 0, 128).to_string(), "#00000080");
        let crimson = Rgba::rgb(220, 20, 60);
        assert_eq!(Rgba::parse(&crimson.to_string()).unwrap(), crimson);
    }

    #[test]
    fn test_rgba_default() {
        assert_eq!(Rgba::default(), Rgba::TRANSPARENT);
    }
}
