//! Colors and the per-category color policy.

use gcodethumb_geometry::Segment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid color '{0}': expected #rgb, #rgba, #rrggbb, #rrggbbaa or a color name")]
    Invalid(String),
}

/// Straight-alpha RGBA8 color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "blue" => Self::rgb(0, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "cyan" => Self::rgb(0, 255, 255),
            "magenta" => Self::rgb(255, 0, 255),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            "orange" => Self::rgb(255, 165, 0),
            _ => return None,
        };
        Some(color)
    }
}

impl From<Color> for tiny_skia::Color {
    fn from(c: Color) -> Self {
        tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ColorError::Invalid(s.to_string());

        let Some(hex) = trimmed.strip_prefix('#') else {
            return Self::named(&trimmed.to_ascii_lowercase()).ok_or_else(invalid);
        };
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        let parsed = match hex.len() {
            3 => (nibble(0), nibble(1), nibble(2), Ok(255)),
            4 => (nibble(0), nibble(1), nibble(2), nibble(3)),
            6 => (byte(0), byte(2), byte(4), Ok(255)),
            8 => (byte(0), byte(2), byte(4), byte(6)),
            _ => return Err(invalid()),
        };
        match parsed {
            (Ok(r), Ok(g), Ok(b), Ok(a)) => Ok(Self::rgba(r, g, b, a)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/// Command categories that can be colored independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Rapid moves
    G0,
    /// Linear feed moves
    G1,
    /// Arcs in either direction
    G2G3,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::G0, Category::G1, Category::G2G3];

    /// Category of a segment; `None` for unknown segments.
    pub fn of(segment: &Segment) -> Option<Self> {
        match segment.code() {
            "G0" => Some(Self::G0),
            "G1" => Some(Self::G1),
            "G2" | "G3" => Some(Self::G2G3),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::G0 => "G0",
            Self::G1 => "G1",
            Self::G2G3 => "G2G3",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "G0" => Ok(Self::G0),
            "G1" => Ok(Self::G1),
            "G2G3" | "G2" | "G3" => Ok(Self::G2G3),
            _ => Err(format!("Unknown command category: {}", s)),
        }
    }
}

/// Which categories get drawn, and in what color
///
/// An unset category is not drawn at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorPolicy {
    #[serde(rename = "G0", default, skip_serializing_if = "Option::is_none")]
    pub g0: Option<Color>,
    #[serde(rename = "G1", default, skip_serializing_if = "Option::is_none")]
    pub g1: Option<Color>,
    #[serde(rename = "G2G3", default, skip_serializing_if = "Option::is_none")]
    pub g2g3: Option<Color>,
}

impl ColorPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color_for(&self, category: Category) -> Option<Color> {
        match category {
            Category::G0 => self.g0,
            Category::G1 => self.g1,
            Category::G2G3 => self.g2g3,
        }
    }

    pub fn set(&mut self, category: Category, color: Option<Color>) {
        match category {
            Category::G0 => self.g0 = color,
            Category::G1 => self.g1 = color,
            Category::G2G3 => self.g2g3 = color,
        }
    }

    pub fn with(mut self, category: Category, color: Color) -> Self {
        self.set(category, Some(color));
        self
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL.iter().all(|&c| self.color_for(c).is_none())
    }

    /// Overlay the categories set in `other` on top of this policy
    pub fn merge(&mut self, other: &ColorPolicy) {
        for category in Category::ALL {
            if let Some(color) = other.color_for(category) {
                self.set(category, Some(color));
            }
        }
    }
}
