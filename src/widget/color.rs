use derive_more::{Deref, From, Into};
use palette::Srgba;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// An 8-bit ARGB color, written `#RRGGBB` or `#AARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Deref, From, Into, DeserializeFromStr, SerializeDisplay)]
pub struct Color(Srgba<u8>);

impl Color {
    pub fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self(Srgba::new(red, green, blue, alpha))
    }

    pub fn from_argb(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self::new(r, g, b, a)
    }

    pub fn to_argb(self) -> u32 {
        let (r, g, b, a) = self.0.into_components();
        u32::from_be_bytes([a, r, g, b])
    }

    /// Components scaled to `0.0..=1.0`, in cairo's `set_source_rgba` order.
    pub fn to_rgba_f64(self) -> (f64, f64, f64, f64) {
        self.0.into_format::<f64, f64>().into_components()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ColorParseError {
    #[error("expected 6 or 8 hex digits, got {0}")]
    InvalidLength(usize),
    #[error("not a hex color: {0:?}")]
    InvalidDigits(String),
    #[error("invalid hex digits: {0}")]
    InvalidHex(#[from] ParseIntError),
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigits(hex.to_string()));
        }

        let value = u32::from_str_radix(hex, 16);
        match hex.len() {
            6 => Ok(Self::from_argb(0xFF00_0000 | value?)),
            8 => Ok(Self::from_argb(value?)),
            n => Err(ColorParseError::InvalidLength(n)),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_argb() {
            argb if argb >> 24 == 0xFF => write!(f, "#{:06X}", argb & 0x00FF_FFFF),
            argb => write!(f, "#{:08X}", argb),
        }
    }
}

/// Per-channel linear mix. `fraction` weights `start`: 1.0 yields `start`,
/// 0.0 yields `end`.
pub fn blend(start: Color, end: Color, fraction: f64) -> Color {
    let mix = |s: u8, e: u8| (s as f64 * fraction + e as f64 * (1.0 - fraction)) as u8;
    Color::new(
        mix(start.red, end.red),
        mix(start.green, end.green),
        mix(start.blue, end.blue),
        mix(start.alpha, end.alpha),
    )
}
