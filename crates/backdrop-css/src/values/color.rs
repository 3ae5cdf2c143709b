//! CSS Color values and parsing
//!
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)

use serde::Serialize;

use crate::error::{StyleError, StyleResult};

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColorValue {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

impl ColorValue {
    /// Black (#000000)
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White (#ffffff)
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// An opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// A color with explicit alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse any supported color notation.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidColor`] for anything that is not a hex
    /// color, an `rgb()`/`rgba()` function or a named color.
    pub fn parse(input: &str) -> StyleResult<Self> {
        let trimmed = input.trim();
        let parsed = if trimmed.starts_with('#') {
            Self::from_hex(trimmed)
        } else if let Some(open) = trimmed.find('(') {
            parse_rgb_function(&trimmed[..open], &trimmed[open + 1..])
        } else {
            Self::from_named(trimmed)
        };
        parsed.ok_or_else(|| StyleError::InvalidColor(input.to_string()))
    }

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    /// "The syntax of a <hex-color> is a <hash-token> token whose value consists of
    /// 3, 4, 6, or 8 hexadecimal digits."
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let short = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
        let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            // [§ 4.2.1]
            // "The three-digit RGB notation (#RGB) is converted into six-digit form (#RRGGBB)
            // by replicating digits, not by adding zeros."
            3 => Some(Self::rgb(short(0)?, short(1)?, short(2)?)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgb(long(0)?, long(2)?, long(4)?)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    ///
    /// The sixteen basic HTML colors plus `orange`, `grey`/`gray` aliases and
    /// `transparent`.
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "transparent" => Self::TRANSPARENT,
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "blue" => Self::rgb(0, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "orange" => Self::rgb(255, 165, 0),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            "aqua" | "cyan" => Self::rgb(0, 255, 255),
            "fuchsia" | "magenta" => Self::rgb(255, 0, 255),
            "lime" => Self::rgb(0, 255, 0),
            "maroon" => Self::rgb(128, 0, 0),
            "navy" => Self::rgb(0, 0, 128),
            "olive" => Self::rgb(128, 128, 0),
            "purple" => Self::rgb(128, 0, 128),
            "silver" => Self::rgb(192, 192, 192),
            "teal" => Self::rgb(0, 128, 128),
            _ => return None,
        };
        Some(color)
    }

    /// Whether the alpha channel is below fully opaque.
    #[must_use]
    pub const fn is_translucent(self) -> bool {
        self.a < 255
    }

    /// Whether the color paints nothing.
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Scale the alpha channel by `alpha / 255`.
    #[must_use]
    pub const fn multiply_alpha(self, alpha: u8) -> Self {
        let a = (self.a as u16 * alpha as u16 + 127) / 255;
        Self { a: a as u8, ..self }
    }
}

/// [§ 4.1 The RGB Functions](https://www.w3.org/TR/css-color-4/#rgb-functions)
///
/// "For legacy reasons, rgb() also supports an alternate syntax that
/// separates all of its arguments with commas."
///
/// Channels are numbers 0-255 or percentages; alpha is a number 0-1 or a
/// percentage. `rgb` and `rgba` are aliases.
fn parse_rgb_function(name: &str, rest: &str) -> Option<ColorValue> {
    if !matches!(name.trim().to_ascii_lowercase().as_str(), "rgb" | "rgba") {
        return None;
    }
    let body = rest.trim_end().strip_suffix(')')?;
    let args: Vec<&str> = body
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    if !(3..=4).contains(&args.len()) {
        return None;
    }

    let channel = |s: &str| -> Option<u8> {
        let value = match s.strip_suffix('%') {
            Some(pct) => pct.parse::<f32>().ok()? * 2.55,
            None => s.parse::<f32>().ok()?,
        };
        value.is_finite().then(|| value.round().clamp(0.0, 255.0) as u8)
    };
    let alpha = args.get(3).map_or(Some(255), |s| {
        let value = match s.strip_suffix('%') {
            Some(pct) => pct.parse::<f32>().ok()? / 100.0,
            None => s.parse::<f32>().ok()?,
        };
        value
            .is_finite()
            .then(|| (value.clamp(0.0, 1.0) * 255.0).round() as u8)
    })?;

    Some(ColorValue::rgba(
        channel(args[0])?,
        channel(args[1])?,
        channel(args[2])?,
        alpha,
    ))
}
