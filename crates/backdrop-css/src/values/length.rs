//! CSS Length values and parsing
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)

use serde::Serialize;

use crate::config::PxScale;
use crate::error::{StyleError, StyleResult};

/// [§ 4.1 Lengths](https://www.w3.org/TR/css-values-4/#lengths)
/// "Lengths refer to distance measurements and are denoted by `<length>` in the
/// property definitions."
///
/// Only the units the compositor's hosts emit are supported: `px` (also used
/// for unitless numbers) and percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LengthValue {
    /// [§ 6.1 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
    /// "1px = 1/96th of 1in", in design pixels.
    Px(f32),
    /// [§ 4.3 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
    /// "A <percentage> value is denoted by <percentage>, and consists of a
    /// <number> immediately followed by a percent sign '%'."
    ///
    /// Stored as written, so `50%` is `Percent(50.0)`.
    Percent(f32),
}

impl LengthValue {
    /// Parse `NNpx`, `NN%` or a bare number (px).
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidNumber`] when the numeric part is not a
    /// finite float, e.g. `50%%` or `100pxpx`.
    pub fn parse(input: &str) -> StyleResult<Self> {
        let input = input.trim();
        if let Some(pct) = input.strip_suffix('%') {
            parse_number(pct).map(Self::Percent)
        } else if let Some(px) = input.strip_suffix("px") {
            parse_number(px).map(Self::Px)
        } else {
            parse_number(input).map(Self::Px)
        }
    }

    /// Resolve against `base` (used for percentages), converting px through
    /// `scale`.
    #[must_use]
    pub fn to_px(self, base: f32, scale: PxScale) -> f32 {
        match self {
            Self::Px(px) => scale.real_px(px),
            Self::Percent(pct) => pct / 100.0 * base,
        }
    }
}

/// Parse a finite float, rejecting `NaN`, infinities and trailing garbage.
///
/// # Errors
///
/// Returns [`StyleError::InvalidNumber`] carrying the rejected text.
pub fn parse_number(input: &str) -> StyleResult<f32> {
    input
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| StyleError::InvalidNumber(input.to_string()))
}
