//! Corner radii
//!
//! [§ 5.1 'border-radius'](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
//!
//! A radius can be given for all corners at once or per corner, each as px
//! or as a percentage of the box. Percentages resolve against the box width
//! for the horizontal radius and the box height for the vertical radius.
//!
//! Resolution order for one corner, first defined value wins:
//!
//! 1. the corner's own percentage
//! 2. the corner's own px value
//! 3. the uniform percentage
//! 4. the uniform px value
//! 5. `0`

use serde::Serialize;
use strum_macros::{Display, EnumString};

use backdrop_common::warn_once;

use crate::config::PxScale;
use crate::error::{StyleError, StyleResult};
use crate::paint::{CornerRadii, Radius};
use crate::values::LengthValue;

/// A box corner, in `border-radius` shorthand order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Corner {
    /// `border-top-left-radius`
    TopLeft,
    /// `border-top-right-radius`
    TopRight,
    /// `border-bottom-right-radius`
    BottomRight,
    /// `border-bottom-left-radius`
    BottomLeft,
}

impl Corner {
    /// All corners in shorthand order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
    ];

    const fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomRight => 2,
            Self::BottomLeft => 3,
        }
    }
}

/// Uniform and per-corner radii as specified. Percentages are stored as
/// fractions (`50%` is `0.5`); px values are design pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CornerRadiusSpec {
    /// Uniform px radius.
    pub uniform_px: Option<f32>,
    /// Uniform percentage radius.
    pub uniform_percent: Option<f32>,
    /// Per-corner px radii, in [`Corner::ALL`] order.
    pub corner_px: [Option<f32>; 4],
    /// Per-corner percentage radii, in [`Corner::ALL`] order.
    pub corner_percent: [Option<f32>; 4],
}

impl CornerRadiusSpec {
    /// Parse a `border-radius` shorthand: one value for every corner, or four
    /// values in top-left, top-right, bottom-right, bottom-left order.
    ///
    /// # Errors
    ///
    /// Returns a [`StyleError`] for a malformed length, a negative radius or
    /// a token count other than one or four.
    pub fn parse(input: &str) -> StyleResult<Self> {
        let lengths = input
            .split_whitespace()
            .map(|token| {
                let length = LengthValue::parse(token)?;
                match length {
                    LengthValue::Px(v) | LengthValue::Percent(v) if v < 0.0 => {
                        Err(StyleError::InvalidGrammar {
                            property: "border-radius",
                            value: token.to_string(),
                        })
                    }
                    _ => Ok(length),
                }
            })
            .collect::<StyleResult<Vec<_>>>()?;

        let mut spec = Self::default();
        match lengths.as_slice() {
            [] => return Err(StyleError::Empty("border-radius")),
            [uniform] => spec.set_uniform(*uniform),
            [_, _, _, _] => {
                for (corner, length) in Corner::ALL.into_iter().zip(lengths.iter().copied()) {
                    spec.set_corner(corner, length);
                }
            }
            _ => {
                return Err(StyleError::InvalidGrammar {
                    property: "border-radius",
                    value: input.to_string(),
                });
            }
        }
        Ok(spec)
    }

    /// Parse `input`, falling back to square corners with a diagnostic.
    #[must_use]
    pub fn parse_or_default(input: &str) -> Self {
        Self::parse(input).unwrap_or_else(|err| {
            warn_once(
                "Radius",
                &format!("{err}; border-radius '{input}' reset to 0"),
            );
            Self::default()
        })
    }

    /// Set the uniform radius, clearing the uniform value of the other unit.
    pub fn set_uniform(&mut self, length: LengthValue) {
        match length {
            LengthValue::Px(px) => {
                self.uniform_px = Some(px);
                self.uniform_percent = None;
            }
            LengthValue::Percent(pct) => {
                self.uniform_percent = Some(pct / 100.0);
                self.uniform_px = None;
            }
        }
    }

    /// Set one corner, clearing that corner's value in the other unit.
    pub fn set_corner(&mut self, corner: Corner, length: LengthValue) {
        let i = corner.index();
        match length {
            LengthValue::Px(px) => {
                self.corner_px[i] = Some(px);
                self.corner_percent[i] = None;
            }
            LengthValue::Percent(pct) => {
                self.corner_percent[i] = Some(pct / 100.0);
                self.corner_px[i] = None;
            }
        }
    }

    /// Whether any radius is defined and positive.
    #[must_use]
    pub fn is_rounded(&self) -> bool {
        let positive = |v: &Option<f32>| v.is_some_and(|v| v > 0.0);
        positive(&self.uniform_px)
            || positive(&self.uniform_percent)
            || self.corner_px.iter().any(positive)
            || self.corner_percent.iter().any(positive)
    }

    /// Resolve one radius of `corner` against `base_length` (the box width
    /// for horizontal radii, the height for vertical radii).
    #[must_use]
    pub fn resolve(&self, corner: Corner, base_length: f32, scale: PxScale) -> f32 {
        let i = corner.index();
        self.corner_percent[i]
            .map(|fraction| fraction * base_length)
            .or_else(|| self.corner_px[i].map(|px| scale.real_px(px)))
            .or_else(|| self.uniform_percent.map(|fraction| fraction * base_length))
            .or_else(|| self.uniform_px.map(|px| scale.real_px(px)))
            .unwrap_or(0.0)
    }

    /// Resolve all corners for a `width` x `height` box.
    #[must_use]
    pub fn resolve_all(&self, width: f32, height: f32, scale: PxScale) -> CornerRadii {
        let radius = |corner| {
            Radius::new(
                self.resolve(corner, width, scale),
                self.resolve(corner, height, scale),
            )
        };
        CornerRadii {
            top_left: radius(Corner::TopLeft),
            top_right: radius(Corner::TopRight),
            bottom_right: radius(Corner::BottomRight),
            bottom_left: radius(Corner::BottomLeft),
        }
    }
}
