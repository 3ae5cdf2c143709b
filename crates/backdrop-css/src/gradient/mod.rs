//! Linear gradients
//!
//! [§ 3.1 Linear Gradients](https://www.w3.org/TR/css-images-3/#linear-gradients)
//!
//! ```text
//! linear-gradient() = linear-gradient(
//!   [ <angle> | to <side-or-corner> ]? ,
//!   <color-stop-list>
//! )
//! ```
//!
//! - [`direction`] resolves the gradient line for a box
//! - [`stops`] normalizes stop positions onto that line

/// Gradient line geometry from keywords or angles.
pub mod direction;
/// Color stop fixup and tile-mode normalization.
pub mod stops;

use serde::Serialize;

use backdrop_common::warn_once;

pub use direction::{GradientDirection, GradientLine, Quadrant, Side};
pub use stops::{ColorStop, NormalizedGradient, ResolvedStop, StopPosition, TileMode, normalize_stops};

use crate::config::PxScale;
use crate::error::{StyleError, StyleResult};
use crate::paint::{Point, Rect};
use crate::values::{ColorValue, parse_number};

/// A parsed `linear-gradient()` or `repeating-linear-gradient()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearGradient {
    /// Direction of the gradient line.
    pub direction: GradientDirection,
    /// Color stops in order; always at least two.
    pub stops: Vec<ColorStop>,
    /// `Repeat` for the repeating form.
    pub tile_mode: TileMode,
}

impl LinearGradient {
    /// Build a gradient from parts.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::TooFewStops`] with fewer than two stops.
    pub fn new(
        direction: GradientDirection,
        stops: Vec<ColorStop>,
        tile_mode: TileMode,
    ) -> StyleResult<Self> {
        if stops.len() < 2 {
            return Err(StyleError::TooFewStops(stops.len()));
        }
        Ok(Self {
            direction,
            stops,
            tile_mode,
        })
    }

    /// Parse a gradient function.
    ///
    /// A malformed direction does not reject the gradient: it is replaced by
    /// the default `to bottom` with a diagnostic.
    ///
    /// # Errors
    ///
    /// Returns a [`StyleError`] when the input is not a linear-gradient
    /// function, a stop color or position is malformed, or fewer than two
    /// stops are given.
    pub fn parse(input: &str) -> StyleResult<Self> {
        let input = input.trim();
        let invalid = || StyleError::InvalidGrammar {
            property: "linear-gradient",
            value: input.to_string(),
        };

        let open = input.find('(').ok_or_else(invalid)?;
        let tile_mode = match input[..open].trim().to_ascii_lowercase().as_str() {
            "linear-gradient" => TileMode::Clamp,
            "repeating-linear-gradient" => TileMode::Repeat,
            _ => return Err(invalid()),
        };
        let body = input[open + 1..]
            .strip_suffix(')')
            .ok_or_else(invalid)?;

        let mut args = split_top_level(body, ',');
        let direction = match args.first().and_then(|first| parse_direction(first)) {
            Some(direction) => {
                let _ = args.remove(0);
                direction
            }
            None => GradientDirection::default(),
        };

        let stops = args
            .iter()
            .map(|arg| parse_color_stop(arg))
            .collect::<StyleResult<Vec<_>>>()?;

        Self::new(direction, stops, tile_mode)
    }

    /// Parse `input`, returning `None` with a diagnostic when it is rejected.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Option<Self> {
        Self::parse(input)
            .map_err(|err| {
                warn_once("Gradient", &format!("{err}; gradient '{input}' dropped"));
            })
            .ok()
    }

    /// Resolve the gradient line and normalized stops over `rect`.
    #[must_use]
    pub fn geometry(&self, rect: &Rect, scale: PxScale) -> NormalizedGradient {
        let line = self.direction.resolve(rect.width, rect.height);
        let origin = |p: Point| Point::new(p.x + rect.x, p.y + rect.y);
        normalize_stops(
            origin(line.start),
            origin(line.end),
            &self.stops,
            self.tile_mode,
            scale,
        )
    }
}

/// Split on `separator` outside parentheses, trimming each piece.
fn split_top_level(input: &str, separator: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                pieces.push(input[start..index].trim());
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }
    pieces.push(input[start..].trim());
    pieces
}

/// Index of the last whitespace character outside parentheses.
fn last_top_level_space(input: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut found = None;
    for (index, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => found = Some(index),
            _ => {}
        }
    }
    found
}

/// Recognize the optional first argument. Returns `None` when the argument
/// is not a direction at all (it is then the first color stop), and the
/// default direction with a diagnostic when it looks like one but is
/// malformed.
fn parse_direction(arg: &str) -> Option<GradientDirection> {
    let lower = arg.to_ascii_lowercase();
    if let Some(sides) = lower.strip_prefix("to ") {
        let parsed: Result<Vec<Side>, _> = sides.split_whitespace().map(str::parse).collect();
        let direction = parsed.map(GradientDirection::Keywords).ok();
        return Some(match direction {
            Some(direction) if direction.is_valid() => direction,
            _ => {
                warn_once(
                    "Gradient",
                    &format!("invalid gradient direction '{arg}', using to bottom"),
                );
                GradientDirection::default()
            }
        });
    }

    let (number, degrees_per_unit) = if let Some(n) = lower.strip_suffix("deg") {
        (n, 1.0)
    } else if let Some(n) = lower.strip_suffix("grad") {
        (n, 0.9)
    } else if let Some(n) = lower.strip_suffix("rad") {
        (n, 180.0 / std::f32::consts::PI)
    } else if let Some(n) = lower.strip_suffix("turn") {
        (n, 360.0)
    } else {
        return None;
    };

    Some(match parse_number(number) {
        Ok(value) => GradientDirection::Angle(value * degrees_per_unit),
        Err(_) => {
            warn_once(
                "Gradient",
                &StyleError::InvalidAngle(arg.to_string()).to_string(),
            );
            GradientDirection::default()
        }
    })
}

/// `<color> [<position>]`
fn parse_color_stop(arg: &str) -> StyleResult<ColorStop> {
    if let Some(split) = last_top_level_space(arg) {
        let (color, position) = arg.split_at(split);
        if let Ok(position) = StopPosition::parse(position) {
            return Ok(ColorStop {
                color: ColorValue::parse(color)?,
                position: Some(position),
            });
        }
    }
    Ok(ColorStop {
        color: ColorValue::parse(arg)?,
        position: None,
    })
}
