//! Color stop resolution.
//!
//! [§ 3.4.3 Color Stop "Fixup"](https://www.w3.org/TR/css-images-3/#color-stop-fixup)
//!
//! Stops are turned into fractions of the gradient line, fixed up so they
//! never decrease, and then remapped so the shader only ever sees positions
//! in `[0, 1]`. When an explicit first or last stop lies off `[0, 1]`, the
//! gradient line itself is stretched instead:
//!
//! - `Clamp` extends the line backward to the first stop (if it is below 0)
//!   and forward to the last stop (if it is above 1).
//! - `Repeat` moves both ends onto the first and last stops, so one repeat
//!   period spans exactly the listed stops.

use serde::Serialize;

use crate::config::PxScale;
use crate::error::StyleResult;
use crate::paint::Point;
use crate::values::{ColorValue, parse_number};

/// Distances shorter than this are treated as a zero-length period.
const EPSILON: f32 = 1e-6;

/// How the gradient extends past its first and last stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TileMode {
    /// Extend the first and last colors (`linear-gradient`).
    #[default]
    Clamp,
    /// Repeat the stop pattern (`repeating-linear-gradient`).
    Repeat,
}

/// Where a stop sits on the gradient line, as written.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum StopPosition {
    /// Fraction of the gradient line (`25%` and `0.25` both become `0.25`).
    Fraction(f32),
    /// Distance from the start in design pixels.
    Px(f32),
}

impl StopPosition {
    /// Parse `NN%`, `NNpx` or a unitless fraction.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidNumber`](crate::StyleError::InvalidNumber)
    /// for a malformed number.
    pub fn parse(input: &str) -> StyleResult<Self> {
        let input = input.trim();
        if let Some(pct) = input.strip_suffix('%') {
            parse_number(pct).map(|p| Self::Fraction(p / 100.0))
        } else if let Some(px) = input.strip_suffix("px") {
            parse_number(px).map(Self::Px)
        } else {
            parse_number(input).map(Self::Fraction)
        }
    }

    /// Fraction of a gradient line `length` pixels long.
    fn to_fraction(self, length: f32, scale: PxScale) -> f32 {
        match self {
            Self::Fraction(fraction) => fraction,
            Self::Px(px) if length > EPSILON => scale.real_px(px) / length,
            Self::Px(_) => 0.0,
        }
    }
}

/// A color stop as written in the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorStop {
    /// Stop color.
    pub color: ColorValue,
    /// Explicit position, or `None` for a default-position stop.
    pub position: Option<StopPosition>,
}

impl ColorStop {
    /// Whether the stop had no explicit position.
    #[must_use]
    pub const fn is_default_position(&self) -> bool {
        self.position.is_none()
    }
}

/// A stop ready for a shader: position in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedStop {
    /// Stop color.
    pub color: ColorValue,
    /// Position along the (possibly adjusted) gradient line.
    pub position: f32,
}

/// A gradient line with its stops normalized to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedGradient {
    /// Position 0.
    pub start: Point,
    /// Position 1.
    pub end: Point,
    /// Non-decreasing stops within `[0, 1]`.
    pub stops: Vec<ResolvedStop>,
}

/// Resolve `stops` against the gradient line `start → end`.
///
/// `stops` is expected to hold at least two entries; shorter input yields
/// the stops it has with default positions resolved to `0`.
#[must_use]
pub fn normalize_stops(
    start: Point,
    end: Point,
    stops: &[ColorStop],
    tile_mode: TileMode,
    scale: PxScale,
) -> NormalizedGradient {
    let vector = start.vector_to(end);
    let length = vector.length();

    let mut positions: Vec<Option<f32>> = stops
        .iter()
        .map(|stop| stop.position.map(|p| p.to_fraction(length, scale)))
        .collect();

    // "If the first color stop does not have a position, set its position to
    // 0%. If the last color stop does not have a position, set its position
    // to 100%."
    if let Some(first) = positions.first_mut()
        && first.is_none()
    {
        *first = Some(0.0);
    }
    if positions.len() > 1
        && let Some(last) = positions.last_mut()
        && last.is_none()
    {
        *last = Some(1.0);
    }

    // "If a color stop ... has a position that is less than the specified
    // position of any color stop before it in the list, set its position to
    // be equal to the largest specified position of any color stop before
    // it."
    let mut largest = f32::NEG_INFINITY;
    for position in positions.iter_mut().flatten() {
        largest = largest.max(*position);
        *position = largest;
    }

    let mut resolved = spread_default_positions(&positions);

    let first = resolved.first().copied().unwrap_or(0.0);
    let last = resolved.last().copied().unwrap_or(1.0);
    let (low, high) = match tile_mode {
        TileMode::Clamp => (first.min(0.0), last.max(1.0)),
        TileMode::Repeat => (first, last),
    };

    let (mut start, mut end) = (start, end);
    let span = high - low;
    if span > EPSILON && (low.abs() > EPSILON || (high - 1.0).abs() > EPSILON) {
        end = start.offset_by(vector, high);
        start = start.offset_by(vector, low);
        for position in &mut resolved {
            *position = (*position - low) / span;
        }
    }

    let stops = stops
        .iter()
        .zip(resolved)
        .map(|(stop, position)| ResolvedStop {
            color: stop.color,
            position: position.clamp(0.0, 1.0),
        })
        .collect();

    NormalizedGradient { start, end, stops }
}

/// "If any color stop still does not have a position, then, for each run of
/// adjacent color stops without positions, set their positions so that they
/// are evenly spaced between the preceding and following color stops with
/// positions."
fn spread_default_positions(positions: &[Option<f32>]) -> Vec<f32> {
    let mut resolved = Vec::with_capacity(positions.len());
    let mut index = 0;
    while index < positions.len() {
        if let Some(position) = positions[index] {
            resolved.push(position);
            index += 1;
            continue;
        }
        let before = resolved.last().copied().unwrap_or(0.0);
        let run_end = positions[index..]
            .iter()
            .position(Option::is_some)
            .map_or(positions.len(), |offset| index + offset);
        let after = positions
            .get(run_end)
            .copied()
            .flatten()
            .unwrap_or(before);
        let gaps = (run_end - index + 1) as f32;
        for step in 1..=(run_end - index) {
            resolved.push(before + (after - before) * step as f32 / gaps);
        }
        index = run_end;
    }
    resolved
}
