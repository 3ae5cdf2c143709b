//! Gradient line geometry.
//!
//! [§ 3.1.1 Linear Gradient Syntax](https://www.w3.org/TR/css-images-3/#linear-gradient-syntax)
//!
//! Turns a keyword direction (`to top right`) or an angle into the start and
//! end points of the gradient line over a `width` x `height` box, plus the
//! quadrant the line points into.

use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::paint::Point;

/// A side keyword of `to <side-or-corner>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    /// `left`
    Left,
    /// `top`
    Top,
    /// `right`
    Right,
    /// `bottom`
    Bottom,
}

/// The quadrant a gradient line points into, counted clockwise from "up and
/// to the right" (angles are measured clockwise from straight up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Quadrant {
    /// Angles in `[0°, 90°]`: up and to the right.
    First,
    /// Angles in `(90°, 180°]`: down and to the right.
    Second,
    /// Angles in `(180°, 270°]`: down and to the left.
    Third,
    /// Angles in `(270°, 360°)`: up and to the left.
    Fourth,
}

impl Quadrant {
    const fn bit(self) -> u8 {
        match self {
            Self::First => 0b0001,
            Self::Second => 0b0010,
            Self::Third => 0b0100,
            Self::Fourth => 0b1000,
        }
    }

    fn from_mask(mask: u8) -> Option<Self> {
        [Self::First, Self::Second, Self::Third, Self::Fourth]
            .into_iter()
            .find(|q| q.bit() == mask)
    }
}

impl Side {
    /// The quadrant a lone side keyword points into.
    const fn quadrant(self) -> Quadrant {
        match self {
            Self::Right => Quadrant::First,
            Self::Bottom => Quadrant::Second,
            Self::Left => Quadrant::Third,
            Self::Top => Quadrant::Fourth,
        }
    }

    /// Every quadrant with a component toward this side.
    const fn mask(self) -> u8 {
        match self {
            Self::Right => Quadrant::First.bit() | Quadrant::Second.bit(),
            Self::Bottom => Quadrant::Second.bit() | Quadrant::Third.bit(),
            Self::Left => Quadrant::Third.bit() | Quadrant::Fourth.bit(),
            Self::Top => Quadrant::First.bit() | Quadrant::Fourth.bit(),
        }
    }
}

/// Direction of a linear gradient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GradientDirection {
    /// `to <side> [<side>]`.
    Keywords(Vec<Side>),
    /// Clockwise angle from "up", in degrees.
    Angle(f32),
}

impl Default for GradientDirection {
    /// "If the argument is omitted, it defaults to `to bottom`."
    fn default() -> Self {
        Self::Keywords(vec![Side::Bottom])
    }
}

/// Start and end of a gradient line in box-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientLine {
    /// Position 0 of the gradient.
    pub start: Point,
    /// Position 1 of the gradient.
    pub end: Point,
    /// Quadrant the line points into.
    pub quadrant: Quadrant,
}

impl GradientDirection {
    /// Whether this direction can be resolved: side keywords must name one
    /// side or two perpendicular sides.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Keywords(sides) => keyword_quadrant(sides).is_some(),
            Self::Angle(angle) => angle.is_finite(),
        }
    }

    /// Resolve the gradient line for a `width` x `height` box whose origin is
    /// at `(0, 0)`. Invalid directions resolve like the default.
    #[must_use]
    pub fn resolve(&self, width: f32, height: f32) -> GradientLine {
        match self {
            Self::Keywords(sides) => keyword_line(sides, width, height)
                .unwrap_or_else(|| keyword_line(&[Side::Bottom], width, height).unwrap_or(DOWN)),
            Self::Angle(angle) if angle.is_finite() => angle_line(*angle, width, height),
            Self::Angle(_) => Self::default().resolve(width, height),
        }
    }
}

const DOWN: GradientLine = GradientLine {
    start: Point::new(0.0, 0.0),
    end: Point::new(0.0, 0.0),
    quadrant: Quadrant::Second,
};

/// Intersect the quadrant masks of the keywords: the first keyword picks its
/// own quadrant, each following keyword narrows it to the shared quadrant.
fn keyword_quadrant(sides: &[Side]) -> Option<Quadrant> {
    let (first, rest) = sides.split_first()?;
    if rest.len() > 1 {
        return None;
    }
    let mut mask = first.mask();
    let mut quadrant = first.quadrant().bit();
    for side in rest {
        quadrant = mask & side.mask();
        mask = quadrant;
    }
    Quadrant::from_mask(quadrant)
}

/// Keywords move the corresponding coordinate to the far edge: `left` and
/// `top` push the start, `right` and `bottom` push the end.
fn keyword_line(sides: &[Side], width: f32, height: f32) -> Option<GradientLine> {
    let quadrant = keyword_quadrant(sides)?;
    let mut start = Point::default();
    let mut end = Point::default();
    for side in sides {
        match side {
            Side::Left => start.x = width,
            Side::Top => start.y = height,
            Side::Right => end.x = width,
            Side::Bottom => end.y = height,
        }
    }
    Some(GradientLine {
        start,
        end,
        quadrant,
    })
}

/// [§ 3.1.1](https://www.w3.org/TR/css-images-3/#linear-gradient-syntax)
///
/// "The gradient line's length is the length of the line between the
/// center and the corner of the box closest to the gradient line's
/// direction, doubled."
///
/// The angle is folded into the first two quadrants (the third and fourth
/// share their coordinates with the first and second, with start and end
/// swapped), reduced to an angle inside its quadrant, and compared with the
/// box diagonal to get the half length of the gradient line.
fn angle_line(angle: f32, width: f32, height: f32) -> GradientLine {
    let angle = angle.rem_euclid(360.0);
    let quadrant = if angle <= 90.0 {
        Quadrant::First
    } else if angle <= 180.0 {
        Quadrant::Second
    } else if angle <= 270.0 {
        Quadrant::Third
    } else {
        Quadrant::Fourth
    };
    let folded = match quadrant {
        Quadrant::First | Quadrant::Second => angle,
        Quadrant::Third | Quadrant::Fourth => angle - 180.0,
    };
    // The box diagonal measured clockwise from vertical.
    let diagonal_angle = width.atan2(height).to_degrees();
    let points_down = folded > 90.0;

    let (non_quadrant_angle, complement_angle, complement_diagonal) = if points_down {
        let reduced = folded - 90.0;
        (reduced, 90.0 - reduced, 90.0 - diagonal_angle)
    } else {
        (folded, folded, diagonal_angle)
    };

    let remainder = (complement_diagonal - non_quadrant_angle).abs().to_radians();
    let half_length = remainder.cos() * width.hypot(height) / 2.0;
    let theta = complement_angle.to_radians();
    let end_x = theta.sin() * half_length;
    let end_y = theta.cos() * half_length;

    let (half_w, half_h) = (width / 2.0, height / 2.0);
    let (start, end) = if points_down {
        (
            Point::new(half_w - end_x, half_h - end_y),
            Point::new(half_w + end_x, half_h + end_y),
        )
    } else {
        (
            Point::new(half_w - end_x, half_h + end_y),
            Point::new(half_w + end_x, half_h - end_y),
        )
    };

    let (start, end) = match quadrant {
        Quadrant::First | Quadrant::Second => (start, end),
        Quadrant::Third | Quadrant::Fourth => (end, start),
    };
    GradientLine {
        start,
        end,
        quadrant,
    }
}
