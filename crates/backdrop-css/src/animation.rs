//! Property animation values.
//!
//! [CSS Transitions § 3](https://www.w3.org/TR/css-transitions-1/#transitions)
//!
//! Scheduling belongs to the host. A [`PropertyAnimation`] only knows how to
//! turn a progress value into a compositor property: the host calls
//! [`PropertyAnimation::apply`] once per frame with the elapsed fraction.

use serde::Serialize;

use backdrop_common::warn_once;

use crate::borders::Edge;
use crate::compositor::BackgroundCompositor;
use crate::paint::Point;
use crate::values::ColorValue;

/// The compositor property an animation drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnimatedProperty {
    /// `background-color`
    BackgroundColor,
    /// `border-color` of one edge, or all of them.
    BorderColor(Edge),
    /// `border-width` of one edge, or all of them.
    BorderWidth(Edge),
    /// `background-position`, resolved to device pixels.
    BackgroundPosition,
    /// Layer opacity.
    Opacity,
}

/// A value at one end of an animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum AnimatedValue {
    /// A color.
    Color(ColorValue),
    /// A length in device pixels.
    Length(f32),
    /// A position in device pixels.
    Point(Point),
    /// An opacity from 0 to 255.
    Alpha(u8),
}

impl AnimatedValue {
    /// Read the current value of `kind` from `compositor`, so a transition
    /// can start from whatever is on screen now.
    #[must_use]
    pub fn capture(compositor: &BackgroundCompositor, kind: AnimatedProperty) -> Self {
        match kind {
            AnimatedProperty::BackgroundColor => Self::Color(compositor.background_color()),
            AnimatedProperty::BorderColor(edge) => Self::Color(compositor.border_color(edge)),
            AnimatedProperty::BorderWidth(edge) => Self::Length(compositor.border_width(edge)),
            AnimatedProperty::BackgroundPosition => {
                let (x, y) = compositor.background_position_px();
                Self::Point(Point::new(x as f32, y as f32))
            }
            AnimatedProperty::Opacity => Self::Alpha(compositor.alpha()),
        }
    }

    /// The value a fraction `t` of the way from `self` to `end`.
    ///
    /// Values of different kinds cannot blend; they switch at the midpoint.
    #[must_use]
    pub fn interpolate(self, end: Self, t: f32) -> Self {
        match (self, end) {
            (Self::Color(a), Self::Color(b)) => Self::Color(lerp_color(a, b, t)),
            (Self::Length(a), Self::Length(b)) => Self::Length(lerp(a, b, t)),
            (Self::Point(a), Self::Point(b)) => {
                Self::Point(Point::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t)))
            }
            (Self::Alpha(a), Self::Alpha(b)) => Self::Alpha(lerp_channel(a, b, t)),
            (start, end) => {
                if t < 0.5 {
                    start
                } else {
                    end
                }
            }
        }
    }
}

/// [CSS Easing Functions](https://www.w3.org/TR/css-easing-1/)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum Interpolation {
    /// `linear`
    Linear,
    /// `ease`, equivalent to `cubic-bezier(0.25, 0.1, 0.25, 1)`.
    #[default]
    Ease,
    /// `ease-in`, equivalent to `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,
    /// `ease-out`, equivalent to `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,
    /// `ease-in-out`, equivalent to `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,
    /// `cubic-bezier(x1, y1, x2, y2)`
    CubicBezier(f32, f32, f32, f32),
    /// `steps(n, jump-end)`
    Steps(u32),
}

impl Interpolation {
    /// Map linear progress to eased progress. Input is clamped to `[0, 1]`
    /// first; NaN counts as 0.
    #[must_use]
    pub fn ease(self, progress: f32) -> f32 {
        let t = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        match self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::CubicBezier(x1, y1, x2, y2) => {
                cubic_bezier(x1.clamp(0.0, 1.0), y1, x2.clamp(0.0, 1.0), y2, t)
            }
            Self::Steps(steps) => {
                let steps = steps.max(1) as f32;
                (t * steps).floor() / steps
            }
        }
    }
}

/// One property moving from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PropertyAnimation {
    /// The property written by [`Self::apply`].
    pub kind: AnimatedProperty,
    /// Value at progress 0.
    pub start: AnimatedValue,
    /// Value at progress 1.
    pub end: AnimatedValue,
    /// Easing applied to progress.
    pub interpolation: Interpolation,
}

impl PropertyAnimation {
    /// Create an animation.
    #[must_use]
    pub const fn new(
        kind: AnimatedProperty,
        start: AnimatedValue,
        end: AnimatedValue,
        interpolation: Interpolation,
    ) -> Self {
        Self {
            kind,
            start,
            end,
            interpolation,
        }
    }

    /// Animate from the compositor's current value to `end`.
    #[must_use]
    pub fn from_current(
        compositor: &BackgroundCompositor,
        kind: AnimatedProperty,
        end: AnimatedValue,
        interpolation: Interpolation,
    ) -> Self {
        Self::new(kind, AnimatedValue::capture(compositor, kind), end, interpolation)
    }

    /// The value at `progress`, after easing.
    #[must_use]
    pub fn value_at(&self, progress: f32) -> AnimatedValue {
        self.start
            .interpolate(self.end, self.interpolation.ease(progress))
    }

    /// Write the value at `progress` into `compositor`.
    ///
    /// A value whose kind does not fit the property is ignored with a
    /// diagnostic.
    pub fn apply(&self, compositor: &mut BackgroundCompositor, progress: f32) {
        match (self.kind, self.value_at(progress)) {
            (AnimatedProperty::BackgroundColor, AnimatedValue::Color(color)) => {
                compositor.set_background_color_value(color);
            }
            (AnimatedProperty::BorderColor(edge), AnimatedValue::Color(color)) => {
                compositor.set_border_color_value(edge, Some(color));
            }
            (AnimatedProperty::BorderWidth(edge), AnimatedValue::Length(px)) => {
                compositor.set_border_width_px(edge, px);
            }
            (AnimatedProperty::BackgroundPosition, AnimatedValue::Point(point)) => {
                compositor.set_background_position_px(point.x, point.y);
            }
            (AnimatedProperty::Opacity, AnimatedValue::Alpha(alpha)) => {
                compositor.set_alpha(alpha);
            }
            (kind, value) => warn_once(
                "Animation",
                &format!("{kind:?} cannot be animated with {value:?}"),
            ),
        }
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    lerp(f32::from(a), f32::from(b), t).round().clamp(0.0, 255.0) as u8
}

fn lerp_color(a: ColorValue, b: ColorValue, t: f32) -> ColorValue {
    ColorValue::rgba(
        lerp_channel(a.r, b.r, t),
        lerp_channel(a.g, b.g, t),
        lerp_channel(a.b, b.b, t),
        lerp_channel(a.a, b.a, t),
    )
}

/// Evaluate a CSS cubic Bézier timing curve at input progress `x`.
///
/// The curve runs from (0, 0) to (1, 1) through the two control points.
/// `x(s)` is inverted with Newton's method, falling back to bisection when
/// the slope is too flat, and `y(s)` is returned.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    const NEWTON_ITERATIONS: usize = 8;
    const BISECTION_ITERATIONS: usize = 32;
    const PRECISION: f32 = 1e-6;

    // Polynomial coefficients of B(s) = ((a s + b) s + c) s.
    let coefficients = |p1: f32, p2: f32| {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        (a, b, c)
    };
    let (ax, bx, cx) = coefficients(x1, x2);
    let (ay, by, cy) = coefficients(y1, y2);
    let sample_x = |s: f32| ((ax * s + bx) * s + cx) * s;
    let sample_y = |s: f32| ((ay * s + by) * s + cy) * s;
    let slope_x = |s: f32| (3.0 * ax * s + 2.0 * bx) * s + cx;

    let mut s = x;
    for _ in 0..NEWTON_ITERATIONS {
        let error = sample_x(s) - x;
        if error.abs() < PRECISION {
            return sample_y(s);
        }
        let slope = slope_x(s);
        if slope.abs() < PRECISION {
            break;
        }
        s -= error / slope;
    }

    let (mut low, mut high) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..BISECTION_ITERATIONS {
        let current = sample_x(s);
        if (current - x).abs() < PRECISION {
            break;
        }
        if current < x {
            low = s;
        } else {
            high = s;
        }
        s = (low + high) / 2.0;
    }
    sample_y(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_cubic_bezier_endpoints() {
        for curve in [
            Interpolation::Ease,
            Interpolation::EaseIn,
            Interpolation::EaseOut,
            Interpolation::EaseInOut,
        ] {
            assert!(close(curve.ease(0.0), 0.0), "{curve:?} at 0");
            assert!(close(curve.ease(1.0), 1.0), "{curve:?} at 1");
        }
    }

    #[test]
    fn test_linear_bezier_is_identity() {
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!(close(cubic_bezier(0.0, 0.0, 1.0, 1.0, t), t));
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let curve = Interpolation::EaseInOut;
        assert!(close(curve.ease(0.5), 0.5));
        assert!(close(curve.ease(0.25) + curve.ease(0.75), 1.0));
    }

    #[test]
    fn test_ease_in_starts_slow() {
        assert!(Interpolation::EaseIn.ease(0.2) < 0.2);
        assert!(Interpolation::EaseOut.ease(0.2) > 0.2);
    }

    #[test]
    fn test_steps_jump_at_end_of_interval() {
        let steps = Interpolation::Steps(4);
        assert!(close(steps.ease(0.0), 0.0));
        assert!(close(steps.ease(0.24), 0.0));
        assert!(close(steps.ease(0.25), 0.25));
        assert!(close(steps.ease(0.99), 0.75));
        assert!(close(steps.ease(1.0), 1.0));
    }

    #[test]
    fn test_lerp_channel_rounds() {
        assert_eq!(lerp_channel(0, 255, 0.5), 128);
        assert_eq!(lerp_channel(200, 100, 1.0), 100);
    }
}
