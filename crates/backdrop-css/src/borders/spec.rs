//! Per-edge border values.
//!
//! [§ 4.1 'border-color'](https://www.w3.org/TR/css-backgrounds-3/#border-color),
//! [§ 4.2 'border-style'](https://www.w3.org/TR/css-backgrounds-3/#border-style),
//! [§ 4.3 'border-width'](https://www.w3.org/TR/css-backgrounds-3/#border-width)

use serde::Serialize;
use strum_macros::{Display, EnumString};

use super::Edge;
use crate::config::PxScale;
use crate::paint::DashPattern;
use crate::values::ColorValue;

/// Color of an edge whose color was never set.
pub const DEFAULT_BORDER_COLOR: ColorValue = ColorValue::BLACK;

/// A value set per edge, with an `All` shorthand underneath the sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeValues<T> {
    /// Shorthand value applying to every edge without its own value.
    pub all: Option<T>,
    /// Left edge override.
    pub left: Option<T>,
    /// Top edge override.
    pub top: Option<T>,
    /// Right edge override.
    pub right: Option<T>,
    /// Bottom edge override.
    pub bottom: Option<T>,
}

impl<T> Default for EdgeValues<T> {
    fn default() -> Self {
        Self {
            all: None,
            left: None,
            top: None,
            right: None,
            bottom: None,
        }
    }
}

impl<T: Copy + PartialEq> EdgeValues<T> {
    fn slot_mut(&mut self, edge: Edge) -> &mut Option<T> {
        match edge {
            Edge::All => &mut self.all,
            Edge::Left => &mut self.left,
            Edge::Top => &mut self.top,
            Edge::Right => &mut self.right,
            Edge::Bottom => &mut self.bottom,
        }
    }

    /// The value stored for `edge` itself, ignoring the shorthand.
    #[must_use]
    pub const fn raw(&self, edge: Edge) -> Option<T> {
        match edge {
            Edge::All => self.all,
            Edge::Left => self.left,
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
        }
    }

    /// The value in effect for `edge`: its own value, else the shorthand.
    #[must_use]
    pub fn get(&self, edge: Edge) -> Option<T> {
        self.raw(edge).or(self.all)
    }

    /// Store a value, returning whether anything changed.
    pub fn set(&mut self, edge: Edge, value: Option<T>) -> bool {
        let slot = self.slot_mut(edge);
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    /// The value shared by all four sides, or `None` when any side differs
    /// or is unset.
    #[must_use]
    pub fn uniform(&self) -> Option<T> {
        let first = self.get(Edge::Left)?;
        [Edge::Top, Edge::Right, Edge::Bottom]
            .into_iter()
            .all(|edge| self.get(edge) == Some(first))
            .then_some(first)
    }
}

/// [§ 4.2 'border-style'](https://www.w3.org/TR/css-backgrounds-3/#border-style)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BorderStyle {
    /// "A single line segment."
    #[default]
    Solid,
    /// "A series of square-ended dashes."
    Dashed,
    /// "A series of round dots."
    Dotted,
}

impl BorderStyle {
    /// Dash intervals for a stroke of `width`: dashes are three widths long
    /// with equal gaps; dots are one width long (at least 2px) with equal
    /// gaps. Solid strokes have no pattern.
    #[must_use]
    pub fn dash(self, width: f32) -> Option<DashPattern> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some(DashPattern {
                on: width * 3.0,
                off: width * 3.0,
            }),
            Self::Dotted => {
                let dot = if width > 0.0 && width < 2.0 { 2.0 } else { width };
                Some(DashPattern { on: dot, off: dot })
            }
        }
    }
}

/// Widths, colors and style of the four edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BorderSpec {
    /// Widths in design pixels.
    pub widths: EdgeValues<f32>,
    /// Edge colors.
    pub colors: EdgeValues<ColorValue>,
    /// Stroke style shared by every edge.
    pub style: BorderStyle,
}

impl BorderSpec {
    /// Width of one edge in device pixels (0 when unset).
    #[must_use]
    pub fn width(&self, edge: Edge, scale: PxScale) -> f32 {
        self.widths.get(edge).map_or(0.0, |w| scale.real_px(w))
    }

    /// The width shared by all four edges, or 0 when they differ.
    #[must_use]
    pub fn full_width(&self, scale: PxScale) -> f32 {
        self.widths.uniform().map_or(0.0, |w| scale.real_px(w))
    }

    /// Width used to draw one edge: its own width, falling back to the full
    /// width when it is zero.
    #[must_use]
    pub fn draw_width(&self, edge: Edge, scale: PxScale) -> f32 {
        let width = self.width(edge, scale);
        if width > 0.0 { width } else { self.full_width(scale) }
    }

    /// Whether `edge` is wide enough to be drawn.
    #[must_use]
    pub fn needs_draw(&self, edge: Edge, scale: PxScale) -> bool {
        self.draw_width(edge, scale) > 0.0
    }

    /// Color of one edge, [`DEFAULT_BORDER_COLOR`] when unset.
    #[must_use]
    pub fn color(&self, edge: Edge) -> ColorValue {
        self.colors.get(edge).unwrap_or(DEFAULT_BORDER_COLOR)
    }

    /// The color shared by all four edges, or [`DEFAULT_BORDER_COLOR`] when
    /// they differ.
    #[must_use]
    pub fn full_color(&self) -> ColorValue {
        self.colors.uniform().unwrap_or(DEFAULT_BORDER_COLOR)
    }

    /// Color used to draw one edge: its own color unless that is the
    /// default, in which case the full color.
    #[must_use]
    pub fn draw_color(&self, edge: Edge) -> ColorValue {
        let color = self.color(edge);
        if color == DEFAULT_BORDER_COLOR {
            self.full_color()
        } else {
            color
        }
    }

    /// Whether the full border color lets the background show through.
    #[must_use]
    pub fn is_translucent(&self) -> bool {
        self.full_color().is_translucent()
    }
}
