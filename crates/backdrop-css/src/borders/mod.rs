//! Borders
//!
//! [§ 4 Borders](https://www.w3.org/TR/css-backgrounds-3/#borders) and
//! [§ 5 Rounded Corners](https://www.w3.org/TR/css-backgrounds-3/#corners)
//!
//! - [`spec`] - per-edge widths, colors and the border style
//! - [`radius`] - per-corner and uniform radii with their precedence rules
//! - [`geometry`] - fill/outline paths and the border draw commands

/// Border paths and draw commands.
pub mod geometry;
/// Corner radius specification and resolution.
pub mod radius;
/// Per-edge border width, color and style.
pub mod spec;

use serde::Serialize;
use strum_macros::{Display, EnumString};

pub use geometry::{BorderPaths, fill_inner_only, rectangular_border, rounded_border};
pub use radius::{Corner, CornerRadiusSpec};
pub use spec::{BorderSpec, BorderStyle, DEFAULT_BORDER_COLOR, EdgeValues};

/// A box edge, or `All` for the shorthand that sets every edge at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Edge {
    /// Every edge (`border-width`, `border-color`).
    All,
    /// `border-left-*`
    Left,
    /// `border-top-*`
    Top,
    /// `border-right-*`
    Right,
    /// `border-bottom-*`
    Bottom,
}

impl Edge {
    /// The four physical edges in drawing order.
    pub const SIDES: [Self; 4] = [Self::Left, Self::Top, Self::Right, Self::Bottom];
}
