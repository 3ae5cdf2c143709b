//! Background, border and gradient compositing for hybrid-app views.
//!
//! # Scope
//!
//! This crate turns declarative style strings into paint geometry:
//!
//! - **Backgrounds** ([CSS Backgrounds Level 3 § 3](https://www.w3.org/TR/css-backgrounds-3/#backgrounds))
//!   - `background-position` in its one-to-four value forms
//!   - `background-size` (`contain`, `cover`, explicit, `auto`)
//!   - `background-repeat`
//!
//! - **Gradients** ([CSS Images Level 3 § 3](https://www.w3.org/TR/css-images-3/#gradients))
//!   - `linear-gradient()` and `repeating-linear-gradient()`
//!   - keyword and angle directions
//!   - color stop fixup and tile-mode normalization
//!
//! - **Borders** ([CSS Backgrounds Level 3 § 4-5](https://www.w3.org/TR/css-backgrounds-3/#borders))
//!   - per-edge width, color and a shared style
//!   - per-corner and uniform radii
//!   - rounded outlines and seam-free square borders
//!
//! - **Compositing**
//!   - [`BackgroundCompositor`] emits a [`DisplayList`] per draw
//!   - [`PropertyAnimation`] interpolates the animatable properties
//!
//! Rasterizing the display list is left to a backend.
//!
//! # Error policy
//!
//! Parsers return [`StyleResult`]. The compositor never propagates errors:
//! a rejected value falls back to its default and is reported once through
//! [`backdrop_common::warn_once`].

/// Property interpolation for host-driven transitions.
pub mod animation;
/// Background image position, size and repeat.
pub mod backgrounds;
/// Border widths, colors, radii and geometry.
pub mod borders;
/// The per-element compositor.
pub mod compositor;
/// Compositor configuration and px scaling.
pub mod config;
/// Parser error type.
pub mod error;
/// Linear gradients.
pub mod gradient;
/// Path, transform and display list primitives.
pub mod paint;
/// Shared value types.
pub mod values;

pub use animation::{AnimatedProperty, AnimatedValue, Interpolation, PropertyAnimation};
pub use backgrounds::{
    BackgroundImage, BackgroundSize, ImagePlacement, Position, PositionValue, RepeatMode,
    SizeValue, place_image,
};
pub use borders::{BorderSpec, BorderStyle, Corner, CornerRadiusSpec, Edge};
pub use compositor::{BackgroundCompositor, CompositorState};
pub use config::{CompositorConfig, PxScale};
pub use error::{StyleError, StyleResult};
pub use gradient::{ColorStop, GradientDirection, LinearGradient, TileMode};
pub use paint::{DisplayCommand, DisplayList, Path, PathBuilder, Point, Rect};
pub use values::{ColorValue, LengthValue};
