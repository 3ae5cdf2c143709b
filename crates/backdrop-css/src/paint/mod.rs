//! Painting primitives
//!
//! [CSS Backgrounds and Borders Level 3](https://www.w3.org/TR/css-backgrounds-3/)
//!
//! The compositor never touches pixels. It describes each frame as a
//! [`DisplayList`] of backend-neutral commands built from [`Path`] geometry
//! and [`AffineTransform`] placements:
//!
//! ```text
//! style strings → BackgroundCompositor → DisplayList → raster backend
//! ```
//!
//! This separation allows:
//! - Any 2D backend (tiny-skia, a GPU canvas, a platform canvas) to execute
//!   the same frame
//! - Geometry to be asserted in tests without rasterizing

mod display_list;
mod path;

pub use display_list::{DashPattern, DisplayCommand, DisplayList};
pub use path::{AffineTransform, CornerRadii, Path, PathBuilder, PathCommand, Point, Radius, Rect};
