//! Primitive style values shared by every property parser.
//!
//! - [`color`] - sRGB colors from hex, `rgb()`/`rgba()` and named keywords
//! - [`length`] - px and percentage lengths, unitless numbers as px

/// Color values per [CSS Color Level 4](https://www.w3.org/TR/css-color-4/).
pub mod color;
/// Length values per [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/).
pub mod length;

pub use color::ColorValue;
pub use length::{LengthValue, parse_number};
