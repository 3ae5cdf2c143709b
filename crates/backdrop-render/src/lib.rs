//! tiny-skia raster backend for backdrop display lists.
//!
//! # Scope
//!
//! This crate provides:
//! - **Rendering** - execute a [`DisplayList`](backdrop_css::DisplayList) into
//!   a pixmap, honoring clips, dashes, gradients and image tiling
//! - **Image Store** - decode background images and look them up by `src`
//! - **PNG Output** - write the canvas to disk
//!
//! # Not Yet Implemented
//!
//! - GPU backends
//! - Animated image formats (only the first frame is decoded)

/// Raster backend errors.
pub mod error;
/// Image decoding and the `src`-keyed image store.
pub mod image_loader;
/// Display list execution.
pub mod renderer;

pub use backdrop_css as css;

pub use error::{RenderError, RenderResult};
pub use image_loader::{ImageStore, decode_image, load_image};
pub use renderer::Renderer;
