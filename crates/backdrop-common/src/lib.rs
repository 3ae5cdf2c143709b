//! Common utilities for the backdrop compositor.
//!
//! This crate provides the small pieces of shared infrastructure used by the
//! engine, the raster backend and the CLI:
//! - **Warning System** - deduplicated diagnostics routed through `tracing`
//! - **Loaded Images** - decoded RGBA pixels handed to the compositor's host

/// Decoded image data shared between the host and the raster backend.
pub mod image;
/// Deduplicated diagnostics for style values that fall back to defaults.
pub mod warning;

pub use image::LoadedImage;
pub use warning::{clear_warnings, warn_once};
