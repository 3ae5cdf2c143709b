//! Raster backend errors.

use thiserror::Error;

/// Result alias for raster backend operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised while allocating, decoding or encoding pixels.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The canvas or an image has a zero or unallocatable size.
    #[error("invalid surface size {width}x{height}")]
    InvalidSize {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// A pixel buffer does not match its declared dimensions.
    #[error("pixel buffer does not match surface size")]
    Buffer,

    /// Image bytes could not be decoded.
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The canvas could not be written as PNG.
    #[error("could not write PNG to '{path}'")]
    Encode {
        /// Destination path.
        path: String,
        /// Underlying encoder or I/O error.
        #[source]
        source: image::ImageError,
    },
}
