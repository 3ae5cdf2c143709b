//! Image data handed to the compositor by its host.
//!
//! Decoding is not part of the engine: the host decodes a background image
//! and gives the compositor its intrinsic size, while the raster backend looks
//! the pixels up by `src` key.

/// Decoded, non-premultiplied RGBA pixels of a background image.
#[derive(Clone)]
pub struct LoadedImage {
    /// Intrinsic width of the image in pixels.
    width: u32,
    /// Intrinsic height of the image in pixels.
    height: u32,
    /// Raw RGBA pixel data (width * height * 4 bytes).
    rgba_data: Vec<u8>,
}

impl LoadedImage {
    /// Create a new `LoadedImage` from decoded RGBA pixel data.
    ///
    /// Returns `None` when `rgba_data` is not exactly `width * height * 4`
    /// bytes long.
    #[must_use]
    pub fn new(width: u32, height: u32, rgba_data: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (rgba_data.len() == expected).then_some(Self {
            width,
            height,
            rgba_data,
        })
    }

    /// A `width` x `height` image filled with one RGBA color.
    #[must_use]
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        Self {
            width,
            height,
            rgba_data: rgba.repeat(pixels),
        }
    }

    /// Intrinsic width of the image in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Intrinsic height of the image in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Intrinsic dimensions as `(width, height)` in `f32`, for geometry.
    #[must_use]
    pub fn dimensions_f32(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }

    /// Raw RGBA pixel data.
    #[must_use]
    pub fn rgba_data(&self) -> &[u8] {
        &self.rgba_data
    }
}

impl std::fmt::Debug for LoadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba_data.len())
            .finish()
    }
}
