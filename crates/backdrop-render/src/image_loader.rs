//! Decoded background images, keyed by `src`.
//!
//! The compositor only needs an image's intrinsic size. The pixels live here:
//! each image is decoded once with the `image` crate and premultiplied into a
//! tiny-skia pixmap, so drawing a tile is a plain pattern fill.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use backdrop_common::LoadedImage;
use backdrop_css::BackgroundImage;
use tiny_skia::{IntSize, Pixmap};

use crate::error::{RenderError, RenderResult};

/// Decode PNG, JPEG or any other format the `image` crate recognizes.
///
/// # Errors
///
/// Returns [`RenderError::Decode`] if the bytes are not a supported image.
pub fn decode_image(bytes: &[u8]) -> RenderResult<LoadedImage> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    LoadedImage::new(width, height, rgba.into_raw()).ok_or(RenderError::Buffer)
}

/// Read and decode an image file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn load_image(path: &Path) -> anyhow::Result<LoadedImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))?;
    decode_image(&bytes).with_context(|| format!("failed to decode '{}'", path.display()))
}

/// Convert straight-alpha RGBA into a premultiplied pixmap.
fn premultiply(image: &LoadedImage) -> RenderResult<Pixmap> {
    let size = IntSize::from_wh(image.width(), image.height()).ok_or(RenderError::InvalidSize {
        width: image.width(),
        height: image.height(),
    })?;
    let mut data = image.rgba_data().to_vec();
    for pixel in data.chunks_exact_mut(4) {
        let alpha = u16::from(pixel[3]);
        for channel in &mut pixel[..3] {
            *channel = ((u16::from(*channel) * alpha + 127) / 255) as u8;
        }
    }
    Pixmap::from_vec(data, size).ok_or(RenderError::Buffer)
}

struct StoredImage {
    image: LoadedImage,
    pixmap: Pixmap,
}

/// Images available to [`crate::Renderer`], looked up by the `src` string
/// carried in `DrawImage` commands.
#[derive(Default)]
pub struct ImageStore {
    images: HashMap<String, StoredImage>,
}

impl ImageStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a decoded image under `src`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidSize`] for an empty image.
    pub fn insert(&mut self, src: impl Into<String>, image: LoadedImage) -> RenderResult<()> {
        let pixmap = premultiply(&image)?;
        let _ = self
            .images
            .insert(src.into(), StoredImage { image, pixmap });
        Ok(())
    }

    /// Load the file at `path` and register it under `src`.
    ///
    /// Returns the compositor-side description of the image.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, decoded or stored.
    pub fn load(&mut self, src: &str, path: &Path) -> anyhow::Result<BackgroundImage> {
        let image = load_image(path)?;
        let background = BackgroundImage::new(src, image.width(), image.height());
        self.insert(src, image)?;
        tracing::debug!(src, width = background.width, height = background.height, "image loaded");
        Ok(background)
    }

    /// The decoded image registered under `src`.
    #[must_use]
    pub fn get(&self, src: &str) -> Option<&LoadedImage> {
        self.images.get(src).map(|stored| &stored.image)
    }

    /// The compositor-side description of the image under `src`.
    #[must_use]
    pub fn background_image(&self, src: &str) -> Option<BackgroundImage> {
        self.get(src)
            .map(|image| BackgroundImage::new(src, image.width(), image.height()))
    }

    /// Premultiplied pixels of the image under `src`.
    pub(crate) fn pixmap(&self, src: &str) -> Option<&Pixmap> {
        self.images.get(src).map(|stored| &stored.pixmap)
    }

    /// Number of registered images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether no image is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl std::fmt::Debug for ImageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.images.iter().map(|(src, stored)| (src, &stored.image)))
            .finish()
    }
}
