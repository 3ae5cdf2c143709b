//! Background image layer
//!
//! [§ 3 Backgrounds](https://www.w3.org/TR/css-backgrounds-3/#backgrounds)
//!
//! - [`position`] - `background-position`
//! - [`size`] - `background-size`
//! - [`repeat`] - `background-repeat`
//!
//! [`place_image`] combines the three into the transform and paint area of
//! one image layer.

/// `background-position` parsing.
pub mod position;
/// `background-repeat` keywords.
pub mod repeat;
/// `background-size` parsing and resolution.
pub mod size;

use serde::Serialize;

pub use position::{Position, PositionValue};
pub use repeat::RepeatMode;
pub use size::{BackgroundSize, SizeValue};

use crate::config::PxScale;
use crate::paint::{AffineTransform, Rect};

/// A decoded background image, referenced by `src`. The pixels live with the
/// host or the render backend; the compositor only needs the intrinsic size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackgroundImage {
    /// Lookup key of the decoded pixels.
    pub src: String,
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
}

impl BackgroundImage {
    /// Create an image reference.
    #[must_use]
    pub fn new(src: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            src: src.into(),
            width,
            height,
        }
    }

    fn size(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }
}

/// Where and how one image layer is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImagePlacement {
    /// Maps image pixel space to device space for the first tile.
    pub transform: AffineTransform,
    /// Part of the bounds covered by tiles.
    pub area: Rect,
    /// Tiling applied over `area`.
    pub repeat: RepeatMode,
    /// Container size minus tile size, used to resolve the position.
    /// `None` when the image was stretched to the bounds.
    pub relative_size: Option<(f32, f32)>,
}

/// Compute the placement of `image` inside `bounds`.
///
/// [§ 3.6 'background-position'](https://www.w3.org/TR/css-backgrounds-3/#background-position)
///
/// "Percentages: refer to size of background positioning area minus size of
/// background image."
///
/// Positions are truncated to whole pixels. Without a position the first
/// tile sits at the top-left corner. When either size is not positive or the
/// size cannot be resolved the image is stretched over the whole bounds.
#[must_use]
pub fn place_image(
    bounds: &Rect,
    image: &BackgroundImage,
    size: &BackgroundSize,
    position: Option<&Position>,
    repeat: RepeatMode,
    scale: PxScale,
) -> ImagePlacement {
    let (image_w, image_h) = image.size();
    let container = (bounds.width, bounds.height);

    let resolved = if bounds.is_empty() || image_w <= 0.0 || image_h <= 0.0 {
        None
    } else {
        size.resolve(container, (image_w, image_h), scale)
    };

    let Some((tile_w, tile_h)) = resolved else {
        return stretched(bounds, image_w, image_h);
    };

    // Relative size uses the truncated tile size, like the position itself.
    let relative = (
        bounds.width - tile_w.trunc(),
        bounds.height - tile_h.trunc(),
    );
    let (px, py) = position.map_or((0, 0), |position| {
        position.calculate_px(relative.0, relative.1, scale)
    });
    let (px, py) = (px as f32, py as f32);

    let transform = AffineTransform::translate(bounds.x + px, bounds.y + py)
        .pre_scale(tile_w / image_w, tile_h / image_h);

    let area = match repeat {
        RepeatMode::Repeat => *bounds,
        RepeatMode::RepeatX => Rect::new(bounds.x, bounds.y + py, bounds.width, tile_h),
        RepeatMode::RepeatY => Rect::new(bounds.x + px, bounds.y, tile_w, bounds.height),
        RepeatMode::NoRepeat => Rect::new(bounds.x + px, bounds.y + py, tile_w, tile_h),
    };

    ImagePlacement {
        transform,
        area: area
            .intersect(bounds)
            .unwrap_or(Rect::new(bounds.x, bounds.y, 0.0, 0.0)),
        repeat,
        relative_size: Some(relative),
    }
}

fn stretched(bounds: &Rect, image_w: f32, image_h: f32) -> ImagePlacement {
    let sx = if image_w > 0.0 { bounds.width / image_w } else { 1.0 };
    let sy = if image_h > 0.0 { bounds.height / image_h } else { 1.0 };
    ImagePlacement {
        transform: AffineTransform::translate(bounds.x, bounds.y).pre_scale(sx, sy),
        area: *bounds,
        repeat: RepeatMode::NoRepeat,
        relative_size: None,
    }
}
