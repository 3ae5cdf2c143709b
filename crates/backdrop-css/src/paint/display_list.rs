//! Display List - a sequence of drawing commands
//!
//! [§ 3.1 Layering Multiple Background Images](https://www.w3.org/TR/css-backgrounds-3/#layering)
//!
//! The display list is the output of one compositor draw call. Commands are
//! stored back to front: background color, image layer, gradient layer, then
//! the border.

use serde::Serialize;

use super::path::{AffineTransform, Path, Point, Rect};
use crate::backgrounds::RepeatMode;
use crate::gradient::{ResolvedStop, TileMode};
use crate::values::ColorValue;

/// On/off lengths of a dashed or dotted stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashPattern {
    /// Length of each painted segment.
    pub on: f32,
    /// Length of each gap.
    pub off: f32,
}

/// A single drawing command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DisplayCommand {
    /// Fill an axis-aligned rectangle with a solid color.
    FillRect {
        /// Area to fill.
        rect: Rect,
        /// Fill color.
        color: ColorValue,
    },

    /// Fill an arbitrary closed path with a solid color (non-zero winding).
    FillPath {
        /// Shape to fill.
        path: Path,
        /// Fill color.
        color: ColorValue,
    },

    /// Stroke a path centered on its outline.
    ///
    /// [§ 4.2 'border-style'](https://www.w3.org/TR/css-backgrounds-3/#border-style)
    StrokePath {
        /// Outline to stroke.
        path: Path,
        /// Stroke color.
        color: ColorValue,
        /// Stroke width in pixels.
        width: f32,
        /// Dash pattern for `dashed`/`dotted`; `None` is a solid stroke.
        dash: Option<DashPattern>,
    },

    /// Fill a path with a linear gradient.
    ///
    /// [§ 3.1 Linear Gradients](https://www.w3.org/TR/css-images-3/#linear-gradients)
    FillLinearGradient {
        /// Shape to fill.
        path: Path,
        /// Point where the gradient line has position 0.
        start: Point,
        /// Point where the gradient line has position 1.
        end: Point,
        /// Stops with positions in `[0, 1]`, non-decreasing.
        stops: Vec<ResolvedStop>,
        /// How color extends beyond `[0, 1]`.
        tile_mode: TileMode,
    },

    /// Tile a background image over an area.
    ///
    /// The `src` string is used as a key to look up the decoded pixels in
    /// the renderer's image store.
    DrawImage {
        /// Lookup key of the decoded image.
        src: String,
        /// Region painted with the image; tiles outside it are discarded.
        area: Rect,
        /// Maps image pixel space onto the first tile.
        transform: AffineTransform,
        /// Whether the tile repeats beyond the first copy.
        repeat: RepeatMode,
        /// Layer opacity, 255 for fully opaque.
        opacity: u8,
    },

    /// Intersect the clip with a path until the matching [`Self::PopClip`].
    PushClip {
        /// Clip shape.
        path: Path,
    },

    /// Restore the clip in effect before the most recent [`Self::PushClip`].
    PopClip,
}

/// A list of drawing commands in painting order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct DisplayList {
    commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a command to the display list.
    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    /// Get the commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Get the number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the display list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl IntoIterator for DisplayList {
    type Item = DisplayCommand;
    type IntoIter = std::vec::IntoIter<DisplayCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}
