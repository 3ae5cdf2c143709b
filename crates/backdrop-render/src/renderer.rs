//! Software renderer for display lists.
//!
//! Executes a [`DisplayList`] into a tiny-skia pixmap.
//!
//! # Architecture
//!
//! The renderer is the last stage of the pipeline:
//!
//! ```text
//! style strings → BackgroundCompositor → DisplayList → Renderer → pixels
//! ```
//!
//! The renderer knows nothing about CSS. It executes drawing commands, keeps
//! a stack of clip masks and looks images up by `src` in an [`ImageStore`].

use std::path::Path as FsPath;

use backdrop_css::paint::{AffineTransform, DashPattern, Path, PathCommand};
use backdrop_css::{ColorValue, DisplayCommand, DisplayList, Point, Rect, RepeatMode, TileMode};
use backdrop_css::gradient::ResolvedStop;
use image::{ImageFormat, RgbaImage};
use tiny_skia::{
    FillRule, FilterQuality, GradientStop, Mask, Paint, Pixmap, Shader, SpreadMode, Stroke,
    StrokeDash, Transform,
};

use backdrop_common::warn_once;

use crate::error::{RenderError, RenderResult};
use crate::image_loader::ImageStore;

/// Software renderer that executes a display list to a pixmap.
pub struct Renderer {
    /// Premultiplied RGBA pixels.
    pixmap: Pixmap,
    /// Active clips, innermost last. Each mask is already intersected with
    /// the ones below it.
    clip_stack: Vec<Mask>,
}

impl Renderer {
    /// Create a renderer with a fully transparent `width` x `height` canvas.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidSize`] when either dimension is zero or
    /// too large to allocate.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::InvalidSize { width, height })?;
        Ok(Self {
            pixmap,
            clip_stack: Vec::new(),
        })
    }

    /// Canvas width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Canvas height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fill the whole canvas with `color`, dropping any active clip.
    pub fn clear(&mut self, color: ColorValue) {
        self.clip_stack.clear();
        self.pixmap.fill(skia_color(color));
    }

    /// Execute a display list, drawing all commands in order (back to front).
    ///
    /// Images missing from `images` are skipped with a diagnostic. Clips left
    /// open by an unbalanced list are dropped at the end.
    pub fn render(&mut self, display_list: &DisplayList, images: &ImageStore) {
        for command in display_list.commands() {
            self.execute_command(command, images);
        }
        if !self.clip_stack.is_empty() {
            warn_once("Render", "display list left clips open");
            self.clip_stack.clear();
        }
    }

    /// Execute a single display command.
    fn execute_command(&mut self, command: &DisplayCommand, images: &ImageStore) {
        match command {
            DisplayCommand::FillRect { rect, color } => self.fill_rect(rect, *color),
            DisplayCommand::FillPath { path, color } => self.fill_path(path, *color),
            DisplayCommand::StrokePath {
                path,
                color,
                width,
                dash,
            } => self.stroke_path(path, *color, *width, *dash),
            DisplayCommand::FillLinearGradient {
                path,
                start,
                end,
                stops,
                tile_mode,
            } => self.fill_linear_gradient(path, *start, *end, stops, *tile_mode),
            DisplayCommand::DrawImage {
                src,
                area,
                transform,
                repeat,
                opacity,
            } => self.draw_image(images, src, area, transform, *repeat, *opacity),
            DisplayCommand::PushClip { path } => self.push_clip(path),
            DisplayCommand::PopClip => {
                if self.clip_stack.pop().is_none() {
                    warn_once("Render", "pop_clip without a matching push_clip");
                }
            }
        }
    }

    fn mask(&self) -> Option<&Mask> {
        self.clip_stack.last()
    }

    fn fill_rect(&mut self, rect: &Rect, color: ColorValue) {
        if color.is_transparent() {
            return;
        }
        let Some(rect) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height) else {
            return;
        };
        let paint = solid_paint(color);
        let mask = self.clip_stack.last();
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), mask);
    }

    fn fill_path(&mut self, path: &Path, color: ColorValue) {
        if color.is_transparent() {
            return;
        }
        let Some(path) = skia_path(path) else {
            return;
        };
        let paint = solid_paint(color);
        let mask = self.clip_stack.last();
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), mask);
    }

    fn stroke_path(&mut self, path: &Path, color: ColorValue, width: f32, dash: Option<DashPattern>) {
        if color.is_transparent() || width <= 0.0 {
            return;
        }
        let Some(path) = skia_path(path) else {
            return;
        };
        let stroke = Stroke {
            width,
            dash: dash.and_then(|dash| StrokeDash::new(vec![dash.on, dash.off], 0.0)),
            ..Stroke::default()
        };
        let paint = solid_paint(color);
        let mask = self.clip_stack.last();
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), mask);
    }

    fn fill_linear_gradient(
        &mut self,
        path: &Path,
        start: Point,
        end: Point,
        stops: &[ResolvedStop],
        tile_mode: TileMode,
    ) {
        let Some(path) = skia_path(path) else {
            return;
        };
        let spread = match tile_mode {
            TileMode::Clamp => SpreadMode::Pad,
            TileMode::Repeat => SpreadMode::Repeat,
        };
        let stops: Vec<GradientStop> = stops
            .iter()
            .map(|stop| GradientStop::new(stop.position, skia_color(stop.color)))
            .collect();
        // A zero-length line or a single stop paints the last color.
        let shader = tiny_skia::LinearGradient::new(
            tiny_skia::Point::from_xy(start.x, start.y),
            tiny_skia::Point::from_xy(end.x, end.y),
            stops,
            spread,
            Transform::identity(),
        );
        let Some(shader) = shader else {
            warn_once("Render", "gradient without stops skipped");
            return;
        };
        let paint = Paint {
            shader,
            anti_alias: true,
            ..Paint::default()
        };
        let mask = self.clip_stack.last();
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), mask);
    }

    fn draw_image(
        &mut self,
        images: &ImageStore,
        src: &str,
        area: &Rect,
        transform: &AffineTransform,
        repeat: RepeatMode,
        opacity: u8,
    ) {
        if opacity == 0 {
            return;
        }
        let Some(tile) = images.pixmap(src) else {
            warn_once("Render", &format!("image '{src}' not loaded; layer skipped"));
            return;
        };
        let Some(rect) = tiny_skia::Rect::from_xywh(area.x, area.y, area.width, area.height) else {
            return;
        };
        let spread = if repeat.repeats_x() || repeat.repeats_y() {
            SpreadMode::Repeat
        } else {
            SpreadMode::Pad
        };
        let shader = tiny_skia::Pattern::new(
            tile.as_ref(),
            spread,
            FilterQuality::Bilinear,
            f32::from(opacity) / 255.0,
            skia_transform(transform),
        );
        let paint = Paint {
            shader,
            anti_alias: true,
            ..Paint::default()
        };
        let mask = self.clip_stack.last();
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), mask);
    }

    /// Intersect the current clip with `path`.
    fn push_clip(&mut self, path: &Path) {
        let (w, h) = (self.pixmap.width(), self.pixmap.height());
        let Some(mut mask) = Mask::new(w, h) else {
            return;
        };
        if let Some(path) = skia_path(path) {
            mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
        }
        if let Some(current) = self.mask() {
            intersect_masks(&mut mask, current);
        }
        self.clip_stack.push(mask);
    }

    /// The pixel at `(x, y)`, un-premultiplied. `None` outside the canvas.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<ColorValue> {
        let pixel = self.pixmap.pixel(x, y)?.demultiply();
        Some(ColorValue::rgba(
            pixel.red(),
            pixel.green(),
            pixel.blue(),
            pixel.alpha(),
        ))
    }

    /// Copy the canvas into a straight-alpha RGBA image.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Buffer`] if the pixel buffer does not match the
    /// canvas size.
    pub fn to_rgba_image(&self) -> RenderResult<RgbaImage> {
        let data: Vec<u8> = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let c = pixel.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        RgbaImage::from_raw(self.width(), self.height(), data).ok_or(RenderError::Buffer)
    }

    /// Encode the canvas as PNG at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be encoded or written.
    pub fn save_png(&self, path: &FsPath) -> RenderResult<()> {
        self.to_rgba_image()?
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| RenderError::Encode {
                path: path.display().to_string(),
                source,
            })
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("clip_depth", &self.clip_stack.len())
            .finish()
    }
}

/// Intersect two masks by taking the minimum coverage of each pixel.
fn intersect_masks(dst: &mut Mask, src: &Mask) {
    for (d, s) in dst.data_mut().iter_mut().zip(src.data()) {
        *d = (*d).min(*s);
    }
}

fn skia_color(color: ColorValue) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn solid_paint(color: ColorValue) -> Paint<'static> {
    Paint {
        shader: Shader::SolidColor(skia_color(color)),
        anti_alias: true,
        ..Paint::default()
    }
}

fn skia_transform(t: &AffineTransform) -> Transform {
    Transform::from_row(t.sx, t.ky, t.kx, t.sy, t.tx, t.ty)
}

/// Convert a display-list path. `None` for paths tiny-skia rejects (empty
/// or a single point).
fn skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut builder = tiny_skia::PathBuilder::new();
    for command in path.commands() {
        match *command {
            PathCommand::MoveTo(p) => builder.move_to(p.x, p.y),
            PathCommand::LineTo(p) => builder.line_to(p.x, p.y),
            PathCommand::CubicTo(c1, c2, p) => builder.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
            PathCommand::Close => builder.close(),
        }
    }
    builder.finish()
}
