//! The background compositor.
//!
//! [§ 3.11 Painting Area](https://www.w3.org/TR/css-backgrounds-3/#background-painting-area)
//!
//! One [`BackgroundCompositor`] belongs to one visual element. The host feeds
//! it style strings through the setters and calls [`BackgroundCompositor::draw`]
//! with the element's bounds once per paint. Each draw produces a
//! [`DisplayList`] in this order:
//!
//! 1. background color
//! 2. image layer
//! 3. gradient layer
//! 4. border
//!
//! Style strings are only re-parsed when they change, and geometry is only
//! rebuilt when the style or the bounds changed since the last draw.

use serde::Serialize;

use backdrop_common::warn_once;

use crate::backgrounds::{
    BackgroundImage, BackgroundSize, ImagePlacement, Position, PositionValue, RepeatMode,
    place_image,
};
use crate::borders::{
    BorderPaths, BorderSpec, BorderStyle, CornerRadiusSpec, Edge, fill_inner_only,
    rectangular_border, rounded_border,
};
use crate::config::{CompositorConfig, PxScale};
use crate::gradient::{LinearGradient, NormalizedGradient, ResolvedStop, TileMode};
use crate::paint::{CornerRadii, DisplayCommand, DisplayList, Path, Rect};
use crate::values::{ColorValue, LengthValue};

/// Opacity of a compositor that was never faded.
pub const OPAQUE: u8 = u8::MAX;

/// The raw strings last handed to the string setters. A setter whose string
/// equals the stored one is a no-op.
#[derive(Debug, Clone, Default)]
struct RawStyle {
    background_color: Option<String>,
    position: Option<String>,
    size: Option<String>,
    repeat: Option<String>,
    radius: Option<String>,
    gradient: Option<String>,
    style: Option<String>,
}

/// Replace `slot` with `value`, returning whether it differed.
fn replace_raw(slot: &mut Option<String>, value: &str) -> bool {
    if slot.as_deref() == Some(value) {
        return false;
    }
    *slot = Some(value.to_string());
    true
}

/// Geometry derived from the style for one set of bounds.
#[derive(Debug, Clone)]
struct Geometry {
    bounds: Rect,
    paths: Option<BorderPaths>,
    placement: Option<ImagePlacement>,
    gradient: Option<NormalizedGradient>,
}

/// Background, border and gradient state of one element.
#[derive(Debug, Clone)]
pub struct BackgroundCompositor {
    config: CompositorConfig,
    scale: PxScale,
    raw: RawStyle,

    background_color: ColorValue,
    image: Option<BackgroundImage>,
    size: Option<BackgroundSize>,
    position: Option<Position>,
    repeat: RepeatMode,
    gradient: Option<LinearGradient>,
    border: BorderSpec,
    radius: CornerRadiusSpec,
    alpha: u8,

    geometry: Option<Geometry>,
    relative_size: Option<(f32, f32)>,
    redraw_requested: bool,
}

impl Default for BackgroundCompositor {
    fn default() -> Self {
        Self::new(CompositorConfig::default())
    }
}

/// Snapshot of the resolved state, for dumps and debugging.
#[derive(Debug, Clone, Serialize)]
pub struct CompositorState<'a> {
    /// Background color.
    pub background_color: ColorValue,
    /// Image layer, if any.
    pub image: Option<&'a BackgroundImage>,
    /// `background-size`, `None` when unset.
    pub size: Option<BackgroundSize>,
    /// `background-position`, `None` when unset.
    pub position: Option<Position>,
    /// `background-repeat`.
    pub repeat: RepeatMode,
    /// Gradient layer, if any.
    pub gradient: Option<&'a LinearGradient>,
    /// Border widths, colors and style.
    pub border: BorderSpec,
    /// Corner radii as specified.
    pub radius: CornerRadiusSpec,
    /// Layer opacity.
    pub alpha: u8,
}

impl BackgroundCompositor {
    /// Create a compositor with nothing to draw.
    #[must_use]
    pub fn new(config: CompositorConfig) -> Self {
        let scale = config.scale();
        Self {
            config,
            scale,
            raw: RawStyle::default(),
            background_color: ColorValue::TRANSPARENT,
            image: None,
            size: None,
            position: None,
            repeat: RepeatMode::default(),
            gradient: None,
            border: BorderSpec::default(),
            radius: CornerRadiusSpec::default(),
            alpha: OPAQUE,
            geometry: None,
            relative_size: None,
            redraw_requested: false,
        }
    }

    /// The configuration this compositor was created with.
    #[must_use]
    pub const fn config(&self) -> &CompositorConfig {
        &self.config
    }

    /// The design-to-device px scale.
    #[must_use]
    pub const fn scale(&self) -> PxScale {
        self.scale
    }

    /// Return and clear the pending redraw request.
    ///
    /// Every setter that changes the style raises the request; the host polls
    /// it to know when to schedule another paint.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Drop cached geometry and ask for a redraw.
    fn invalidate(&mut self) {
        self.geometry = None;
        self.redraw_requested = true;
    }

    /// Ask for a redraw without touching the geometry.
    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    // -----------------------------------------------------------------------
    // Background color
    // -----------------------------------------------------------------------

    /// [§ 3.2 'background-color'](https://www.w3.org/TR/css-backgrounds-3/#background-color)
    ///
    /// An invalid color resets to transparent.
    pub fn set_background_color(&mut self, input: &str) {
        if !replace_raw(&mut self.raw.background_color, input) {
            return;
        }
        let color = ColorValue::parse(input).unwrap_or_else(|err| {
            warn_once(
                "Color",
                &format!("{err}; background-color reset to transparent"),
            );
            ColorValue::TRANSPARENT
        });
        self.apply_background_color(color);
    }

    /// Set the background color directly.
    pub fn set_background_color_value(&mut self, color: ColorValue) {
        self.raw.background_color = None;
        self.apply_background_color(color);
    }

    fn apply_background_color(&mut self, color: ColorValue) {
        if self.background_color != color {
            self.background_color = color;
            self.request_redraw();
        }
    }

    /// Current background color.
    #[must_use]
    pub const fn background_color(&self) -> ColorValue {
        self.background_color
    }

    // -----------------------------------------------------------------------
    // Image layer
    // -----------------------------------------------------------------------

    /// Set or clear the image layer.
    pub fn set_background_image(&mut self, image: Option<BackgroundImage>) {
        if self.image != image {
            self.image = image;
            self.invalidate();
        }
    }

    /// Current image layer.
    #[must_use]
    pub const fn background_image(&self) -> Option<&BackgroundImage> {
        self.image.as_ref()
    }

    /// [§ 3.9 'background-size'](https://www.w3.org/TR/css-backgrounds-3/#background-size)
    pub fn set_background_size(&mut self, input: &str) {
        if replace_raw(&mut self.raw.size, input) {
            self.size = Some(BackgroundSize::parse(input));
            self.invalidate();
        }
    }

    /// The size as set, `None` when never set.
    #[must_use]
    pub const fn background_size(&self) -> Option<BackgroundSize> {
        self.size
    }

    /// The size in effect: the configured default when none was set.
    #[must_use]
    pub fn effective_background_size(&self) -> BackgroundSize {
        self.size.unwrap_or(if self.config.legacy_default_size() {
            BackgroundSize::STRETCH
        } else {
            BackgroundSize::default()
        })
    }

    /// [§ 3.6 'background-position'](https://www.w3.org/TR/css-backgrounds-3/#background-position)
    ///
    /// A rejected value resets to `0px 0px`.
    pub fn set_background_position(&mut self, input: &str) {
        if replace_raw(&mut self.raw.position, input) {
            self.set_position_value(Position::parse_or_default(input));
        }
    }

    /// Set the position to a resolved offset in device pixels.
    pub fn set_background_position_px(&mut self, x: f32, y: f32) {
        self.raw.position = None;
        let to_design = |px: f32| if self.scale.0 > 0.0 { px / self.scale.0 } else { px };
        self.set_position_value(Position {
            x: PositionValue::Px(to_design(x)),
            y: PositionValue::Px(to_design(y)),
        });
    }

    fn set_position_value(&mut self, position: Position) {
        if self.position != Some(position) {
            self.position = Some(position);
            self.invalidate();
        }
    }

    /// The position as set, `None` when never set.
    #[must_use]
    pub const fn background_position(&self) -> Option<Position> {
        self.position
    }

    /// The position resolved in device pixels against the relative size of
    /// the last draw; `(0, 0)` before the first draw or without a position.
    #[must_use]
    pub fn background_position_px(&self) -> (i32, i32) {
        match (self.position, self.relative_size) {
            (Some(position), Some((w, h))) => position.calculate_px(w, h, self.scale),
            _ => (0, 0),
        }
    }

    /// Container size minus tile size, as used by the last draw.
    #[must_use]
    pub const fn background_relative_size(&self) -> Option<(f32, f32)> {
        self.relative_size
    }

    /// [§ 3.4 'background-repeat'](https://www.w3.org/TR/css-backgrounds-3/#background-repeat)
    pub fn set_background_repeat(&mut self, input: &str) {
        if !replace_raw(&mut self.raw.repeat, input) {
            return;
        }
        let repeat = RepeatMode::parse_or_default(input);
        if self.repeat != repeat {
            self.repeat = repeat;
            self.invalidate();
        }
    }

    /// Current repeat mode.
    #[must_use]
    pub const fn background_repeat(&self) -> RepeatMode {
        self.repeat
    }

    // -----------------------------------------------------------------------
    // Gradient layer
    // -----------------------------------------------------------------------

    /// Set the gradient layer from a `linear-gradient()` or
    /// `repeating-linear-gradient()` string. An empty string or `none`
    /// clears it; a rejected gradient is dropped.
    pub fn set_background_gradient(&mut self, input: &str) {
        if !replace_raw(&mut self.raw.gradient, input) {
            return;
        }
        let trimmed = input.trim();
        self.gradient = if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            None
        } else {
            LinearGradient::parse_lenient(trimmed)
        };
        self.invalidate();
    }

    /// Set the gradient layer directly.
    pub fn set_gradient(&mut self, gradient: Option<LinearGradient>) {
        self.raw.gradient = None;
        if self.gradient != gradient {
            self.gradient = gradient;
            self.invalidate();
        }
    }

    /// Current gradient layer.
    #[must_use]
    pub const fn gradient(&self) -> Option<&LinearGradient> {
        self.gradient.as_ref()
    }

    // -----------------------------------------------------------------------
    // Border
    // -----------------------------------------------------------------------

    /// [§ 4.3 'border-width'](https://www.w3.org/TR/css-backgrounds-3/#border-width)
    ///
    /// Accepts a px length. A percentage, negative or malformed width resets
    /// the edge to 0.
    pub fn set_border_width(&mut self, edge: Edge, input: &str) {
        let width = match LengthValue::parse(input) {
            Ok(LengthValue::Px(px)) if px >= 0.0 => Some(px),
            Ok(_) => {
                warn_once(
                    "Border",
                    &format!("border-{edge}-width '{input}' must be a non-negative length; reset to 0"),
                );
                None
            }
            Err(err) => {
                warn_once("Border", &format!("{err}; border-{edge}-width reset to 0"));
                None
            }
        };
        self.set_border_width_value(edge, width);
    }

    /// Set one edge width in design pixels; `None` clears it.
    pub fn set_border_width_value(&mut self, edge: Edge, width: Option<f32>) {
        if self.border.widths.set(edge, width) {
            self.invalidate();
        }
    }

    /// Set one edge width from a resolved device-pixel value.
    pub fn set_border_width_px(&mut self, edge: Edge, px: f32) {
        let design = if self.scale.0 > 0.0 { px / self.scale.0 } else { px };
        self.set_border_width_value(edge, Some(design.max(0.0)));
    }

    /// Width used to draw `edge`, in device pixels. `Edge::All` returns the
    /// full width, 0 when the edges differ.
    #[must_use]
    pub fn border_width(&self, edge: Edge) -> f32 {
        match edge {
            Edge::All => self.border.full_width(self.scale),
            side => self.border.draw_width(side, self.scale),
        }
    }

    /// [§ 4.1 'border-color'](https://www.w3.org/TR/css-backgrounds-3/#border-color)
    ///
    /// An invalid color resets the edge to the default black.
    pub fn set_border_color(&mut self, edge: Edge, input: &str) {
        let color = ColorValue::parse(input)
            .map_err(|err| {
                warn_once(
                    "Border",
                    &format!("{err}; border-{edge}-color reset to black"),
                );
            })
            .ok();
        self.set_border_color_value(edge, color);
    }

    /// Set one edge color; `None` clears it.
    pub fn set_border_color_value(&mut self, edge: Edge, color: Option<ColorValue>) {
        if self.border.colors.set(edge, color) {
            self.request_redraw();
        }
    }

    /// Color used to draw `edge`. `Edge::All` returns the full color.
    #[must_use]
    pub fn border_color(&self, edge: Edge) -> ColorValue {
        match edge {
            Edge::All => self.border.full_color(),
            side => self.border.draw_color(side),
        }
    }

    /// [§ 4.2 'border-style'](https://www.w3.org/TR/css-backgrounds-3/#border-style)
    ///
    /// Unknown styles reset to `solid`.
    pub fn set_border_style(&mut self, input: &str) {
        if !replace_raw(&mut self.raw.style, input) {
            return;
        }
        let style = input.trim().parse().unwrap_or_else(|_| {
            warn_once(
                "Border",
                &format!("unknown border-style '{input}', using solid"),
            );
            BorderStyle::Solid
        });
        if self.border.style != style {
            self.border.style = style;
            self.request_redraw();
        }
    }

    /// Current border style.
    #[must_use]
    pub const fn border_style(&self) -> BorderStyle {
        self.border.style
    }

    /// The full border specification.
    #[must_use]
    pub const fn border(&self) -> &BorderSpec {
        &self.border
    }

    /// [§ 5.1 'border-radius'](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
    ///
    /// A rejected value resets every corner to 0.
    pub fn set_border_radius(&mut self, input: &str) {
        if replace_raw(&mut self.raw.radius, input) {
            self.set_corner_radius(CornerRadiusSpec::parse_or_default(input));
        }
    }

    /// Replace the radius specification.
    pub fn set_corner_radius(&mut self, radius: CornerRadiusSpec) {
        if self.radius != radius {
            self.radius = radius;
            self.invalidate();
        }
    }

    /// The radius specification as set.
    #[must_use]
    pub const fn corner_radius(&self) -> &CornerRadiusSpec {
        &self.radius
    }

    /// Radii resolved for `bounds`, in device pixels.
    #[must_use]
    pub fn corner_radii(&self, bounds: &Rect) -> CornerRadii {
        self.radius.resolve_all(bounds.width, bounds.height, self.scale)
    }

    /// Whether the box is drawn with rounded corners.
    #[must_use]
    pub fn is_rounded(&self) -> bool {
        self.radius.is_rounded()
    }

    /// Outline of the last drawn rounded box, for elevation shadows.
    /// `None` before the first draw and for square boxes.
    #[must_use]
    pub fn outline_path(&self) -> Option<&Path> {
        self.geometry
            .as_ref()
            .and_then(|geometry| geometry.paths.as_ref())
            .map(|paths| &paths.outline)
    }

    // -----------------------------------------------------------------------
    // Opacity
    // -----------------------------------------------------------------------

    /// Set the opacity multiplied into every emitted color.
    pub fn set_alpha(&mut self, alpha: u8) {
        if self.alpha != alpha {
            self.alpha = alpha;
            self.request_redraw();
        }
    }

    /// Current opacity.
    #[must_use]
    pub const fn alpha(&self) -> u8 {
        self.alpha
    }

    /// A serializable view of the current style.
    #[must_use]
    pub fn state(&self) -> CompositorState<'_> {
        CompositorState {
            background_color: self.background_color,
            image: self.image.as_ref(),
            size: self.size,
            position: self.position,
            repeat: self.repeat,
            gradient: self.gradient.as_ref(),
            border: self.border,
            radius: self.radius,
            alpha: self.alpha,
        }
    }

    // -----------------------------------------------------------------------
    // Drawing
    // -----------------------------------------------------------------------

    /// The cached geometry, rebuilt if the style or the bounds changed.
    fn geometry(&mut self, bounds: Rect) -> Geometry {
        if let Some(geometry) = &self.geometry
            && geometry.bounds == bounds
        {
            return geometry.clone();
        }
        let geometry = self.build_geometry(bounds);
        self.relative_size = geometry
            .placement
            .as_ref()
            .and_then(|placement| placement.relative_size);
        self.geometry = Some(geometry.clone());
        geometry
    }

    fn build_geometry(&self, bounds: Rect) -> Geometry {
        let radii = self.corner_radii(&bounds);
        let paths = self
            .is_rounded()
            .then(|| BorderPaths::new(&bounds, self.border.full_width(self.scale), &radii));
        let size = self.effective_background_size();
        let placement = self.image.as_ref().map(|image| {
            place_image(
                &bounds,
                image,
                &size,
                self.position.as_ref(),
                self.repeat,
                self.scale,
            )
        });
        let gradient = self
            .gradient
            .as_ref()
            .map(|gradient| gradient.geometry(&bounds, self.scale));

        #[cfg(feature = "paint-trace")]
        {
            tracing::trace!(?bounds, ?radii, "resolved corner radii");
            if let Some(placement) = &placement {
                tracing::trace!(
                    transform = ?placement.transform,
                    area = ?placement.area,
                    relative_size = ?placement.relative_size,
                    "placed background image"
                );
            }
            if let Some(gradient) = &gradient {
                tracing::trace!(
                    start = ?gradient.start,
                    end = ?gradient.end,
                    stops = gradient.stops.len(),
                    "resolved gradient line"
                );
            }
        }

        Geometry {
            bounds,
            paths,
            placement,
            gradient,
        }
    }

    /// Paint the element into a new display list.
    ///
    /// Nothing is emitted for empty bounds. In rounded mode the background
    /// fills and clips to the inner path when the border is opaque, and to
    /// the outline otherwise.
    pub fn draw(&mut self, bounds: Rect) -> DisplayList {
        let mut list = DisplayList::new();
        if bounds.is_empty() {
            return list;
        }

        let alpha = self.alpha;
        let scale = self.scale;
        let background = self.background_color.multiply_alpha(alpha);
        let inner_only = fill_inner_only(&self.border, scale);
        let image_src = self.image.as_ref().map(|image| image.src.clone());
        let border = self.border;
        let tile_mode = self
            .gradient
            .as_ref()
            .map_or(TileMode::Clamp, |gradient| gradient.tile_mode);
        let geometry = self.geometry(bounds);

        let fill_path = geometry.paths.as_ref().map(|paths| {
            if inner_only {
                paths.inner.clone()
            } else {
                paths.outline.clone()
            }
        });

        if !background.is_transparent() {
            list.push(match &fill_path {
                Some(path) => DisplayCommand::FillPath {
                    path: path.clone(),
                    color: background,
                },
                None => DisplayCommand::FillRect {
                    rect: bounds,
                    color: background,
                },
            });
        }

        let has_layers = geometry.placement.is_some() || geometry.gradient.is_some();
        if has_layers && alpha > 0 {
            if let Some(path) = &fill_path {
                list.push(DisplayCommand::PushClip { path: path.clone() });
            }
            if let (Some(placement), Some(src)) = (geometry.placement, image_src) {
                list.push(DisplayCommand::DrawImage {
                    src,
                    area: placement.area,
                    transform: placement.transform,
                    repeat: placement.repeat,
                    opacity: alpha,
                });
            }
            if let Some(gradient) = &geometry.gradient {
                list.push(DisplayCommand::FillLinearGradient {
                    path: Path::rect(&bounds),
                    start: gradient.start,
                    end: gradient.end,
                    stops: gradient
                        .stops
                        .iter()
                        .map(|stop| ResolvedStop {
                            color: stop.color.multiply_alpha(alpha),
                            position: stop.position,
                        })
                        .collect(),
                    tile_mode,
                });
            }
            if fill_path.is_some() {
                list.push(DisplayCommand::PopClip);
            }
        }

        match &geometry.paths {
            Some(paths) => {
                if let Some(command) = rounded_border(paths, &border, scale, alpha) {
                    list.push(command);
                }
            }
            None => {
                for command in rectangular_border(&bounds, &border, scale, alpha) {
                    list.push(command);
                }
            }
        }

        list
    }
}
