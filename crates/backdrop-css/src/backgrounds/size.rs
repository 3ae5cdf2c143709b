//! `background-size` parsing and resolution.
//!
//! [§ 3.9 'background-size'](https://www.w3.org/TR/css-backgrounds-3/#background-size)
//!
//! "Specifies the size of the background images."
//!
//! ```text
//! <bg-size> = [ <length-percentage [0,∞]> | auto ]{1,2} | cover | contain
//! ```

use serde::Serialize;

use backdrop_common::warn_once;

use crate::config::PxScale;
use crate::values::LengthValue;

/// One axis of an explicit `background-size`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub enum SizeValue {
    /// Derived from the image's intrinsic size or aspect ratio.
    #[default]
    Auto,
    /// Fixed size in design pixels.
    Px(f32),
    /// Fraction of the container (`50%` is stored as `0.5`).
    Percent(f32),
}

impl SizeValue {
    /// Parse one axis. Malformed numbers fall back to `auto` with a
    /// diagnostic; they never invalidate the other axis.
    fn parse_axis(token: &str) -> Self {
        if token == "auto" {
            return Self::Auto;
        }
        match LengthValue::parse(token) {
            Ok(LengthValue::Percent(pct)) => Self::Percent(pct / 100.0),
            Ok(LengthValue::Px(px)) => Self::Px(px),
            Err(err) => {
                warn_once(
                    "Size",
                    &format!("{err}; background-size axis '{token}' reset to auto"),
                );
                Self::Auto
            }
        }
    }

    /// Resolve against the container extent. `None` means `auto` (or a
    /// non-positive length, which behaves like `auto`).
    fn resolve(self, container: f32, scale: PxScale) -> Option<f32> {
        let value = match self {
            Self::Auto => return None,
            Self::Px(px) => scale.real_px(px),
            Self::Percent(fraction) => fraction * container,
        };
        (value > 0.0).then_some(value)
    }
}

/// A parsed `background-size`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum BackgroundSize {
    /// "Scale the image, while preserving its intrinsic aspect ratio, to the
    /// largest size such that both its width and its height can fit inside
    /// the background positioning area."
    Contain,
    /// "Scale the image, while preserving its intrinsic aspect ratio, to the
    /// smallest size such that both its width and its height can completely
    /// cover the background positioning area."
    Cover,
    /// Explicit width and height.
    Explicit {
        /// Width axis.
        width: SizeValue,
        /// Height axis; `auto` when only one token was given.
        height: SizeValue,
    },
}

impl Default for BackgroundSize {
    /// `auto auto`.
    fn default() -> Self {
        Self::Explicit {
            width: SizeValue::Auto,
            height: SizeValue::Auto,
        }
    }
}

impl BackgroundSize {
    /// `100% 100%`, the stretch used by legacy platforms when no size is set.
    pub const STRETCH: Self = Self::Explicit {
        width: SizeValue::Percent(1.0),
        height: SizeValue::Percent(1.0),
    };

    /// Parse `contain`, `cover` or `<w> [<h>]`.
    ///
    /// Never fails: malformed axes become `auto` individually.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input {
            "contain" => return Self::Contain,
            "cover" => return Self::Cover,
            _ => {}
        }
        let mut tokens = input.split_whitespace();
        let width = tokens.next().map_or(SizeValue::Auto, SizeValue::parse_axis);
        let height = tokens.next().map_or(SizeValue::Auto, SizeValue::parse_axis);
        if tokens.next().is_some() {
            warn_once(
                "Size",
                &format!("background-size '{input}' has extra values; only the first two are used"),
            );
        }
        Self::Explicit { width, height }
    }

    /// Compute the drawn image size for a container and an intrinsic image
    /// size.
    ///
    /// Returns `None` when the result is not a positive area, in which case
    /// the caller stretches the image to the container.
    #[must_use]
    pub fn resolve(
        &self,
        container: (f32, f32),
        image: (f32, f32),
        scale: PxScale,
    ) -> Option<(f32, f32)> {
        let (container_w, container_h) = container;
        let (image_w, image_h) = image;
        if image_w <= 0.0 || image_h <= 0.0 {
            return None;
        }

        let (width, height) = match *self {
            Self::Contain => {
                let factor = (container_w / image_w).min(container_h / image_h);
                (image_w * factor, image_h * factor)
            }
            Self::Cover => {
                let factor = (container_w / image_w).max(container_h / image_h);
                (image_w * factor, image_h * factor)
            }
            Self::Explicit { width, height } => {
                match (width.resolve(container_w, scale), height.resolve(container_h, scale)) {
                    (None, None) => (image_w, image_h),
                    (None, Some(h)) => (h / image_h * image_w, h),
                    (Some(w), None) => (w, w / image_w * image_h),
                    (Some(w), Some(h)) => (w, h),
                }
            }
        };

        (width > 0.0 && height > 0.0).then_some((width, height))
    }
}
