//! Compositor configuration.
//!
//! Hosts supply a [`CompositorConfig`] when creating a
//! [`BackgroundCompositor`](crate::BackgroundCompositor). It carries the
//! design-pixel scale applied to every px length and the platform level that
//! selects the legacy default `background-size`.

use serde::{Deserialize, Serialize};

/// Platform level from which an unset `background-size` means `auto auto`.
pub const AUTO_SIZE_PLATFORM_VERSION: u32 = 1080;

/// Default device viewport width in physical pixels.
pub const DEFAULT_DEVICE_WIDTH: f32 = 750.0;

/// Settings shared by every value a compositor resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorConfig {
    /// Width of the design canvas the style strings were authored against.
    /// `None` means px lengths are already device pixels.
    pub design_width: Option<f32>,
    /// Device viewport width in physical pixels.
    pub device_width: f32,
    /// Platform compatibility level of the hosted app.
    pub min_platform_version: u32,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            design_width: None,
            device_width: DEFAULT_DEVICE_WIDTH,
            min_platform_version: AUTO_SIZE_PLATFORM_VERSION,
        }
    }
}

impl CompositorConfig {
    /// The px scale derived from this configuration.
    #[must_use]
    pub fn scale(&self) -> PxScale {
        match self.design_width {
            Some(design) if design > 0.0 && self.device_width > 0.0 => {
                PxScale(self.device_width / design)
            }
            _ => PxScale::IDENTITY,
        }
    }

    /// Whether an unset `background-size` stretches the image to `100% 100%`.
    #[must_use]
    pub const fn legacy_default_size(&self) -> bool {
        self.min_platform_version < AUTO_SIZE_PLATFORM_VERSION
    }
}

/// Multiplier converting design pixels to device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PxScale(pub f32);

impl PxScale {
    /// No conversion.
    pub const IDENTITY: Self = Self(1.0);

    /// Convert a design-pixel length to device pixels.
    #[must_use]
    pub fn real_px(self, design_px: f32) -> f32 {
        design_px * self.0
    }
}

impl Default for PxScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}
