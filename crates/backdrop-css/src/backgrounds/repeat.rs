//! `background-repeat` keywords.
//!
//! [§ 3.4 'background-repeat'](https://www.w3.org/TR/css-backgrounds-3/#background-repeat)

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

use backdrop_common::warn_once;

/// How a background image tiles across the painting area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, EnumString, Display, AsRefStr)]
pub enum RepeatMode {
    /// "The image is repeated in this direction as often as needed to cover
    /// the background painting area."
    #[default]
    #[strum(serialize = "repeat")]
    Repeat,
    /// Repeat horizontally only.
    #[strum(serialize = "repeat-x")]
    RepeatX,
    /// Repeat vertically only.
    #[strum(serialize = "repeat-y")]
    RepeatY,
    /// "The image is placed once and not repeated in this direction."
    #[strum(serialize = "no-repeat")]
    NoRepeat,
}

impl RepeatMode {
    /// Parse a repeat keyword, falling back to `repeat` with a diagnostic.
    #[must_use]
    pub fn parse_or_default(input: &str) -> Self {
        input.trim().parse().unwrap_or_else(|_| {
            warn_once(
                "Repeat",
                &format!("unknown background-repeat '{input}', using repeat"),
            );
            Self::Repeat
        })
    }

    /// Whether tiles repeat along the horizontal axis.
    #[must_use]
    pub const fn repeats_x(self) -> bool {
        matches!(self, Self::Repeat | Self::RepeatX)
    }

    /// Whether tiles repeat along the vertical axis.
    #[must_use]
    pub const fn repeats_y(self) -> bool {
        matches!(self, Self::Repeat | Self::RepeatY)
    }
}
