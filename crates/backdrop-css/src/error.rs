//! Errors raised by the strict style parsers.
//!
//! The compositor never surfaces these: every setter goes through the lenient
//! layer, which resets the offending value to its default and reports the
//! error once through [`backdrop_common::warn_once`].

use thiserror::Error;

/// A style string that could not be turned into a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// A length, percentage or number that does not parse as a finite float.
    #[error("malformed number '{0}'")]
    InvalidNumber(String),

    /// A token sequence that does not match the property grammar.
    #[error("invalid {property} value '{value}'")]
    InvalidGrammar {
        /// Property being parsed.
        property: &'static str,
        /// The offending input.
        value: String,
    },

    /// Empty input where at least one token is required.
    #[error("empty {0} value")]
    Empty(&'static str),

    /// More tokens than the grammar allows.
    #[error("{property} takes at most {max} values, got {found}")]
    TooManyTokens {
        /// Property being parsed.
        property: &'static str,
        /// Largest accepted token count.
        max: usize,
        /// Token count found in the input.
        found: usize,
    },

    /// A background-position axis written twice.
    #[error("background-position assigns the {0} axis twice")]
    AxisAssignedTwice(&'static str),

    /// A keyword the property does not recognize.
    #[error("unknown {property} keyword '{keyword}'")]
    UnknownKeyword {
        /// Property being parsed.
        property: &'static str,
        /// The unrecognized keyword.
        keyword: String,
    },

    /// A color that is neither hex, `rgb()`/`rgba()` nor a named color.
    #[error("invalid color '{0}'")]
    InvalidColor(String),

    /// A gradient angle that is not `<number>deg|rad|grad|turn`.
    #[error("invalid gradient angle '{0}'")]
    InvalidAngle(String),

    /// A gradient with fewer than two color stops.
    #[error("a gradient needs at least 2 color stops, got {0}")]
    TooFewStops(usize),
}

/// Result alias for the strict parsers.
pub type StyleResult<T> = Result<T, StyleError>;
