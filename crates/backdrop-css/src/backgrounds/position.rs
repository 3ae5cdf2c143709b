//! `background-position` parsing and resolution.
//!
//! [§ 3.6 'background-position'](https://www.w3.org/TR/css-backgrounds-3/#background-position)
//!
//! The grammar accepted here is the one-to-four value form:
//!
//! ```text
//! <bg-position> = [ left | center | right | top | bottom | <length-percentage> ]
//!   | [ left | center | right | <length-percentage> ]
//!     [ top | center | bottom | <length-percentage> ]
//!   | [ center | [ left | right ] <length-percentage>? ] &&
//!     [ center | [ top | bottom ] <length-percentage>? ]
//! ```
//!
//! A token is a length only when it ends in `px` or `%`. Any grammar
//! violation, malformed number or second write to an already assigned axis
//! rejects the whole value; the lenient entry point then falls back to
//! `0px 0px`.

use serde::Serialize;
use strum_macros::{Display, EnumString};

use backdrop_common::warn_once;

use crate::config::PxScale;
use crate::error::{StyleError, StyleResult};
use crate::values::parse_number;

/// One resolved axis of a background position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PositionValue {
    /// Offset from the left/top edge in design pixels.
    Px(f32),
    /// Percentage of the relative size (container minus image), as written.
    Percent(f32),
    /// `right <px>` / `bottom <px>`: a percentage plus a px offset, so the
    /// value stays anchored to the far edge when the container resizes.
    PercentOffset {
        /// Percentage of the relative size.
        percent: f32,
        /// Additional offset in design pixels (negative for `right`/`bottom`).
        offset: f32,
    },
}

impl PositionValue {
    /// Resolve to whole device pixels, truncating toward zero.
    #[must_use]
    pub fn to_px(self, relative: f32, scale: PxScale) -> i32 {
        match self {
            Self::Px(px) => scale.real_px(px) as i32,
            Self::Percent(pct) => (pct / 100.0 * relative) as i32,
            Self::PercentOffset { percent, offset } => {
                (percent / 100.0 * relative) as i32 + scale.real_px(offset) as i32
            }
        }
    }
}

/// A parsed `background-position`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    /// Horizontal axis.
    pub x: PositionValue,
    /// Vertical axis.
    pub y: PositionValue,
}

impl Default for Position {
    /// `0px 0px`, the value every rejected input falls back to.
    fn default() -> Self {
        Self {
            x: PositionValue::Px(0.0),
            y: PositionValue::Px(0.0),
        }
    }
}

/// Positional keywords of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
enum Keyword {
    Left,
    Right,
    Top,
    Bottom,
    Center,
}

impl Keyword {
    const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    const fn is_edge(self) -> bool {
        !matches!(self, Self::Center)
    }
}

/// A single token: a length if it ends in `px`/`%`, otherwise a keyword.
#[derive(Debug, Clone, Copy)]
enum Token<'a> {
    Length(&'a str),
    Keyword(Keyword),
}

fn classify(token: &str) -> StyleResult<Token<'_>> {
    if token.ends_with("px") || token.ends_with('%') {
        return Ok(Token::Length(token));
    }
    token
        .parse::<Keyword>()
        .map(Token::Keyword)
        .map_err(|_| StyleError::UnknownKeyword {
            property: "background-position",
            keyword: token.to_string(),
        })
}

/// Axis assignments made while walking the tokens.
#[derive(Debug, Default)]
struct Builder {
    x: Option<PositionValue>,
    y: Option<PositionValue>,
}

impl Builder {
    /// A bare edge keyword: `left`/`top` are `0px`, `right`/`bottom` are `100%`.
    fn edge(&mut self, keyword: Keyword) -> StyleResult<()> {
        match keyword {
            Keyword::Left => self.edge_offset(Keyword::Left, "0px"),
            Keyword::Right => self.edge_offset(Keyword::Left, "100%"),
            Keyword::Top => self.edge_offset(Keyword::Top, "0px"),
            Keyword::Bottom => self.edge_offset(Keyword::Top, "100%"),
            Keyword::Center => Err(grammar(keyword.to_string())),
        }
    }

    /// `<edge> <length>`: the offset is measured from that edge.
    fn edge_offset(&mut self, keyword: Keyword, length: &str) -> StyleResult<()> {
        let (slot, axis) = match keyword {
            Keyword::Left | Keyword::Right => (&mut self.x, "horizontal"),
            Keyword::Top | Keyword::Bottom => (&mut self.y, "vertical"),
            Keyword::Center => return Err(grammar(format!("center {length}"))),
        };
        if slot.is_some() {
            return Err(StyleError::AxisAssignedTwice(axis));
        }

        let far_edge = matches!(keyword, Keyword::Right | Keyword::Bottom);
        let value = if let Some(px) = length.strip_suffix("px") {
            let px = parse_number(px)?;
            if far_edge {
                PositionValue::PercentOffset {
                    percent: 100.0,
                    offset: -px,
                }
            } else {
                PositionValue::Px(px)
            }
        } else if let Some(pct) = length.strip_suffix('%') {
            let pct = parse_number(pct)?;
            PositionValue::Percent(if far_edge { 100.0 - pct } else { pct })
        } else {
            return Err(grammar(length.to_string()));
        };

        *slot = Some(value);
        Ok(())
    }

    fn center_x(&mut self) -> StyleResult<()> {
        self.edge_offset(Keyword::Left, "50%")
    }

    fn center_y(&mut self) -> StyleResult<()> {
        self.edge_offset(Keyword::Top, "50%")
    }

    /// Fill the axis a keyword does not name with `50%`.
    fn center_other(&mut self, keyword: Keyword) -> StyleResult<()> {
        if keyword.is_horizontal() {
            self.center_y()
        } else {
            self.center_x()
        }
    }

    fn finish(self) -> StyleResult<Position> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Ok(Position { x, y }),
            (None, _) => Err(StyleError::InvalidGrammar {
                property: "background-position",
                value: "horizontal axis left unassigned".to_string(),
            }),
            (_, None) => Err(StyleError::InvalidGrammar {
                property: "background-position",
                value: "vertical axis left unassigned".to_string(),
            }),
        }
    }
}

fn grammar(value: String) -> StyleError {
    StyleError::InvalidGrammar {
        property: "background-position",
        value,
    }
}

impl Position {
    /// Parse a one-to-four token `background-position` string.
    ///
    /// # Errors
    ///
    /// Returns a [`StyleError`] for an empty value, more than four tokens,
    /// unknown keywords, malformed lengths, invalid token combinations, or a
    /// value that assigns the same axis twice.
    pub fn parse(input: &str) -> StyleResult<Self> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        let mut builder = Builder::default();

        match tokens.as_slice() {
            [] => return Err(StyleError::Empty("background-position")),
            [one] => parse_one(&mut builder, classify(one)?)?,
            [first, second] => parse_two(&mut builder, classify(first)?, classify(second)?)?,
            [first, second, third] => parse_three(&mut builder, first, second, third)?,
            [first, second, third, fourth] => {
                let pair = |edge: &str| match classify(edge)? {
                    Token::Keyword(k) if k.is_edge() => Ok(k),
                    _ => Err(grammar(input.to_string())),
                };
                builder.edge_offset(pair(first)?, second)?;
                builder.edge_offset(pair(third)?, fourth)?;
            }
            _ => {
                return Err(StyleError::TooManyTokens {
                    property: "background-position",
                    max: 4,
                    found: tokens.len(),
                });
            }
        }

        builder.finish()
    }

    /// Parse `input`, falling back to `0px 0px` with a diagnostic when it is
    /// rejected.
    #[must_use]
    pub fn parse_or_default(input: &str) -> Self {
        Self::parse(input).unwrap_or_else(|err| {
            warn_once(
                "Position",
                &format!("{err}; background-position '{input}' reset to 0px 0px"),
            );
            Self::default()
        })
    }

    /// Resolve against the relative size (container size minus image size).
    ///
    /// Percentages are taken of the relative size so `100%` aligns the far
    /// edges; every axis is truncated to whole pixels.
    #[must_use]
    pub fn calculate_px(&self, relative_width: f32, relative_height: f32, scale: PxScale) -> (i32, i32) {
        (
            self.x.to_px(relative_width, scale),
            self.y.to_px(relative_height, scale),
        )
    }
}

fn parse_one(builder: &mut Builder, token: Token<'_>) -> StyleResult<()> {
    match token {
        Token::Length(length) => {
            builder.edge_offset(Keyword::Left, length)?;
            builder.center_y()
        }
        Token::Keyword(Keyword::Center) => {
            builder.center_x()?;
            builder.center_y()
        }
        Token::Keyword(edge) => {
            builder.edge(edge)?;
            builder.center_other(edge)
        }
    }
}

fn parse_two(builder: &mut Builder, first: Token<'_>, second: Token<'_>) -> StyleResult<()> {
    match first {
        // A leading length is always horizontal.
        Token::Length(length) => builder.edge_offset(Keyword::Left, length)?,
        Token::Keyword(Keyword::Center) => {}
        Token::Keyword(edge) => builder.edge(edge)?,
    }
    let first_is_center = matches!(first, Token::Keyword(Keyword::Center));

    match second {
        Token::Length(length) => {
            builder.edge_offset(Keyword::Top, length)?;
            if first_is_center {
                builder.center_x()?;
            }
            Ok(())
        }
        Token::Keyword(Keyword::Center) => match first {
            Token::Keyword(Keyword::Center) => {
                builder.center_x()?;
                builder.center_y()
            }
            Token::Keyword(k) if k.is_vertical() => builder.center_x(),
            _ => builder.center_y(),
        },
        Token::Keyword(edge) => {
            if first_is_center {
                builder.center_other(edge)?;
            }
            builder.edge(edge)
        }
    }
}

fn parse_three(builder: &mut Builder, first: &str, second: &str, third: &str) -> StyleResult<()> {
    let Token::Keyword(first_keyword) = classify(first)? else {
        return Err(grammar(format!("{first} {second} {third}")));
    };

    if first_keyword == Keyword::Center {
        // `center <edge> <length>`
        return match classify(second)? {
            Token::Keyword(edge) if edge.is_edge() => {
                builder.center_other(edge)?;
                builder.edge_offset(edge, third)
            }
            _ => Err(grammar(format!("{first} {second} {third}"))),
        };
    }

    match classify(second)? {
        // `<edge> <length> <keyword>`
        Token::Length(length) => {
            match classify(third)? {
                Token::Keyword(Keyword::Center) => builder.center_other(first_keyword)?,
                Token::Keyword(edge) => builder.edge(edge)?,
                Token::Length(_) => return Err(grammar(format!("{first} {second} {third}"))),
            }
            builder.edge_offset(first_keyword, length)
        }
        // `<edge> <edge> <length>`
        Token::Keyword(edge) if edge.is_edge() => {
            builder.edge(first_keyword)?;
            builder.edge_offset(edge, third)
        }
        Token::Keyword(_) => Err(grammar(format!("{first} {second} {third}"))),
    }
}
