//! Root margin shorthand: `top [right [bottom [left]]]`.
//!
//! Follows the CSS `margin` shorthand expansion used by intersection
//! observers: one value applies to all sides, two are vertical/horizontal,
//! three are top/horizontal/bottom, four are top/right/bottom/left.

use std::fmt;
use std::str::FromStr;

use super::scalar::Scalar;
use super::tokenizer::{tokenize, Token};
use crate::geometry::{Region, Spacing};

/// Errors from root margin parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarginParseError {
    #[error("root margin is empty")]
    Empty,
    #[error("unexpected `{text}` at byte {offset}")]
    UnexpectedToken { offset: usize, text: String },
    #[error("length `{0}` needs a px or % unit")]
    MissingUnit(String),
    #[error("root margin takes at most 4 values, got {0}")]
    TooManyValues(usize),
}

/// A four-sided margin of CSS scalars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: Scalar,
    pub right: Scalar,
    pub bottom: Scalar,
    pub left: Scalar,
}

impl RootMargin {
    /// No margin on any side.
    pub const ZERO: RootMargin = RootMargin {
        top: Scalar::ZERO,
        right: Scalar::ZERO,
        bottom: Scalar::ZERO,
        left: Scalar::ZERO,
    };

    /// Resolve against the observer root. Vertical percentages use the
    /// root height, horizontal ones the root width.
    pub fn resolve(&self, root: Region) -> Spacing {
        Spacing::new(
            self.top.resolve(root.height),
            self.right.resolve(root.width),
            self.bottom.resolve(root.height),
            self.left.resolve(root.width),
        )
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

impl FromStr for RootMargin {
    type Err = MarginParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_root_margin(s)
    }
}

impl<'de> serde::Deserialize<'de> for RootMargin {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_root_margin(&text).map_err(serde::de::Error::custom)
    }
}

/// Parse a root margin shorthand such as `"0px 0px -50px 0px"`.
pub fn parse_root_margin(input: &str) -> Result<RootMargin, MarginParseError> {
    let mut values = Vec::with_capacity(4);
    let mut lexemes = tokenize(input).into_iter().peekable();
    while let Some(lexeme) = lexemes.next() {
        match lexeme.token {
            Some(Token::Dimension) => values.push(parse_dimension(&lexeme.text)?),
            Some(Token::Number) => {
                // `1em` lexes as a number glued to an identifier: an unknown unit.
                let end = lexeme.offset + lexeme.text.len();
                if let Some(unit) =
                    lexemes.next_if(|next| next.token == Some(Token::Ident) && next.offset == end)
                {
                    return Err(MarginParseError::UnexpectedToken {
                        offset: unit.offset,
                        text: unit.text,
                    });
                }
                let value: f32 = lexeme
                    .text
                    .parse()
                    .map_err(|_| MarginParseError::MissingUnit(lexeme.text.clone()))?;
                if value != 0.0 {
                    return Err(MarginParseError::MissingUnit(lexeme.text));
                }
                values.push(Scalar::ZERO);
            }
            // Commas are tolerated as separators.
            Some(Token::Comma) => {}
            Some(Token::Ident) | None => {
                return Err(MarginParseError::UnexpectedToken {
                    offset: lexeme.offset,
                    text: lexeme.text,
                });
            }
        }
    }

    match values.as_slice() {
        [] => Err(MarginParseError::Empty),
        [all] => Ok(RootMargin { top: *all, right: *all, bottom: *all, left: *all }),
        [v, h] => Ok(RootMargin { top: *v, right: *h, bottom: *v, left: *h }),
        [t, h, b] => Ok(RootMargin { top: *t, right: *h, bottom: *b, left: *h }),
        [t, r, b, l] => Ok(RootMargin { top: *t, right: *r, bottom: *b, left: *l }),
        more => Err(MarginParseError::TooManyValues(more.len())),
    }
}

fn parse_dimension(text: &str) -> Result<Scalar, MarginParseError> {
    let bad = || MarginParseError::MissingUnit(text.to_string());
    if let Some(number) = text.strip_suffix("px") {
        number.parse().map(Scalar::px).map_err(|_| bad())
    } else if let Some(number) = text.strip_suffix('%') {
        number.parse().map(Scalar::percent).map_err(|_| bad())
    } else {
        Err(bad())
    }
}
