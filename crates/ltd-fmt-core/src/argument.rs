//! Typed argument values.
//!
//! Every value handed to the engine is one of a closed set of tags. The
//! engine only borrows argument data for the duration of a single call.

use std::borrow::Cow;
use std::fmt;

/// A single argument for a format call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Argument<'a> {
    Integer(i128),
    Float(f64),
    Text(&'a str),
    Char(char),
    Boolean(bool),
    /// Bytes that are not known to be UTF-8; rendered lossily.
    Raw(&'a [u8]),
}

/// The tag of an [`Argument`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    Integer,
    Float,
    Text,
    Char,
    Boolean,
    Raw,
}

impl ArgKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::Char => "char",
            Self::Boolean => "boolean",
            Self::Raw => "raw",
        }
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'a> Argument<'a> {
    #[must_use]
    pub const fn kind(&self) -> ArgKind {
        match self {
            Self::Integer(_) => ArgKind::Integer,
            Self::Float(_) => ArgKind::Float,
            Self::Text(_) => ArgKind::Text,
            Self::Char(_) => ArgKind::Char,
            Self::Boolean(_) => ArgKind::Boolean,
            Self::Raw(_) => ArgKind::Raw,
        }
    }

    /// The value's natural text representation, as used by `%s`.
    ///
    /// Floats use the shortest representation that round-trips, booleans
    /// render as `true`/`false`.
    #[must_use]
    pub fn natural_text(&self) -> Cow<'a, str> {
        match *self {
            Self::Integer(v) => Cow::Owned(v.to_string()),
            Self::Float(v) => Cow::Owned(v.to_string()),
            Self::Text(s) => Cow::Borrowed(s),
            Self::Char(c) => Cow::Owned(c.to_string()),
            Self::Boolean(b) => Cow::Borrowed(if b { "true" } else { "false" }),
            Self::Raw(bytes) => String::from_utf8_lossy(bytes),
        }
    }
}

macro_rules! integer_argument {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Argument<'_> {
                fn from(value: $ty) -> Self {
                    Self::Integer(value as i128)
                }
            }
        )*
    };
}

integer_argument!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<f32> for Argument<'_> {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Argument<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<'a> From<&'a str> for Argument<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for Argument<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl From<char> for Argument<'_> {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<bool> for Argument<'_> {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<'a> From<&'a [u8]> for Argument<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::Raw(value)
    }
}
