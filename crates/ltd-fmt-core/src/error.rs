//! Error taxonomy for format calls.
//!
//! Every error is fatal to the call that raised it: rendering stops at the
//! first failure and the sink is left untouched.

use std::fmt;

use thiserror::Error;

use crate::argument::ArgKind;
use crate::directive::ConversionKind;
use crate::render::MAX_FIELD;

/// The argument slot a directive was trying to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgSlot {
    /// `*` width, which must be an integer.
    Width,
    /// `.*` precision, which must be an integer.
    Precision,
    /// The value rendered by a conversion.
    Value(ConversionKind),
}

impl fmt::Display for ArgSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width => f.write_str("integer width"),
            Self::Precision => f.write_str("integer precision"),
            Self::Value(conv) => write!(f, "value for %{}", conv.as_char()),
        }
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    /// Unknown conversion character, or `%` with nothing after it.
    #[error("malformed directive at byte {offset}: {}", describe_found(.found))]
    MalformedDirective { offset: usize, found: Option<char> },

    /// A directive needed argument `index` (zero based) but the list ended.
    #[error("directive at byte {offset} needs argument #{index}, but only {index} supplied")]
    ArgumentUnderflow { offset: usize, index: usize },

    /// An argument's tag does not fit the slot it was consumed for.
    #[error("directive at byte {offset}: argument #{index} is {found}, expected {expected}")]
    ArgumentTypeMismatch {
        offset: usize,
        index: usize,
        expected: ArgSlot,
        found: ArgKind,
    },

    /// A width or precision larger than [`MAX_FIELD`]. `slot` is
    /// [`ArgSlot::Width`] or [`ArgSlot::Precision`].
    #[error(
        "directive at byte {offset}: {} {requested} exceeds the limit of {}",
        field_name(.slot),
        MAX_FIELD
    )]
    FieldTooLarge {
        offset: usize,
        slot: ArgSlot,
        requested: u128,
    },

    /// The stream behind a sink refused the rendered text.
    #[error("sink write failed: {0}")]
    Sink(#[from] std::io::Error),
}

/// Stable, payload-free classification of a [`FormatError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedDirective,
    ArgumentUnderflow,
    ArgumentTypeMismatch,
    FieldTooLarge,
    Sink,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MalformedDirective => "malformed_directive",
            Self::ArgumentUnderflow => "argument_underflow",
            Self::ArgumentTypeMismatch => "argument_type_mismatch",
            Self::FieldTooLarge => "field_too_large",
            Self::Sink => "sink",
        }
    }
}

impl FormatError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedDirective { .. } => ErrorKind::MalformedDirective,
            Self::ArgumentUnderflow { .. } => ErrorKind::ArgumentUnderflow,
            Self::ArgumentTypeMismatch { .. } => ErrorKind::ArgumentTypeMismatch,
            Self::FieldTooLarge { .. } => ErrorKind::FieldTooLarge,
            Self::Sink(_) => ErrorKind::Sink,
        }
    }
}

fn field_name(slot: &ArgSlot) -> &'static str {
    match slot {
        ArgSlot::Precision => "precision",
        ArgSlot::Width | ArgSlot::Value(_) => "width",
    }
}

fn describe_found(found: &Option<char>) -> String {
    match found {
        Some(c) => format!("unsupported conversion {c:?}"),
        None => String::from("missing conversion character"),
    }
}
