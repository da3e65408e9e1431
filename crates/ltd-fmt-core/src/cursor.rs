//! Sequential argument cursor.
//!
//! Serves arguments strictly left to right, each exactly once. A directive
//! pulls its dynamic width first, then its dynamic precision, then its value.

use crate::argument::Argument;
use crate::config::FormatOptions;
use crate::directive::{FormatDirective, PrecisionSpec, WidthSpec};
use crate::error::{ArgSlot, FormatError};
use crate::render::{Field, field_size};

/// Resolution progress of one directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    Next,
    AwaitWidthArg,
    AwaitPrecisionArg,
    Ready,
}

/// An argument together with its position in the argument list.
#[derive(Debug, Clone, Copy)]
pub struct ValueSlot<'c, 'a> {
    pub index: usize,
    pub arg: &'c Argument<'a>,
}

/// A directive with its dynamic fields filled in and its value bound.
/// `value` is `None` only for the `%` conversion.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'c, 'a> {
    pub field: Field,
    pub value: Option<ValueSlot<'c, 'a>>,
}

/// Single-pass reader over a call's arguments.
#[derive(Debug)]
pub struct ArgumentCursor<'c, 'a> {
    args: &'c [Argument<'a>],
    index: usize,
}

impl<'c, 'a> ArgumentCursor<'c, 'a> {
    #[must_use]
    pub const fn new(args: &'c [Argument<'a>]) -> Self {
        Self { args, index: 0 }
    }

    /// Number of arguments consumed so far.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.args.len() - self.index
    }

    /// Take the next unconsumed argument for the directive at `offset`.
    pub fn next(&mut self, offset: usize) -> Result<ValueSlot<'c, 'a>, FormatError> {
        let index = self.index;
        let arg = self
            .args
            .get(index)
            .ok_or(FormatError::ArgumentUnderflow { offset, index })?;
        self.index += 1;
        Ok(ValueSlot { index, arg })
    }

    /// Consume every argument `directive` needs and produce its layout.
    ///
    /// A negative dynamic width selects left adjustment with the absolute
    /// value; a negative dynamic precision counts as no precision. Sizes
    /// past `MAX_FIELD` fail with `FieldTooLarge`.
    pub fn resolve(
        &mut self,
        directive: &FormatDirective,
        offset: usize,
        options: FormatOptions,
    ) -> Result<Resolved<'c, 'a>, FormatError> {
        let mut field = Field::fixed(directive, offset)?;
        let dynamic_width = directive.width == WidthSpec::Dynamic;
        let dynamic_precision = directive.precision == PrecisionSpec::Dynamic;

        let mut state = ParseState::Next;
        while state != ParseState::Ready {
            state = match state {
                ParseState::Next if dynamic_width => ParseState::AwaitWidthArg,
                ParseState::Next if dynamic_precision => ParseState::AwaitPrecisionArg,
                ParseState::Next => ParseState::Ready,
                ParseState::AwaitWidthArg => {
                    let slot = self.next(offset)?;
                    if let Some(width) = dynamic_int(slot, ArgSlot::Width, offset, options)? {
                        if width < 0 {
                            field.flags.adjust_left = true;
                        }
                        field.width = field_size(width.unsigned_abs(), ArgSlot::Width, offset)?;
                    }
                    if dynamic_precision {
                        ParseState::AwaitPrecisionArg
                    } else {
                        ParseState::Ready
                    }
                }
                ParseState::AwaitPrecisionArg => {
                    let slot = self.next(offset)?;
                    field.precision = match dynamic_int(slot, ArgSlot::Precision, offset, options)? {
                        Some(p) if p >= 0 => {
                            Some(field_size(p.unsigned_abs(), ArgSlot::Precision, offset)?)
                        }
                        _ => None,
                    };
                    ParseState::Ready
                }
                ParseState::Ready => ParseState::Ready,
            };
        }

        let value = if directive.conversion.takes_value() {
            Some(self.next(offset)?)
        } else {
            None
        };
        Ok(Resolved { field, value })
    }
}

/// Read a `*` argument as an integer. Under the lenient policy a mismatched
/// argument is skipped and the slot stays absent.
fn dynamic_int(
    slot: ValueSlot<'_, '_>,
    expected: ArgSlot,
    offset: usize,
    options: FormatOptions,
) -> Result<Option<i128>, FormatError> {
    match *slot.arg {
        Argument::Integer(v) => Ok(Some(v)),
        _ if options.mismatch.falls_back() => Ok(None),
        ref other => Err(FormatError::ArgumentTypeMismatch {
            offset,
            index: slot.index,
            expected,
            found: other.kind(),
        }),
    }
}
