//! Directive grammar.
//!
//! Parses the text following a `%` into a [`FormatDirective`]. The grammar is
//! consumed in a fixed order, every stage optional except the conversion:
//!
//! ```text
//! ["-"] ["+"] ["#"] ["0"] (DIGITS | "*") ["." (DIGITS | "*")] [length] conv
//! conv = s | d | f | x | X | o | c | %
//! ```
//!
//! Each flag may appear at most once, in its own slot; `%+-5d` is malformed
//! because `-` is not accepted after `+`.

use crate::error::FormatError;

// ---------------------------------------------------------------------------
// Directive types
// ---------------------------------------------------------------------------

/// Flags parsed from a directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags {
    pub adjust_left: bool,    // '-'
    pub show_sign: bool,      // '+'
    pub alternate_form: bool, // '#'
    pub zero_pad: bool,       // '0'
}

/// Minimum field width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthSpec {
    None,
    Fixed(usize),
    Dynamic, // '*'
}

/// Precision: maximum characters for `%s`, minimum digits for integers,
/// fractional digits for `%f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecisionSpec {
    None,
    Fixed(usize),
    Dynamic, // '.*'
}

/// Length modifier. Accepted for compatibility and never affects output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthMod {
    None,
    Hh,   // 'hh'
    H,    // 'h'
    L,    // 'l'
    Ll,   // 'll'
    Z,    // 'z'
    T,    // 't'
    J,    // 'j'
    BigL, // 'L'
}

/// The conversion selected by the final character of a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionKind {
    String,         // 's'
    SignedInt,      // 'd'
    Float,          // 'f'
    HexLower,       // 'x'
    HexUpper,       // 'X'
    Octal,          // 'o'
    Char,           // 'c'
    PercentLiteral, // '%'
}

impl ConversionKind {
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            b's' => Self::String,
            b'd' => Self::SignedInt,
            b'f' => Self::Float,
            b'x' => Self::HexLower,
            b'X' => Self::HexUpper,
            b'o' => Self::Octal,
            b'c' => Self::Char,
            b'%' => Self::PercentLiteral,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::String => 's',
            Self::SignedInt => 'd',
            Self::Float => 'f',
            Self::HexLower => 'x',
            Self::HexUpper => 'X',
            Self::Octal => 'o',
            Self::Char => 'c',
            Self::PercentLiteral => '%',
        }
    }

    /// Whether the zero-fill flag applies to this conversion.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::SignedInt | Self::Float | Self::HexLower | Self::HexUpper | Self::Octal
        )
    }

    /// Whether the conversion renders a value argument.
    #[must_use]
    pub const fn takes_value(self) -> bool {
        !matches!(self, Self::PercentLiteral)
    }

    /// Numeric base for integer conversions.
    #[must_use]
    pub const fn radix(self) -> u32 {
        match self {
            Self::HexLower | Self::HexUpper => 16,
            Self::Octal => 8,
            _ => 10,
        }
    }
}

/// A parsed directive. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDirective {
    pub flags: FormatFlags,
    pub width: WidthSpec,
    pub precision: PrecisionSpec,
    pub length: LengthMod,
    pub conversion: ConversionKind,
}

impl FormatDirective {
    /// Number of arguments this directive consumes (1 to 3, or 0 to 2 for `%`).
    #[must_use]
    pub fn arity(&self) -> usize {
        usize::from(self.width == WidthSpec::Dynamic)
            + usize::from(self.precision == PrecisionSpec::Dynamic)
            + usize::from(self.conversion.takes_value())
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parse one directive from `spec`, which starts at the first byte AFTER `%`.
///
/// `offset` is the byte position of the `%` in the full template and is only
/// used for error reporting. Returns the directive and the number of bytes of
/// `spec` it occupies.
pub fn parse_directive(spec: &str, offset: usize) -> Result<(FormatDirective, usize), FormatError> {
    let fmt = spec.as_bytes();
    let mut pos = 0;

    // --- flags, fixed order ---
    let mut flags = FormatFlags {
        adjust_left: eat(fmt, &mut pos, b'-'),
        show_sign: eat(fmt, &mut pos, b'+'),
        alternate_form: eat(fmt, &mut pos, b'#'),
        zero_pad: eat(fmt, &mut pos, b'0'),
    };
    // '-' overrides '0'.
    if flags.adjust_left {
        flags.zero_pad = false;
    }

    // --- width ---
    let width = if eat(fmt, &mut pos, b'*') {
        WidthSpec::Dynamic
    } else {
        match read_decimal(fmt, &mut pos) {
            Some(w) => WidthSpec::Fixed(w),
            None => WidthSpec::None,
        }
    };

    // --- precision ---
    let precision = if eat(fmt, &mut pos, b'.') {
        if eat(fmt, &mut pos, b'*') {
            PrecisionSpec::Dynamic
        } else {
            // A bare '.' means precision zero.
            PrecisionSpec::Fixed(read_decimal(fmt, &mut pos).unwrap_or(0))
        }
    } else {
        PrecisionSpec::None
    };

    // --- length modifier ---
    let length = read_length(fmt, &mut pos);

    // --- conversion ---
    let Some(&byte) = fmt.get(pos) else {
        return Err(FormatError::MalformedDirective {
            offset,
            found: None,
        });
    };
    let Some(conversion) = ConversionKind::from_byte(byte) else {
        return Err(FormatError::MalformedDirective {
            offset,
            found: spec[pos..].chars().next(),
        });
    };
    pos += 1;

    Ok((
        FormatDirective {
            flags,
            width,
            precision,
            length,
            conversion,
        },
        pos,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn eat(fmt: &[u8], pos: &mut usize, byte: u8) -> bool {
    if fmt.get(*pos) == Some(&byte) {
        *pos += 1;
        true
    } else {
        false
    }
}

/// Read a run of ASCII digits, saturating on overflow.
fn read_decimal(fmt: &[u8], pos: &mut usize) -> Option<usize> {
    let start = *pos;
    let mut result = 0_usize;
    while let Some(&d) = fmt.get(*pos).filter(|b| b.is_ascii_digit()) {
        result = result
            .saturating_mul(10)
            .saturating_add(usize::from(d - b'0'));
        *pos += 1;
    }
    (*pos > start).then_some(result)
}

fn read_length(fmt: &[u8], pos: &mut usize) -> LengthMod {
    let Some(&byte) = fmt.get(*pos) else {
        return LengthMod::None;
    };
    let length = match byte {
        b'h' => {
            if fmt.get(*pos + 1) == Some(&b'h') {
                *pos += 1;
                LengthMod::Hh
            } else {
                LengthMod::H
            }
        }
        b'l' => {
            if fmt.get(*pos + 1) == Some(&b'l') {
                *pos += 1;
                LengthMod::Ll
            } else {
                LengthMod::L
            }
        }
        b'z' => LengthMod::Z,
        b't' => LengthMod::T,
        b'j' => LengthMod::J,
        b'L' => LengthMod::BigL,
        _ => return LengthMod::None,
    };
    *pos += 1;
    length
}
