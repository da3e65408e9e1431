//! Value renderers.
//!
//! Turns a resolved directive plus its argument into text. Every renderer
//! lays its output out through the same justification rule: width is a
//! minimum, `-` pads on the right with spaces, otherwise the left side is
//! padded with zeros (numeric conversions with `0`) or spaces.
//!
//! Widths and precisions are honored exactly up to [`MAX_FIELD`]. A larger
//! request fails with `FieldTooLarge` before any padding is produced.

use crate::argument::Argument;
use crate::config::FormatOptions;
use crate::cursor::Resolved;
use crate::directive::{ConversionKind, FormatDirective, FormatFlags, PrecisionSpec, WidthSpec};
use crate::error::{ArgSlot, FormatError};

/// Largest width or precision a directive may request.
pub const MAX_FIELD: usize = 1 << 20;

/// Fractional digits for `%f` when no precision is given.
pub const DEFAULT_FLOAT_PRECISION: usize = 6;

/// Effective layout of one directive once dynamic values are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub flags: FormatFlags,
    pub width: usize,
    pub precision: Option<usize>,
    pub conversion: ConversionKind,
}

impl Field {
    /// Layout from the directive's literal width/precision. Dynamic slots
    /// start out absent and are filled in by the argument cursor.
    pub fn fixed(directive: &FormatDirective, offset: usize) -> Result<Self, FormatError> {
        Ok(Self {
            flags: directive.flags,
            width: match directive.width {
                WidthSpec::Fixed(w) => field_size(w as u128, ArgSlot::Width, offset)?,
                WidthSpec::None | WidthSpec::Dynamic => 0,
            },
            precision: match directive.precision {
                PrecisionSpec::Fixed(p) => {
                    Some(field_size(p as u128, ArgSlot::Precision, offset)?)
                }
                PrecisionSpec::None | PrecisionSpec::Dynamic => None,
            },
            conversion: directive.conversion,
        })
    }

    fn zero_fill(&self) -> bool {
        self.flags.zero_pad && !self.flags.adjust_left && self.conversion.is_numeric()
    }
}

/// Accept `requested` as a width or precision, or fail if it exceeds
/// [`MAX_FIELD`].
pub(crate) fn field_size(
    requested: u128,
    slot: ArgSlot,
    offset: usize,
) -> Result<usize, FormatError> {
    usize::try_from(requested)
        .ok()
        .filter(|n| *n <= MAX_FIELD)
        .ok_or(FormatError::FieldTooLarge {
            offset,
            slot,
            requested,
        })
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Render a resolved directive, appending to `out`.
///
/// `offset` is the byte position of the directive's `%`, used for errors.
pub fn render(
    resolved: &Resolved<'_, '_>,
    offset: usize,
    options: FormatOptions,
    out: &mut String,
) -> Result<(), FormatError> {
    let field = &resolved.field;
    let Some(slot) = resolved.value else {
        format_percent(field, out);
        return Ok(());
    };

    match (field.conversion, *slot.arg) {
        (ConversionKind::String, arg) => format_str(&arg.natural_text(), field, out),
        (
            ConversionKind::SignedInt
            | ConversionKind::HexLower
            | ConversionKind::HexUpper
            | ConversionKind::Octal,
            Argument::Integer(v),
        ) => format_integer(v, field, out),
        (ConversionKind::Float, Argument::Float(v)) => format_float(v, field, out),
        // Integers widen to floating point.
        (ConversionKind::Float, Argument::Integer(v)) => format_float(v as f64, field, out),
        (ConversionKind::Char, Argument::Char(c)) => format_char(c, field, out),
        (ConversionKind::Char, arg @ Argument::Integer(v)) => {
            match u32::try_from(v).ok().and_then(char::from_u32) {
                Some(c) => format_char(c, field, out),
                None => return fallback(&arg, slot.index, field, offset, options, out),
            }
        }
        (ConversionKind::PercentLiteral, _) => format_percent(field, out),
        (_, arg) => return fallback(&arg, slot.index, field, offset, options, out),
    }
    Ok(())
}

/// Handle an argument whose tag does not fit the conversion.
fn fallback(
    arg: &Argument<'_>,
    index: usize,
    field: &Field,
    offset: usize,
    options: FormatOptions,
    out: &mut String,
) -> Result<(), FormatError> {
    if !options.mismatch.falls_back() {
        return Err(FormatError::ArgumentTypeMismatch {
            offset,
            index,
            expected: ArgSlot::Value(field.conversion),
            found: arg.kind(),
        });
    }
    let text_field = Field {
        precision: None,
        ..*field
    };
    format_str(&arg.natural_text(), &text_field, out);
    Ok(())
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

/// Render an integer in the field's base (`%d`, `%x`, `%X`, `%o`).
///
/// Negative values render as `-` followed by the magnitude in every base.
/// `+` only applies to `%d`; `#` adds `0x`/`0X`/`0` to nonzero values.
/// Precision is a minimum digit count, and precision 0 with value 0 emits no
/// digits. Zero fill is ignored when a precision is present.
pub fn format_integer(value: i128, field: &Field, out: &mut String) {
    let radix = field.conversion.radix();
    let uppercase = field.conversion == ConversionKind::HexUpper;
    let mut digits = [0u8; 128];
    let digit_count = render_digits(value.unsigned_abs(), radix, uppercase, &mut digits);
    let digit_slice = &digits[128 - digit_count..];

    let sign = if value < 0 {
        Some('-')
    } else if field.flags.show_sign && radix == 10 {
        Some('+')
    } else {
        None
    };
    let prefix = if value != 0 { alt_prefix(field) } else { "" };

    let mut body = String::new();
    let suppress_zero = value == 0 && field.precision == Some(0);
    if !suppress_zero {
        let min_digits = field.precision.unwrap_or(1);
        pad(&mut body, '0', min_digits.saturating_sub(digit_count));
        body.extend(digit_slice.iter().map(|&b| char::from(b)));
    }

    let zero_fill = field.zero_fill() && field.precision.is_none();
    emit(out, field, sign, prefix, &body, zero_fill);
}

/// Render `%f`: fixed-point with `precision` fractional digits (default 6),
/// rounding half away from zero.
pub fn format_float(value: f64, field: &Field, out: &mut String) {
    let sign = if value.is_sign_negative() && !value.is_nan() {
        Some('-')
    } else if field.flags.show_sign {
        Some('+')
    } else {
        None
    };

    if !value.is_finite() {
        let body = if value.is_nan() { "nan" } else { "inf" };
        emit(out, field, sign, "", body, false);
        return;
    }

    let precision = field.precision.unwrap_or(DEFAULT_FLOAT_PRECISION);
    let body = fixed_point(value.abs(), precision, field.flags.alternate_form);
    emit(out, field, sign, "", &body, field.zero_fill());
}

/// Render `%s`. Precision is the maximum number of characters kept.
pub fn format_str(text: &str, field: &Field, out: &mut String) {
    let kept = match field.precision {
        Some(max) => match text.char_indices().nth(max) {
            Some((end, _)) => &text[..end],
            None => text,
        },
        None => text,
    };
    emit(out, field, None, "", kept, false);
}

/// Render `%c`.
pub fn format_char(c: char, field: &Field, out: &mut String) {
    let mut buf = [0u8; 4];
    emit(out, field, None, "", c.encode_utf8(&mut buf), false);
}

/// Render a `%` conversion reached through the directive grammar (`%5%`).
pub fn format_percent(field: &Field, out: &mut String) {
    emit(out, field, None, "", "%", false);
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Lay out `sign + prefix + body` within the field width. With `zero_fill`
/// the padding goes between the prefix and the body (`-007`, `0x00ff`).
fn emit(
    out: &mut String,
    field: &Field,
    sign: Option<char>,
    prefix: &str,
    body: &str,
    zero_fill: bool,
) {
    let content = usize::from(sign.is_some()) + prefix.len() + body.chars().count();
    let pad_total = field.width.saturating_sub(content);
    let left = field.flags.adjust_left;

    if !left && !zero_fill {
        pad(out, ' ', pad_total);
    }
    if let Some(s) = sign {
        out.push(s);
    }
    out.push_str(prefix);
    if !left && zero_fill {
        pad(out, '0', pad_total);
    }
    out.push_str(body);
    if left {
        pad(out, ' ', pad_total);
    }
}

fn pad(out: &mut String, c: char, count: usize) {
    out.extend(std::iter::repeat_n(c, count));
}

fn alt_prefix(field: &Field) -> &'static str {
    if !field.flags.alternate_form {
        return "";
    }
    match field.conversion {
        ConversionKind::Octal => "0",
        ConversionKind::HexLower => "0x",
        ConversionKind::HexUpper => "0X",
        _ => "",
    }
}

/// Render `value` in `radix` into the END of `buf`, returning the digit count.
fn render_digits(mut value: u128, radix: u32, uppercase: bool, buf: &mut [u8; 128]) -> usize {
    if value == 0 {
        buf[127] = b'0';
        return 1;
    }
    let alpha = if uppercase { b'A' } else { b'a' };
    let radix = u128::from(radix);
    let mut pos = 128;
    while value > 0 && pos > 0 {
        pos -= 1;
        let digit = (value % radix) as u8;
        buf[pos] = if digit < 10 {
            b'0' + digit
        } else {
            alpha + (digit - 10)
        };
        value /= radix;
    }
    128 - pos
}

/// Fixed-point digits of a finite, non-negative `value`.
///
/// `format!` rounds exact ties to even, so ties are detected up front and
/// rounded away from zero by hand.
fn fixed_point(value: f64, precision: usize, alt_form: bool) -> String {
    let mut s = if is_exact_tie(value, precision) {
        // The expansion terminates one digit past `precision` with a '5'.
        let mut exact = format!("{value:.prec$}", prec = precision + 1);
        exact.pop();
        if exact.ends_with('.') {
            exact.pop();
        }
        increment_last_digit(&mut exact);
        exact
    } else {
        format!("{value:.precision$}")
    };
    if precision == 0 && alt_form {
        s.push('.');
    }
    s
}

/// True when `value` lies exactly halfway between two decimals with
/// `precision` fractional digits.
///
/// Writing `value = m * 2^e` with `m` odd, `value * 10^p * 2` equals
/// `m * 5^p * 2^(e + p + 1)`, which is an odd integer iff `e == -(p + 1)`.
fn is_exact_tie(value: f64, precision: usize) -> bool {
    if value == 0.0 || !value.is_finite() {
        return false;
    }
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & ((1_u64 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074_i64)
    } else {
        (fraction | (1_u64 << 52), biased - 1075)
    };
    let exponent = exponent + i64::from(mantissa.trailing_zeros());
    let Ok(precision) = i64::try_from(precision) else {
        return false;
    };
    exponent == -(precision + 1)
}

/// Add one unit in the last place of a decimal string, carrying as needed.
fn increment_last_digit(s: &mut String) {
    let mut chars: Vec<char> = s.chars().collect();
    let mut carry = true;
    for c in chars.iter_mut().rev() {
        match *c {
            '.' => continue,
            '9' => *c = '0',
            d => {
                *c = char::from_digit(d.to_digit(10).map_or(0, |v| v + 1), 10).unwrap_or('0');
                carry = false;
                break;
            }
        }
    }
    if carry {
        chars.insert(0, '1');
    }
    *s = chars.into_iter().collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::ValueSlot;

    fn field(conversion: ConversionKind) -> Field {
        Field {
            flags: FormatFlags::default(),
            width: 0,
            precision: None,
            conversion,
        }
    }

    fn int(value: i128, f: Field) -> String {
        let mut out = String::new();
        format_integer(value, &f, &mut out);
        out
    }

    fn float(value: f64, f: Field) -> String {
        let mut out = String::new();
        format_float(value, &f, &mut out);
        out
    }

    fn with_precision(conversion: ConversionKind, p: usize) -> Field {
        Field {
            precision: Some(p),
            ..field(conversion)
        }
    }

    #[test]
    fn signed_basic() {
        assert_eq!(int(42, field(ConversionKind::SignedInt)), "42");
        assert_eq!(int(-123, field(ConversionKind::SignedInt)), "-123");
        assert_eq!(int(0, field(ConversionKind::SignedInt)), "0");
    }

    #[test]
    fn signed_width_pad() {
        let f = Field {
            width: 8,
            ..field(ConversionKind::SignedInt)
        };
        assert_eq!(int(42, f), "      42");
    }

    #[test]
    fn signed_zero_pad_keeps_sign_outside() {
        let f = Field {
            width: 4,
            flags: FormatFlags {
                zero_pad: true,
                ..FormatFlags::default()
            },
            ..field(ConversionKind::SignedInt)
        };
        assert_eq!(int(-7, f), "-007");
        assert_eq!(int(42, f), "0042");
    }

    #[test]
    fn signed_left_justify() {
        let f = Field {
            width: 8,
            flags: FormatFlags {
                adjust_left: true,
                ..FormatFlags::default()
            },
            ..field(ConversionKind::SignedInt)
        };
        assert_eq!(int(42, f), "42      ");
    }

    #[test]
    fn force_sign_only_for_decimal() {
        let flags = FormatFlags {
            show_sign: true,
            ..FormatFlags::default()
        };
        let dec = Field {
            flags,
            ..field(ConversionKind::SignedInt)
        };
        let hex = Field {
            flags,
            ..field(ConversionKind::HexLower)
        };
        assert_eq!(int(42, dec), "+42");
        assert_eq!(int(42, hex), "2a");
    }

    #[test]
    fn precision_is_minimum_digits() {
        assert_eq!(int(42, with_precision(ConversionKind::SignedInt, 5)), "00042");
        let f = Field {
            width: 8,
            ..with_precision(ConversionKind::SignedInt, 3)
        };
        assert_eq!(int(-5, f), "    -005");
    }

    #[test]
    fn precision_disables_zero_fill() {
        let f = Field {
            width: 8,
            flags: FormatFlags {
                zero_pad: true,
                ..FormatFlags::default()
            },
            ..with_precision(ConversionKind::SignedInt, 3)
        };
        assert_eq!(int(5, f), "     005");
    }

    #[test]
    fn precision_zero_value_zero_is_empty() {
        assert_eq!(int(0, with_precision(ConversionKind::SignedInt, 0)), "");
    }

    #[test]
    fn extreme_integers() {
        assert_eq!(
            int(i128::from(i64::MIN), field(ConversionKind::SignedInt)),
            "-9223372036854775808"
        );
        assert_eq!(
            int(i128::MIN, field(ConversionKind::SignedInt)),
            "-170141183460469231731687303715884105728"
        );
    }

    #[test]
    fn hex_and_octal() {
        assert_eq!(int(255, field(ConversionKind::HexLower)), "ff");
        assert_eq!(int(255, field(ConversionKind::HexUpper)), "FF");
        assert_eq!(int(8, field(ConversionKind::Octal)), "10");
        assert_eq!(int(-255, field(ConversionKind::HexLower)), "-ff");
    }

    #[test]
    fn alternate_form_prefixes() {
        let alt = FormatFlags {
            alternate_form: true,
            ..FormatFlags::default()
        };
        let hex = Field {
            flags: alt,
            ..field(ConversionKind::HexLower)
        };
        let upper = Field {
            flags: alt,
            ..field(ConversionKind::HexUpper)
        };
        let oct = Field {
            flags: alt,
            ..field(ConversionKind::Octal)
        };
        assert_eq!(int(255, hex), "0xff");
        assert_eq!(int(255, upper), "0XFF");
        assert_eq!(int(8, oct), "010");
        assert_eq!(int(0, hex), "0");
    }

    #[test]
    fn zero_fill_goes_after_hex_prefix() {
        let f = Field {
            width: 6,
            flags: FormatFlags {
                alternate_form: true,
                zero_pad: true,
                ..FormatFlags::default()
            },
            ..field(ConversionKind::HexLower)
        };
        assert_eq!(int(255, f), "0x00ff");
    }

    #[test]
    fn float_default_precision() {
        assert_eq!(float(std::f64::consts::PI, field(ConversionKind::Float)), "3.141593");
        assert_eq!(float(1.0, field(ConversionKind::Float)), "1.000000");
    }

    #[test]
    fn float_rounds_half_away_from_zero() {
        let p0 = with_precision(ConversionKind::Float, 0);
        assert_eq!(float(0.5, p0), "1");
        assert_eq!(float(1.5, p0), "2");
        assert_eq!(float(2.5, p0), "3");
        assert_eq!(float(-2.5, p0), "-3");
        assert_eq!(float(9.5, p0), "10");
        assert_eq!(float(0.125, with_precision(ConversionKind::Float, 2)), "0.13");
        assert_eq!(float(0.25, with_precision(ConversionKind::Float, 1)), "0.3");
        assert_eq!(float(99.5, p0), "100");
    }

    #[test]
    fn float_non_ties_keep_exact_rounding() {
        // 1.005 is stored just below the midpoint.
        assert_eq!(float(1.005, with_precision(ConversionKind::Float, 2)), "1.00");
        assert_eq!(float(0.75, with_precision(ConversionKind::Float, 0)), "1");
        assert_eq!(float(2.675, with_precision(ConversionKind::Float, 2)), "2.67");
    }

    #[test]
    fn float_zero_fill_and_sign() {
        let f = Field {
            width: 6,
            flags: FormatFlags {
                zero_pad: true,
                ..FormatFlags::default()
            },
            ..with_precision(ConversionKind::Float, 0)
        };
        assert_eq!(float(-1.5, f), "-00002");

        let plus = Field {
            flags: FormatFlags {
                show_sign: true,
                ..FormatFlags::default()
            },
            ..with_precision(ConversionKind::Float, 1)
        };
        assert_eq!(float(1.0, plus), "+1.0");
    }

    #[test]
    fn float_alternate_form_keeps_point() {
        let f = Field {
            flags: FormatFlags {
                alternate_form: true,
                ..FormatFlags::default()
            },
            ..with_precision(ConversionKind::Float, 0)
        };
        assert_eq!(float(3.0, f), "3.");
    }

    #[test]
    fn float_special_values() {
        assert_eq!(float(f64::NAN, field(ConversionKind::Float)), "nan");
        assert_eq!(float(f64::INFINITY, field(ConversionKind::Float)), "inf");
        assert_eq!(float(f64::NEG_INFINITY, field(ConversionKind::Float)), "-inf");
        assert_eq!(float(-0.0, field(ConversionKind::Float)), "-0.000000");
        let padded = Field {
            width: 5,
            flags: FormatFlags {
                zero_pad: true,
                ..FormatFlags::default()
            },
            ..field(ConversionKind::Float)
        };
        assert_eq!(float(f64::INFINITY, padded), "  inf");
    }

    #[test]
    fn str_precision_truncates_on_char_boundary() {
        let mut out = String::new();
        format_str("hello", &with_precision(ConversionKind::String, 3), &mut out);
        assert_eq!(out, "hel");

        out.clear();
        format_str("héllo", &with_precision(ConversionKind::String, 2), &mut out);
        assert_eq!(out, "hé");
    }

    #[test]
    fn str_width_counts_chars() {
        let mut out = String::new();
        let f = Field {
            width: 3,
            ..field(ConversionKind::String)
        };
        format_str("é", &f, &mut out);
        assert_eq!(out, "  é");
    }

    #[test]
    fn char_ignores_zero_fill() {
        let mut out = String::new();
        let f = Field {
            width: 3,
            flags: FormatFlags {
                zero_pad: true,
                ..FormatFlags::default()
            },
            ..field(ConversionKind::Char)
        };
        format_char('x', &f, &mut out);
        assert_eq!(out, "  x");
    }

    #[test]
    fn percent_conversion_pads() {
        let mut out = String::new();
        let f = Field {
            width: 3,
            ..field(ConversionKind::PercentLiteral)
        };
        format_percent(&f, &mut out);
        assert_eq!(out, "  %");
    }

    fn dispatch(
        conversion: ConversionKind,
        arg: Argument<'_>,
        options: FormatOptions,
    ) -> Result<String, FormatError> {
        let resolved = Resolved {
            field: field(conversion),
            value: Some(ValueSlot {
                index: 0,
                arg: &arg,
            }),
        };
        let mut out = String::new();
        render(&resolved, 0, options, &mut out)?;
        Ok(out)
    }

    #[test]
    fn dispatch_accepts_natural_pairs() {
        let strict = FormatOptions::strict();
        assert_eq!(
            dispatch(ConversionKind::String, Argument::Boolean(true), strict).unwrap(),
            "true"
        );
        assert_eq!(
            dispatch(ConversionKind::String, Argument::Integer(7), strict).unwrap(),
            "7"
        );
        assert_eq!(
            dispatch(ConversionKind::Float, Argument::Integer(2), strict).unwrap(),
            "2.000000"
        );
        assert_eq!(
            dispatch(ConversionKind::Char, Argument::Integer(65), strict).unwrap(),
            "A"
        );
    }

    #[test]
    fn dispatch_strict_mismatch_fails() {
        let err = dispatch(ConversionKind::SignedInt, Argument::Text("x"), FormatOptions::strict())
            .unwrap_err();
        assert!(matches!(
            err,
            FormatError::ArgumentTypeMismatch {
                expected: ArgSlot::Value(ConversionKind::SignedInt),
                found: crate::argument::ArgKind::Text,
                ..
            }
        ));

        let err = dispatch(ConversionKind::Char, Argument::Integer(-1), FormatOptions::strict())
            .unwrap_err();
        assert!(matches!(err, FormatError::ArgumentTypeMismatch { .. }));
    }

    #[test]
    fn dispatch_lenient_mismatch_stringifies() {
        let lenient = FormatOptions::lenient();
        assert_eq!(
            dispatch(ConversionKind::SignedInt, Argument::Text("x"), lenient).unwrap(),
            "x"
        );
        assert_eq!(
            dispatch(ConversionKind::HexLower, Argument::Float(1.5), lenient).unwrap(),
            "1.5"
        );
    }

    fn int_directive(width: WidthSpec, precision: PrecisionSpec) -> FormatDirective {
        FormatDirective {
            flags: FormatFlags::default(),
            width,
            precision,
            length: crate::directive::LengthMod::None,
            conversion: ConversionKind::SignedInt,
        }
    }

    #[test]
    fn fixed_field_keeps_large_sizes() {
        let f = Field::fixed(
            &int_directive(WidthSpec::Fixed(5000), PrecisionSpec::Fixed(MAX_FIELD)),
            0,
        )
        .unwrap();
        assert_eq!(f.width, 5000);
        assert_eq!(f.precision, Some(MAX_FIELD));
    }

    #[test]
    fn fixed_field_rejects_oversized_sizes() {
        let directive = int_directive(WidthSpec::Fixed(usize::MAX), PrecisionSpec::None);
        let err = Field::fixed(&directive, 9).unwrap_err();
        assert!(matches!(
            err,
            FormatError::FieldTooLarge {
                offset: 9,
                slot: ArgSlot::Width,
                ..
            }
        ));
        let err = Field::fixed(
            &int_directive(WidthSpec::None, PrecisionSpec::Fixed(MAX_FIELD + 1)),
            0,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FormatError::FieldTooLarge {
                slot: ArgSlot::Precision,
                requested,
                ..
            } if requested == (MAX_FIELD + 1) as u128
        ));
    }

    #[test]
    fn wide_fields_pad_in_full() {
        let mut f = field(ConversionKind::SignedInt);
        f.width = 5000;
        let mut out = String::new();
        format_integer(1, &f, &mut out);
        assert_eq!(out.len(), 5000);
        assert!(out.ends_with(" 1"));

        let mut f = field(ConversionKind::Float);
        f.precision = Some(5000);
        let mut out = String::new();
        format_float(0.5, &f, &mut out);
        assert_eq!(out.len(), 5002);
        assert!(out.starts_with("0.5000"));
    }
}
