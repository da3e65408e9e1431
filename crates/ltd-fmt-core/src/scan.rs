//! Template scanner.
//!
//! Splits a template into literal runs, `%%` escapes and directives, then
//! drives the cursor and renderer over them.

use crate::argument::Argument;
use crate::config::FormatOptions;
use crate::cursor::ArgumentCursor;
use crate::directive::{FormatDirective, parse_directive};
use crate::error::FormatError;
use crate::render::render;

/// A piece of a scanned template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'t> {
    /// Literal text to emit verbatim.
    Literal(&'t str),
    /// A `%%` escape (emit a single '%').
    Percent,
    /// A directive and the byte offset of its `%`.
    Directive {
        offset: usize,
        directive: FormatDirective,
    },
}

/// Iterator over the segments of a template.
///
/// Yields an error for the first malformed directive and then stops.
#[derive(Debug, Clone)]
pub struct Segments<'t> {
    template: &'t str,
    pos: usize,
    failed: bool,
}

impl<'t> Segments<'t> {
    #[must_use]
    pub const fn new(template: &'t str) -> Self {
        Self {
            template,
            pos: 0,
            failed: false,
        }
    }
}

impl<'t> Iterator for Segments<'t> {
    type Item = Result<Segment<'t>, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.template.as_bytes();
        if self.failed || self.pos >= bytes.len() {
            return None;
        }

        let start = self.pos;
        let run = bytes[start..]
            .iter()
            .position(|&b| b == b'%')
            .unwrap_or(bytes.len() - start);
        if run > 0 {
            self.pos += run;
            return Some(Ok(Segment::Literal(&self.template[start..self.pos])));
        }

        // At a '%'.
        let offset = self.pos;
        if bytes.get(offset + 1) == Some(&b'%') {
            self.pos += 2;
            return Some(Ok(Segment::Percent));
        }
        match parse_directive(&self.template[offset + 1..], offset) {
            Ok((directive, consumed)) => {
                self.pos = offset + 1 + consumed;
                Some(Ok(Segment::Directive { offset, directive }))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Scan `template` and append the rendered text to `out`.
///
/// Stops at the first error; whatever was appended before it stays in `out`.
pub fn scan_into(
    out: &mut String,
    template: &str,
    args: &[Argument<'_>],
    options: FormatOptions,
) -> Result<(), FormatError> {
    let mut cursor = ArgumentCursor::new(args);
    for segment in Segments::new(template) {
        match segment? {
            Segment::Literal(text) => out.push_str(text),
            Segment::Percent => out.push('%'),
            Segment::Directive { offset, directive } => {
                let resolved = cursor.resolve(&directive, offset, options)?;
                render(&resolved, offset, options, out)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::ConversionKind;

    fn segments(template: &str) -> Vec<Segment<'_>> {
        Segments::new(template)
            .collect::<Result<Vec<_>, _>>()
            .expect("template should scan")
    }

    #[test]
    fn splits_literals_and_directives() {
        let segs = segments("hello %d world %s!");
        assert_eq!(segs.len(), 5);
        assert_eq!(segs[0], Segment::Literal("hello "));
        assert!(matches!(
            segs[1],
            Segment::Directive { offset: 6, directive } if directive.conversion == ConversionKind::SignedInt
        ));
        assert_eq!(segs[2], Segment::Literal(" world "));
        assert!(matches!(
            segs[3],
            Segment::Directive { offset: 15, directive } if directive.conversion == ConversionKind::String
        ));
        assert_eq!(segs[4], Segment::Literal("!"));
    }

    #[test]
    fn percent_escape() {
        let segs = segments("100%%");
        assert_eq!(segs, vec![Segment::Literal("100"), Segment::Percent]);
    }

    #[test]
    fn empty_template_has_no_segments() {
        assert!(segments("").is_empty());
    }

    #[test]
    fn trailing_percent_is_an_error_then_stops() {
        let mut it = Segments::new("abc%");
        assert_eq!(it.next().unwrap().unwrap(), Segment::Literal("abc"));
        let err = it.next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            FormatError::MalformedDirective {
                offset: 3,
                found: None
            }
        ));
        assert!(it.next().is_none());
    }

    #[test]
    fn multibyte_literals_pass_through() {
        let mut out = String::new();
        scan_into(&mut out, "héllo → %s ✓", &[Argument::Text("wörld")], FormatOptions::default())
            .unwrap();
        assert_eq!(out, "héllo → wörld ✓");
    }

    #[test]
    fn scan_stops_at_first_error() {
        let mut out = String::new();
        let err = scan_into(
            &mut out,
            "a%db%qc%d",
            &[Argument::Integer(1), Argument::Integer(2)],
            FormatOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FormatError::MalformedDirective {
                offset: 4,
                found: Some('q')
            }
        ));
        assert_eq!(out, "a1b");
    }
}
