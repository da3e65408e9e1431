//! Public entry points.
//!
//! Every call renders into a scratch buffer first; a sink only ever receives
//! a complete rendering, so a failed call writes nothing.

use crate::argument::Argument;
use crate::config::FormatOptions;
use crate::error::FormatError;
use crate::scan::scan_into;
use crate::sink::{Sink, StreamSink};

/// Render `template` against `args` with default options.
pub fn format(template: &str, args: &[Argument<'_>]) -> Result<String, FormatError> {
    format_with(FormatOptions::default(), template, args)
}

pub fn format_with(
    options: FormatOptions,
    template: &str,
    args: &[Argument<'_>],
) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    scan_into(&mut out, template, args, options)?;
    Ok(out)
}

/// Render into a caller-supplied sink.
pub fn format_into<S: Sink + ?Sized>(
    sink: &mut S,
    template: &str,
    args: &[Argument<'_>],
) -> Result<(), FormatError> {
    format_into_with(sink, FormatOptions::default(), template, args)
}

pub fn format_into_with<S: Sink + ?Sized>(
    sink: &mut S,
    options: FormatOptions,
    template: &str,
    args: &[Argument<'_>],
) -> Result<(), FormatError> {
    let rendered = format_with(options, template, args)?;
    sink.write_text(&rendered)
}

/// Like [`format`], with a trailing newline.
pub fn format_line(template: &str, args: &[Argument<'_>]) -> Result<String, FormatError> {
    format_line_with(FormatOptions::default(), template, args)
}

pub fn format_line_with(
    options: FormatOptions,
    template: &str,
    args: &[Argument<'_>],
) -> Result<String, FormatError> {
    let mut out = format_with(options, template, args)?;
    out.push('\n');
    Ok(out)
}

/// Like [`format_into`], with a trailing newline.
pub fn format_line_into<S: Sink + ?Sized>(
    sink: &mut S,
    template: &str,
    args: &[Argument<'_>],
) -> Result<(), FormatError> {
    format_line_into_with(sink, FormatOptions::default(), template, args)
}

pub fn format_line_into_with<S: Sink + ?Sized>(
    sink: &mut S,
    options: FormatOptions,
    template: &str,
    args: &[Argument<'_>],
) -> Result<(), FormatError> {
    let rendered = format_line_with(options, template, args)?;
    sink.write_text(&rendered)
}

/// Render to standard output.
pub fn print(template: &str, args: &[Argument<'_>]) -> Result<(), FormatError> {
    let mut sink = StreamSink::new(std::io::stdout().lock());
    format_into(&mut sink, template, args)?;
    sink.flush()
}

/// Render to standard output with a trailing newline.
pub fn println(template: &str, args: &[Argument<'_>]) -> Result<(), FormatError> {
    let mut sink = StreamSink::new(std::io::stdout().lock());
    format_line_into(&mut sink, template, args)?;
    sink.flush()
}

/// Render a single value with no template, as `%s` would.
#[must_use]
pub fn to_text(arg: &Argument<'_>) -> String {
    arg.natural_text().into_owned()
}
