//! # ltd-fmt-core
//!
//! printf-style formatting over a typed, ordered argument list.
//!
//! A template such as `"%-10s|%*d|%.2f"` is scanned left to right. Literal
//! text is copied, `%%` becomes `%`, and every directive consumes its
//! arguments strictly in order: a `*` width, then a `.*` precision, then the
//! value. Errors are typed ([`FormatError`]) and a failed call never leaves a
//! partial rendering in the caller's sink.
//!
//! ```
//! use ltd_fmt_core::{args, format};
//!
//! let out = format("'%-6s|%*d'", &args!["id", 4, 42]).unwrap();
//! assert_eq!(out, "'id    |  42'");
//! ```

#![forbid(unsafe_code)]

pub mod argument;
pub mod config;
pub mod cursor;
pub mod directive;
pub mod engine;
pub mod error;
pub mod log;
pub mod render;
pub mod scan;
pub mod sink;

pub use argument::{ArgKind, Argument};
pub use config::{FormatOptions, MismatchPolicy};
pub use directive::{ConversionKind, FormatDirective, FormatFlags, PrecisionSpec, WidthSpec};
pub use engine::{
    format, format_into, format_into_with, format_line, format_line_into, format_line_into_with,
    format_line_with, format_with, print, println, to_text,
};
pub use error::{ArgSlot, ErrorKind, FormatError};
pub use log::{Level, LogConfig, Logger};
pub use render::MAX_FIELD;
pub use sink::{Sink, StreamSink};

/// Build an argument array, converting each value with `Into<Argument>`.
///
/// ```
/// use ltd_fmt_core::{Argument, args};
///
/// let a = args![1, "two", 3.0, 'c', true];
/// assert_eq!(a[1], Argument::Text("two"));
/// ```
#[macro_export]
macro_rules! args {
    () => {{
        let empty: [$crate::Argument<'static>; 0] = [];
        empty
    }};
    ($($value:expr),+ $(,)?) => {
        [$($crate::Argument::from($value)),+]
    };
}
