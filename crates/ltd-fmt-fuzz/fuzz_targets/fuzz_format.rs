#![no_main]
use libfuzzer_sys::fuzz_target;
use ltd_fmt_core::{Argument, FormatOptions, format_with};

// Arbitrary templates must either render or return a typed error, never
// panic, under both mismatch policies.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let (selector, rest) = data.split_at(1);
    let template = String::from_utf8_lossy(rest);
    let args = [
        Argument::Integer(i128::from(selector[0]) - 128),
        Argument::Text("fuzz"),
        Argument::Float(f64::from(selector[0]) / 7.0),
        Argument::Char('λ'),
        Argument::Boolean(selector[0] & 1 == 1),
        Argument::Raw(rest),
    ];
    let options = if selector[0] & 0x80 == 0 {
        FormatOptions::strict()
    } else {
        FormatOptions::lenient()
    };
    if let Ok(out) = format_with(options, &template, &args) {
        // Literal-only templates are copied verbatim.
        if !template.contains('%') {
            assert_eq!(out, template);
        }
    }
});
