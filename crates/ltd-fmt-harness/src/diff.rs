//! Diff rendering for fixture comparison.

use std::fmt::Write;

/// Render a line diff between expected and actual output.
///
/// Lines present on only one side are reported as well, so a missing
/// trailing line still shows up.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let mut out = String::from("--- expected\n+++ actual\n");
    let expected_lines: Vec<_> = expected.split('\n').collect();
    let actual_lines: Vec<_> = actual.split('\n').collect();
    for i in 0..expected_lines.len().max(actual_lines.len()) {
        let e = expected_lines.get(i);
        let a = actual_lines.get(i);
        if e == a {
            continue;
        }
        let _ = writeln!(out, "@@ line {} @@", i + 1);
        if let Some(e) = e {
            let _ = writeln!(out, "-{e:?}");
        }
        if let Some(a) = a {
            let _ = writeln!(out, "+{a:?}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs() {
        assert_eq!(render_diff("same", "same"), "[identical]");
    }

    #[test]
    fn reports_changed_line_quoted() {
        let diff = render_diff("'  string'", "'string  '");
        assert_eq!(
            diff,
            "--- expected\n+++ actual\n@@ line 1 @@\n-\"'  string'\"\n+\"'string  '\"\n"
        );
    }

    #[test]
    fn reports_missing_trailing_line() {
        let diff = render_diff("a\nb", "a");
        assert!(diff.contains("@@ line 2 @@\n-\"b\"\n"));
        assert!(!diff.contains("line 1"));
    }
}
