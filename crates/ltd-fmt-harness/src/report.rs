//! Report generation for conformance results.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::verify::VerificationSummary;

/// A conformance report over one or more fixture files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    pub title: String,
    /// Modes exercised (e.g. `strict+lenient`).
    pub mode: String,
    /// Timestamp (UTC).
    pub timestamp: String,
    /// `(file name, sha256)` for every fixture file that was loaded.
    #[serde(default)]
    pub fixture_digests: Vec<(String, String)>,
    pub summary: VerificationSummary,
}

impl ConformanceReport {
    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {}\n", self.title);
        let _ = writeln!(out, "- Mode: {}", self.mode);
        let _ = writeln!(out, "- Timestamp: {}", self.timestamp);
        let _ = writeln!(out, "- Total: {}", self.summary.total);
        let _ = writeln!(out, "- Passed: {}", self.summary.passed);
        let _ = writeln!(out, "- Failed: {}\n", self.summary.failed);

        if !self.fixture_digests.is_empty() {
            out.push_str("| Fixture | SHA-256 |\n|---------|---------|\n");
            for (name, digest) in &self.fixture_digests {
                let _ = writeln!(out, "| {name} | `{digest}` |");
            }
            out.push('\n');
        }

        out.push_str("| Case | Section | Mode | Status |\n");
        out.push_str("|------|---------|------|--------|\n");
        for r in &self.summary.results {
            let status = if r.passed { "PASS" } else { "FAIL" };
            let _ = writeln!(
                out,
                "| {} | {} | {} | {status} |",
                r.case_name, r.section, r.mode
            );
        }

        let mut failures = self.summary.failures().peekable();
        if failures.peek().is_some() {
            out.push_str("\n## Failures\n");
            for r in failures {
                let _ = writeln!(out, "\n### {} ({})\n", r.case_name, r.mode);
                let _ = writeln!(out, "```\n{}```", r.diff.as_deref().unwrap_or_default());
            }
        }
        out
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}
