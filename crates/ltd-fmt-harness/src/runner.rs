//! Test execution engine.

use ltd_fmt_core::{FormatOptions, MismatchPolicy, format_with};

use crate::diff;
use crate::fixtures::{FixtureCase, FixtureSet, arguments};
use crate::verify::VerificationResult;

/// Runs a fixture set under one mismatch policy and collects results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
    /// Mode being tested (`strict` or `lenient`).
    pub mode: String,
}

impl TestRunner {
    #[must_use]
    pub fn new(campaign: impl Into<String>, mode: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
            mode: mode.into(),
        }
    }

    fn options(&self) -> FormatOptions {
        FormatOptions {
            mismatch: MismatchPolicy::from_str_loose(&self.mode),
        }
    }

    /// Run every case that applies to this runner's mode.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        let options = self.options();
        fixture_set
            .cases
            .iter()
            .filter(|case| mode_matches(&self.mode, &case.mode))
            .map(|case| {
                let expected = case.expected.canonical();
                let actual = execute_case(case, options);
                let passed = actual == expected;
                VerificationResult {
                    case_name: case.name.clone(),
                    section: case.section.clone(),
                    mode: options.mismatch.as_str().to_string(),
                    passed,
                    diff: (!passed).then(|| diff::render_diff(&expected, &actual)),
                    expected,
                    actual,
                }
            })
            .collect()
    }
}

fn mode_matches(active_mode: &str, case_mode: &str) -> bool {
    let active = active_mode.to_ascii_lowercase();
    let case = case_mode.to_ascii_lowercase();
    case == active || case == "both"
}

/// Render one case; errors become `error:<kind>`.
pub fn execute_case(case: &FixtureCase, options: FormatOptions) -> String {
    let args = arguments(&case.args);
    match format_with(options, &case.template, &args) {
        Ok(out) => out,
        Err(err) => format!("error:{}", err.kind().as_str()),
    }
}
