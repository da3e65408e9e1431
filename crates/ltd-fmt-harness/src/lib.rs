//! Conformance harness for ltd-fmt.
//!
//! This crate provides:
//! - Fixtures: JSON cases pairing a template and typed arguments with the
//!   expected output or error kind
//! - Runner: executes fixtures under the strict and lenient mismatch policies
//! - Reports: markdown + JSON summaries with per-case diffs
//! - Structured logs: JSONL records of a verification run

#![forbid(unsafe_code)]

pub mod diff;
pub mod error;
pub mod fixtures;
pub mod report;
pub mod runner;
pub mod structured_log;
pub mod verify;

pub use error::HarnessError;
pub use fixtures::{Expectation, FixtureArg, FixtureCase, FixtureSet};
pub use report::ConformanceReport;
pub use runner::TestRunner;
pub use verify::{VerificationResult, VerificationSummary};

/// Current UTC timestamp in the format used by reports and logs.
#[must_use]
pub fn timestamp() -> String {
    structured_log::now_utc()
}
