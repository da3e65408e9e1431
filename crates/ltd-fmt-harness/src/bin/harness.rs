//! CLI entrypoint for the ltd-fmt conformance harness.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ltd_fmt_core::{Argument, FormatOptions, LogConfig, Logger, StreamSink, format_line_with};
use ltd_fmt_harness::fixtures::{self, FixtureArg};
use ltd_fmt_harness::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};
use ltd_fmt_harness::{ConformanceReport, FixtureSet, HarnessError, TestRunner, VerificationSummary};

/// Conformance tooling for ltd-fmt.
#[derive(Debug, Parser)]
#[command(name = "ltd-fmt-harness")]
#[command(about = "Conformance testing harness for the ltd-fmt format engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the engine against fixture files, in strict and lenient modes.
    Verify {
        /// Directory containing fixture JSON files.
        #[arg(long)]
        fixture: PathBuf,
        /// Output report path (markdown; JSON is written alongside).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Structured JSONL run log path.
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Render one template and print it.
    ///
    /// Arguments are typed by prefix: `i:42`, `u:42`, `f:1.5`, `c:x`, `b:true`,
    /// `s:text`. Anything else is text.
    Render {
        template: String,
        args: Vec<String>,
        /// Fall back to text on argument type mismatches.
        #[arg(long)]
        lenient: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Verify {
            fixture,
            report,
            log,
        } => verify(fixture, report, log)?,
        Command::Render {
            template,
            args,
            lenient,
        } => {
            let owned = args
                .iter()
                .map(|a| FixtureArg::parse_cli(a))
                .collect::<Result<Vec<_>, _>>()?;
            let options = if lenient {
                FormatOptions::lenient()
            } else {
                FormatOptions::strict()
            };
            let line = format_line_with(options, &template, &fixtures::arguments(&owned))?;
            ltd_fmt_core::print("%s", &[Argument::Text(&line)])?;
        }
    }
    Ok(())
}

fn verify(
    fixture: PathBuf,
    report: Option<PathBuf>,
    log: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut console = Logger::new(LogConfig::from_env(), StreamSink::new(std::io::stderr()));
    let mut emitter = match &log {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|e| HarnessError::Io {
                path: path.clone(),
                source: e,
            })?;
            Some(LogEmitter::new(std::io::BufWriter::new(file), "fixture-verify"))
        }
        None => None,
    };

    console.info(
        "Verifying against fixtures in %s",
        &[Argument::Text(&fixture.display().to_string())],
    )?;

    let mut fixture_sets = Vec::new();
    let mut digests = Vec::new();
    for path in fixtures::fixture_paths(&fixture)? {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match FixtureSet::from_file(&path) {
            Ok(set) => {
                digests.push((name, fixtures::fixture_digest(&path)?));
                fixture_sets.push(set);
            }
            Err(err) => {
                console.warn(
                    "Skipping %s: %s",
                    &[Argument::Text(&name), Argument::Text(&err.to_string())],
                )?;
            }
        }
    }
    if fixture_sets.is_empty() {
        return Err(HarnessError::NoFixtures(fixture).into());
    }

    let mut results = Vec::new();
    for mode in ["strict", "lenient"] {
        let runner = TestRunner::new("fixture-verify", mode);
        for set in &fixture_sets {
            let run = runner.run(set);
            console.debug(
                "%s [%s]: %d cases",
                &[
                    Argument::Text(&set.family),
                    Argument::Text(mode),
                    Argument::from(run.len()),
                ],
            )?;
            results.extend(run);
        }
    }

    if let Some(emitter) = emitter.as_mut() {
        emitter.emit(LogLevel::Info, "verify_start")?;
        for r in &results {
            let level = if r.passed { LogLevel::Info } else { LogLevel::Error };
            emitter.emit_entry(
                LogEntry::new("", level, "case_result")
                    .with_case(&r.case_name)
                    .with_mode(&r.mode)
                    .with_outcome(Outcome::from_passed(r.passed))
                    .with_details(serde_json::json!({
                        "section": r.section,
                        "expected": r.expected,
                        "actual": r.actual,
                    })),
            )?;
        }
    }

    let summary = VerificationSummary::from_results(results);
    for failure in summary.failures() {
        console.error(
            "FAIL %s (%s)\n%s",
            &[
                Argument::Text(&failure.case_name),
                Argument::Text(&failure.mode),
                Argument::Text(failure.diff.as_deref().unwrap_or_default()),
            ],
        )?;
    }

    let report_doc = ConformanceReport {
        title: String::from("ltd-fmt Conformance Report"),
        mode: String::from("strict+lenient"),
        timestamp: ltd_fmt_harness::timestamp(),
        fixture_digests: digests,
        summary,
    };

    console.info(
        "Verification complete: total=%d, passed=%d, failed=%d",
        &[
            Argument::from(report_doc.summary.total),
            Argument::from(report_doc.summary.passed),
            Argument::from(report_doc.summary.failed),
        ],
    )?;

    if let Some(emitter) = emitter.as_mut() {
        emitter.emit(LogLevel::Info, "verify_end")?;
        emitter.flush()?;
    }

    if let Some(report_path) = report {
        console.info(
            "Writing report to %s",
            &[Argument::Text(&report_path.display().to_string())],
        )?;
        std::fs::write(&report_path, report_doc.to_markdown())?;
        std::fs::write(report_path.with_extension("json"), report_doc.to_json())?;
    }

    if !report_doc.summary.all_passed() {
        return Err("Conformance verification failed".into());
    }
    Ok(())
}
