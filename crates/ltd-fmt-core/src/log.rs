//! Leveled logging on top of the format engine.
//!
//! Verbosity is explicit configuration carried by each [`Logger`]; there is
//! no process-wide log level.
//!
//! Levels, from least to most verbose:
//! - `fatal`: the process cannot continue without risking data loss.
//! - `error`: an operation failed and needs intervention.
//! - `warn`: something odd happened and was recovered from.
//! - `info`: generally useful events (start/stop, assumptions made).
//! - `debug`: diagnostics.
//! - `trace`: execution tracing for developers.

use crate::argument::Argument;
use crate::config::FormatOptions;
use crate::engine::format_line_into_with;
use crate::error::FormatError;
use crate::sink::Sink;

/// Environment variable consulted by [`LogConfig::from_env`].
pub const LOG_ENV: &str = "LTD_LOG";

/// Log severity. Ordered by verbosity: `Fatal < Error < ... < Trace`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Fatal,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl Level {
    /// Parse from string (case-insensitive). Unknown values give `None`.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Option<Self> {
        Some(match s.trim().to_ascii_lowercase().as_str() {
            "fatal" | "critical" => Self::Fatal,
            "error" | "err" => Self::Error,
            "warn" | "warning" => Self::Warn,
            "info" => Self::Info,
            "debug" => Self::Debug,
            "trace" | "all" => Self::Trace,
            _ => return None,
        })
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fatal => "FATAL",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }
}

/// Logger configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    /// Most verbose level that is still written.
    pub max_level: Level,
    pub options: FormatOptions,
}

impl LogConfig {
    #[must_use]
    pub fn new(max_level: Level) -> Self {
        Self {
            max_level,
            options: FormatOptions::default(),
        }
    }

    /// Read `LTD_LOG` for the level (default `info`) and `LTD_FMT_MISMATCH`
    /// for the format options.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            max_level: std::env::var(LOG_ENV)
                .ok()
                .and_then(|v| Level::from_str_loose(&v))
                .unwrap_or_default(),
            options: FormatOptions::from_env(),
        }
    }
}

/// Writes `[LEVEL] message` lines to a sink.
#[derive(Debug)]
pub struct Logger<S: Sink> {
    config: LogConfig,
    sink: S,
}

impl<S: Sink> Logger<S> {
    #[must_use]
    pub const fn new(config: LogConfig, sink: S) -> Self {
        Self { config, sink }
    }

    #[must_use]
    pub const fn config(&self) -> &LogConfig {
        &self.config
    }

    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        level <= self.config.max_level
    }

    /// Render and write one line at `level`. Returns whether a line was
    /// written; a filtered-out level renders nothing and cannot fail.
    pub fn log(
        &mut self,
        level: Level,
        template: &str,
        args: &[Argument<'_>],
    ) -> Result<bool, FormatError> {
        if !self.enabled(level) {
            return Ok(false);
        }
        let mut line = String::with_capacity(template.len() + 8);
        line.push('[');
        line.push_str(level.label());
        line.push_str("] ");
        format_line_into_with(&mut line, self.config.options, template, args)?;
        self.sink.write_text(&line)?;
        Ok(true)
    }

    pub fn fatal(&mut self, template: &str, args: &[Argument<'_>]) -> Result<bool, FormatError> {
        self.log(Level::Fatal, template, args)
    }

    pub fn error(&mut self, template: &str, args: &[Argument<'_>]) -> Result<bool, FormatError> {
        self.log(Level::Error, template, args)
    }

    pub fn warn(&mut self, template: &str, args: &[Argument<'_>]) -> Result<bool, FormatError> {
        self.log(Level::Warn, template, args)
    }

    pub fn info(&mut self, template: &str, args: &[Argument<'_>]) -> Result<bool, FormatError> {
        self.log(Level::Info, template, args)
    }

    pub fn debug(&mut self, template: &str, args: &[Argument<'_>]) -> Result<bool, FormatError> {
        self.log(Level::Debug, template, args)
    }

    pub fn trace(&mut self, template: &str, args: &[Argument<'_>]) -> Result<bool, FormatError> {
        self.log(Level::Trace, template, args)
    }

    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }
}
