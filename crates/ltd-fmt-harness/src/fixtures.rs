//! Fixture loading and management.

use std::path::Path;

use ltd_fmt_core::Argument;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::HarnessError;

/// Owned, serializable form of an [`Argument`].
///
/// Serialized externally tagged: `{"int": 5}`, `{"text": "x"}`. `uint`
/// covers unsigned values past `i64::MAX`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureArg {
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    Char(char),
    Bool(bool),
    Raw(Vec<u8>),
}

impl FixtureArg {
    /// Borrow as an engine argument.
    #[must_use]
    pub fn as_argument(&self) -> Argument<'_> {
        match self {
            Self::Int(v) => Argument::Integer(i128::from(*v)),
            Self::Uint(v) => Argument::Integer(i128::from(*v)),
            Self::Float(v) => Argument::Float(*v),
            Self::Text(s) => Argument::Text(s),
            Self::Char(c) => Argument::Char(*c),
            Self::Bool(b) => Argument::Boolean(*b),
            Self::Raw(bytes) => Argument::Raw(bytes),
        }
    }

    /// Parse a command-line argument typed by prefix.
    ///
    /// `i:42`, `u:42`, `f:1.5`, `c:x`, `b:true`, `s:text`; anything without a known
    /// prefix is text.
    pub fn parse_cli(input: &str) -> Result<Self, HarnessError> {
        let invalid = |reason: &str| HarnessError::Argument {
            input: input.to_string(),
            reason: reason.to_string(),
        };
        let Some((prefix, rest)) = input.split_once(':') else {
            return Ok(Self::Text(input.to_string()));
        };
        match prefix {
            "i" => rest
                .parse()
                .map(Self::Int)
                .map_err(|_| invalid("expected an integer")),
            "u" => rest
                .parse()
                .map(Self::Uint)
                .map_err(|_| invalid("expected an unsigned integer")),
            "f" => rest
                .parse()
                .map(Self::Float)
                .map_err(|_| invalid("expected a float")),
            "c" => {
                let mut chars = rest.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Self::Char(c)),
                    _ => Err(invalid("expected exactly one character")),
                }
            }
            "b" => rest
                .parse()
                .map(Self::Bool)
                .map_err(|_| invalid("expected true or false")),
            "s" => Ok(Self::Text(rest.to_string())),
            _ => Ok(Self::Text(input.to_string())),
        }
    }
}

/// Borrow a slice of fixture arguments as engine arguments.
#[must_use]
pub fn arguments(args: &[FixtureArg]) -> Vec<Argument<'_>> {
    args.iter().map(FixtureArg::as_argument).collect()
}

/// What a fixture case expects the engine to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    /// Exact rendered text.
    Output(String),
    /// An error of this kind (`malformed_directive`, `argument_underflow`,
    /// `argument_type_mismatch`, `field_too_large`).
    Error(String),
}

impl Expectation {
    /// Canonical comparison string (errors render as `error:<kind>`).
    #[must_use]
    pub fn canonical(&self) -> String {
        match self {
            Self::Output(s) => s.clone(),
            Self::Error(kind) => format!("error:{kind}"),
        }
    }
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Behavior area the case covers (e.g. "width", "dynamic").
    pub section: String,
    pub template: String,
    #[serde(default)]
    pub args: Vec<FixtureArg>,
    pub expected: Expectation,
    /// Mismatch policy the case applies to: `strict`, `lenient` or `both`.
    pub mode: String,
}

/// A collection of fixture cases for one behavior family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    pub family: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
        Ok(Self::from_json(&content)?)
    }
}

/// SHA-256 of a fixture file, hex encoded.
pub fn fixture_digest(path: &Path) -> Result<String, HarnessError> {
    let bytes = std::fs::read(path).map_err(|e| HarnessError::io(path, e))?;
    let digest = Sha256::digest(&bytes);
    Ok(digest.iter().map(|b| format!("{b:02x}")).collect())
}

/// All `*.json` files directly inside `dir`, sorted by path.
pub fn fixture_paths(dir: &Path) -> Result<Vec<std::path::PathBuf>, HarnessError> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| HarnessError::io(dir, e))?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    paths.sort();
    Ok(paths)
}
