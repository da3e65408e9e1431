//! Format options.
//!
//! The type-mismatch policy decides what happens when an argument's tag does
//! not fit the directive consuming it:
//! - `strict` (default): the call fails with `ArgumentTypeMismatch`.
//! - `lenient`: the value falls back to its natural text, laid out with the
//!   string rules (width and left-adjust only). A mismatched `*` width or
//!   precision is treated as absent; the argument is still consumed.
//!
//! Options are always passed explicitly. [`FormatOptions::from_env`] reads
//! `LTD_FMT_MISMATCH` each time it is called and caches nothing.

/// Environment variable consulted by [`FormatOptions::from_env`].
pub const MISMATCH_ENV: &str = "LTD_FMT_MISMATCH";

/// How to treat an argument whose tag does not fit its directive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MismatchPolicy {
    #[default]
    Strict,
    Lenient,
}

impl MismatchPolicy {
    /// Parse from string (case-insensitive). Unknown values select `Strict`.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" | "loose" | "fallback" | "stringify" => Self::Lenient,
            _ => Self::Strict,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }

    #[must_use]
    pub const fn falls_back(self) -> bool {
        matches!(self, Self::Lenient)
    }
}

/// Options for a single format call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatOptions {
    pub mismatch: MismatchPolicy,
}

impl FormatOptions {
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            mismatch: MismatchPolicy::Strict,
        }
    }

    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            mismatch: MismatchPolicy::Lenient,
        }
    }

    /// Build options from `LTD_FMT_MISMATCH`, defaulting to strict.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            mismatch: std::env::var(MISMATCH_ENV)
                .map(|v| MismatchPolicy::from_str_loose(&v))
                .unwrap_or_default(),
        }
    }
}
