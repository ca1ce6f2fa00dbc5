// SPDX-License-Identifier: GPL-3.0-or-later
//! Operating modes and their results.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::Error;

/// Whether headings are reported or rewritten.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Report every mismatched heading; leave the input alone.
    #[default]
    Warn,
    /// Rewrite mismatched headings silently.
    Fix,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warn" => Ok(Self::Warn),
            "fix" => Ok(Self::Fix),
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warn => f.write_str("warn"),
            Self::Fix => f.write_str("fix"),
        }
    }
}

/// A heading whose capitalization differs from the canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// File the heading came from, when known.
    pub location: Option<String>,
    /// Line number, when the source can provide one.
    pub line_number: Option<usize>,
    pub original: String,
    pub proposed: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = self.location.as_deref().filter(|l| !l.is_empty()) {
            write!(f, "{}: ", location)?;
        }
        if let Some(line_number) = self.line_number {
            write!(f, "({}): ", line_number)?;
        }
        write!(
            f,
            "Heading \"{}\" should be \"{}\".",
            self.original, self.proposed
        )
    }
}

/// What a pass produced: diagnostics in warn mode, corrected output in fix
/// mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Diagnostics(Vec<Diagnostic>),
    Fixed(T),
}

impl<T> Outcome<T> {
    /// Diagnostics of a warn pass; empty for a fix pass.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Outcome::Diagnostics(diagnostics) => diagnostics,
            Outcome::Fixed(_) => &[],
        }
    }

    /// Output of a fix pass.
    pub fn fixed(self) -> Option<T> {
        match self {
            Outcome::Diagnostics(_) => None,
            Outcome::Fixed(fixed) => Some(fixed),
        }
    }
}
