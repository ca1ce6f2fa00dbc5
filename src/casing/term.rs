// SPDX-License-Identifier: GPL-3.0-or-later
//! A word together with the punctuation wrapped around it.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::Error;

/// Leading punctuation run, the word, trailing punctuation run.
///
/// The middle group is lazy so the trailing run is maximal; the leading run is
/// greedy so it is maximal as well. Every string matches.
static TERM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^([[:punct:]]*)(.*?)([[:punct:]]*)$").expect("term pattern is valid")
});

/// A word plus its prefix and suffix punctuation, treated as one matchable
/// unit.
///
/// `prefix` and `suffix` are maximal runs of ASCII punctuation, so `word`
/// never starts or ends with punctuation. Punctuation inside the word, as in
/// `s3-cmd` or `e.g`, stays part of the word.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    prefix: String,
    word: String,
    suffix: String,
}

impl Term {
    /// Split `raw` into its prefix, word, and suffix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedTerm`] if the split pattern does not match.
    /// The pattern accepts every string, so this indicates a defect rather
    /// than bad input.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let caps = TERM_RE
            .captures(raw)
            .ok_or_else(|| Error::MalformedTerm(raw.to_string()))?;
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str()).to_string();
        Ok(Self {
            prefix: group(1),
            word: group(2),
            suffix: group(3),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// The word in the form used as the exception table key.
    pub fn folded_word(&self) -> String {
        fold(&self.word)
    }

    /// The same term with its word case-folded.
    pub fn case_fold(&self) -> Self {
        Self {
            prefix: self.prefix.clone(),
            word: self.folded_word(),
            suffix: self.suffix.clone(),
        }
    }

    /// This term's word wrapped in `from`'s prefix and suffix.
    pub fn adopt_affixes(&self, from: &Term) -> Self {
        Self {
            prefix: from.prefix.clone(),
            word: self.word.clone(),
            suffix: from.suffix.clone(),
        }
    }

    pub fn has_affixes(&self) -> bool {
        !self.prefix.is_empty() || !self.suffix.is_empty()
    }

    /// Whether both terms have the identical word and `other`'s prefix and
    /// suffix occur inside this term's prefix and suffix.
    ///
    /// Containment is a literal substring test, so `((` contains `(` but `()`
    /// does not contain `)(`.
    pub fn same_word_affix_superset(&self, other: &Term) -> bool {
        self.word == other.word
            && self.prefix.contains(other.prefix.as_str())
            && self.suffix.contains(other.suffix.as_str())
    }

    /// Mirror of [`Term::same_word_affix_superset`].
    pub fn same_word_affix_subset(&self, other: &Term) -> bool {
        other.same_word_affix_superset(self)
    }

    pub(crate) fn same_affixes(&self, other: &Term) -> bool {
        self.prefix == other.prefix && self.suffix == other.suffix
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, self.word, self.suffix)
    }
}

/// Full Unicode case folding, used for every case-insensitive comparison.
///
/// Unlike lowercasing this folds `ß` and `SS` together.
pub(crate) fn fold(s: &str) -> String {
    caseless::default_case_fold_str(s)
}
