// SPDX-License-Identifier: GPL-3.0-or-later
//! The table of terms whose casing is fixed regardless of the general rule.

use std::io;
use std::path::Path;

use indexmap::IndexMap;

use super::term::{Term, fold};
use crate::Error;

/// The default exception-list file name.
pub const IGNORE_FILE_NAME: &str = ".title-casing-ignore";

/// Mapping from case-folded word to the canonical [`Term`] registered for it.
///
/// Entries keep their registration order. When two lines fold to the same
/// word the later one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionTable {
    terms: IndexMap<String, Term>,
}

impl ExceptionTable {
    /// Build a table from raw override strings, one term each.
    ///
    /// Lines are used exactly as given; callers drop blank lines. A line made
    /// only of punctuation is stored under the empty word and never matches.
    pub fn new<I, S>(lines: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut terms = IndexMap::new();
        for line in lines {
            let term = Term::parse(line.as_ref())?;
            terms.insert(term.folded_word(), term);
        }
        Ok(Self { terms })
    }

    /// Parse an exception list: one term per line, surrounding whitespace
    /// trimmed, blank lines skipped.
    pub fn from_list(text: &str) -> Result<Self, Error> {
        Self::new(text.lines().map(str::trim).filter(|line| !line.is_empty()))
    }

    /// Load an exception list from `path`.
    ///
    /// A missing file is an empty list.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no exception list at {}, using none", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(Error::Io(path.to_path_buf(), e)),
        };
        let table = Self::from_list(&text)?;
        log::debug!(
            "loaded {} exception term(s) from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Look up the canonical term for an already case-folded word.
    pub fn lookup(&self, folded_word: &str) -> Option<&Term> {
        self.terms.get(folded_word)
    }

    /// Case-fold `word` and look it up.
    pub fn get(&self, word: &str) -> Option<&Term> {
        self.lookup(&fold(word))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Canonical terms in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.terms.values()
    }
}
