//! Capitalization of heading text with fixed-case exceptions.

mod exceptions;
mod resolver;
mod term;
mod title;

pub use exceptions::{ExceptionTable, IGNORE_FILE_NAME};
pub use resolver::resolve;
pub use term::Term;
pub use title::{WordCallback, capitalize_words, title_case};

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::Error;

/// Which general capitalization rule applies to headings.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CapitalizationType {
    /// Title case: small words stay lowercase in the middle of a heading.
    #[default]
    Title,
    /// The first letter of every word is capitalized.
    FirstLetter,
}

impl FromStr for CapitalizationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "first_letter" => Ok(Self::FirstLetter),
            other => Err(Error::UnknownCapitalizationType(other.to_string())),
        }
    }
}

impl fmt::Display for CapitalizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => f.write_str("title"),
            Self::FirstLetter => f.write_str("first_letter"),
        }
    }
}

/// Applies a capitalization rule, consulting an [`ExceptionTable`] for every
/// word.
///
/// A `TitleCaser` is read-only once built and can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct TitleCaser {
    capitalization_type: CapitalizationType,
    exceptions: ExceptionTable,
}

impl TitleCaser {
    pub fn new(capitalization_type: CapitalizationType, exceptions: ExceptionTable) -> Self {
        Self {
            capitalization_type,
            exceptions,
        }
    }

    pub fn capitalization_type(&self) -> CapitalizationType {
        self.capitalization_type
    }

    pub fn exceptions(&self) -> &ExceptionTable {
        &self.exceptions
    }

    /// The canonical form of `heading`: trimmed, capitalized, and trimmed
    /// again.
    pub fn to_title_case(&self, heading: &str) -> Result<String, Error> {
        let heading = heading.trim();
        let mut callback = |word: &str| resolve(&self.exceptions, word);
        let cased = match self.capitalization_type {
            CapitalizationType::Title => title_case(heading, &mut callback)?,
            CapitalizationType::FirstLetter => capitalize_words(heading, &mut callback)?,
        };
        Ok(cased.trim().to_string())
    }
}
