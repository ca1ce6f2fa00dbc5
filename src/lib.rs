//! Titlecasing checks and fixes the capitalization of navigation titles and
//! page headings, keeping a user-supplied list of terms (acronyms, product
//! names, command names) in their fixed casing.
//!
//! # Example
//!
//! ```
//! use titlecasing::{CapitalizationType, ExceptionTable, Mode, TitleCaser, process_markdown};
//!
//! let exceptions = ExceptionTable::new(["FAQ", "`echo`"]).unwrap();
//! let caser = TitleCaser::new(CapitalizationType::Title, exceptions);
//! let outcome = process_markdown("# the faq for `echo`\n", &caser, Mode::Fix, None).unwrap();
//! assert_eq!(outcome.fixed().unwrap(), "# The FAQ for `echo`\n");
//! ```

pub mod casing;
pub mod config;
pub mod heading;
pub mod nav;
pub mod page;
pub mod report;

use std::path::{Path, PathBuf};

pub use casing::{CapitalizationType, ExceptionTable, Term, TitleCaser, resolve};
pub use nav::{NavItem, load_nav, nav_start_line, nav_to_yaml, process_nav};
pub use page::{process_markdown, process_page_content};
pub use report::{Diagnostic, Mode, Outcome};

/// Errors that can occur while checking or fixing headings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A token could not be split into punctuation and word.
    #[error("cannot split term {0:?} into prefix, word, and suffix")]
    MalformedTerm(String),
    /// The mode is neither `warn` nor `fix`.
    #[error("unexpected mode: {0}")]
    UnknownMode(String),
    /// The capitalization type is neither `title` nor `first_letter`.
    #[error("unexpected capitalization_type: {0}")]
    UnknownCapitalizationType(String),
    /// An I/O error on the given path.
    #[error("failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),
    /// A navigation configuration is not valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// A navigation entry has an unexpected shape.
    #[error("invalid nav: {0}")]
    InvalidNav(String),
}

/// The kind of document a heading pass runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Markdown source with ATX headings.
    Markdown,
    /// Rendered page HTML.
    Html,
    /// An mkdocs-style YAML configuration with a `nav` entry.
    Nav,
}

impl DocumentKind {
    /// Guess the kind of a document from its file name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if name == "mkdocs.yml" || name == "mkdocs.yaml" {
            return Some(Self::Nav);
        }
        match path.extension()?.to_str()? {
            "md" | "markdown" => Some(Self::Markdown),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

/// Check or fix a whole document.
///
/// For [`DocumentKind::Nav`] the fixed output is the corrected `nav` entry as
/// YAML, and diagnostics are numbered from the line after `nav:`.
pub fn process_document(
    text: &str,
    kind: DocumentKind,
    caser: &TitleCaser,
    mode: Mode,
    location: Option<&str>,
) -> Result<Outcome<String>, Error> {
    match kind {
        DocumentKind::Markdown => process_markdown(text, caser, mode, location),
        DocumentKind::Html => process_page_content(text, caser, mode, location),
        DocumentKind::Nav => {
            let items = load_nav(text)?;
            let start_line = nav_start_line(text).unwrap_or(0);
            Ok(match process_nav(&items, caser, mode, start_line, location)? {
                Outcome::Diagnostics(diagnostics) => Outcome::Diagnostics(diagnostics),
                Outcome::Fixed(items) => Outcome::Fixed(nav_to_yaml(&items)?),
            })
        }
    }
}
