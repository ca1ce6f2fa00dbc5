// SPDX-License-Identifier: GPL-3.0-or-later
//! Heading extraction from rendered HTML lines and Markdown source lines.

use std::sync::LazyLock;

use regex::Regex;
use similar::{ChangeTag, TextDiff};

/// An opening `<h1>`..`<h6>` tag with at least one attribute, the heading
/// text, and everything from the permalink anchor or closing tag onward.
static HTML_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([ \t]*<h[1-6][ \t]+[^>]*?=[^>]*>)(.*?)((?:<a[ \t>]|</h[1-6]>).*)$")
        .expect("HTML heading pattern is valid")
});

/// An ATX heading: the `#` run, one blank, and the text to the end of the
/// line.
static MARKDOWN_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#+[ \t])(.*)$").expect("Markdown heading pattern is valid"));

/// A tag or a character reference inside heading text.
static MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^>]*>|&(?:#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);")
        .expect("markup pattern is valid")
});

static CODE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^</?code(?:[ \t][^>]*)?>$").expect("code tag pattern is valid")
});

/// Where a heading was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingKind {
    /// A line of rendered HTML.
    Html,
    /// A line of Markdown source.
    Markdown,
}

/// A heading line split into immutable markup around the heading text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading<'a> {
    pub kind: HeadingKind,
    /// Markup before the text, e.g. `<h2 id="setup">` or `## `.
    pub prefix: &'a str,
    /// The text exactly as it appears in the line.
    pub raw_text: &'a str,
    /// The text with code markup turned into backticks and character
    /// references decoded. Same as `raw_text` for Markdown.
    pub text: String,
    /// Markup after the text, e.g. the permalink anchor and closing tag.
    pub suffix: &'a str,
}

impl Heading<'_> {
    /// The line with its text replaced by `text`.
    ///
    /// Returns the original line unchanged when `text` equals the decoded
    /// text. In HTML only the visible characters change: tags and untouched
    /// character references are copied from the source, and new characters
    /// are escaped.
    pub fn rebuild(&self, text: &str) -> String {
        if text == self.text {
            return format!("{}{}{}", self.prefix, self.raw_text, self.suffix);
        }
        let text = match self.kind {
            HeadingKind::Html => recase_html(self.raw_text, &self.text, text),
            HeadingKind::Markdown => text.to_string(),
        };
        format!("{}{}{}", self.prefix, text, self.suffix)
    }
}

/// Split a rendered HTML line into a heading, or `None` if it is not one.
pub fn extract_html_heading(line: &str) -> Option<Heading<'_>> {
    let caps = HTML_HEADING_RE.captures(line)?;
    let (prefix, raw_text, suffix) = (caps.get(1)?, caps.get(2)?, caps.get(3)?);
    Some(Heading {
        kind: HeadingKind::Html,
        prefix: prefix.as_str(),
        raw_text: raw_text.as_str(),
        text: decode_html_text(raw_text.as_str()),
        suffix: suffix.as_str(),
    })
}

/// Split a Markdown line into an ATX heading, or `None` if it is not one.
pub fn extract_markdown_heading(line: &str) -> Option<Heading<'_>> {
    let caps = MARKDOWN_HEADING_RE.captures(line)?;
    let (prefix, raw_text) = (caps.get(1)?, caps.get(2)?);
    Some(Heading {
        kind: HeadingKind::Markdown,
        prefix: prefix.as_str(),
        raw_text: raw_text.as_str(),
        text: raw_text.as_str().to_string(),
        suffix: "",
    })
}

/// A run of raw heading HTML and the text it shows.
#[derive(Debug, PartialEq)]
enum Piece<'a> {
    Text(&'a str),
    /// A character reference and its decoded text.
    Reference(&'a str, String),
    /// `<code>` or `</code>`, shown as a backtick.
    Code(&'a str),
    /// Any other tag; shows nothing.
    Tag(&'a str),
}

impl Piece<'_> {
    fn visible(&self) -> &str {
        match self {
            Piece::Text(text) => text,
            Piece::Reference(_, decoded) => decoded,
            Piece::Code(_) => "`",
            Piece::Tag(_) => "",
        }
    }
}

fn pieces(raw: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for m in MARKUP_RE.find_iter(raw) {
        if m.start() > last {
            pieces.push(Piece::Text(&raw[last..m.start()]));
        }
        let markup = m.as_str();
        pieces.push(if markup.starts_with('&') {
            let decoded = html_escape::decode_html_entities(markup);
            if decoded == markup {
                // Unknown names read as literal text.
                Piece::Text(markup)
            } else {
                Piece::Reference(markup, decoded.into_owned())
            }
        } else if CODE_TAG_RE.is_match(markup) {
            Piece::Code(markup)
        } else {
            Piece::Tag(markup)
        });
        last = m.end();
    }
    if last < raw.len() {
        pieces.push(Piece::Text(&raw[last..]));
    }
    pieces
}

/// The text a reader sees: tags dropped, `<code>` markup turned into
/// backticks, character references decoded.
fn decode_html_text(raw: &str) -> String {
    pieces(raw).iter().map(Piece::visible).collect()
}

/// What happens to one visible character of the old text.
#[derive(Debug, Clone, Default)]
struct Edit {
    removed: bool,
    /// New text placed right after the character.
    append: String,
}

/// Rewrite the raw HTML `raw`, which shows `old`, so that it shows `new`.
///
/// The two texts are aligned character by character. Kept characters are
/// copied from the source in their original spelling, inserted ones are
/// escaped, and tags always stay where they were.
fn recase_html(raw: &str, old: &str, new: &str) -> String {
    let mut lead = String::new();
    let mut edits = vec![Edit::default(); old.chars().count()];
    let mut index = 0;
    for change in TextDiff::from_chars(old, new).iter_all_changes() {
        match change.tag() {
            ChangeTag::Equal => index += 1,
            ChangeTag::Delete => {
                edits[index].removed = true;
                index += 1;
            }
            ChangeTag::Insert => match index.checked_sub(1) {
                Some(previous) => edits[previous].append.push_str(change.value()),
                None => lead.push_str(change.value()),
            },
        }
    }

    let mut html = html_escape::encode_text(&lead).into_owned();
    let mut edits = edits.iter();
    for piece in pieces(raw) {
        match piece {
            Piece::Tag(tag) => html.push_str(tag),
            Piece::Code(tag) => {
                html.push_str(tag);
                if let Some(edit) = edits.next() {
                    html.push_str(&html_escape::encode_text(&edit.append));
                }
            }
            Piece::Text(text) => {
                for (ch, edit) in text.chars().zip(edits.by_ref()) {
                    if !edit.removed {
                        html.push(ch);
                    }
                    html.push_str(&html_escape::encode_text(&edit.append));
                }
            }
            Piece::Reference(reference, decoded) => {
                let chars: Vec<char> = decoded.chars().collect();
                let own: Vec<&Edit> = edits.by_ref().take(chars.len()).collect();
                let untouched = own
                    .iter()
                    .enumerate()
                    .all(|(i, e)| !e.removed && (i + 1 == own.len() || e.append.is_empty()));
                if untouched {
                    html.push_str(reference);
                    if let Some(edit) = own.last() {
                        html.push_str(&html_escape::encode_text(&edit.append));
                    }
                    continue;
                }
                for (ch, edit) in chars.into_iter().zip(own) {
                    if !edit.removed {
                        html.push_str(&html_escape::encode_text(&ch.to_string()));
                    }
                    html.push_str(&html_escape::encode_text(&edit.append));
                }
            }
        }
    }
    html
}
