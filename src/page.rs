// SPDX-License-Identifier: GPL-3.0-or-later
//! Heading checks over whole documents, one line at a time.

use crate::Error;
use crate::casing::TitleCaser;
use crate::heading::{Heading, extract_html_heading, extract_markdown_heading};
use crate::report::{Diagnostic, Mode, Outcome};

/// Check or fix the headings of rendered page HTML.
///
/// Rendered markup carries no source positions, so diagnostics have no line
/// number. In fix mode non-heading lines pass through untouched.
pub fn process_page_content(
    html: &str,
    caser: &TitleCaser,
    mode: Mode,
    location: Option<&str>,
) -> Result<Outcome<String>, Error> {
    process_lines(html, caser, mode, location, false, extract_html_heading)
}

/// Check or fix the ATX headings of a Markdown document.
///
/// Lines inside fenced code blocks are never headings. Diagnostics carry
/// 1-based line numbers.
pub fn process_markdown(
    source: &str,
    caser: &TitleCaser,
    mode: Mode,
    location: Option<&str>,
) -> Result<Outcome<String>, Error> {
    let mut fence = Fence::default();
    process_lines(source, caser, mode, location, true, |line| {
        if fence.observe(line) {
            None
        } else {
            extract_markdown_heading(line)
        }
    })
}

fn process_lines<'a, F>(
    text: &'a str,
    caser: &TitleCaser,
    mode: Mode,
    location: Option<&str>,
    numbered: bool,
    mut extract: F,
) -> Result<Outcome<String>, Error>
where
    F: FnMut(&'a str) -> Option<Heading<'a>>,
{
    let mut diagnostics = Vec::new();
    let mut output = String::with_capacity(text.len());

    for (index, raw_line) in text.split_inclusive('\n').enumerate() {
        let (line, ending) = split_line_ending(raw_line);
        let Some(heading) = extract(line) else {
            if mode == Mode::Fix {
                output.push_str(raw_line);
            }
            continue;
        };

        let proposed = caser.to_title_case(&heading.text)?;
        match mode {
            Mode::Warn => {
                if heading.text != proposed {
                    diagnostics.push(Diagnostic {
                        location: location.map(str::to_string),
                        line_number: numbered.then_some(index + 1),
                        original: heading.text.clone(),
                        proposed,
                    });
                }
            }
            Mode::Fix => {
                output.push_str(&heading.rebuild(&proposed));
                output.push_str(ending);
            }
        }
    }

    Ok(match mode {
        Mode::Warn => Outcome::Diagnostics(diagnostics),
        Mode::Fix => Outcome::Fixed(output),
    })
}

/// Split off the `\n` or `\r\n` that ends `line`, if any.
fn split_line_ending(line: &str) -> (&str, &str) {
    let content = line
        .strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .unwrap_or(line);
    line.split_at(content.len())
}

/// Tracks whether the current line is inside a fenced code block.
#[derive(Debug, Default)]
struct Fence {
    /// Fence character and length of the open fence.
    open: Option<(char, usize)>,
}

impl Fence {
    /// Feed the next line; returns `true` if the line is a fence delimiter or
    /// inside a fenced block.
    fn observe(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start_matches(' ');
        let indent = line.len() - trimmed.len();
        let marker = trimmed
            .chars()
            .next()
            .filter(|c| indent <= 3 && (*c == '`' || *c == '~'));
        let run = marker.map_or(0, |m| trimmed.chars().take_while(|&c| c == m).count());

        match (self.open, marker) {
            (None, Some(m)) if run >= 3 => {
                self.open = Some((m, run));
                true
            }
            (None, _) => false,
            (Some((open_char, open_len)), Some(m))
                if m == open_char
                    && run >= open_len
                    && trimmed[run * m.len_utf8()..].trim().is_empty() =>
            {
                self.open = None;
                true
            }
            (Some(_), _) => true,
        }
    }
}
