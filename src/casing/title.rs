// SPDX-License-Identifier: GPL-3.0-or-later
//! General capitalization rules.
//!
//! Both rules walk the text word by word and hand every word to a callback
//! first. When the callback returns a replacement it is used verbatim and the
//! rule never looks at that word.

use crate::Error;

/// Words kept lowercase in the middle of a title.
const SMALL_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "en", "for", "if", "in", "of", "on", "or", "the",
    "to", "v", "via", "vs",
];

/// Punctuation after which the next word starts a new phrase.
const PHRASE_BREAKS: &[char] = &[':', '.', '!', '?'];

/// Per-word override hook: `Ok(Some(replacement))` or `Ok(None)` for the
/// general rule.
pub trait WordCallback: FnMut(&str) -> Result<Option<String>, Error> {}

impl<F> WordCallback for F where F: FnMut(&str) -> Result<Option<String>, Error> {}

/// Segment of the input: a run of whitespace or a run of anything else.
#[derive(Debug, PartialEq)]
enum Segment<'a> {
    Space(&'a str),
    Word(&'a str),
}

fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_space = None;
    for (i, ch) in text.char_indices() {
        let is_space = ch.is_whitespace();
        match in_space {
            Some(prev) if prev != is_space => {
                segments.push(segment(&text[start..i], prev));
                start = i;
            }
            _ => {}
        }
        in_space = Some(is_space);
    }
    if let Some(prev) = in_space {
        segments.push(segment(&text[start..], prev));
    }
    segments
}

fn segment(s: &str, is_space: bool) -> Segment<'_> {
    if is_space {
        Segment::Space(s)
    } else {
        Segment::Word(s)
    }
}

/// Title-case `text`.
///
/// - Text without any lowercase letter is lowercased word by word first.
/// - Words with an inline period (`example.com`, `e.g.`) are kept.
/// - Words with an uppercase letter past the first (`iPad`, `API`) are kept.
/// - Small words are lowercase unless first, last, or starting a phrase.
/// - Hyphenated and slash-separated words are capitalized part by part.
/// - Otherwise the first letter or digit is uppercased.
pub fn title_case<F: WordCallback>(text: &str, callback: &mut F) -> Result<String, Error> {
    let all_caps =
        text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase);
    let segments = segments(text);
    let word_count = segments
        .iter()
        .filter(|s| matches!(s, Segment::Word(_)))
        .count();

    let mut result = String::with_capacity(text.len());
    let mut index = 0;
    let mut starts_phrase = true;
    for segment in segments {
        match segment {
            Segment::Space(space) => result.push_str(space),
            Segment::Word(word) => {
                let is_edge = index == 0 || index + 1 == word_count;
                let cased = title_case_word(word, is_edge || starts_phrase, all_caps, callback)?;
                result.push_str(&cased);
                starts_phrase = word.ends_with(PHRASE_BREAKS);
                index += 1;
            }
        }
    }
    Ok(result)
}

fn title_case_word<F: WordCallback>(
    word: &str,
    capitalize_small: bool,
    all_caps: bool,
    callback: &mut F,
) -> Result<String, Error> {
    if let Some(replacement) = callback(word)? {
        return Ok(replacement);
    }

    let word = if all_caps {
        word.to_lowercase()
    } else {
        word.to_string()
    };

    if has_inline_period(&word) || is_deliberately_cased(&word) {
        return Ok(word);
    }

    if !word.contains("://") {
        for separator in ['-', '/'] {
            if word.contains(separator) {
                return compound(&word, separator, callback);
            }
        }
    }

    if !capitalize_small && is_small_word(&word) {
        return Ok(word.to_lowercase());
    }

    Ok(capitalize_first(&word))
}

/// Capitalize every part of a hyphenated or slash-separated word.
fn compound<F: WordCallback>(word: &str, separator: char, callback: &mut F) -> Result<String, Error> {
    let mut parts = Vec::new();
    for part in word.split(separator) {
        let cased = match callback(part)? {
            Some(replacement) => replacement,
            None if is_deliberately_cased(part) => part.to_string(),
            None => capitalize_first(part),
        };
        parts.push(cased);
    }
    Ok(parts.join(&separator.to_string()))
}

/// Capitalize the first letter of every word and lowercase the rest.
pub fn capitalize_words<F: WordCallback>(text: &str, callback: &mut F) -> Result<String, Error> {
    let mut result = String::with_capacity(text.len());
    for segment in segments(text) {
        match segment {
            Segment::Space(space) => result.push_str(space),
            Segment::Word(word) => match callback(word)? {
                Some(replacement) => result.push_str(&replacement),
                None => result.push_str(&capitalize_first_letter_only(word)),
            },
        }
    }
    Ok(result)
}

fn has_inline_period(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    chars
        .windows(3)
        .any(|w| w[0].is_alphanumeric() && w[1] == '.' && w[2].is_alphanumeric())
}

/// Words such as `iPad`, `GitHub`, or `API` carry their own casing.
fn is_deliberately_cased(word: &str) -> bool {
    word.chars()
        .filter(|c| c.is_alphabetic())
        .skip(1)
        .any(char::is_uppercase)
}

fn is_small_word(word: &str) -> bool {
    let core = word
        .trim_matches(|c: char| c.is_ascii_punctuation())
        .to_lowercase();
    SMALL_WORDS.contains(&core.as_str())
}

/// Uppercase the first letter or digit; leave the rest untouched.
fn capitalize_first(word: &str) -> String {
    let mut result = String::with_capacity(word.len());
    let mut done = false;
    for ch in word.chars() {
        if !done && ch.is_alphanumeric() {
            result.extend(ch.to_uppercase());
            done = true;
        } else {
            result.push(ch);
        }
    }
    result
}

/// Uppercase the first letter and lowercase every later one.
fn capitalize_first_letter_only(word: &str) -> String {
    let mut result = String::with_capacity(word.len());
    let mut seen_letter = false;
    for ch in word.chars() {
        if !ch.is_alphabetic() {
            result.push(ch);
        } else if seen_letter {
            result.extend(ch.to_lowercase());
        } else {
            result.extend(ch.to_uppercase());
            seen_letter = true;
        }
    }
    result
}
