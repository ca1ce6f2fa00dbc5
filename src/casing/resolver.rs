// SPDX-License-Identifier: GPL-3.0-or-later
//! Decides whether a token met during title casing takes a canonical
//! override, and in which exact form.

use super::exceptions::ExceptionTable;
use super::term::Term;
use crate::Error;

/// Resolve `token` against `table`.
///
/// Returns the replacement for the token, or `None` when the general casing
/// rule should apply. The checks run in a fixed order and the first one that
/// holds decides:
///
/// 1. The token is the registered term verbatim: the registered term.
/// 2. Same word, the token carries at least the registered punctuation: the
///    registered word in the token's punctuation.
/// 3. Same word, the token carries less punctuation: no override. A bare
///    `echo` does not become `` `echo` ``.
/// 4. Words differ only in case, punctuation identical: the registered word
///    in the token's punctuation.
/// 5. Words differ only in case, the token carries more punctuation: no
///    override.
/// 6. Words differ only in case, the token carries less punctuation: no
///    override.
/// 7. Otherwise: the registered word in the token's punctuation.
pub fn resolve(table: &ExceptionTable, token: &str) -> Result<Option<String>, Error> {
    let lookup = Term::parse(token)?;
    if lookup.word().is_empty() {
        return Ok(None);
    }
    let Some(canonical) = table.lookup(&lookup.folded_word()) else {
        return Ok(None);
    };
    let representation = canonical.adopt_affixes(&lookup).to_string();

    if lookup == *canonical {
        return Ok(Some(canonical.to_string()));
    }
    if lookup.same_word_affix_superset(canonical) {
        return Ok(Some(representation));
    }
    if lookup.same_word_affix_subset(canonical) {
        return Ok(None);
    }

    if lookup.same_affixes(canonical) {
        return Ok(Some(representation));
    }
    let folded_lookup = lookup.case_fold();
    let folded_canonical = canonical.case_fold();
    if folded_lookup.same_word_affix_superset(&folded_canonical) {
        return Ok(None);
    }
    if folded_lookup.same_word_affix_subset(&folded_canonical) {
        return Ok(None);
    }

    Ok(Some(representation))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ExceptionTable {
        ExceptionTable::new(["FAQ", "`echo`", "mv", "s3cmd", "iPad"]).unwrap()
    }

    fn check(token: &str) -> Option<String> {
        resolve(&table(), token).unwrap()
    }

    #[test]
    fn test_exact_match_returns_canonical() {
        assert_eq!(check("`echo`").as_deref(), Some("`echo`"));
        assert_eq!(check("FAQ").as_deref(), Some("FAQ"));
        assert_eq!(check("iPad").as_deref(), Some("iPad"));
    }

    #[test]
    fn test_same_word_richer_punctuation_overrides() {
        assert_eq!(check("(`echo`)").as_deref(), Some("(`echo`)"));
        assert_eq!(check("`(echo)`").as_deref(), Some("`(echo)`"));
        assert_eq!(check("`(echo`)").as_deref(), Some("`(echo`)"));
        assert_eq!(check("(`mv`)").as_deref(), Some("(`mv`)"));
        assert_eq!(check("(FAQ)").as_deref(), Some("(FAQ)"));
    }

    #[test]
    fn test_same_word_poorer_punctuation_does_not_override() {
        assert_eq!(check("echo"), None);
        assert_eq!(check("`echo"), None);
    }

    #[test]
    fn test_case_only_difference_overrides() {
        assert_eq!(check("Faq").as_deref(), Some("FAQ"));
        assert_eq!(check("faq").as_deref(), Some("FAQ"));
        assert_eq!(check("Mv").as_deref(), Some("mv"));
        assert_eq!(check("S3CMD").as_deref(), Some("s3cmd"));
        assert_eq!(check("S3cmd").as_deref(), Some("s3cmd"));
        assert_eq!(check("IPAD").as_deref(), Some("iPad"));
        assert_eq!(check("ipad").as_deref(), Some("iPad"));
        assert_eq!(check("`ECHO`").as_deref(), Some("`echo`"));
    }

    #[test]
    fn test_case_difference_with_richer_punctuation_does_not_override() {
        assert_eq!(check("(Faq)"), None);
        assert_eq!(check("(`Echo`)"), None);
    }

    #[test]
    fn test_case_difference_with_poorer_punctuation_does_not_override() {
        assert_eq!(check("Echo"), None);
        assert_eq!(check("`Echo"), None);
    }

    #[test]
    fn test_unrelated_punctuation_falls_back_to_override() {
        // Same word, punctuation neither contains the other.
        assert_eq!(check("(echo)").as_deref(), Some("(echo)"));
        // Case differs too.
        assert_eq!(check("(Echo)").as_deref(), Some("(echo)"));
        assert_eq!(check("\"Echo\"").as_deref(), Some("\"echo\""));
    }

    #[test]
    fn test_case_folding_is_full() {
        let table = ExceptionTable::new(["Straße"]).unwrap();
        assert_eq!(resolve(&table, "STRASSE").unwrap().as_deref(), Some("Straße"));
        assert_eq!(resolve(&table, "strasse").unwrap().as_deref(), Some("Straße"));
    }

    #[test]
    fn test_words_not_in_table() {
        assert_eq!(check("(`cat`)"), None);
        assert_eq!(check("`cat`"), None);
        assert_eq!(check("cat"), None);
    }

    #[test]
    fn test_punctuation_only_token_never_matches() {
        let table = ExceptionTable::new(["--"]).unwrap();
        assert_eq!(resolve(&table, "--").unwrap(), None);
        assert_eq!(resolve(&table, "...").unwrap(), None);
    }

    #[test]
    fn test_substring_containment_not_set_containment() {
        let table = ExceptionTable::new(["()x"]).unwrap();
        // `)(` does not contain `()` as a substring, and vice versa, so this
        // is neither richer nor poorer punctuation.
        assert_eq!(resolve(&table, ")(x").unwrap().as_deref(), Some(")(x"));
        // `(()` contains `()`.
        assert_eq!(resolve(&table, "(()x").unwrap().as_deref(), Some("(()x"));
    }
}
