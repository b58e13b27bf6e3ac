//! Splits free-text symptom input into an ordered list of terms.
//!
//! Delimiters are commas, runs of whitespace and the standalone word `and`
//! (case-insensitive, whole word only: `android` or `sand` stay intact).
//! The last element is the term the user is still typing.

use std::sync::OnceLock;

use regex::Regex;

static DELIMITER: OnceLock<Regex> = OnceLock::new();

fn delimiter() -> &'static Regex {
    DELIMITER.get_or_init(|| Regex::new(r"(?i),|\band\b|\s+").expect("delimiter pattern"))
}

/// Terms derived from the raw symptom text on every input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    /// Trimmed terms in input order. Never empty: the trailing element is
    /// always present, even when it is an empty string.
    pub terms: Vec<String>,
    /// Index of the in-progress term. Always `terms.len() - 1`.
    pub active_term_index: usize,
}

impl ParsedInput {
    /// The trailing, currently-being-typed term (may be empty).
    pub fn active_term(&self) -> &str {
        &self.terms[self.active_term_index]
    }

    /// Terms the user has already finished typing.
    pub fn completed_terms(&self) -> &[String] {
        &self.terms[..self.active_term_index]
    }

    /// Finished terms joined by `", "`, i.e. the normalized symptom list.
    pub fn normalized(&self) -> String {
        let mut out: Vec<&str> = self.completed_terms().iter().map(String::as_str).collect();
        if !self.active_term().is_empty() {
            out.push(self.active_term());
        }
        out.join(", ")
    }
}

/// Parses raw symptom text.
///
/// Adjacent delimiters (`"fever and, cold"`) do not produce empty interior
/// terms. A text ending in a delimiter yields an empty active term.
pub fn parse(text: &str) -> ParsedInput {
    let pieces: Vec<&str> = delimiter().split(text).collect();
    let last = pieces.len().saturating_sub(1);

    let mut terms: Vec<String> = pieces
        .iter()
        .take(last)
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    terms.push(pieces.get(last).map(|p| p.trim()).unwrap_or_default().to_string());

    let active_term_index = terms.len() - 1;
    ParsedInput {
        terms,
        active_term_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_comma_whitespace_and_word_and() {
        let p = parse("fever and cold, cou");
        assert_eq!(p.terms, vec!["fever", "cold", "cou"]);
        assert_eq!(p.active_term_index, 2);
        assert_eq!(p.active_term(), "cou");
    }

    #[test]
    fn and_is_case_insensitive_but_whole_word() {
        let p = parse("Fever AND android, sand");
        assert_eq!(p.terms, vec!["Fever", "android", "sand"]);
    }

    #[test]
    fn trailing_delimiter_leaves_empty_active_term() {
        assert_eq!(parse("fever, ").terms, vec!["fever", ""]);
        assert_eq!(parse("fever and").terms, vec!["fever", ""]);
        assert_eq!(parse("fever ").terms, vec!["fever", ""]);
        assert_eq!(parse("fever and ").active_term(), "");
    }

    #[test]
    fn empty_text_has_single_empty_term() {
        let p = parse("");
        assert_eq!(p.terms, vec![""]);
        assert_eq!(p.active_term_index, 0);
        assert_eq!(p.normalized(), "");
    }

    #[test]
    fn adjacent_delimiters_collapse() {
        let p = parse(" ,fever,,  cold and and cough");
        assert_eq!(p.terms, vec!["fever", "cold", "cough"]);
    }

    #[test]
    fn normalized_rejoins_terms() {
        assert_eq!(parse("fever and cold,cough").normalized(), "fever, cold, cough");
        assert_eq!(parse("fever   cold, ").normalized(), "fever, cold");
    }

    #[test]
    fn deterministic() {
        let text = "headache and nausea, dizz";
        assert_eq!(parse(text), parse(text));
    }
}
