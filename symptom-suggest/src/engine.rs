//! Vocabulary-ordered prefix suggestions for the active symptom term.
//!
//! [`suggest`] and [`commit`] are pure. [`Autosuggest`] wraps them with the
//! little state an input box needs: the current text, the derived
//! [`ParsedInput`], and whether the user dismissed the list.

use tracing::debug;

use crate::parser::{ParsedInput, parse};
use crate::vocabulary::SymptomVocabulary;

/// Separator used when rewriting the input after a suggestion is chosen.
pub const TERM_SEPARATOR: &str = ", ";

/// Why the suggestion surface is not shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideReason {
    /// Nothing is being typed (empty text or trailing delimiter).
    NoActiveTerm,
    /// The active term matches no vocabulary entry.
    NoMatch,
    /// The user interacted outside the input and the list.
    Dismissed,
}

/// Outcome of matching the active term against the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestions<'v> {
    NoActiveTerm,
    NoMatch,
    /// Non-empty, in vocabulary order.
    Matches(Vec<&'v str>),
}

impl<'v> Suggestions<'v> {
    pub fn items(&self) -> &[&'v str] {
        match self {
            Suggestions::Matches(items) => items,
            _ => &[],
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, Suggestions::Matches(_))
    }

    pub fn hide_reason(&self) -> Option<HideReason> {
        match self {
            Suggestions::NoActiveTerm => Some(HideReason::NoActiveTerm),
            Suggestions::NoMatch => Some(HideReason::NoMatch),
            Suggestions::Matches(_) => None,
        }
    }
}

/// Returns every vocabulary entry starting with `active_term`, ignoring case.
///
/// Ranking is vocabulary order, never alphabetical or by match length.
pub fn suggest<'v>(active_term: &str, vocabulary: &'v SymptomVocabulary) -> Suggestions<'v> {
    let term = active_term.trim().to_lowercase();
    if term.is_empty() {
        return Suggestions::NoActiveTerm;
    }

    let matches: Vec<&str> = vocabulary
        .iter()
        .filter(|entry| entry.to_lowercase().starts_with(&term))
        .collect();

    if matches.is_empty() {
        Suggestions::NoMatch
    } else {
        Suggestions::Matches(matches)
    }
}

/// Replaces the active term with `chosen` and leaves a trailing separator.
///
/// `commit(&parse("fever, he"), "headache") == "fever, headache, "`
pub fn commit(parsed: &ParsedInput, chosen: &str) -> String {
    let mut terms: Vec<&str> = parsed.completed_terms().iter().map(String::as_str).collect();
    terms.push(chosen);

    let mut out = terms.join(TERM_SEPARATOR);
    out.push_str(TERM_SEPARATOR);
    out
}

/// Input-box state for live symptom completion.
#[derive(Debug, Clone)]
pub struct Autosuggest<'v> {
    vocabulary: &'v SymptomVocabulary,
    limit: Option<usize>,
    text: String,
    parsed: ParsedInput,
    suggestions: Suggestions<'v>,
    dismissed: bool,
}

impl<'v> Autosuggest<'v> {
    pub fn new(vocabulary: &'v SymptomVocabulary) -> Self {
        Self {
            vocabulary,
            limit: None,
            text: String::new(),
            parsed: parse(""),
            suggestions: Suggestions::NoActiveTerm,
            dismissed: false,
        }
    }

    /// Caps the number of visible suggestions. `0` means unlimited.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = (limit > 0).then_some(limit);
        self
    }

    /// Input-change handler: re-parses the text and recomputes suggestions.
    ///
    /// Any earlier dismissal is cleared, typing reopens the list.
    pub fn on_input(&mut self, text: &str) {
        self.text = text.to_string();
        self.parsed = parse(text);
        self.suggestions = suggest(self.parsed.active_term(), self.vocabulary);
        self.dismissed = false;
        debug!(
            active = %self.parsed.active_term(),
            matches = self.suggestions.items().len(),
            "autosuggest refreshed"
        );
    }

    /// Outside-interaction handler. Hides the list until the next input.
    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }

    /// Commits the visible suggestion at `index` and returns the rewritten text.
    ///
    /// Returns `None` when the list is hidden or `index` is out of range.
    pub fn choose(&mut self, index: usize) -> Option<&str> {
        let chosen = *self.visible().get(index)?;
        let text = commit(&self.parsed, chosen);
        self.on_input(&text);
        Some(&self.text)
    }

    /// Suggestions to display; empty whenever the surface is hidden.
    pub fn visible(&self) -> &[&'v str] {
        if self.dismissed {
            return &[];
        }
        let items = self.suggestions.items();
        match self.limit {
            Some(n) if items.len() > n => &items[..n],
            _ => items,
        }
    }

    pub fn hide_reason(&self) -> Option<HideReason> {
        if self.dismissed {
            Some(HideReason::Dismissed)
        } else {
            self.suggestions.hide_reason()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parsed(&self) -> &ParsedInput {
        &self.parsed
    }

    pub fn suggestions(&self) -> &Suggestions<'v> {
        &self.suggestions
    }
}
