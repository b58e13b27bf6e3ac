//! Symptom input parsing and live autosuggest.
//!
//! - [`parse`] splits free text into terms and marks the one being typed.
//! - [`suggest`] matches that term against a [`SymptomVocabulary`].
//! - [`commit`] rewrites the text after a suggestion is picked.
//! - [`Autosuggest`] keeps the per-input state (text, parse, dismissal).
//!
//! # Example
//! ```
//! use symptom_suggest::{SymptomVocabulary, commit, parse, suggest};
//!
//! let vocab = SymptomVocabulary::builtin();
//! let parsed = parse("fever, he");
//! let list = suggest(parsed.active_term(), &vocab);
//! assert_eq!(list.items()[0], "headache");
//! assert_eq!(commit(&parsed, "headache"), "fever, headache, ");
//! ```

pub mod engine;
pub mod errors;
pub mod parser;
pub mod vocabulary;

pub use engine::{Autosuggest, HideReason, Suggestions, TERM_SEPARATOR, commit, suggest};
pub use errors::VocabularyError;
pub use parser::{ParsedInput, parse};
pub use vocabulary::SymptomVocabulary;
