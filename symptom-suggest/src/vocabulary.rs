//! The fixed, ordered list of recognized symptoms.
//!
//! Entries are lowercase, trimmed, unique and single terms: anything the
//! parser would split (spaces, commas, the word `and`) could never be
//! suggested or round-trip through a commit. Order is significant: the
//! suggestion engine ranks matches by their position here, so common and
//! short symptoms are listed first.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::{Result, VocabularyError};
use crate::parser::parse;

/// Default vocabulary used when no external list is configured.
const BUILTIN: &[&str] = &[
    "fever",
    "cold",
    "cough",
    "headache",
    "heartburn",
    "nausea",
    "vomiting",
    "diarrhea",
    "fatigue",
    "dizziness",
    "rash",
    "itching",
    "acne",
    "anxiety",
    "insomnia",
    "depression",
    "palpitations",
    "breathlessness",
    "wheezing",
    "sneezing",
    "congestion",
    "earache",
    "toothache",
    "backache",
    "stomachache",
    "cramps",
    "bloating",
    "indigestion",
    "constipation",
    "migraine",
    "seizures",
    "numbness",
    "swelling",
    "stiffness",
    "chills",
    "jaundice",
];

/// Process-wide, read-only symptom list. Load once at startup and share by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymptomVocabulary {
    entries: Vec<String>,
}

impl SymptomVocabulary {
    /// Builds a vocabulary, lowercasing and trimming each entry.
    ///
    /// Blank entries are skipped and duplicates keep their first position.
    ///
    /// # Errors
    /// [`VocabularyError::MultiTermEntry`] for an entry the parser would split,
    /// [`VocabularyError::Empty`] if nothing remains after normalization.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for raw in entries {
            let entry = raw.as_ref().trim().to_lowercase();
            if entry.is_empty() || seen.contains(&entry) {
                continue;
            }
            if parse(&entry).terms != [entry.as_str()] {
                return Err(VocabularyError::MultiTermEntry { entry });
            }
            seen.insert(entry.clone());
            out.push(entry);
        }

        if out.is_empty() {
            return Err(VocabularyError::Empty);
        }
        Ok(Self { entries: out })
    }

    /// The built-in default list.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Loads a vocabulary file.
    ///
    /// A file whose first non-blank character is `[` is read as a JSON array
    /// of strings; anything else is read as one symptom per line.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let vocab = if text.trim_start().starts_with('[') {
            let list: Vec<String> =
                serde_json::from_str(&text).map_err(|source| VocabularyError::Json {
                    path: path.to_path_buf(),
                    source,
                })?;
            Self::from_entries(list)?
        } else {
            Self::from_entries(text.lines())?
        };

        info!(path = %path.display(), entries = vocab.len(), "symptom vocabulary loaded");
        Ok(vocab)
    }

    /// Loads from `path` when given, otherwise falls back to [`builtin`](Self::builtin).
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_path(p),
            None => {
                debug!("no vocabulary file configured; using built-in list");
                Ok(Self::builtin())
            }
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn normalizes_and_dedupes_preserving_first_position() {
        let v = SymptomVocabulary::from_entries(["Fever", " cough ", "", "fever", "COLD"]).unwrap();
        assert_eq!(v.entries(), &["fever", "cough", "cold"]);
    }

    #[test]
    fn empty_vocabulary_is_rejected() {
        let err = SymptomVocabulary::from_entries(["  ", ""]).unwrap_err();
        assert!(matches!(err, VocabularyError::Empty));
    }

    #[test]
    fn builtin_is_lowercase_and_unique() {
        let v = SymptomVocabulary::builtin();
        let rebuilt = SymptomVocabulary::from_entries(v.iter()).unwrap();
        assert_eq!(v, rebuilt);
    }

    #[test]
    fn entries_the_parser_would_split_are_rejected() {
        for bad in ["chest pain", "fever,cold", "And", "sore\tthroat"] {
            let err = SymptomVocabulary::from_entries(["cough", bad]).unwrap_err();
            assert!(
                matches!(err, VocabularyError::MultiTermEntry { .. }),
                "{bad:?} accepted"
            );
        }
        assert!(SymptomVocabulary::from_entries(["android", "sand"]).is_ok());
    }

    #[test]
    fn every_builtin_entry_survives_commit_as_one_term() {
        let v = SymptomVocabulary::builtin();
        for entry in v.iter() {
            let prefix = &entry[..entry.len().min(3)];
            let typed = parse(&format!("fever, {prefix}"));
            assert!(
                crate::engine::suggest(typed.active_term(), &v).items().contains(&entry),
                "{entry} not suggested for {prefix:?}"
            );
            let committed = crate::engine::commit(&typed, entry);
            assert_eq!(parse(&committed).terms, ["fever", entry, ""]);
        }
    }

    #[test]
    fn loads_json_array_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"["Migraine", "fever", "migraine"]"#).unwrap();
        let v = SymptomVocabulary::load_from_path(f.path()).unwrap();
        assert_eq!(v.entries(), &["migraine", "fever"]);
    }

    #[test]
    fn loads_line_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "fever\n\ncough\nsneezing").unwrap();
        let v = SymptomVocabulary::load_from_path(f.path()).unwrap();
        assert_eq!(v.entries(), &["fever", "cough", "sneezing"]);
    }

    #[test]
    fn malformed_json_reports_path() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "[1, 2").unwrap();
        let err = SymptomVocabulary::load_from_path(f.path()).unwrap_err();
        assert!(matches!(err, VocabularyError::Json { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SymptomVocabulary::load_from_path(Path::new("/definitely/not/here.json"))
            .unwrap_err();
        assert!(matches!(err, VocabularyError::Io { .. }));
    }
}
