use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, VocabularyError>;

/// Failures while loading the symptom vocabulary at startup.
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("[Symptom Suggest] failed to read vocabulary file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[Symptom Suggest] vocabulary file {path} is not a JSON array of strings: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("[Symptom Suggest] vocabulary entry {entry:?} is not a single term")]
    MultiTermEntry { entry: String },

    #[error("[Symptom Suggest] vocabulary contains no symptoms")]
    Empty,
}
