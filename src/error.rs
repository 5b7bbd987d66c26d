//! Errors raised while acquiring a secret word.

use std::path::PathBuf;
use thiserror::Error;

/// Failure modes of the word sources. The guessing engine never sees these;
/// the session loop reports them and re-prompts or aborts the round.
#[derive(Debug, Error)]
pub enum WordSourceError {
    /// The word list could not be read or holds no words.
    #[error("word list '{}' not found: {detail}", .path.display())]
    NotFound { path: PathBuf, detail: String },

    /// The remote word service failed or answered with an unusable payload.
    #[error("word service unavailable: {0}")]
    SourceUnavailable(String),

    /// A source produced an empty (or whitespace-only) word.
    #[error("secret word must not be empty")]
    EmptyWord,
}

impl WordSourceError {
    pub(crate) fn not_found(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self::NotFound {
            path: path.into(),
            detail: detail.into(),
        }
    }
}
