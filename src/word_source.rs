//! Where secret words come from.
//!
//! The session loop only sees the [`WordSource`] trait; the standard
//! implementation reads a local word list or asks a random-word web service.

use crate::engine::SecretWord;
use crate::error::WordSourceError;
use crate::info_log;
use crate::wordbank::choose_word_from_file;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://random-word-api.herokuapp.com/word";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub trait WordSource {
    /// Word at the 1-based `index` of the list in `path`, wrapping around.
    fn fetch_by_index(&self, path: &Path, index: i64) -> Result<SecretWord, WordSourceError>;

    fn fetch_random(&self) -> Result<SecretWord, WordSourceError>;
}

/// Parse `["word", ...]` and return the first element.
pub fn parse_random_word_payload(body: &str) -> Result<SecretWord, WordSourceError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| WordSourceError::SourceUnavailable(format!("malformed payload: {e}")))?;
    let word = value
        .as_array()
        .and_then(|items| items.first())
        .and_then(Value::as_str)
        .ok_or_else(|| {
            WordSourceError::SourceUnavailable(
                "expected a JSON array starting with a word".to_string(),
            )
        })?;
    SecretWord::new(word).map_err(|_| {
        WordSourceError::SourceUnavailable("service returned an empty word".to_string())
    })
}

/// Blocking client for the random-word service.
#[derive(Debug, Clone)]
pub struct RandomWordApi {
    url: String,
    client: reqwest::blocking::Client,
}

impl RandomWordApi {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, WordSourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WordSourceError::SourceUnavailable(e.to_string()))?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn fetch(&self) -> Result<SecretWord, WordSourceError> {
        info_log!("Requesting a random word from {}", self.url);
        let body = self
            .client
            .get(&self.url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::text)
            .map_err(|e| {
                info_log!("Word service request failed: {e}");
                WordSourceError::SourceUnavailable(e.to_string())
            })?;
        parse_random_word_payload(&body)
    }
}

/// File lookup plus the random-word service.
#[derive(Debug, Clone)]
pub struct StandardWordSource {
    api: RandomWordApi,
}

impl StandardWordSource {
    #[must_use]
    pub fn new(api: RandomWordApi) -> Self {
        Self { api }
    }
}

impl WordSource for StandardWordSource {
    fn fetch_by_index(&self, path: &Path, index: i64) -> Result<SecretWord, WordSourceError> {
        choose_word_from_file(path, index)
    }

    fn fetch_random(&self) -> Result<SecretWord, WordSourceError> {
        self.api.fetch()
    }
}
