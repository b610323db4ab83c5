use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

const LOCALE_FILE: &str = "text.json";

#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    #[error("cannot read locale file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid locale file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Word lists that drive question matching and related-topic cleanup.
///
/// Keys missing from the locale file are empty, never an error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LocaleWords {
    /// Words that open a question, e.g. "who".
    pub question_words: Vec<String>,
    /// Verbs glued to the question word; note the leading spaces (" is", "'s").
    pub question_verbs: Vec<String>,
    pub articles: Vec<String>,
    /// Filler words trimmed from the tail of truncated related topics.
    pub start_words: Vec<String>,
    /// Copula joining a subject and its description, e.g. " is ".
    pub is_verb: String,
    /// Preposition introducing a category, e.g. "in ".
    pub in_word: String,
}

impl LocaleWords {
    /// Loads `<dir>/<lang>/text.json`.
    pub fn load(dir: &Path, lang: &str) -> Result<Self, LocaleError> {
        let path = dir.join(lang.to_lowercase()).join(LOCALE_FILE);
        let raw = fs::read_to_string(&path).map_err(|source| LocaleError::Io {
            path: path.clone(),
            source,
        })?;
        let words: Self =
            serde_json::from_str(&raw).map_err(|source| LocaleError::Parse {
                path: path.clone(),
                source,
            })?;
        debug!(
            path = %path.display(),
            question_words = words.question_words.len(),
            question_verbs = words.question_verbs.len(),
            "locale loaded"
        );
        Ok(words)
    }

    pub fn is_start_word(&self, word: &str) -> bool {
        self.start_words.iter().any(|w| w == word)
    }
}
