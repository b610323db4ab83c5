//! Machine translation between the session locale and English.

mod google;

pub use google::GoogleTranslateClient;

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("translation service returned status {0}")]
    Status(u16),

    #[error("unexpected translation response: {0}")]
    UnexpectedBody(String),

    #[error("invalid translation URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Translates text between two primary language subtags ("de", "en").
/// Implemented by `GoogleTranslateClient` for production; recording stubs used in tests.
pub trait Translator {
    async fn translate(&self, text: &str, from: &str, to: &str)
    -> Result<String, TranslateError>;
}
