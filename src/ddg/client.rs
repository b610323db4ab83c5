use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::types::QueryResult;

const API_BASE: &str = "https://api.duckduckgo.com/";

#[derive(Debug, thiserror::Error)]
pub enum DdgError {
    #[error("DuckDuckGo rate limit exceeded. Please retry later.")]
    RateLimited,

    #[error("DuckDuckGo API returned status {0}")]
    Status(u16),

    #[error("malformed DuckDuckGo response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Source of structured answers for a free-text query.
/// Implemented by `DuckDuckGoClient` for production; stub implementations used in tests.
pub trait KnowledgeBackend {
    async fn query(&self, text: &str) -> Result<QueryResult, DdgError>;
}

#[derive(Clone)]
pub struct DuckDuckGoClient {
    http: Client,
    base_url: String,
}

impl DuckDuckGoClient {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            base_url: API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
        }
    }

    fn endpoint(&self, text: &str) -> Result<Url, url::ParseError> {
        Url::parse_with_params(
            &self.base_url,
            &[
                ("q", text),
                ("format", "json"),
                ("no_html", "1"),
                ("no_redirect", "1"),
                ("skip_disambig", "1"),
                ("kp", "1"),
            ],
        )
    }
}

impl KnowledgeBackend for DuckDuckGoClient {
    async fn query(&self, text: &str) -> Result<QueryResult, DdgError> {
        let url = self.endpoint(text)?;

        let response = self
            .http
            .get(url)
            .header("User-Agent", crate::USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("DuckDuckGo API rate limited");
            return Err(DdgError::RateLimited);
        }
        if !status.is_success() {
            warn!(status = %status, "DuckDuckGo API error");
            return Err(DdgError::Status(status.as_u16()));
        }

        // Served as application/x-javascript, so decode the text ourselves.
        let body = response.text().await?;
        let result: QueryResult = serde_json::from_str(&body)?;
        debug!(kind = ?result.kind, heading = %result.heading, "duckduckgo query complete");
        Ok(result)
    }
}
