use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::{TranslateError, Translator};

const API_BASE: &str = "https://translate.googleapis.com/translate_a/single";

/// Client for the keyless `client=gtx` endpoint of Google Translate.
#[derive(Clone)]
pub struct GoogleTranslateClient {
    http: Client,
    base_url: String,
}

impl GoogleTranslateClient {
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
}

impl Translator for GoogleTranslateClient {
    async fn translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<String, TranslateError> {
        let url = Url::parse_with_params(
            &self.base_url,
            &[
                ("client", "gtx"),
                ("sl", from),
                ("tl", to),
                ("dt", "t"),
                ("q", text),
            ],
        )?;

        let response = self
            .http
            .get(url)
            .header("User-Agent", crate::USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "translation request failed");
            return Err(TranslateError::Status(status.as_u16()));
        }

        let body: Value = response.json().await?;
        let translated = join_segments(&body)?;
        debug!(from, to, chars = translated.chars().count(), "translated");
        Ok(translated)
    }
}

/// The body is `[[["<translated>", "<source>", ...], ...], ...]`; long inputs
/// come back as several segments.
fn join_segments(body: &Value) -> Result<String, TranslateError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::UnexpectedBody(snippet(body)))?;

    let mut out = String::new();
    for segment in segments {
        if let Some(part) = segment.get(0).and_then(Value::as_str) {
            out.push_str(part);
        }
    }
    Ok(out)
}

fn snippet(body: &Value) -> String {
    let text = body.to_string();
    match text.char_indices().nth(200) {
        Some((end, _)) => text[..end].to_string(),
        None => text,
    }
}


#[cfg(test)]
mod http_tests {
    use super::*;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn translate_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("sl", "de"))
            .and(query_param("tl", "en"))
            .and(query_param("q", "der Präsident"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                [["the president", "der Präsident", null, null, 10]],
                null,
                "de"
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = GoogleTranslateClient::with_base_url(Client::new(), &server.uri());
        let out = client.translate("der Präsident", "de", "en").await.unwrap();
        assert_eq!(out, "the president");
    }

    #[tokio::test]
    async fn translate_error_status_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let client = GoogleTranslateClient::with_base_url(Client::new(), &server.uri());
        let result = client.translate("hallo", "de", "en").await;
        assert!(matches!(result, Err(TranslateError::Status(503))));
    }
}
