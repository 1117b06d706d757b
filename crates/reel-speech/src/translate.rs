//! Translation client against the public Google Translate endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use reel_models::LanguageCode;

use crate::error::{SpeechError, SpeechResult};
use crate::Translator;

const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";

/// Translator backed by the unauthenticated `translate_a/single` endpoint.
pub struct GoogleTranslator {
    client: Client,
    base_url: String,
    source: LanguageCode,
}

impl GoogleTranslator {
    /// Create a translator assuming English source text.
    pub fn new() -> Self {
        Self::with_source(LanguageCode::english())
    }

    /// Create a translator with an explicit source language.
    pub fn with_source(source: LanguageCode) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            source,
        }
    }

    /// Point the client at a different base URL (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Extract the translated text from the endpoint's nested-array reply.
    ///
    /// Shape: `[[["translated","original",...], ...], ...]` - the first
    /// element is a list of segment pairs whose first field holds the
    /// translated fragment.
    fn parse_response(body: &Value) -> SpeechResult<String> {
        let segments = body
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| SpeechError::malformed_response("missing segment list"))?;

        let mut translated = String::new();
        for segment in segments {
            if let Some(fragment) = segment.get(0).and_then(Value::as_str) {
                translated.push_str(fragment);
            }
        }

        if translated.is_empty() {
            return Err(SpeechError::malformed_response("no translated fragments"));
        }
        Ok(translated)
    }
}

impl Default for GoogleTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: &LanguageCode) -> SpeechResult<String> {
        if target == &self.source {
            debug!(language = %target, "Target equals source, passing text through");
            return Ok(text.to_string());
        }

        info!(source = %self.source, target = %target, chars = text.len(), "Translating reel text");

        let url = format!("{}/translate_a/single", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", self.source.as_str()),
                ("tl", target.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SpeechError::translation_failed(format!(
                "endpoint returned {}",
                response.status()
            )));
        }

        let body: Value = response.json().await?;
        Self::parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_multi_segment_response() {
        let body = json!([
            [
                ["नमस्ते ", "hello ", null],
                ["दुनिया", "world", null]
            ],
            null
        ]);
        let text = GoogleTranslator::parse_response(&body).unwrap();
        assert_eq!(text, "नमस्ते दुनिया");
    }

    #[test]
    fn test_parse_rejects_empty_body() {
        assert!(GoogleTranslator::parse_response(&json!([])).is_err());
        assert!(GoogleTranslator::parse_response(&json!(null)).is_err());
    }

    #[tokio::test]
    async fn test_pass_through_makes_no_request() {
        // No server running; a network call would fail.
        let translator = GoogleTranslator::new().with_base_url("http://127.0.0.1:1");
        let out = translator
            .translate("same language", &LanguageCode::english())
            .await
            .unwrap();
        assert_eq!(out, "same language");
    }

    #[tokio::test]
    async fn test_translate_against_mock_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("tl", "hi"))
            .and(query_param("q", "hello"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([[["नमस्ते", "hello", null]], null])),
            )
            .mount(&server)
            .await;

        let translator = GoogleTranslator::new().with_base_url(server.uri());
        let out = translator
            .translate("hello", &LanguageCode::new("hi").unwrap())
            .await
            .unwrap();
        assert_eq!(out, "नमस्ते");
    }

    #[tokio::test]
    async fn test_server_error_is_translation_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let translator = GoogleTranslator::new().with_base_url(server.uri());
        let err = translator
            .translate("hello", &LanguageCode::new("hi").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, SpeechError::TranslationFailed(_)));
    }
}
