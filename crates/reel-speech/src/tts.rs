//! Text-to-speech client against the public Google Translate TTS endpoint.
//!
//! The endpoint caps the text length per request, so long narration is
//! chunked on word boundaries and the returned MP3 frames are
//! concatenated. MPEG audio frames are self-delimiting, so simple byte
//! concatenation yields a playable stream.

use std::path::Path;

use async_trait::async_trait;
use reqwest::Client;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use reel_models::LanguageCode;

use crate::error::{SpeechError, SpeechResult};
use crate::SpeechSynthesizer;

const DEFAULT_BASE_URL: &str = "https://translate.google.com";

/// Maximum characters the TTS endpoint accepts per request.
pub const MAX_TTS_CHUNK_CHARS: usize = 200;

/// Speech synthesizer backed by the unauthenticated `translate_tts`
/// endpoint (the gTTS wire protocol).
pub struct GoogleSpeech {
    client: Client,
    base_url: String,
}

impl GoogleSpeech {
    /// Create a synthesizer against the production endpoint.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different base URL (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn fetch_chunk(&self, chunk: &str, language: &LanguageCode) -> SpeechResult<Vec<u8>> {
        let url = format!("{}/translate_tts", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language.as_str()),
                ("q", chunk),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SpeechError::synthesis_failed(format!(
                "endpoint returned {}",
                response.status()
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl Default for GoogleSpeech {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleSpeech {
    async fn synthesize(
        &self,
        text: &str,
        language: &LanguageCode,
        output: &Path,
    ) -> SpeechResult<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SpeechError::synthesis_failed("empty narration text"));
        }

        let chunks = chunk_text(text, MAX_TTS_CHUNK_CHARS);
        info!(
            language = %language,
            chars = text.chars().count(),
            chunks = chunks.len(),
            output = %output.display(),
            "Synthesizing narration audio"
        );

        let mut file = fs::File::create(output).await?;
        for (i, chunk) in chunks.iter().enumerate() {
            debug!(chunk = i, chars = chunk.chars().count(), "Fetching TTS chunk");
            let bytes = self.fetch_chunk(chunk, language).await?;
            file.write_all(&bytes).await?;
        }
        file.flush().await?;

        Ok(())
    }
}

/// Split text into chunks of at most `limit` characters on word
/// boundaries. A single over-long word becomes its own chunk.
pub fn chunk_text(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len == 0 {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= limit {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_chunking_respects_limit() {
        let text: String = std::iter::repeat("word ").take(120).collect();
        let chunks = chunk_text(text.trim(), MAX_TTS_CHUNK_CHARS);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= MAX_TTS_CHUNK_CHARS);
        }
        // Nothing lost in chunking.
        assert_eq!(chunks.join(" "), text.trim());
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(chunk_text("short text", 200), vec!["short text".to_string()]);
    }

    #[tokio::test]
    async fn test_synthesize_concatenates_chunks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_tts"))
            .and(query_param("tl", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"MP3".to_vec()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("narration.mp3");
        let long_text: String = std::iter::repeat("word ").take(120).collect();

        let speech = GoogleSpeech::new().with_base_url(server.uri());
        speech
            .synthesize(&long_text, &LanguageCode::english(), &out)
            .await
            .unwrap();

        let bytes = std::fs::read(&out).unwrap();
        // One MP3 blob per chunk, back to back.
        assert!(bytes.len() > 3);
        assert_eq!(bytes.len() % 3, 0);
    }

    #[tokio::test]
    async fn test_empty_text_rejected_without_request() {
        let speech = GoogleSpeech::new().with_base_url("http://127.0.0.1:1");
        let dir = tempfile::tempdir().unwrap();
        let err = speech
            .synthesize("   ", &LanguageCode::english(), &dir.path().join("o.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, SpeechError::SynthesisFailed(_)));
    }

    #[tokio::test]
    async fn test_server_error_is_synthesis_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_tts"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let speech = GoogleSpeech::new().with_base_url(server.uri());
        let dir = tempfile::tempdir().unwrap();
        let err = speech
            .synthesize("hello", &LanguageCode::english(), &dir.path().join("o.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(err, SpeechError::SynthesisFailed(_)));
    }
}
