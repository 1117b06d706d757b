//! Error types for the speech adapters.

use thiserror::Error;

/// Result type for adapter operations.
pub type SpeechResult<T> = Result<T, SpeechError>;

/// Errors from the translation/TTS collaborators.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Translation request failed: {0}")]
    TranslationFailed(String),

    #[error("Speech synthesis failed: {0}")]
    SynthesisFailed(String),

    #[error("Unexpected response shape: {0}")]
    MalformedResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpeechError {
    pub fn translation_failed(msg: impl Into<String>) -> Self {
        Self::TranslationFailed(msg.into())
    }

    pub fn synthesis_failed(msg: impl Into<String>) -> Self {
        Self::SynthesisFailed(msg.into())
    }

    pub fn malformed_response(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }
}
