//! Translation and text-to-speech adapter clients.
//!
//! The pipeline talks to these collaborators through the [`Translator`]
//! and [`SpeechSynthesizer`] traits so tests can substitute stubs. The
//! shipped implementations wrap the public Google Translate endpoints.

use std::path::Path;

use async_trait::async_trait;

use reel_models::LanguageCode;

pub mod error;
pub mod translate;
pub mod tts;

pub use error::{SpeechError, SpeechResult};
pub use translate::GoogleTranslator;
pub use tts::GoogleSpeech;

/// Translates text into a target language.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target`. Pass-through when the target
    /// equals the source language.
    async fn translate(&self, text: &str, target: &LanguageCode) -> SpeechResult<String>;
}

/// Converts text into a speech audio asset.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` spoken in `language`, writing an MP3 to `output`.
    async fn synthesize(
        &self,
        text: &str,
        language: &LanguageCode,
        output: &Path,
    ) -> SpeechResult<()>;
}
