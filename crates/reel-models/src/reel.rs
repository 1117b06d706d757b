//! Reel generation request models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;
use validator::Validate;

use crate::LanguageCode;

/// Default caption font size in pixels.
pub const DEFAULT_FONT_SIZE: u32 = 36;

/// Default canvas background color when no image is supplied.
pub const DEFAULT_BACKGROUND_COLOR: &str = "black";

/// Unique identifier for a reel request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub String);

impl RequestId {
    /// Generate a new random request ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A request to generate one narrated, captioned reel.
///
/// `text` must be non-empty after trimming; the pipeline rejects the
/// request before any external call otherwise.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReelRequest {
    /// Narration source text (pre-translation).
    #[validate(length(min = 1, message = "reel text must be non-empty"))]
    pub text: String,

    /// Target language for translation and speech.
    pub target_language: LanguageCode,

    /// Where the finished video is written.
    pub output_path: PathBuf,

    /// Caption font size in pixels.
    #[serde(default = "default_font_size")]
    #[validate(range(min = 1, message = "font size must be positive"))]
    pub font_size: u32,

    /// Canvas background color (ffmpeg color name or 0xRRGGBB).
    #[serde(default = "default_background_color")]
    pub background_color: String,

    /// Optional still image used as the looped background layer.
    /// A nonexistent path behaves as if no image was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image_path: Option<PathBuf>,
}

fn default_font_size() -> u32 {
    DEFAULT_FONT_SIZE
}

fn default_background_color() -> String {
    DEFAULT_BACKGROUND_COLOR.to_string()
}

impl ReelRequest {
    /// Create a request with default styling.
    pub fn new(
        text: impl Into<String>,
        target_language: LanguageCode,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            text: text.into(),
            target_language,
            output_path: output_path.into(),
            font_size: DEFAULT_FONT_SIZE,
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            background_image_path: None,
        }
    }

    /// Set the caption font size.
    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Set the canvas background color.
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    /// Set the background image path.
    pub fn with_background_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.background_image_path = Some(path.into());
        self
    }

    /// Whether the request carries any usable narration text.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}
