//! Shared data models for the NewsReel backend.
//!
//! This crate provides Serde-serializable types for:
//! - Reel generation requests and identifiers
//! - Caption lines and timed caption schedules
//! - Language codes for translation/speech
//! - Encoding configuration
//! - Scraped articles and their sentiment labels

pub mod article;
pub mod caption;
pub mod encoding;
pub mod language;
pub mod reel;

// Re-export common types
pub use article::{Article, Sentiment};
pub use caption::{CaptionLine, CaptionSchedule};
pub use encoding::EncodingConfig;
pub use language::LanguageCode;
pub use reel::{ReelRequest, RequestId};
