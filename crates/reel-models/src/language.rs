//! Language codes for translation and speech synthesis.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error raised for malformed language codes.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid language code: {0:?}")]
pub struct InvalidLanguageCode(pub String);

/// An ISO-639-1-like language code ("en", "hi", "pt-BR").
///
/// Stored lowercased (region subtags keep their case as given).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Parse and validate a language code.
    ///
    /// Accepts a 2-3 letter primary subtag, optionally followed by a
    /// hyphen and a 2-4 character region/script subtag.
    pub fn new(code: impl AsRef<str>) -> Result<Self, InvalidLanguageCode> {
        let code = code.as_ref().trim();
        let (primary, rest) = match code.split_once('-') {
            Some((p, r)) => (p, Some(r)),
            None => (code, None),
        };

        let primary_ok = (2..=3).contains(&primary.len())
            && primary.chars().all(|c| c.is_ascii_alphabetic());
        let rest_ok = rest.map_or(true, |r| {
            (2..=4).contains(&r.len()) && r.chars().all(|c| c.is_ascii_alphanumeric())
        });

        if !primary_ok || !rest_ok {
            return Err(InvalidLanguageCode(code.to_string()));
        }

        let normalized = match rest {
            Some(r) => format!("{}-{}", primary.to_ascii_lowercase(), r),
            None => primary.to_ascii_lowercase(),
        };
        Ok(Self(normalized))
    }

    /// English, the default narration source language.
    pub fn english() -> Self {
        Self("en".to_string())
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary subtag ("pt" for "pt-BR").
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
