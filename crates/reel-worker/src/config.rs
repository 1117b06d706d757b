//! Worker configuration.

use std::path::PathBuf;

use reel_models::LanguageCode;

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Base directory for per-request temp workspaces
    pub work_dir: PathBuf,
    /// Source language narration text arrives in
    pub source_language: LanguageCode,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            work_dir: std::env::temp_dir().join("newsreel"),
            source_language: LanguageCode::english(),
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            work_dir: std::env::var("REEL_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
            source_language: std::env::var("REEL_SOURCE_LANG")
                .ok()
                .and_then(|s| LanguageCode::new(s).ok())
                .unwrap_or(defaults.source_language),
        }
    }
}
