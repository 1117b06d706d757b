//! Worker error types and pipeline stages.

use std::fmt;
use thiserror::Error;

use reel_media::MediaError;
use reel_speech::SpeechError;

pub type WorkerResult<T> = Result<T, WorkerError>;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Translating,
    SynthesizingAudio,
    ProbingDuration,
    SegmentingCaptions,
    RenderingVisualTrack,
    Muxing,
    Cleanup,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Validating => "validating",
            Stage::Translating => "translating",
            Stage::SynthesizingAudio => "synthesizing_audio",
            Stage::ProbingDuration => "probing_duration",
            Stage::SegmentingCaptions => "segmenting_captions",
            Stage::RenderingVisualTrack => "rendering_visual_track",
            Stage::Muxing => "muxing",
            Stage::Cleanup => "cleanup",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// Errors surfaced by the reel pipeline and news aggregation.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Translation failed: {0}")]
    Translation(#[source] SpeechError),

    #[error("Speech synthesis failed: {0}")]
    Synthesis(#[source] SpeechError),

    #[error("Workspace allocation failed: {0}")]
    Workspace(#[source] MediaError),

    #[error("Visual track rendering failed: {0}")]
    Render(#[source] MediaError),

    #[error("Muxing failed: {0}")]
    Mux(#[source] MediaError),

    #[error("Publishing output failed: {0}")]
    Publish(#[source] MediaError),

    #[error("News source error: {0}")]
    Source(String),
}

impl WorkerError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn source_failed(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// The pipeline stage this error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            WorkerError::InvalidInput(_) | WorkerError::Workspace(_) => Stage::Validating,
            WorkerError::Translation(_) => Stage::Translating,
            WorkerError::Synthesis(_) => Stage::SynthesizingAudio,
            WorkerError::Render(_) => Stage::RenderingVisualTrack,
            WorkerError::Mux(_) | WorkerError::Publish(_) => Stage::Muxing,
            WorkerError::Source(_) => Stage::Validating,
        }
    }

    /// External renderer diagnostics, when the failure captured any.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            WorkerError::Render(e) | WorkerError::Mux(e) | WorkerError::Publish(e)
            | WorkerError::Workspace(e) => e.diagnostics(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_mapping() {
        let err = WorkerError::invalid_input("empty text");
        assert_eq!(err.stage(), Stage::Validating);

        let err = WorkerError::Translation(SpeechError::translation_failed("503"));
        assert_eq!(err.stage(), Stage::Translating);

        let err = WorkerError::Mux(MediaError::ffmpeg_failed("boom", None, Some(1)));
        assert_eq!(err.stage(), Stage::Muxing);
    }

    #[test]
    fn test_diagnostics_exposed() {
        let err = WorkerError::Render(MediaError::ffmpeg_failed(
            "render failed",
            Some("stderr text".to_string()),
            Some(1),
        ));
        assert_eq!(err.diagnostics(), Some("stderr text"));
        assert!(WorkerError::invalid_input("x").diagnostics().is_none());
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::SynthesizingAudio.to_string(), "synthesizing_audio");
        assert_eq!(Stage::Done.to_string(), "done");
    }
}
