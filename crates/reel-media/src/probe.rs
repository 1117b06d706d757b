//! FFprobe duration probing.

use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::warn;

use crate::command::check_ffprobe;
use crate::error::{MediaError, MediaResult};

/// Probed durations below this are considered degenerate.
pub const MIN_USABLE_SECS: f64 = 2.0;

/// Fallback duration when the probe fails or returns a degenerate value.
/// Keeps captions on screen long enough to read.
pub const DURATION_FLOOR_SECS: f64 = 5.0;

/// FFprobe JSON output format.
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
}

impl FfprobeOutput {
    fn has_audio_stream(&self) -> bool {
        self.streams
            .iter()
            .any(|s| s.codec_type.as_deref() == Some("audio"))
    }
}

/// Probe an audio file for its container duration in seconds.
///
/// Fails with [`MediaError::NoAudioStream`] when the container decodes
/// but carries no audio stream.
pub async fn probe_duration(path: impl AsRef<Path>) -> MediaResult<f64> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    check_ffprobe()?;

    let output = Command::new("ffprobe")
        .args(["-v", "quiet", "-print_format", "json", "-show_format", "-show_streams"])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::FfprobeFailed {
            message: "FFprobe failed".to_string(),
            stderr: Some(String::from_utf8_lossy(&output.stderr).to_string()),
        });
    }

    let probe: FfprobeOutput = serde_json::from_slice(&output.stdout)?;

    if !probe.has_audio_stream() {
        return Err(MediaError::NoAudioStream(path.to_path_buf()));
    }

    probe
        .format
        .duration
        .as_deref()
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| MediaError::FfprobeFailed {
            message: format!("No duration in probe output for {}", path.display()),
            stderr: None,
        })
}

/// Probe an audio asset, clamping to the readable-captions floor.
///
/// Probe failures are soft: the floor is returned and the cause logged,
/// so a flaky probe never aborts the pipeline.
pub async fn audio_duration_or_floor(path: impl AsRef<Path>) -> f64 {
    let path = path.as_ref();
    match probe_duration(path).await {
        Ok(duration) if duration >= MIN_USABLE_SECS => duration,
        Ok(duration) => {
            warn!(
                audio = %path.display(),
                probed = duration,
                floor = DURATION_FLOOR_SECS,
                "Probed audio duration too short, clamping to floor"
            );
            DURATION_FLOOR_SECS
        }
        Err(e) => {
            warn!(
                audio = %path.display(),
                error = %e,
                floor = DURATION_FLOOR_SECS,
                "Audio duration probe failed, falling back to floor"
            );
            DURATION_FLOOR_SECS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probe_missing_file() {
        let err = probe_duration("/nonexistent/audio.mp3").await.unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_floor_on_missing_file() {
        let d = audio_duration_or_floor("/nonexistent/audio.mp3").await;
        assert!((d - DURATION_FLOOR_SECS).abs() < f64::EPSILON);
    }

    #[test]
    fn test_probe_output_parsing() {
        let json = r#"{"format":{"duration":"12.480000"},"streams":[{"codec_type":"audio"}]}"#;
        let probe: FfprobeOutput = serde_json::from_str(json).unwrap();
        let d: f64 = probe.format.duration.as_ref().unwrap().parse().unwrap();
        assert!((d - 12.48).abs() < 1e-9);
        assert!(probe.has_audio_stream());
    }

    #[test]
    fn test_probe_output_without_audio_stream() {
        let json = r#"{"format":{"duration":"3.0"},"streams":[{"codec_type":"video"}]}"#;
        let probe: FfprobeOutput = serde_json::from_str(json).unwrap();
        assert!(!probe.has_audio_stream());

        // Older builds may omit the streams array entirely.
        let json = r#"{"format":{"duration":"3.0"}}"#;
        let probe: FfprobeOutput = serde_json::from_str(json).unwrap();
        assert!(!probe.has_audio_stream());
    }
}
