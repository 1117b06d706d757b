//! Audio/video muxing into the final reel container.

use std::path::Path;
use tracing::info;

use reel_models::EncodingConfig;

use crate::command::run_ffmpeg;
use crate::error::{MediaError, MediaResult};

/// Build the mux argument list: video copied verbatim, audio encoded,
/// output trimmed to the shorter stream.
pub fn build_mux_args(
    visual: &Path,
    audio: &Path,
    encoding: &EncodingConfig,
    output: &Path,
) -> Vec<String> {
    let mut args = vec![
        "-y".to_string(),
        "-v".to_string(),
        "error".to_string(),
        "-i".to_string(),
        visual.to_string_lossy().to_string(),
        "-i".to_string(),
        audio.to_string_lossy().to_string(),
        "-c:v".to_string(),
        "copy".to_string(),
    ];
    args.extend(encoding.audio_args());
    // Shortest stream wins: no trailing silence or frozen video.
    args.push("-shortest".to_string());
    args.push("-movflags".to_string());
    args.push("+faststart".to_string());
    args.push(output.to_string_lossy().to_string());
    args
}

/// Mux the silent visual track and the narration audio into `output`.
///
/// Fatal on any encode error; ffmpeg's stderr is carried in the error.
pub async fn mux_reel(
    visual: impl AsRef<Path>,
    audio: impl AsRef<Path>,
    encoding: &EncodingConfig,
    output: impl AsRef<Path>,
) -> MediaResult<()> {
    let visual = visual.as_ref();
    let audio = audio.as_ref();
    let output = output.as_ref();

    if !visual.exists() {
        return Err(MediaError::FileNotFound(visual.to_path_buf()));
    }
    if !audio.exists() {
        return Err(MediaError::FileNotFound(audio.to_path_buf()));
    }

    info!(
        visual = %visual.display(),
        audio = %audio.display(),
        output = %output.display(),
        "Muxing reel"
    );

    run_ffmpeg(&build_mux_args(visual, audio, encoding, output)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_mux_args_shape() {
        let args = build_mux_args(
            &PathBuf::from("visual.mp4"),
            &PathBuf::from("audio.mp3"),
            &EncodingConfig::default(),
            &PathBuf::from("reel.mp4"),
        );
        let joined = args.join(" ");
        assert!(joined.contains("-i visual.mp4 -i audio.mp3"));
        assert!(joined.contains("-c:v copy"));
        assert!(joined.contains("-c:a aac"));
        assert!(joined.contains("-shortest"));
        assert_eq!(args.last().unwrap(), "reel.mp4");
    }

    #[tokio::test]
    async fn test_mux_missing_inputs() {
        let err = mux_reel(
            "/nonexistent/visual.mp4",
            "/nonexistent/audio.mp3",
            &EncodingConfig::default(),
            "/tmp/never-written.mp4",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }
}
