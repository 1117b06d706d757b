//! Silent visual track synthesis.
//!
//! Produces the caption-burned base layer of a reel: either a looped
//! still image or a solid-color portrait canvas with a fade-in. Audio is
//! muxed in separately.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use reel_models::encoding::{EncodingConfig, FADE_IN_FRAMES, REEL_FPS, REEL_HEIGHT, REEL_WIDTH};

use crate::command::FfmpegCommand;
use crate::error::MediaResult;
use crate::overlay::{build_drawtext_chain, DrawTextSpec};

/// Ensures even dimensions for H.264 when an arbitrary image drives the
/// output resolution.
const EVEN_DIMENSIONS_FILTER: &str = "scale=trunc(iw/2)*2:trunc(ih/2)*2";

/// Specification for one silent visual track.
#[derive(Debug, Clone)]
pub struct VisualTrackSpec {
    /// Track duration in seconds (the measured audio duration).
    pub duration: f64,
    /// Canvas color when no image is used.
    pub background_color: String,
    /// Optional still image looped as the base layer.
    pub background_image: Option<PathBuf>,
    /// Caption overlays, each gated by its display window.
    pub overlays: Vec<DrawTextSpec>,
}

impl VisualTrackSpec {
    /// Resolve the background image, treating a missing file as absent.
    fn usable_image(&self) -> Option<&Path> {
        match &self.background_image {
            Some(path) if path.exists() => Some(path),
            Some(path) => {
                debug!(
                    image = %path.display(),
                    "Background image not found, falling back to solid color"
                );
                None
            }
            None => None,
        }
    }
}

/// Build the ffmpeg command for a visual track.
///
/// Split out from [`build_visual_track`] so argument construction is
/// testable without spawning ffmpeg.
pub fn build_visual_command(spec: &VisualTrackSpec, encoding: &EncodingConfig, output: &Path) -> FfmpegCommand {
    let chain = build_drawtext_chain(&spec.overlays);

    let cmd = match spec.usable_image() {
        Some(image) => {
            // Loop the single image for the full duration; resolution is
            // driven by the image, rounded to even dimensions.
            let filter = match &chain {
                Some(c) => format!("{},{}", EVEN_DIMENSIONS_FILTER, c),
                None => EVEN_DIMENSIONS_FILTER.to_string(),
            };
            FfmpegCommand::new(image, output)
                .loop_image()
                .duration(spec.duration)
                .video_filter(filter)
        }
        None => {
            let source = format!(
                "color=c={}:s={}x{}:r={}:d={:.3}",
                spec.background_color, REEL_WIDTH, REEL_HEIGHT, REEL_FPS, spec.duration
            );
            let fade = format!("fade=t=in:s=0:n={}", FADE_IN_FRAMES);
            let filter = match &chain {
                Some(c) => format!("{},{}", fade, c),
                None => fade,
            };
            FfmpegCommand::lavfi(source, output).video_filter(filter)
        }
    };

    cmd.output_args(encoding.video_args()).no_audio()
}

/// Render the silent visual track to `output`.
///
/// Any ffmpeg failure is fatal to the request; stderr is captured into
/// the returned error for diagnostics.
pub async fn build_visual_track(
    spec: &VisualTrackSpec,
    encoding: &EncodingConfig,
    output: impl AsRef<Path>,
) -> MediaResult<()> {
    let output = output.as_ref();

    info!(
        duration = spec.duration,
        overlays = spec.overlays.len(),
        image = spec.usable_image().is_some(),
        output = %output.display(),
        "Rendering visual track"
    );

    build_visual_command(spec, encoding, output).run().await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(image: Option<PathBuf>) -> VisualTrackSpec {
        VisualTrackSpec {
            duration: 8.0,
            background_color: "black".to_string(),
            background_image: image,
            overlays: vec![DrawTextSpec {
                text: "hello".to_string(),
                start: 0.0,
                end: 8.0,
                font_size: 36,
            }],
        }
    }

    #[test]
    fn test_color_canvas_args() {
        let args = build_visual_command(&spec(None), &EncodingConfig::default(), Path::new("out.mp4"))
            .build_args();
        let joined = args.join(" ");
        assert!(joined.contains("-f lavfi"));
        assert!(joined.contains("color=c=black:s=720x1280:r=30:d=8.000"));
        assert!(joined.contains("fade=t=in:s=0:n=30"));
        assert!(joined.contains("drawtext="));
        assert!(joined.contains("-an"));
    }

    #[test]
    fn test_missing_image_falls_back_to_canvas() {
        let args = build_visual_command(
            &spec(Some(PathBuf::from("/nonexistent/bg.jpg"))),
            &EncodingConfig::default(),
            Path::new("out.mp4"),
        )
        .build_args();
        let joined = args.join(" ");
        assert!(joined.contains("color=c=black"));
        assert!(!joined.contains("-loop"));
    }

    #[test]
    fn test_existing_image_is_looped() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("bg.png");
        std::fs::write(&image, b"not really a png").unwrap();

        let args = build_visual_command(
            &spec(Some(image.clone())),
            &EncodingConfig::default(),
            Path::new("out.mp4"),
        )
        .build_args();
        let joined = args.join(" ");
        assert!(joined.contains("-loop 1"));
        assert!(joined.contains(&image.to_string_lossy().to_string()));
        assert!(joined.contains("scale=trunc(iw/2)*2"));
        // No synthesized fade when looping an image.
        assert!(!joined.contains("fade="));
    }

    #[test]
    fn test_no_overlays_still_renders() {
        let mut s = spec(None);
        s.overlays.clear();
        let args = build_visual_command(&s, &EncodingConfig::default(), Path::new("out.mp4"))
            .build_args();
        assert!(!args.join(" ").contains("drawtext="));
    }
}
