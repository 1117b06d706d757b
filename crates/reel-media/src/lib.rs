#![deny(unreachable_patterns)]
//! FFmpeg CLI wrapper for reel video synthesis.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building with captured diagnostics
//! - Audio duration probing via ffprobe with a readable-captions floor
//! - Caption segmentation (greedy word wrap + equal-partition timing)
//! - Filter-safe caption text escaping
//! - Silent visual track synthesis (looped image or solid-color canvas)
//! - Audio/video muxing with the shortest-stream policy
//! - Per-request temporary asset workspaces

pub mod captions;
pub mod command;
pub mod error;
pub mod mux;
pub mod overlay;
pub mod probe;
pub mod visual;
pub mod workspace;

pub use captions::{build_schedule, escape_overlay_text, wrap_text, WRAP_WIDTH};
pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand};
pub use error::{MediaError, MediaResult};
pub use mux::mux_reel;
pub use overlay::DrawTextSpec;
pub use probe::{audio_duration_or_floor, probe_duration, DURATION_FLOOR_SECS, MIN_USABLE_SECS};
pub use visual::{build_visual_track, VisualTrackSpec};
pub use workspace::ReelWorkspace;
