//! Per-request temporary asset workspaces.
//!
//! Each reel request gets its own uniquely named temp directory, so
//! concurrent requests never collide on asset file names. All temporary
//! assets live inside the workspace and are removed on every exit path;
//! only the published output survives.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{MediaError, MediaResult};

/// A scoped temp directory holding one request's intermediate assets.
pub struct ReelWorkspace {
    dir: TempDir,
}

impl ReelWorkspace {
    /// Allocate a fresh workspace under the system temp directory.
    pub fn new() -> MediaResult<Self> {
        Self::in_dir(std::env::temp_dir())
    }

    /// Allocate a fresh workspace under `base`.
    pub fn in_dir(base: impl AsRef<Path>) -> MediaResult<Self> {
        let base = base.as_ref();
        std::fs::create_dir_all(base)?;
        let dir = tempfile::Builder::new()
            .prefix(&format!("reel-{}-", Uuid::new_v4().simple()))
            .tempdir_in(base)?;
        debug!(workspace = %dir.path().display(), "Allocated reel workspace");
        Ok(Self { dir })
    }

    /// Root of the workspace.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path for the synthesized narration audio.
    pub fn audio_path(&self) -> PathBuf {
        self.dir.path().join("narration.mp3")
    }

    /// Path for the silent visual track.
    pub fn visual_path(&self) -> PathBuf {
        self.dir.path().join("visual.mp4")
    }

    /// Path the muxer writes to before publication.
    pub fn staged_output_path(&self) -> PathBuf {
        self.dir.path().join("reel.mp4")
    }

    /// Move a finished asset to its final destination.
    ///
    /// Tries a fast rename first and falls back to copy-and-delete on
    /// EXDEV, so the destination may live on another filesystem. The
    /// destination only ever sees a complete file.
    pub async fn publish(&self, staged: impl AsRef<Path>, dest: impl AsRef<Path>) -> MediaResult<()> {
        let staged = staged.as_ref();
        let dest = dest.as_ref();

        if !staged.exists() {
            return Err(MediaError::FileNotFound(staged.to_path_buf()));
        }
        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        match fs::rename(staged, dest).await {
            Ok(()) => Ok(()),
            Err(e) if is_cross_device_error(&e) => {
                debug!(
                    "Cross-device rename detected, falling back to copy+delete: {} -> {}",
                    staged.display(),
                    dest.display()
                );
                copy_and_delete(staged, dest).await
            }
            Err(e) => Err(MediaError::from(e)),
        }
    }

    /// Remove the workspace and everything in it, best effort.
    ///
    /// Deletion failures are logged, never escalated; the OS temp reaper
    /// is the backstop.
    pub fn cleanup(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            warn!(workspace = %path.display(), error = %e, "Failed to remove reel workspace");
        } else {
            debug!(workspace = %path.display(), "Removed reel workspace");
        }
    }
}

/// Check if an IO error is EXDEV (cross-device link).
fn is_cross_device_error(e: &std::io::Error) -> bool {
    e.raw_os_error() == Some(18)
}

/// Copy to a temp file beside the destination, rename, then delete source.
async fn copy_and_delete(src: &Path, dst: &Path) -> MediaResult<()> {
    let tmp_dst = dst.with_extension("tmp");

    fs::copy(src, &tmp_dst).await?;

    if let Err(e) = fs::rename(&tmp_dst, dst).await {
        let _ = std::fs::remove_file(&tmp_dst);
        return Err(MediaError::from(e));
    }

    if let Err(e) = fs::remove_file(src).await {
        warn!(
            "Failed to remove staged file after cross-device publish: {}: {}",
            src.display(),
            e
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspaces_are_distinct() {
        let a = ReelWorkspace::new().unwrap();
        let b = ReelWorkspace::new().unwrap();
        assert_ne!(a.path(), b.path());
        assert_ne!(a.audio_path(), b.audio_path());
        a.cleanup();
        b.cleanup();
    }

    #[test]
    fn test_cleanup_removes_assets() {
        let ws = ReelWorkspace::new().unwrap();
        let root = ws.path().to_path_buf();
        std::fs::write(ws.audio_path(), b"audio").unwrap();
        std::fs::write(ws.visual_path(), b"video").unwrap();
        ws.cleanup();
        assert!(!root.exists());
    }

    #[tokio::test]
    async fn test_publish_moves_staged_output() {
        let ws = ReelWorkspace::new().unwrap();
        let dest_dir = tempfile::tempdir().unwrap();
        let dest = dest_dir.path().join("nested").join("reel.mp4");

        std::fs::write(ws.staged_output_path(), b"final video").unwrap();
        ws.publish(ws.staged_output_path(), &dest).await.unwrap();

        assert!(dest.exists());
        assert!(!ws.staged_output_path().exists());
        ws.cleanup();
    }

    #[tokio::test]
    async fn test_publish_missing_staged_file() {
        let ws = ReelWorkspace::new().unwrap();
        let err = ws
            .publish(ws.staged_output_path(), "/tmp/never.mp4")
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
        ws.cleanup();
    }

    #[test]
    fn test_exdev_detection() {
        assert!(is_cross_device_error(&std::io::Error::from_raw_os_error(18)));
        assert!(!is_cross_device_error(&std::io::Error::from_raw_os_error(2)));
    }
}
