//! Error types for the media toolkit bridge

use std::path::PathBuf;
use thiserror::Error;

/// Metadata key reported missing when a file has no video frame rate.
pub const VIDEO_FPS: &str = "video_fps";

/// Metadata key reported missing when a file has no audio stream.
pub const AUDIO_FPS: &str = "audio_fps";

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("ffprobe failed with exit code {code:?}: {stderr}")]
    FfprobeFailed { code: Option<i32>, stderr: String },

    #[error("FFmpeg failed with exit code {code:?}: {stderr}")]
    FfmpegFailed { code: Option<i32>, stderr: String },

    #[error("Missing '{key}' metadata in {}", .path.display())]
    MissingMetadata { key: String, path: PathBuf },

    #[error("Input is not a {expected} container: {}", .path.display())]
    UnsupportedInput { expected: String, path: PathBuf },

    #[error("Failed to parse probe output: {0}")]
    ProbeParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    pub(crate) fn missing(key: &str, path: &std::path::Path) -> Self {
        MediaError::MissingMetadata {
            key: key.to_string(),
            path: path.to_path_buf(),
        }
    }

    /// Whether this is the missing-metadata signal for `key`
    pub fn is_missing(&self, key: &str) -> bool {
        matches!(self, MediaError::MissingMetadata { key: k, .. } if k == key)
    }
}
