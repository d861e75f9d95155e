//! Audio track extraction using FFmpeg

use crate::MediaError;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

#[derive(Debug)]
pub struct Extractor {
    ffmpeg_path: PathBuf,
}

impl Extractor {
    pub fn new(ffmpeg_path: PathBuf) -> Self {
        Self { ffmpeg_path }
    }

    /// Drop the video track and re-encode the audio track to MP3
    pub async fn extract_mp3(&self, input: &Path, output: &Path) -> Result<(), MediaError> {
        info!("Extracting audio from {}", input.display());

        let result = Command::new(&self.ffmpeg_path)
            .args(["-hide_banner", "-loglevel", "error"])
            .arg("-i")
            .arg(input)
            .args([
                // No video
                "-vn",
                "-c:a", "libmp3lame",
                "-q:a", "2",
                "-y",
            ])
            .arg(output)
            .output()
            .await?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            debug!("ffmpeg stderr: {}", stderr);
            return Err(MediaError::FfmpegFailed {
                code: result.status.code(),
                stderr,
            });
        }

        debug!("Extracted to: {}", output.display());
        Ok(())
    }
}
