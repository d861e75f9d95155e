//! Audio acquisition: download a container, extract its audio, fall back to
//! the audio-only stream when extraction cannot read the container.

use crate::config::Config;
use crate::downloader::{Downloader, RetryPolicy, StreamSource};
use crate::entry::{has_extension, with_extension};
use crate::error::Result;
use crate::streams::{Container, StreamKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tunefetch_media::{Ffmpeg, MediaBackend, MediaError, VIDEO_FPS};

/// Extension of extracted audio files
pub const AUDIO_EXTENSION: &str = "mp3";

#[derive(Debug)]
pub struct AudioAcquirer<S, M> {
    source: S,
    media: M,
    container: Container,
}

impl AudioAcquirer<Downloader, Ffmpeg> {
    /// Acquirer backed by yt-dlp and FFmpeg as configured
    pub fn from_config(config: &Config) -> Result<Self> {
        let retry = RetryPolicy {
            attempts: config.download.retries,
            delay: config.retry_delay(),
        };
        let downloader = Downloader::new(config.yt_dlp_path()?, config.download.container, retry);
        let media = Ffmpeg::new(config.ffmpeg_path()?, config.ffprobe_path()?);
        Ok(Self::new(downloader, media, config.download.container))
    }
}

impl<S: StreamSource, M: MediaBackend> AudioAcquirer<S, M> {
    pub fn new(source: S, media: M, container: Container) -> Self {
        Self {
            source,
            media,
            container,
        }
    }

    #[cfg(test)]
    pub(crate) fn source(&self) -> &S {
        &self.source
    }

    /// Fetch the audio behind `url` into `output_dir` and return its path.
    ///
    /// `filename` gets the container extension appended if it lacks it.
    pub async fn acquire(&self, url: &str, output_dir: &Path, filename: &str) -> Result<PathBuf> {
        tokio::fs::create_dir_all(output_dir).await?;
        let dest = output_dir.join(with_extension(filename, self.container.extension()));

        let container_path = self.source.fetch(url, StreamKind::Best, &dest).await?;

        if is_audio_only(&self.media, &container_path).await? {
            debug!("{} has no video track", container_path.display());
            return Ok(container_path);
        }

        let extracted = self.extract_audio(&container_path).await;
        tokio::fs::remove_file(&container_path).await?;

        match extracted {
            Ok(audio_path) => {
                info!("Saved audio to {}", audio_path.display());
                Ok(audio_path)
            }
            Err(e @ MediaError::MissingMetadata { .. }) => {
                warn!(
                    "Error extracting audio from {}: {}. Downloading the audio stream instead",
                    container_path.display(),
                    e
                );
                Ok(self.source.fetch(url, StreamKind::AudioOnly, &dest).await?)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn extract_audio(&self, video: &Path) -> std::result::Result<PathBuf, MediaError> {
        if !has_extension(video, self.container.extension()) {
            return Err(MediaError::UnsupportedInput {
                expected: self.container.to_string(),
                path: video.to_path_buf(),
            });
        }

        let output = video.with_extension(AUDIO_EXTENSION);
        self.media.extract_audio(video, &output).await?;
        Ok(output)
    }
}

/// Whether the file at `path` holds no video.
///
/// Only a missing video frame rate means audio-only. Any other failure to
/// open the file is passed through.
pub async fn is_audio_only<M: MediaBackend>(
    media: &M,
    path: &Path,
) -> std::result::Result<bool, MediaError> {
    match media.open_video(path).await {
        Ok(_) => Ok(false),
        Err(e) if e.is_missing(VIDEO_FPS) => Ok(true),
        Err(e) => Err(e),
    }
}
