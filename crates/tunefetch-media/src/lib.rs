//! Media toolkit bridge for tunefetch
//!
//! Wraps the external tools that understand containers:
//! - ffprobe: stream metadata, used to open a file as a video
//! - ffmpeg: demuxing the audio track out of a video

mod error;
mod extract;
mod probe;

pub use error::{MediaError, AUDIO_FPS, VIDEO_FPS};
pub use extract::Extractor;
pub use probe::{ProbeOutput, ProbeStream, Prober, VideoInfo};

use std::path::{Path, PathBuf};
use tracing::debug;

/// Operations the acquisition flow needs from a media library.
///
/// Opening a file without a video frame rate fails with
/// [`MediaError::MissingMetadata`] keyed [`VIDEO_FPS`], which is how callers
/// recognise an audio-only container.
#[allow(async_fn_in_trait)]
pub trait MediaBackend {
    async fn open_video(&self, path: &Path) -> Result<VideoInfo, MediaError>;

    /// Write the audio track of `video` to `output`
    async fn extract_audio(&self, video: &Path, output: &Path) -> Result<(), MediaError>;
}

/// [`MediaBackend`] backed by the ffprobe and ffmpeg binaries
#[derive(Debug)]
pub struct Ffmpeg {
    prober: Prober,
    extractor: Extractor,
}

impl Ffmpeg {
    pub fn new(ffmpeg_path: PathBuf, ffprobe_path: PathBuf) -> Self {
        Self {
            prober: Prober::new(ffprobe_path),
            extractor: Extractor::new(ffmpeg_path),
        }
    }
}

impl MediaBackend for Ffmpeg {
    async fn open_video(&self, path: &Path) -> Result<VideoInfo, MediaError> {
        let info = self.prober.probe(path).await?.as_video(path)?;
        match info.audio_sample_rate {
            Some(rate) => debug!(
                "Opened {} as video at {:.2} fps with {} Hz audio",
                path.display(),
                info.fps,
                rate
            ),
            None => debug!("Opened {} as video at {:.2} fps", path.display(), info.fps),
        }
        Ok(info)
    }

    async fn extract_audio(&self, video: &Path, output: &Path) -> Result<(), MediaError> {
        self.prober.probe(video).await?.as_video_with_audio(video)?;
        self.extractor.extract_mp3(video, output).await
    }
}
