//! Container probing using ffprobe

use crate::error::{MediaError, AUDIO_FPS, VIDEO_FPS};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

#[derive(Debug)]
pub struct Prober {
    ffprobe_path: PathBuf,
}

/// Parsed `ffprobe -show_streams` output
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeOutput {
    #[serde(default)]
    pub streams: Vec<ProbeStream>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProbeStream {
    #[serde(default)]
    pub codec_type: Option<String>,
    #[serde(default)]
    pub avg_frame_rate: Option<String>,
    #[serde(default)]
    pub sample_rate: Option<String>,
    #[serde(default)]
    pub disposition: Disposition,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Disposition {
    #[serde(default)]
    pub attached_pic: u8,
}

/// What a file looks like once opened as a video
#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    pub fps: f64,
    pub audio_sample_rate: Option<u32>,
}

impl Prober {
    pub fn new(ffprobe_path: PathBuf) -> Self {
        Self { ffprobe_path }
    }

    pub async fn probe(&self, input: &Path) -> Result<ProbeOutput, MediaError> {
        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-show_streams", "-of", "json"])
            .arg(input)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!("ffprobe stderr: {}", stderr);
            return Err(MediaError::FfprobeFailed {
                code: output.status.code(),
                stderr,
            });
        }

        ProbeOutput::parse(&String::from_utf8_lossy(&output.stdout))
    }
}

impl ProbeOutput {
    pub fn parse(json: &str) -> Result<Self, MediaError> {
        serde_json::from_str(json).map_err(|e| MediaError::ProbeParse(e.to_string()))
    }

    /// Frame rate of the first real video stream. Cover art is not video.
    pub fn video_fps(&self) -> Option<f64> {
        self.streams
            .iter()
            .filter(|s| s.codec_type.as_deref() == Some("video"))
            .filter(|s| s.disposition.attached_pic == 0)
            .find_map(|s| s.avg_frame_rate.as_deref().and_then(parse_frame_rate))
    }

    pub fn audio_stream(&self) -> Option<&ProbeStream> {
        self.streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("audio"))
    }

    /// Interpret the probe as a video, the way a video clip loader would
    pub fn as_video(&self, path: &Path) -> Result<VideoInfo, MediaError> {
        let fps = self
            .video_fps()
            .ok_or_else(|| MediaError::missing(VIDEO_FPS, path))?;

        let audio_sample_rate = self
            .audio_stream()
            .and_then(|s| s.sample_rate.as_deref())
            .and_then(|r| r.parse().ok());

        Ok(VideoInfo {
            fps,
            audio_sample_rate,
        })
    }

    /// Like [`as_video`](Self::as_video) but also requires an audio track
    pub fn as_video_with_audio(&self, path: &Path) -> Result<VideoInfo, MediaError> {
        let info = self.as_video(path)?;
        if self.audio_stream().is_none() {
            return Err(MediaError::missing(AUDIO_FPS, path));
        }
        Ok(info)
    }
}

/// Parse an ffprobe rational like "30000/1001". "0/0" means unknown.
fn parse_frame_rate(rate: &str) -> Option<f64> {
    let (num, den) = match rate.split_once('/') {
        Some((n, d)) => (n.trim().parse::<f64>().ok()?, d.trim().parse::<f64>().ok()?),
        None => (rate.trim().parse::<f64>().ok()?, 1.0),
    };
    if num <= 0.0 || den <= 0.0 {
        return None;
    }
    Some(num / den)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIDEO_WITH_AUDIO: &str = r#"{
        "streams": [
            {"index": 0, "codec_type": "video", "codec_name": "h264", "avg_frame_rate": "30000/1001"},
            {"index": 1, "codec_type": "audio", "codec_name": "aac", "sample_rate": "44100", "avg_frame_rate": "0/0"}
        ]
    }"#;

    const AUDIO_WITH_COVER: &str = r#"{
        "streams": [
            {"index": 0, "codec_type": "audio", "codec_name": "aac", "sample_rate": "48000"},
            {"index": 1, "codec_type": "video", "codec_name": "mjpeg", "avg_frame_rate": "0/0",
             "disposition": {"attached_pic": 1}}
        ]
    }"#;

    #[test]
    fn test_parse_frame_rate() {
        assert_eq!(parse_frame_rate("25/1"), Some(25.0));
        assert_eq!(parse_frame_rate("24"), Some(24.0));
        assert_eq!(parse_frame_rate("0/0"), None);
        assert_eq!(parse_frame_rate("garbage"), None);
        let ntsc = parse_frame_rate("30000/1001").unwrap();
        assert!((ntsc - 29.97).abs() < 0.01);
    }

    #[test]
    fn test_video_with_audio_opens_as_video() {
        let probe = ProbeOutput::parse(VIDEO_WITH_AUDIO).unwrap();
        let info = probe.as_video_with_audio(Path::new("clip.mp4")).unwrap();
        assert!((info.fps - 29.97).abs() < 0.01);
        assert_eq!(info.audio_sample_rate, Some(44100));
    }

    #[test]
    fn test_audio_only_reports_missing_video_fps() {
        let probe = ProbeOutput::parse(AUDIO_WITH_COVER).unwrap();
        let err = probe.as_video(Path::new("song.mp4")).unwrap_err();
        assert!(err.is_missing(VIDEO_FPS));
        assert!(!err.is_missing(AUDIO_FPS));
    }

    #[test]
    fn test_silent_video_reports_missing_audio() {
        let json = r#"{"streams": [{"codec_type": "video", "avg_frame_rate": "25/1"}]}"#;
        let probe = ProbeOutput::parse(json).unwrap();
        assert!(probe.as_video(Path::new("a.mp4")).is_ok());
        let err = probe.as_video_with_audio(Path::new("a.mp4")).unwrap_err();
        assert!(err.is_missing(AUDIO_FPS));
    }

    #[test]
    fn test_empty_and_invalid_probe_output() {
        let probe = ProbeOutput::parse("{}").unwrap();
        assert!(probe.streams.is_empty());
        assert!(matches!(
            ProbeOutput::parse("not json"),
            Err(MediaError::ProbeParse(_))
        ));
    }
}
