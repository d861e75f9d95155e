//! Stream variants and quality-based selection

use serde::{Deserialize, Serialize};
use std::fmt;

/// Container type downloads are restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
    Mp4,
    Webm,
}

impl Container {
    /// Extension given to files downloaded in this container
    pub fn extension(&self) -> &'static str {
        match self {
            Container::Mp4 => "mp4",
            Container::Webm => "webm",
        }
    }

    /// Whether a stream with extension `ext` belongs to this container type
    pub fn covers(&self, ext: &str) -> bool {
        match self {
            // Audio-only MP4 streams are reported as m4a
            Container::Mp4 => matches!(ext, "mp4" | "m4a"),
            Container::Webm => ext == "webm",
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for Container {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mp4" => Ok(Container::Mp4),
            "webm" => Ok(Container::Webm),
            other => Err(format!("unsupported container: {}", other)),
        }
    }
}

/// Which streams of a container are eligible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    /// Any stream, video or audio
    Best,
    AudioOnly,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Best => write!(f, "best"),
            StreamKind::AudioOnly => write!(f, "audio-only"),
        }
    }
}

/// A downloadable format as listed by yt-dlp
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StreamInfo {
    pub format_id: String,
    #[serde(default)]
    pub ext: String,
    /// Average bit rate in kbps
    #[serde(default)]
    pub abr: Option<f64>,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
}

impl StreamInfo {
    pub fn is_audio_only(&self) -> bool {
        self.vcodec.as_deref() == Some("none")
            && self.acodec.as_deref().is_some_and(|c| c != "none")
    }
}

/// Pick the highest-ABR stream of `kind` within `container`.
///
/// Streams without an ABR are not ranked. On equal ABR the later stream wins.
pub fn select_stream(
    streams: &[StreamInfo],
    container: Container,
    kind: StreamKind,
) -> Option<&StreamInfo> {
    streams
        .iter()
        .filter(|s| container.covers(&s.ext))
        .filter(|s| kind == StreamKind::Best || s.is_audio_only())
        .filter(|s| s.abr.is_some_and(|abr| abr > 0.0))
        .max_by(|a, b| {
            let (a, b) = (a.abr.unwrap_or_default(), b.abr.unwrap_or_default());
            a.total_cmp(&b)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(id: &str, ext: &str, abr: Option<f64>, video: bool) -> StreamInfo {
        StreamInfo {
            format_id: id.to_string(),
            ext: ext.to_string(),
            abr,
            vcodec: Some(if video { "avc1" } else { "none" }.to_string()),
            acodec: Some("mp4a.40.2".to_string()),
        }
    }

    fn sample() -> Vec<StreamInfo> {
        vec![
            stream("18", "mp4", Some(96.0), true),
            stream("140", "m4a", Some(129.5), false),
            stream("139", "m4a", Some(48.8), false),
            stream("251", "webm", Some(160.0), false),
            stream("22", "mp4", None, true),
        ]
    }

    #[test]
    fn test_best_picks_highest_abr_in_container() {
        let streams = sample();
        let best = select_stream(&streams, Container::Mp4, StreamKind::Best).unwrap();
        assert_eq!(best.format_id, "140");
    }

    #[test]
    fn test_audio_only_excludes_video_streams() {
        let mut streams = sample();
        streams.push(stream("137", "mp4", Some(500.0), true));
        let audio = select_stream(&streams, Container::Mp4, StreamKind::AudioOnly).unwrap();
        assert_eq!(audio.format_id, "140");
        let best = select_stream(&streams, Container::Mp4, StreamKind::Best).unwrap();
        assert_eq!(best.format_id, "137");
    }

    #[test]
    fn test_other_container() {
        let streams = sample();
        let webm = select_stream(&streams, Container::Webm, StreamKind::AudioOnly).unwrap();
        assert_eq!(webm.format_id, "251");
    }

    #[test]
    fn test_ties_resolve_to_later_stream() {
        let streams = vec![
            stream("a", "mp4", Some(128.0), true),
            stream("b", "mp4", Some(128.0), true),
        ];
        let best = select_stream(&streams, Container::Mp4, StreamKind::Best).unwrap();
        assert_eq!(best.format_id, "b");
    }

    #[test]
    fn test_nothing_eligible() {
        let streams = vec![stream("22", "mp4", None, true)];
        assert!(select_stream(&streams, Container::Mp4, StreamKind::Best).is_none());
        assert!(select_stream(&[], Container::Webm, StreamKind::AudioOnly).is_none());
    }

    #[test]
    fn test_container_from_str() {
        assert_eq!("MP4".parse::<Container>(), Ok(Container::Mp4));
        assert!("avi".parse::<Container>().is_err());
        assert!(Container::Mp4.covers("m4a"));
        assert!(!Container::Webm.covers("mp4"));
    }
}
