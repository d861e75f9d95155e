//! Error types for tunefetch-core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TuneFetchError>;

#[derive(Error, Debug)]
pub enum TuneFetchError {
    #[error("Download failed: {0}")]
    Download(#[from] DownloadError),

    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("Media processing failed: {0}")]
    Media(#[from] tunefetch_media::MediaError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("yt-dlp failed with exit code: {0:?}")]
    YtDlpFailed(Option<i32>),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Video unavailable or private: {0}")]
    VideoUnavailable(String),

    #[error("No {kind} stream in {container} container")]
    NoMatchingStream { kind: String, container: String },

    #[error("Failed to parse metadata: {0}")]
    MetadataParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DownloadError {
    /// Failures worth another attempt
    pub fn is_transient(&self) -> bool {
        match self {
            DownloadError::YtDlpFailed(_) => true,
            // A missing binary will not appear between attempts
            DownloadError::Io(e) => e.kind() != std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("yt-dlp search failed with exit code: {0:?}")]
    YtDlpFailed(Option<i32>),

    #[error("Format of '{0}' is not supported")]
    UnsupportedDurationFormat(String),

    #[error("Invalid duration '{0}'")]
    InvalidDuration(String),

    #[error("No digits in view count '{0}'")]
    InvalidViews(String),

    #[error("Malformed search result line: {0}")]
    MalformedResult(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MatchError {
    #[error("Unable to find a matching video for {0}")]
    NoMatchingVideo(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadError(String),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}
