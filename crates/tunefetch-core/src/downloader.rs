//! YouTube stream downloader using yt-dlp

use crate::error::DownloadError;
use crate::streams::{select_stream, Container, StreamInfo, StreamKind};
use serde::Deserialize;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Somewhere streams can be fetched from
#[allow(async_fn_in_trait)]
pub trait StreamSource {
    /// Download the best stream of `kind` behind `url` to exactly `dest`
    async fn fetch(&self, url: &str, kind: StreamKind, dest: &Path)
        -> Result<PathBuf, DownloadError>;
}

/// Bounded retry on transient failures
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 5,
            delay: Duration::from_secs(1),
        }
    }
}

#[derive(Debug)]
pub struct Downloader {
    yt_dlp_path: PathBuf,
    container: Container,
    retry: RetryPolicy,
}

#[derive(Debug, Deserialize)]
struct VideoListing {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    formats: Vec<StreamInfo>,
}

impl Downloader {
    pub fn new(yt_dlp_path: PathBuf, container: Container, retry: RetryPolicy) -> Self {
        Self {
            yt_dlp_path,
            container,
            retry,
        }
    }

    /// List every stream variant behind a URL
    pub async fn list_streams(&self, url: &str) -> Result<Vec<StreamInfo>, DownloadError> {
        let output = Command::new(&self.yt_dlp_path)
            .args(["--dump-single-json", "--no-playlist", "--no-warnings", url])
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(url, output.status.code(), &stderr));
        }

        let listing: VideoListing = serde_json::from_slice(&output.stdout)
            .map_err(|e| DownloadError::MetadataParse(e.to_string()))?;

        debug!(
            "{} ({}) lists {} formats",
            listing.title.as_deref().unwrap_or("untitled"),
            listing.id,
            listing.formats.len()
        );
        Ok(listing.formats)
    }

    async fn download_format(
        &self,
        url: &str,
        format_id: &str,
        dest: &Path,
    ) -> Result<(), DownloadError> {
        let output = Command::new(&self.yt_dlp_path)
            .args([
                "-f", format_id,
                "--no-playlist",
                "--no-part",
                "--force-overwrites",
                "--quiet",
                "--no-warnings",
                "-o",
            ])
            .arg(output_template(dest))
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(url, output.status.code(), &stderr));
        }

        Ok(())
    }
}

impl StreamSource for Downloader {
    async fn fetch(
        &self,
        url: &str,
        kind: StreamKind,
        dest: &Path,
    ) -> Result<PathBuf, DownloadError> {
        let name = dest
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("Downloading '{}'", name);

        let streams = retry(&self.retry, || self.list_streams(url)).await?;
        let stream = choose_stream(&streams, self.container, kind)?;
        debug!(
            "Selected format {} ({}, {:?} kbps)",
            stream.format_id, stream.ext, stream.abr
        );

        retry(&self.retry, || self.download_format(url, &stream.format_id, dest)).await?;

        debug!("Downloaded to: {}", dest.display());
        Ok(dest.to_path_buf())
    }
}

/// The stream `fetch` downloads, or why there is none
fn choose_stream(
    streams: &[StreamInfo],
    container: Container,
    kind: StreamKind,
) -> Result<&StreamInfo, DownloadError> {
    select_stream(streams, container, kind).ok_or_else(|| DownloadError::NoMatchingStream {
        kind: kind.to_string(),
        container: container.to_string(),
    })
}

/// Run `op` until it succeeds, fails permanently or runs out of attempts
pub async fn retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, DownloadError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DownloadError>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < policy.attempts => {
                warn!("Attempt {}/{} failed: {}", attempt, policy.attempts, e);
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn classify_failure(url: &str, code: Option<i32>, stderr: &str) -> DownloadError {
    debug!("yt-dlp stderr: {}", stderr);

    if stderr.contains("Video unavailable") || stderr.contains("Private video") {
        return DownloadError::VideoUnavailable(url.to_string());
    }
    if stderr.contains("is not a valid URL") || stderr.contains("Unsupported URL") {
        return DownloadError::InvalidUrl(url.to_string());
    }

    DownloadError::YtDlpFailed(code)
}

/// yt-dlp treats `-o` as a template, so literal percent signs are doubled
fn output_template(dest: &Path) -> String {
    dest.to_string_lossy().replace('%', "%%")
}

/// Watch URL for a video id
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}
