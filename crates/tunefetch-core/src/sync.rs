//! Fetching audio for track database entries: search, match, acquire

use crate::acquire::AudioAcquirer;
use crate::config::Config;
use crate::downloader::{watch_url, Downloader, StreamSource};
use crate::entry::{ExpectedDuration, TrackEntry};
use crate::error::{Result, SearchError};
use crate::matcher::find_best_match;
use crate::search::{SearchResult, Searcher};
use std::path::{Path, PathBuf};
use tracing::info;
use tunefetch_media::{Ffmpeg, MediaBackend};

/// Anything that can turn a query into ranked search results
#[allow(async_fn_in_trait)]
pub trait SearchBackend {
    async fn search(&self, query: &str, limit: usize)
        -> std::result::Result<Vec<SearchResult>, SearchError>;
}

impl SearchBackend for Searcher {
    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> std::result::Result<Vec<SearchResult>, SearchError> {
        Searcher::search(self, query, limit).await
    }
}

#[derive(Debug)]
pub struct TrackSync<Q, S, M> {
    searcher: Q,
    acquirer: AudioAcquirer<S, M>,
    results: usize,
    tolerance: f64,
}

impl TrackSync<Searcher, Downloader, Ffmpeg> {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            Searcher::new(config.yt_dlp_path()?),
            AudioAcquirer::from_config(config)?,
            config.search.results,
            config.search.tolerance,
        ))
    }
}

impl<Q: SearchBackend, S: StreamSource, M: MediaBackend> TrackSync<Q, S, M> {
    pub fn new(searcher: Q, acquirer: AudioAcquirer<S, M>, results: usize, tolerance: f64) -> Self {
        Self {
            searcher,
            acquirer,
            results,
            tolerance,
        }
    }

    /// Id of the video that best fits `entry`
    pub async fn find_video(&self, entry: &TrackEntry) -> Result<String> {
        let results = self.searcher.search(&entry.search_query(), self.results).await?;
        Ok(find_best_match(entry, &results, self.tolerance)?)
    }

    /// Download the audio for `entry` into `output_dir`
    pub async fn sync_entry(&self, entry: &TrackEntry, output_dir: &Path) -> Result<PathBuf> {
        let video_id = self.find_video(entry).await?;
        info!("Fetching {} from {}", entry.display_name(), video_id);

        self.acquirer
            .acquire(&watch_url(&video_id), output_dir, &entry.file_name())
            .await
    }
}
