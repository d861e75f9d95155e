//! YouTube search through yt-dlp, with result normalization

use crate::error::SearchError;
use regex::Regex;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::OnceLock;
use tokio::process::Command;
use tracing::{debug, info};

/// One line per result: id, view count, duration. Live streams have no
/// duration and are reported as zero, which never matches.
const PRINT_TEMPLATE: &str = "%(id)s\t%(view_count|0)s\t%(duration_string|0)s";

/// What yt-dlp prints for a field it does not have
const NOT_AVAILABLE: &str = "NA";

/// A search hit as reported, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSearchResult {
    pub id: String,
    pub views: String,
    pub duration: String,
}

/// A normalized search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub id: String,
    pub views: u64,
    pub duration_secs: u64,
}

impl TryFrom<RawSearchResult> for SearchResult {
    type Error = SearchError;

    fn try_from(raw: RawSearchResult) -> Result<Self, Self::Error> {
        Ok(SearchResult {
            views: parse_views(&raw.views)?,
            duration_secs: parse_duration(&raw.duration)?,
            id: raw.id,
        })
    }
}

#[derive(Debug)]
pub struct Searcher {
    yt_dlp_path: PathBuf,
}

impl Searcher {
    pub fn new(yt_dlp_path: PathBuf) -> Self {
        Self { yt_dlp_path }
    }

    /// Search YouTube and return up to `limit` results in relevance order
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        info!("Searching for '{}'", query);

        let output = Command::new(&self.yt_dlp_path)
            .args(["--flat-playlist", "--no-warnings", "--print", PRINT_TEMPLATE])
            .arg(format!("ytsearch{}:{}", limit, query))
            .output()
            .await?;

        if !output.status.success() {
            debug!("yt-dlp stderr: {}", String::from_utf8_lossy(&output.stderr));
            return Err(SearchError::YtDlpFailed(output.status.code()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let results = parse_search_output(&stdout)?
            .into_iter()
            .map(SearchResult::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        debug!("{} results for '{}'", results.len(), query);
        Ok(results)
    }
}

fn parse_search_output(stdout: &str) -> Result<Vec<RawSearchResult>, SearchError> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let fields: Vec<&str> = line.split('\t').collect();
            match fields.as_slice() {
                [id, views, duration] => Ok(RawSearchResult {
                    id: id.trim().to_string(),
                    views: or_zero(views),
                    duration: or_zero(duration),
                }),
                _ => Err(SearchError::MalformedResult(line.to_string())),
            }
        })
        .collect()
}

fn or_zero(field: &str) -> String {
    match field.trim() {
        NOT_AVAILABLE => "0".to_string(),
        value => value.to_string(),
    }
}

/// Parse a human-formatted view count such as "1,234 views"
pub fn parse_views(views: &str) -> Result<u64, SearchError> {
    static NON_DIGIT: OnceLock<Regex> = OnceLock::new();
    let non_digit = NON_DIGIT.get_or_init(|| Regex::new(r"\D").expect("valid regex"));

    non_digit
        .replace_all(views, "")
        .parse()
        .map_err(|_| SearchError::InvalidViews(views.to_string()))
}

/// Parse "S", "M:S" or "H:M:S" into seconds
pub fn parse_duration(duration: &str) -> Result<u64, SearchError> {
    let fields: Vec<&str> = duration.split(':').collect();

    // Upper bounds per field, most significant first. Seconds allow for
    // leap seconds the way clock-time parsing does.
    let limits: &[u64] = match fields.len() {
        1 => &[62],
        2 => &[60, 62],
        3 => &[24, 60, 62],
        _ => return Err(SearchError::UnsupportedDurationFormat(duration.to_string())),
    };

    fields
        .iter()
        .zip(limits)
        .try_fold(0u64, |total, (field, &limit)| {
            let value: u64 = field
                .trim()
                .parse()
                .map_err(|_| SearchError::InvalidDuration(duration.to_string()))?;
            if value >= limit {
                return Err(SearchError::InvalidDuration(duration.to_string()));
            }
            Ok(total * 60 + value)
        })
}
