use anyhow::Result;
use std::path::Path;

use tunefetch_core::{matcher::find_best_match, Config, ExpectedDuration, Searcher};

/// A bare query with an expected duration, for matching outside the track database
struct QueryTrack {
    name: String,
    duration: u64,
}

impl ExpectedDuration for QueryTrack {
    fn expected_duration(&self) -> u64 {
        self.duration
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}

pub async fn run(
    query: &str,
    duration: u64,
    name: Option<String>,
    limit: Option<usize>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let searcher = Searcher::new(config.yt_dlp_path()?);

    let track = QueryTrack {
        name: name.unwrap_or_else(|| query.to_string()),
        duration,
    };

    let results = searcher
        .search(query, limit.unwrap_or(config.search.results))
        .await?;
    let video_id = find_best_match(&track, &results, config.search.tolerance)?;

    println!("{}", video_id);
    Ok(())
}
