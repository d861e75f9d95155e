use anyhow::Result;
use std::path::Path;

use tunefetch_core::{Config, SearchResult, Searcher};

pub async fn run(
    query: &str,
    limit: Option<usize>,
    json: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let searcher = Searcher::new(config.yt_dlp_path()?);

    let results = searcher
        .search(query, limit.unwrap_or(config.search.results))
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print!("{}", render_table(&results));
    }

    Ok(())
}

fn render_table(results: &[SearchResult]) -> String {
    let mut out = format!("{:<4} {:<12} {:>14} {:>10}\n", "#", "ID", "Views", "Duration");
    for (i, r) in results.iter().enumerate() {
        out.push_str(&format!(
            "{:<4} {:<12} {:>14} {:>10}\n",
            i + 1,
            r.id,
            r.views,
            format_duration(r.duration_secs)
        ));
    }
    out
}

fn format_duration(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, secs / 60 % 60, secs % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(5), "0:05");
        assert_eq!(format_duration(65), "1:05");
        assert_eq!(format_duration(3665), "1:01:05");
    }

    #[test]
    fn test_render_table() {
        let table = render_table(&[SearchResult {
            id: "dQw4w9WgXcQ".to_string(),
            views: 1234,
            duration_secs: 213,
        }]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("1    dQw4w9WgXcQ"));
        assert!(lines[1].ends_with("3:33"));
    }
}
