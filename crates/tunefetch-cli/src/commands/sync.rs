use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::warn;

use super::fetch::truncate;
use tunefetch_core::{entry::load_entries, Config, ExpectedDuration, TrackSync};

pub async fn run(input: &Path, output: Option<PathBuf>, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;

    let content = fs::read_to_string(input)
        .await
        .context("Failed to read input file")?;
    let entries = load_entries(&content).context("Failed to parse track list")?;

    if entries.is_empty() {
        println!("No entries found in input file");
        return Ok(());
    }

    let output_dir = output.unwrap_or_else(|| config.output.directory.clone());
    let sync = TrackSync::from_config(&config)?;

    let total = entries.len();
    println!("Fetching {} tracks into {}\n", total, output_dir.display());

    let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {msg}")?.tick_chars("=>-");

    let mut succeeded = 0;
    let mut failed = Vec::new();

    for (idx, entry) in entries.iter().enumerate() {
        let name = entry.display_name();
        let pb = ProgressBar::new_spinner();
        pb.set_style(spinner_style.clone());
        pb.set_message(format!("[{}/{}] {}", idx + 1, total, truncate(&name, 50)));
        pb.enable_steady_tick(Duration::from_millis(100));

        match sync.sync_entry(entry, &output_dir).await {
            Ok(path) => {
                succeeded += 1;
                pb.finish_with_message(format!(
                    "[{}/{}] Done: {}",
                    idx + 1,
                    total,
                    path.file_name().unwrap_or_default().to_string_lossy()
                ));
            }
            Err(e) => {
                pb.finish_with_message(format!("[{}/{}] Failed: {}", idx + 1, total, e));
                failed.push((name, e.to_string()));
                if !config.batch.continue_on_error {
                    warn!("Stopping after first failure (batch.continue_on_error = false)");
                    break;
                }
            }
        }
    }

    println!("\n=== Sync Complete ===");
    println!("Succeeded: {}", succeeded);
    println!("Failed: {}", failed.len());

    if !failed.is_empty() {
        println!("\nFailed tracks:");
        for (name, error) in &failed {
            println!("  {} - {}", name, error);
        }
        anyhow::bail!("{} of {} tracks failed", failed.len(), total);
    }

    Ok(())
}
