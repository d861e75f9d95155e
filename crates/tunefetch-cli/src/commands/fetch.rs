use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tunefetch_core::{AudioAcquirer, Config};

pub async fn run(
    url: &str,
    output: Option<PathBuf>,
    name: &str,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let output_dir = output.unwrap_or_else(|| config.output.directory.clone());

    let acquirer = AudioAcquirer::from_config(&config)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.cyan} [{elapsed_precise}] {msg}")?);
    pb.set_message(format!("Fetching {}", truncate(url, 60)));
    pb.enable_steady_tick(Duration::from_millis(100));

    let start = Instant::now();
    match acquirer.acquire(url, &output_dir, name).await {
        Ok(path) => {
            pb.finish_with_message(format!(
                "Done ({:.1}s)",
                start.elapsed().as_secs_f32()
            ));
            println!("{}", path.display());
            Ok(())
        }
        Err(e) => {
            pb.abandon_with_message(format!("Failed: {}", e));
            Err(e.into())
        }
    }
}

pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
