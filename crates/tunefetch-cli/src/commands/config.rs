use anyhow::Result;
use std::path::Path;
use tunefetch_core::config::Config;

pub async fn run(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;

    println!("tunefetch configuration\n");
    print!("{}", toml::to_string_pretty(&config)?);

    let auto = |p: &Option<std::path::PathBuf>| p.is_none();
    if auto(&config.paths.yt_dlp) || auto(&config.paths.ffmpeg) || auto(&config.paths.ffprobe) {
        println!("\n# unset tool paths are auto-detected from PATH");
    }

    // Show config file locations
    println!("\nConfig sources (later ones override earlier ones):");
    if let Some(config_dir) = dirs::config_dir() {
        println!("  1. {}/tunefetch/config.toml", config_dir.display());
    }
    if let Some(p) = config_path {
        println!("  2. {} (specified)", p.display());
    }
    println!("  3. Environment variables (TUNEFETCH_*, nested keys joined with __)");

    Ok(())
}
