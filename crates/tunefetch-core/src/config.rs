//! Configuration management for tunefetch

use crate::error::ConfigError;
use crate::streams::Container;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,
    pub download: DownloadConfig,
    pub search: SearchConfig,
    pub output: OutputConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Path to yt-dlp binary (auto-detected if not set)
    pub yt_dlp: Option<PathBuf>,
    /// Path to FFmpeg binary (auto-detected if not set)
    pub ffmpeg: Option<PathBuf>,
    /// Path to ffprobe binary (auto-detected if not set)
    pub ffprobe: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Container type streams are selected from
    pub container: Container,
    /// Attempts per stream download
    pub retries: u32,
    /// Pause between attempts, in milliseconds
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of search results considered per query
    pub results: usize,
    /// Relative duration tolerance for a match (0.05 = 5%)
    pub tolerance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output directory
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Keep going after an entry fails
    pub continue_on_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            download: DownloadConfig {
                container: Container::Mp4,
                retries: 5,
                retry_delay_ms: 1000,
            },
            search: SearchConfig {
                results: 5,
                tolerance: 0.05,
            },
            output: OutputConfig {
                directory: PathBuf::from("."),
            },
            batch: BatchConfig {
                continue_on_error: true,
            },
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Load from default config directory
        if let Some(config_dir) = dirs::config_dir() {
            let default_config = config_dir.join("tunefetch/config.toml");
            if default_config.exists() {
                figment = figment.merge(Toml::file(&default_config));
            }
        }

        // Load from specified config file
        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }

        // Keys contain underscores, so nesting uses a double underscore
        figment = figment.merge(Env::prefixed("TUNEFETCH_").split("__"));

        Self::from_figment(figment)
    }

    fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::LoadError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.download.retries == 0 {
            return Err(ConfigError::InvalidValue(
                "download.retries must be at least 1".to_string(),
            ));
        }
        if self.search.results == 0 {
            return Err(ConfigError::InvalidValue(
                "search.results must be at least 1".to_string(),
            ));
        }
        if !(self.search.tolerance > 0.0 && self.search.tolerance < 1.0) {
            return Err(ConfigError::InvalidValue(format!(
                "search.tolerance must be between 0 and 1, got {}",
                self.search.tolerance
            )));
        }
        Ok(())
    }

    /// Get yt-dlp path, auto-detecting if not configured
    pub fn yt_dlp_path(&self) -> Result<PathBuf, ConfigError> {
        resolve_tool(self.paths.yt_dlp.as_ref(), "yt-dlp")
    }

    /// Get FFmpeg path, auto-detecting if not configured
    pub fn ffmpeg_path(&self) -> Result<PathBuf, ConfigError> {
        resolve_tool(self.paths.ffmpeg.as_ref(), "ffmpeg")
    }

    /// Get ffprobe path, auto-detecting if not configured
    pub fn ffprobe_path(&self) -> Result<PathBuf, ConfigError> {
        resolve_tool(self.paths.ffprobe.as_ref(), "ffprobe")
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.download.retry_delay_ms)
    }
}

fn resolve_tool(configured: Option<&PathBuf>, name: &str) -> Result<PathBuf, ConfigError> {
    match configured {
        Some(path) => Ok(path.clone()),
        None => which::which(name)
            .map_err(|_| ConfigError::InvalidValue(format!("{} not found in PATH", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Figment {
        Figment::new().merge(Serialized::defaults(Config::default()))
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::from_figment(defaults()).unwrap();
        assert_eq!(config.download.container, Container::Mp4);
        assert_eq!(config.download.retries, 5);
        assert_eq!(config.search.results, 5);
        assert_eq!(config.search.tolerance, 0.05);
        assert!(config.batch.continue_on_error);
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let toml = r#"
            [download]
            container = "webm"
            retries = 2

            [search]
            tolerance = 0.1
        "#;
        let config = Config::from_figment(defaults().merge(Toml::string(toml))).unwrap();
        assert_eq!(config.download.container, Container::Webm);
        assert_eq!(config.download.retries, 2);
        assert_eq!(config.download.retry_delay_ms, 1000);
        assert_eq!(config.search.tolerance, 0.1);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_tolerance = defaults().merge(Toml::string("[search]\ntolerance = 1.5"));
        assert!(matches!(
            Config::from_figment(bad_tolerance),
            Err(ConfigError::InvalidValue(_))
        ));

        let no_retries = defaults().merge(Toml::string("[download]\nretries = 0"));
        assert!(matches!(
            Config::from_figment(no_retries),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_unknown_container_fails_to_load() {
        let figment = defaults().merge(Toml::string("[download]\ncontainer = \"avi\""));
        assert!(matches!(
            Config::from_figment(figment),
            Err(ConfigError::LoadError(_))
        ));
    }

    #[test]
    fn test_configured_tool_path_wins() {
        let mut config = Config::default();
        config.paths.ffprobe = Some(PathBuf::from("/opt/ffmpeg/bin/ffprobe"));
        assert_eq!(
            config.ffprobe_path().unwrap(),
            PathBuf::from("/opt/ffmpeg/bin/ffprobe")
        );
    }
}
