use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tunefetch")]
#[command(author, version, about = "Fetch audio for track database entries from YouTube")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Config file path
    #[arg(long, global = true, env = "TUNEFETCH_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download the audio behind a URL
    Fetch {
        /// Video URL
        url: String,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File name, without extension
        #[arg(short, long, default_value = "audio")]
        name: String,
    },

    /// Search YouTube and list normalized results
    Search {
        /// Free-text query
        query: String,

        /// Number of results (defaults to search.results)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search YouTube and pick the first result close to an expected duration
    Match {
        /// Free-text query
        query: String,

        /// Expected duration in seconds
        #[arg(short, long)]
        duration: u64,

        /// Name reported when nothing matches (defaults to the query)
        #[arg(short, long)]
        name: Option<String>,

        /// Number of results considered (defaults to search.results)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Fetch audio for every entry in a JSON track list
    Sync {
        /// JSON array of {"artist", "title", "duration"} entries
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check external tool availability
    Doctor,

    /// Show configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_match() {
        let cli = Cli::try_parse_from([
            "tunefetch", "-v", "match", "daft punk one more time", "--duration", "320",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Match {
                query,
                duration,
                name,
                limit,
            } => {
                assert_eq!(query, "daft punk one more time");
                assert_eq!(duration, 320);
                assert!(name.is_none());
                assert!(limit.is_none());
            }
            _ => panic!("expected match command"),
        }
    }

    #[test]
    fn test_match_requires_duration() {
        assert!(Cli::try_parse_from(["tunefetch", "match", "query"]).is_err());
    }
}
