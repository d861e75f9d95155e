mod args;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use args::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let filter = match cli.verbose {
        0 => "tunefetch=info",
        1 => "tunefetch=debug",
        2 => "tunefetch=trace",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Fetch { url, output, name } => {
            commands::fetch::run(&url, output, &name, config_path).await
        }
        Commands::Search { query, limit, json } => {
            commands::search::run(&query, limit, json, config_path).await
        }
        Commands::Match {
            query,
            duration,
            name,
            limit,
        } => commands::matching::run(&query, duration, name, limit, config_path).await,
        Commands::Sync { input, output } => commands::sync::run(&input, output, config_path).await,
        Commands::Doctor => commands::doctor::run().await,
        Commands::Config => commands::config::run(config_path).await,
    }
}
