//! UFC statistics pipeline CLI
//!
//! Runs one pipeline stage per invocation. Stages communicate through
//! the data directory (and the bucket, when one is configured), so they
//! can be scheduled independently.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ufc_pipeline::{
    error::Result,
    models::Config,
    pipeline,
    storage::{DataStore, GcsStore, LocalStore, ObjectStore},
};

/// UFC fight statistics scraper and cleaner
#[derive(Parser, Debug)]
#[command(
    name = "ufc-pipeline",
    version,
    about = "Scrapes, cleans and reshapes UFC fight statistics"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config/config.toml")]
    config: PathBuf,

    /// Root directory for local data files
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape ufcstats.com and write the raw JSON documents
    Scrape {
        /// Only visit the first listing page instead of the full history
        #[arg(long)]
        recent: bool,
    },

    /// Clean the raw documents into typed Parquet tables
    Clean,

    /// Reshape the cleaned tables into analysis tables
    Transform,

    /// Write a small sample table to probe the storage path
    Dummy,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("UFC pipeline starting...");

    let config = Config::load_or_default(&cli.config);
    log::info!("Loaded configuration from {}", cli.config.display());

    let remote = GcsStore::connect(&config.gcs)
        .await?
        .map(|store| Box::new(store) as Box<dyn ObjectStore>);
    let store = DataStore::new(
        LocalStore::new(&cli.root),
        remote,
        config.output_files.clone(),
    );

    match cli.command {
        Command::Scrape { recent } => {
            pipeline::run_scrape(&config, &store, recent).await?;
        }

        Command::Clean => {
            pipeline::run_clean(&config, &store).await?;
        }

        Command::Transform => {
            pipeline::run_transform(&store).await?;
        }

        Command::Dummy => {
            pipeline::run_dummy(&store).await?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("Config OK");
        }
    }

    log::info!("Done!");

    Ok(())
}
