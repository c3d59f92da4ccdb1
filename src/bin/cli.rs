//! toonbell CLI
//!
//! Runs the Discord bot, or inspects the catalog feed from a terminal.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use toonbell::{
    config::load_config,
    error::{AppError, Result},
    models::Config,
    pipeline::parse_catalog,
    services::{AnnouncementFormatter, FeedFetcher, FeedSource},
};

/// toonbell - manga chapter announcements
#[derive(Parser, Debug)]
#[command(
    name = "toonbell",
    version,
    about = "Announces new manga chapters on Discord"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Connect to Discord and announce new chapters
    #[cfg(feature = "discord")]
    Run,

    /// Fetch and parse the feed once
    Check {
        /// Print the parsed catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one series from the feed
    Show {
        /// Series title (case-insensitive)
        title: String,
    },

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flag and configured level.
fn init_logging(verbose: bool, config: &Config) {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

async fn fetch_catalog(config: &Config) -> Result<toonbell::pipeline::ParseOutcome> {
    let fetcher = FeedFetcher::new(&config.feed)?;
    log::info!("Fetching {}", fetcher.url());
    let raw = fetcher.fetch().await?;
    Ok(parse_catalog(&raw))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    init_logging(cli.verbose, &config);

    match cli.command {
        #[cfg(feature = "discord")]
        Command::Run => {
            log::info!("toonbell starting...");
            toonbell::discord::run(config).await?;
        }

        Command::Check { json } => {
            let outcome = fetch_catalog(&config).await?;

            let summary = outcome.summary();
            if json {
                let records: Vec<_> = outcome.catalog.iter().collect();
                let report = serde_json::json!({ "summary": summary, "records": records });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "{} series from {} data lines",
                    summary.records, summary.data_lines
                );
                if !summary.skipped.is_empty() {
                    println!("Skipped lines: {:?}", summary.skipped);
                }
            }
        }

        Command::Show { title } => {
            let outcome = fetch_catalog(&config).await?;
            let record = outcome
                .catalog
                .get(&title)
                .ok_or_else(|| AppError::NotFound(title.clone()))?;
            let formatter = AnnouncementFormatter::new(&config.feed);

            println!("{}", record.title);
            println!("  Status:   {}", record.status_text);
            println!("  Genre:    {}", record.genre);
            println!("  Chapters: {}", record.chapter_range);
            match record.latest_chapter() {
                Some(chapter) => {
                    println!("  Latest:   {}", chapter);
                    println!(
                        "  Link:     {}",
                        formatter.deep_link(&record.title, Some(chapter))
                    );
                }
                None => println!("  Link:     {}", formatter.deep_link(&record.title, None)),
            }
            if let Some(cover) = formatter.cover_url(record) {
                println!("  Cover:    {}", cover);
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
            if let Err(e) = config.validate_for_run() {
                log::warn!("Not ready to run the bot: {}", e);
            } else {
                log::info!("✓ Discord credentials present");
            }
        }
    }

    Ok(())
}
