//! Sitemap-Lingua main entry point
//!
//! This is the command-line interface for the Sitemap-Lingua crawler.

use anyhow::Context;
use clap::Parser;
use sitemap_lingua::config::{
    default_languages, load_languages, Config, CrawlerConfig, HttpConfig, DEFAULT_LOG_FILE,
};
use sitemap_lingua::crawler::crawl;
use sitemap_lingua::output::generate_markdown_summary;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Sitemap-Lingua: visit every page of a sitemap in several languages
///
/// Sitemap-Lingua resolves a sitemap (following nested sitemap indexes),
/// then requests every page once per configured language with a matching
/// Accept-Language header.
#[derive(Parser, Debug)]
#[command(name = "sitemap-lingua")]
#[command(version = "1.0.0")]
#[command(about = "Crawl a website's sitemap with different language settings", long_about = None)]
struct Cli {
    /// URL of the sitemap.xml file
    #[arg(value_name = "SITEMAP_URL")]
    sitemap_url: String,

    /// Delay between requests in seconds
    #[arg(long, default_value_t = 1.0)]
    delay: f64,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Maximum number of concurrent workers
    #[arg(long, default_value_t = 5)]
    max_workers: usize,

    /// TOML file replacing the built-in language list
    #[arg(long, value_name = "FILE")]
    languages: Option<PathBuf>,

    /// Write a markdown run summary to this file
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Log file written alongside standard output
    #[arg(long, value_name = "FILE", default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet, &cli.log_file)?;

    let config = build_config(&cli)?;

    tracing::info!(
        "Crawling {} in {} languages with {} workers",
        config.crawler.sitemap_url,
        config.languages.len(),
        config.crawler.max_workers
    );

    let summary = crawl(&config).await?;

    if let Some(path) = &cli.summary {
        match generate_markdown_summary(&summary, path) {
            Ok(()) => tracing::info!("Summary written to: {}", path.display()),
            Err(e) => tracing::error!("Failed to write summary to {}: {}", path.display(), e),
        }
    }

    Ok(())
}

/// Builds the crawl configuration from command-line arguments
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let languages = match &cli.languages {
        Some(path) => {
            tracing::info!("Loading languages from: {}", path.display());
            load_languages(path)
                .with_context(|| format!("Failed to load languages from {}", path.display()))?
        }
        None => default_languages(),
    };

    Ok(Config {
        crawler: CrawlerConfig {
            sitemap_url: cli.sitemap_url.clone(),
            delay: cli.delay,
            max_workers: cli.max_workers,
            ..CrawlerConfig::default()
        },
        http: HttpConfig {
            timeout: cli.timeout,
            ..HttpConfig::default()
        },
        languages,
    })
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Every event goes to standard output and, without ANSI colors, to
/// `log_file` (appended).
fn setup_logging(verbose: u8, quiet: bool, log_file: &Path) -> anyhow::Result<()> {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemap_lingua=info,warn"),
            1 => EnvFilter::new("sitemap_lingua=debug,info"),
            2 => EnvFilter::new("sitemap_lingua=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}
