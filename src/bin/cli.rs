//! backlog CLI
//!
//! Reads chat lines from stdin into a rolling log and annotates links, or
//! runs a single fetcher from the command line.

use std::path::PathBuf;

use backlog::{
    RecencyBuffer,
    error::Result,
    models::{Config, LogLine, ShortenerService},
    services::{self, LinkAnnotator, PostsScraper, shorten},
    utils::{http, text::decode_line},
};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

/// backlog - rolling chat log with link lookups
#[derive(Parser, Debug)]
#[command(name = "backlog", version, about = "Rolling chat log with link lookups")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "backlog.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the title of a web page
    Title { url: String },

    /// Print a short link for a URL
    Shorten {
        url: String,

        /// Override the configured service (isgd, pastis)
        #[arg(long)]
        service: Option<ShortenerService>,
    },

    /// Print the recent posts of a user, one per line
    Posts { user: String },

    /// Read lines from stdin, keep the most recent ones and annotate links
    ///
    /// A line `!recent` prints the kept lines, newest first.
    /// A line `!posts <user>` prints that user's recent posts.
    Watch {
        /// Number of lines to keep (default: backlog.capacity)
        #[arg(short = 'n', long)]
        capacity: Option<usize>,
    },

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

    let mut config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Title { url } => {
            let client = http::create_async_client(&config.fetch)?;
            if let Some(title) = services::fetch_page_title(&client, &url).await {
                println!("{title}");
            }
        }

        Command::Shorten { url, service } => {
            if let Some(service) = service {
                config.shortener.service = service;
            }
            let client = http::create_async_client(&config.fetch)?;
            let shortener = shorten::from_config(client, &config.shortener);
            if let Some(short) = services::shorten_url(shortener.as_ref(), &url).await {
                println!("{short}");
            }
        }

        Command::Posts { user } => {
            let client = http::create_async_client(&config.fetch)?;
            let scraper = PostsScraper::new(client, config.posts.clone())?;
            for post in scraper.fetch_recent_posts(&user).await {
                println!("{post}");
            }
        }

        Command::Watch { capacity } => {
            if let Some(capacity) = capacity {
                config.backlog.capacity = capacity;
            }
            config.validate()?;
            run_watch(&config).await?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }
    }

    Ok(())
}

/// Record stdin lines into the backlog until EOF.
async fn run_watch(config: &Config) -> Result<()> {
    let mut backlog = RecencyBuffer::new(config.backlog.capacity)?;
    let client = http::create_async_client(&config.fetch)?;
    let annotator = LinkAnnotator::from_config(client.clone(), config);
    let scraper = PostsScraper::new(client, config.posts.clone())?;

    log::info!("Watching stdin, keeping the last {} lines", backlog.capacity());

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut raw = Vec::new();
    loop {
        raw.clear();
        if stdin.read_until(b'\n', &mut raw).await? == 0 {
            break;
        }
        let line = decode_line(&raw);
        let trimmed = line.trim();

        if trimmed == "!recent" {
            for entry in &backlog {
                println!("{entry}");
            }
            continue;
        }

        if let Some(user) = trimmed.strip_prefix("!posts ") {
            for post in scraper.fetch_recent_posts(user.trim()).await {
                println!("{post}");
            }
            continue;
        }

        if let Some(evicted) = backlog.insert(LogLine::now(line.clone())) {
            log::debug!("Dropped oldest line: {}", evicted.text);
        }

        for summary in annotator.annotate(&line).await {
            if summary.has_content() {
                println!("{summary}");
            }
        }
    }

    log::info!("stdin closed, {} lines kept", backlog.len());
    Ok(())
}
