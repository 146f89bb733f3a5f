//! jobdeck: browse paginated job listings and keep bookmarks from the terminal.

mod app;
mod command;
mod config;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use jobdeck_engine::{BookmarkStore, FileStore, PagedJobFeed, ReqwestJobApi};
use jobdeck_logging::{jobdeck_info, jobdeck_warn};
use log::LevelFilter;

use crate::app::App;
use crate::config::{load_config, AppConfig, LogTarget, DEFAULT_CONFIG_FILE};

/// Browse job listings and manage bookmarks
#[derive(Parser)]
#[command(name = "jobdeck")]
#[command(about = "Browse paginated job listings and keep bookmarks", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (RON)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Job listing endpoint, overrides the config file
    #[arg(long)]
    api_url: Option<String>,

    /// Directory holding bookmarks, overrides the config file
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log destination, overrides the config file
    #[arg(long, value_enum)]
    log: Option<LogTarget>,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive browser (default)
    Browse,
    /// Print the first pages of the job list
    Jobs {
        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Print bookmarked jobs
    Bookmarks,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(url) = &self.api_url {
            config.api_base_url = url.clone();
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(log) = self.log {
            config.log = log;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging depends on the config, so a config problem is reported after setup.
    let (mut config, config_problem) = match load_config(&cli.config) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    cli.apply_overrides(&mut config);

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    jobdeck_logging::initialize(config.log.into(), level);
    if let Some(err) = config_problem {
        jobdeck_warn!("Using default configuration: {}", err);
    }
    jobdeck_info!(
        "Starting jobdeck: api={} data_dir={:?}",
        config.api_base_url,
        config.data_dir
    );

    let api = ReqwestJobApi::new(config.api_settings()).context("building HTTP client")?;
    let feed = PagedJobFeed::with_page_size(Arc::new(api), config.page_size);
    let bookmarks = BookmarkStore::new(FileStore::new(config.data_dir.clone()));
    let mut app = App::new(feed, bookmarks);

    match cli.command.unwrap_or(Commands::Browse) {
        Commands::Browse => app::run_interactive(&mut app).await?,
        Commands::Jobs { pages } => {
            println!("{}", app.load_pages(pages).await);
            app.shutdown();
        }
        Commands::Bookmarks => {
            println!("{}", app.execute(command::Command::Saved).await);
        }
    }
    Ok(())
}
