// This file is part of postlog.
//
// Copyright (C) 2025 Matheus Cardoso <varvedb@matheus.sbs>
//
// This Source Code Form is subject to the terms of the Mozilla Public License
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at http://mozilla.org/MPL/2.0/.

//! Reddit post logger.
//!
//! Streams new posts from `r/all` and appends each one as a row
//! `ID | Subreddit | Title | URL` to an OpenDocument spreadsheet, printing it
//! to the console as it happens. IDs run `A001..A999, B001, ..., AA001, ...`
//! and resume from the last row when the spreadsheet already exists.
//!
//! # Usage
//!
//! ```bash
//! # reddit_config.json: {"client_id": "...", "client_secret": "...", "user_agent": "..."}
//! postlog
//!
//! postlog --config ~/.config/reddit.json --output posts.ods --subreddit rust
//! ```
//!
//! Press Ctrl+C to stop; every row printed before that is already on disk.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use postlog::config::{Credentials, Settings};
use postlog::constants;
use postlog::processor::{ConsoleEmitter, Processor};
use postlog::source::RedditSource;
use postlog::storage::OdsStore;
use postlog::AppendLog;

#[derive(Parser, Debug)]
#[command(name = "postlog")]
#[command(about = "Log new Reddit posts into an ODS spreadsheet")]
#[command(version)]
struct Args {
    /// JSON file with the Reddit API credentials
    #[arg(long, short, default_value = constants::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Spreadsheet the posts are appended to
    #[arg(long, short, default_value = constants::DEFAULT_DOCUMENT_PATH)]
    output: PathBuf,

    /// Subreddit to follow
    #[arg(long, default_value = constants::DEFAULT_SUBREDDIT)]
    subreddit: String,

    /// Base interval between polls, in seconds
    #[arg(long, default_value_t = constants::DEFAULT_POLL_INTERVAL.as_secs())]
    poll_interval_secs: u64,

    /// Longest interval between polls when nothing new shows up, in seconds
    #[arg(long, default_value_t = constants::MAX_POLL_INTERVAL.as_secs())]
    max_poll_interval_secs: u64,

    /// Log filter directive (RUST_LOG takes precedence)
    #[arg(long, default_value = constants::DEFAULT_LOG_FILTER)]
    log_filter: String,
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Self {
            config_path: args.config,
            document_path: args.output,
            subreddit: args.subreddit,
            poll_interval: Duration::from_secs(args.poll_interval_secs),
            max_poll_interval: Duration::from_secs(args.max_poll_interval_secs),
            log_filter: args.log_filter,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from(Args::parse());
    postlog::log::init(&settings.log_filter).context("Failed to initialize logging")?;
    settings.validate()?;

    // Credentials come first: nothing is opened or contacted without them.
    let credentials = Credentials::load(&settings.config_path).with_context(|| {
        format!(
            "{} is required; create it with your Reddit API credentials",
            settings.config_path.display()
        )
    })?;

    let log = AppendLog::open(OdsStore::new(&settings.document_path)).with_context(|| {
        format!("Failed to open {}", settings.document_path.display())
    })?;
    let source = RedditSource::new(credentials, &settings)?;

    println!(
        "Starting Reddit console scraper. Next ID = {}",
        log.pending_label()
    );
    println!("Press CTRL+C to stop.\n");

    let mut processor = Processor::new(source, log, ConsoleEmitter);
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    let stats = processor.run(shutdown).await?;
    println!("\nScraper stopped by user.");
    tracing::info!(
        recorded = stats.recorded,
        duplicates = stats.duplicates,
        next = %processor.log().pending_label(),
        "Stopped"
    );

    Ok(())
}
