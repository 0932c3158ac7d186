// This file is part of postlog.
//
// Copyright (C) 2025 Matheus Cardoso <varvedb@matheus.sbs>
//
// This Source Code Form is subject to the terms of the Mozilla Public License
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::constants;
use crate::error::{Error, Result};

/// Reddit API credentials, read from `reddit_config.json`:
///
/// ```json
/// { "client_id": "...", "client_secret": "...", "user_agent": "postlog/0.1 by u/someone" }
/// ```
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

impl Credentials {
    /// Loads and validates credentials from a JSON file.
    ///
    /// A missing file is reported as [`Error::ConfigNotFound`] so the caller
    /// can stop before opening any connection.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.try_exists()? {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let raw = std::fs::read_to_string(path)?;
        let credentials: Credentials = serde_json::from_str(&raw)?;
        credentials.validate()?;
        Ok(credentials)
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("user_agent", &self.user_agent),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("`{name}` must not be empty")));
            }
        }
        Ok(())
    }
}

// Keep the secret out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Runtime settings for a logging run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config_path: PathBuf,
    pub document_path: PathBuf,
    pub subreddit: String,
    pub poll_interval: Duration,
    pub max_poll_interval: Duration,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(constants::DEFAULT_CONFIG_PATH),
            document_path: PathBuf::from(constants::DEFAULT_DOCUMENT_PATH),
            subreddit: constants::DEFAULT_SUBREDDIT.to_string(),
            poll_interval: constants::DEFAULT_POLL_INTERVAL,
            max_poll_interval: constants::MAX_POLL_INTERVAL,
            log_filter: constants::DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.subreddit.trim().is_empty() {
            return Err(Error::Config("subreddit must not be empty".into()));
        }
        if self.poll_interval.is_zero() {
            return Err(Error::Config("poll interval must be positive".into()));
        }
        if self.max_poll_interval < self.poll_interval {
            return Err(Error::Config(format!(
                "max poll interval {:?} is shorter than poll interval {:?}",
                self.max_poll_interval, self.poll_interval
            )));
        }
        Ok(())
    }
}
