// This file is part of postlog.
//
// Copyright (C) 2025 Matheus Cardoso <varvedb@matheus.sbs>
//
// This Source Code Form is subject to the terms of the Mozilla Public License
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at http://mozilla.org/MPL/2.0/.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use super::{PollBackoff, PostSource, SeenWindow};
use crate::config::{Credentials, Settings};
use crate::constants::{
    API_BASE_URL, HTTP_TIMEOUT, LISTING_LIMIT, SEEN_WINDOW, TOKEN_REFRESH_MARGIN, TOKEN_URL,
};
use crate::error::{Error, Result};
use crate::model::PostEvent;

/// Streams new submissions of a subreddit (`all` by default) through the
/// Reddit OAuth API using application-only (client credentials) auth.
///
/// Posts that already exist when the stream starts are skipped; only posts
/// that show up after the first poll are delivered.
pub struct RedditSource {
    http: reqwest::Client,
    credentials: Credentials,
    subreddit: String,
    token: Option<AccessToken>,
    poll: PollState,
}

struct AccessToken {
    value: String,
    refresh_at: Instant,
}

impl RedditSource {
    pub fn new(credentials: Credentials, settings: &Settings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(credentials.user_agent.clone())
            .timeout(HTTP_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            credentials,
            subreddit: settings.subreddit.clone(),
            token: None,
            poll: PollState::new(
                SeenWindow::new(SEEN_WINDOW),
                PollBackoff::new(settings.poll_interval, settings.max_poll_interval),
            ),
        })
    }

    async fn access_token(&mut self) -> Result<String> {
        if let Some(token) = &self.token {
            if Instant::now() < token.refresh_at {
                return Ok(token.value.clone());
            }
        }

        let response: TokenResponse = self
            .http
            .post(TOKEN_URL)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?
            .json()
            .await?;

        let token = response.into_token()?;
        tracing::debug!(refresh_in = ?token.refresh_at.saturating_duration_since(Instant::now()), "Obtained access token");
        let value = token.value.clone();
        self.token = Some(token);
        Ok(value)
    }

    async fn fetch_newest(&mut self) -> Result<Vec<PostEvent>> {
        let token = self.access_token().await?;
        let url = format!("{API_BASE_URL}/r/{}/new", self.subreddit);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&[("limit", LISTING_LIMIT.to_string()), ("raw_json", "1".to_string())])
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.token = None;
            return Err(Error::Auth("access token rejected".into()));
        }

        let listing: Listing = response.error_for_status()?.json().await?;
        Ok(listing.into_events())
    }
}

#[async_trait]
impl PostSource for RedditSource {
    fn name(&self) -> &str {
        "reddit"
    }

    async fn next_batch(&mut self) -> Result<Vec<PostEvent>> {
        loop {
            if let Some(delay) = self.poll.take_wait() {
                tokio::time::sleep(delay).await;
            }

            let fetched = self.fetch_newest().await;
            if let Some(batch) = self.poll.accept(fetched) {
                return batch;
            }
        }
    }
}

/// Decides what one fetch of the newest listing yields and how long to wait
/// before the next one.
///
/// The first successful fetch only primes the seen window. After that, a
/// fetch with new keys yields them and resets the interval, while an empty or
/// failed fetch grows it.
struct PollState {
    window: SeenWindow,
    backoff: PollBackoff,
    wait: Option<Duration>,
    primed: bool,
}

impl PollState {
    fn new(window: SeenWindow, backoff: PollBackoff) -> Self {
        Self {
            window,
            backoff,
            wait: None,
            primed: false,
        }
    }

    fn take_wait(&mut self) -> Option<Duration> {
        self.wait.take()
    }

    /// Folds in one fetch. `None` means nothing to deliver yet; poll again.
    fn accept(&mut self, fetched: Result<Vec<PostEvent>>) -> Option<Result<Vec<PostEvent>>> {
        let events = match fetched {
            Ok(events) => events,
            Err(e) => {
                self.wait = Some(self.backoff.grow());
                return Some(Err(e));
            }
        };
        let fresh = self.window.retain_unseen(events);

        if !self.primed {
            self.primed = true;
            self.wait = Some(self.backoff.reset());
            tracing::info!(skipped = fresh.len(), "Skipped existing posts");
            return None;
        }

        if fresh.is_empty() {
            self.wait = Some(self.backoff.grow());
            return None;
        }

        self.wait = Some(self.backoff.reset());
        Some(Ok(fresh))
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
    error: Option<String>,
}

impl TokenResponse {
    fn into_token(self) -> Result<AccessToken> {
        match (self.access_token, self.error) {
            (Some(value), None) => {
                let lifetime = Duration::from_secs(self.expires_in.unwrap_or(3600));
                Ok(AccessToken {
                    value,
                    refresh_at: Instant::now() + lifetime.saturating_sub(TOKEN_REFRESH_MARGIN),
                })
            }
            (_, Some(error)) => Err(Error::Auth(error)),
            (None, None) => Err(Error::Auth("no access token in response".into())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    data: Submission,
}

#[derive(Debug, Deserialize)]
struct Submission {
    id: Option<String>,
    subreddit: Option<String>,
    title: Option<String>,
}

impl Listing {
    /// Listings come newest first; events are returned oldest first.
    fn into_events(self) -> Vec<PostEvent> {
        self.data
            .children
            .into_iter()
            .rev()
            .filter_map(|thing| {
                let Submission {
                    id,
                    subreddit,
                    title,
                } = thing.data;
                let Some(id) = id.filter(|id| !id.is_empty()) else {
                    tracing::warn!("Dropping submission without an id");
                    return None;
                };
                Some(PostEvent {
                    key: id,
                    community: subreddit.unwrap_or_default(),
                    title: title.unwrap_or_default(),
                })
            })
            .collect()
    }
}
