// This file is part of postlog.
//
// Copyright (C) 2025 Matheus Cardoso <varvedb@matheus.sbs>
//
// This Source Code Form is subject to the terms of the Mozilla Public License
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at http://mozilla.org/MPL/2.0/.

use std::time::Duration;

pub const HEADER: [&str; 4] = ["ID", "Subreddit", "Title", "URL"];
pub const SHEET_NAME: &str = "RedditPosts";
pub const PERMALINK_BASE: &str = "https://redd.it";

pub const DEFAULT_CONFIG_PATH: &str = "reddit_config.json";
pub const DEFAULT_DOCUMENT_PATH: &str = "reddit_output.ods";
pub const DEFAULT_SUBREDDIT: &str = "all";
pub const DEFAULT_LOG_FILTER: &str = "info";

pub const FIRST_PREFIX: &str = "A";
pub const MAX_NUMBER: u16 = 999;
pub const NUMBER_WIDTH: usize = 3;

pub const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
pub const API_BASE_URL: &str = "https://oauth.reddit.com";
pub const LISTING_LIMIT: u32 = 100;
pub const SEEN_WINDOW: usize = 301;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const MAX_POLL_INTERVAL: Duration = Duration::from_secs(16);
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// Refresh the access token this long before it actually expires.
pub const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);
