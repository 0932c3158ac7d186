// This file is part of postlog.
//
// Copyright (C) 2025 Matheus Cardoso <varvedb@matheus.sbs>
//
// This Source Code Form is subject to the terms of the Mozilla Public License
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

use crate::constants::PERMALINK_BASE;
use crate::label::Label;

/// A post as delivered by a [`crate::source::PostSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostEvent {
    /// Source-assigned unique key; also the permalink key.
    pub key: String,
    pub community: String,
    pub title: String,
}

impl PostEvent {
    pub fn new(
        key: impl Into<String>,
        community: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            community: community.into(),
            title: title.into(),
        }
    }

    /// `https://redd.it/<key>`
    pub fn permalink(&self) -> String {
        permalink(&self.key)
    }
}

pub fn permalink(key: &str) -> String {
    format!("{PERMALINK_BASE}/{key}")
}

/// One logged row: `ID | Subreddit | Title | URL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub label: Label,
    pub community: String,
    pub title: String,
    pub url: String,
}

impl PostRecord {
    /// Creates the record for `event` under `label`.
    pub fn new(label: Label, event: &PostEvent) -> Self {
        Self {
            label,
            community: event.community.clone(),
            title: event.title.clone(),
            url: event.permalink(),
        }
    }

    /// Cells in header order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.label.to_string(),
            self.community.clone(),
            self.title.clone(),
            self.url.clone(),
        ]
    }
}

/// The console line: `[A001] rust: Title (https://redd.it/k1)`.
impl fmt::Display for PostRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} ({})",
            self.label, self.community, self.title, self.url
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_row_and_display() {
        let event = PostEvent::new("k1", "rust", "Hello");
        let record = PostRecord::new(Label::first(), &event);

        assert_eq!(
            record.to_row(),
            vec!["A001", "rust", "Hello", "https://redd.it/k1"]
        );
        assert_eq!(
            record.to_string(),
            "[A001] rust: Hello (https://redd.it/k1)"
        );
    }
}
