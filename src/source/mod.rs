// This file is part of postlog.
//
// Copyright (C) 2025 Matheus Cardoso <varvedb@matheus.sbs>
//
// This Source Code Form is subject to the terms of the Mozilla Public License
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at http://mozilla.org/MPL/2.0/.

//! Post sources feeding the logger.
//!
//! All sources implement [`PostSource`]. A source delivers batches oldest
//! first and should not hand out the same key twice within its own seen
//! window; [`crate::append_log::AppendLog`] still de-duplicates per run.

mod reddit;

pub use reddit::RedditSource;

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::PostEvent;

#[async_trait]
pub trait PostSource: Send {
    /// Human-readable name for this source (used in logs).
    fn name(&self) -> &str;

    /// Waits for and returns the next batch of new posts, oldest first.
    ///
    /// Dropping the returned future must not lose posts that were never
    /// returned.
    async fn next_batch(&mut self) -> Result<Vec<PostEvent>>;
}

/// Bounded set of recently delivered keys; the oldest key is evicted first.
#[derive(Debug, Clone)]
pub struct SeenWindow {
    capacity: usize,
    order: VecDeque<String>,
    keys: HashSet<String>,
}

impl SeenWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            order: VecDeque::with_capacity(capacity),
            keys: HashSet::with_capacity(capacity),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Records `key`; returns `false` if it was already in the window.
    pub fn insert(&mut self, key: &str) -> bool {
        if self.keys.contains(key) {
            return false;
        }
        if self.order.len() == self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.keys.remove(&oldest);
            }
        }
        self.order.push_back(key.to_string());
        self.keys.insert(key.to_string());
        true
    }

    /// Keeps the events whose keys were not seen yet, recording them.
    pub fn retain_unseen(&mut self, events: Vec<PostEvent>) -> Vec<PostEvent> {
        events
            .into_iter()
            .filter(|event| self.insert(&event.key))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Poll interval that doubles after every empty poll, up to `max`.
#[derive(Debug, Clone)]
pub struct PollBackoff {
    base: Duration,
    max: Duration,
    current: Duration,
}

impl PollBackoff {
    pub fn new(base: Duration, max: Duration) -> Self {
        Self {
            base,
            max: max.max(base),
            current: base,
        }
    }

    /// Back to the base interval; returns it.
    pub fn reset(&mut self) -> Duration {
        self.current = self.base;
        self.current
    }

    /// Returns the current interval and doubles it for next time.
    pub fn grow(&mut self) -> Duration {
        let delay = self.current;
        self.current = (self.current * 2).min(self.max);
        delay
    }

    pub fn current(&self) -> Duration {
        self.current
    }
}
