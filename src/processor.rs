// This file is part of postlog.
//
// Copyright (C) 2025 Matheus Cardoso <varvedb@matheus.sbs>
//
// This Source Code Form is subject to the terms of the Mozilla Public License
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at http://mozilla.org/MPL/2.0/.

use std::future::Future;

use crate::append_log::AppendLog;
use crate::error::{Error, Result};
use crate::model::{PostEvent, PostRecord};
use crate::retry::RetryConfig;
use crate::source::PostSource;
use crate::storage::TableStore;

/// Receives every record right after it was persisted.
pub trait Emitter {
    fn emit(&mut self, record: &PostRecord);
}

/// Prints `[A001] rust: Title (https://redd.it/k1)` to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleEmitter;

impl Emitter for ConsoleEmitter {
    fn emit(&mut self, record: &PostRecord) {
        println!("{record}");
    }
}

impl Emitter for Vec<PostRecord> {
    fn emit(&mut self, record: &PostRecord) {
        self.push(record.clone());
    }
}

/// Configuration for the processing loop.
#[derive(Clone, Copy, Debug)]
pub struct ProcessorConfig {
    /// Backoff between attempts to save one row. When exhausted the run aborts.
    pub save_retry: RetryConfig,
    /// Consecutive source failures tolerated before the run aborts.
    pub max_source_errors: u32,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            save_retry: RetryConfig::DEFAULT,
            max_source_errors: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub recorded: usize,
    pub duplicates: usize,
    pub batches: usize,
}

/// Pulls batches from a [`PostSource`] and appends them to an [`AppendLog`],
/// one event at a time.
pub struct Processor<S, T, E> {
    source: S,
    log: AppendLog<T>,
    emitter: E,
    config: ProcessorConfig,
    stats: RunStats,
}

impl<S, T, E> Processor<S, T, E>
where
    S: PostSource,
    T: TableStore,
    E: Emitter,
{
    pub fn new(source: S, log: AppendLog<T>, emitter: E) -> Self {
        Self {
            source,
            log,
            emitter,
            config: ProcessorConfig::default(),
            stats: RunStats::default(),
        }
    }

    pub fn with_config(mut self, config: ProcessorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn log(&self) -> &AppendLog<T> {
        &self.log
    }

    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn into_parts(self) -> (S, AppendLog<T>, E) {
        (self.source, self.log, self.emitter)
    }

    /// Runs until `shutdown` resolves or an unrecoverable error occurs.
    ///
    /// Shutdown is only observed while waiting for the source, so a batch
    /// that was already pulled is recorded completely and no row is ever
    /// half-written.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<RunStats>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut source_errors = 0u32;

        tracing::info!(source = self.source.name(), next = %self.log.pending_label(), "Processing started");

        loop {
            let batch = tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::info!(stats = ?self.stats, "Shutdown requested");
                    break;
                }
                batch = self.source.next_batch() => batch,
            };

            let events = match batch {
                Ok(events) => {
                    source_errors = 0;
                    events
                }
                Err(e) => {
                    source_errors += 1;
                    if source_errors > self.config.max_source_errors {
                        tracing::error!(error = %e, source_errors, "Source keeps failing; giving up");
                        return Err(e);
                    }
                    tracing::warn!(error = %e, source_errors, "Failed to fetch posts");
                    // The source delays its next poll with its own backoff.
                    continue;
                }
            };

            self.stats.batches += 1;
            for event in &events {
                self.record(event).await?;
            }
        }

        Ok(self.stats.clone())
    }

    /// Appends one event, retrying failed saves with backoff.
    async fn record(&mut self, event: &PostEvent) -> Result<()> {
        let retry = self.config.save_retry;
        let mut delays = retry.delays();
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            match self.log.append(event) {
                Ok(Some(record)) => {
                    tracing::debug!(label = %record.label, key = %event.key, "Recorded post");
                    self.emitter.emit(&record);
                    self.stats.recorded += 1;
                    return Ok(());
                }
                Ok(None) => {
                    self.stats.duplicates += 1;
                    return Ok(());
                }
                Err(e) => match delays.next() {
                    Some(delay) => {
                        tracing::warn!(attempts, ?delay, error = %e, "Save failed; retrying");
                        tokio::time::sleep(delay).await;
                    }
                    None => {
                        return Err(Error::PersistenceExhausted {
                            label: self.log.pending_label().clone(),
                            attempts,
                            source: Box::new(e),
                        });
                    }
                },
            }
        }
    }
}
