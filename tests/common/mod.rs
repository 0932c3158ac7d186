#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use postlog::error::{Error, Result};
use postlog::source::PostSource;
use postlog::storage::{OdsStore, Table, TableStore};
use postlog::PostEvent;

/// An [`OdsStore`] whose `n`-th save (1-based) fails when `fails(n)` is true.
pub struct FlakyStore {
    inner: OdsStore,
    attempts: usize,
    fails: Box<dyn Fn(usize) -> bool + Send>,
}

impl FlakyStore {
    pub fn new(path: &Path, fails: impl Fn(usize) -> bool + Send + 'static) -> Self {
        Self {
            inner: OdsStore::new(path),
            attempts: 0,
            fails: Box::new(fails),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

impl TableStore for FlakyStore {
    fn load(&self) -> Result<Option<Table>> {
        self.inner.load()
    }

    fn save(&mut self, table: &Table) -> Result<()> {
        self.attempts += 1;
        if (self.fails)(self.attempts) {
            return Err(Error::Io(std::io::Error::other("injected save failure")));
        }
        self.inner.save(table)
    }
}

/// Replays scripted batches, then flags `drained` and waits forever.
pub struct ScriptedSource {
    script: VecDeque<Result<Vec<PostEvent>>>,
    drained: Arc<AtomicBool>,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<Vec<PostEvent>>>) -> (Self, Arc<AtomicBool>) {
        let drained = Arc::new(AtomicBool::new(false));
        let source = Self {
            script: script.into(),
            drained: Arc::clone(&drained),
        };
        (source, drained)
    }
}

#[async_trait]
impl PostSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn next_batch(&mut self) -> Result<Vec<PostEvent>> {
        match self.script.pop_front() {
            Some(batch) => batch,
            None => {
                self.drained.store(true, Ordering::SeqCst);
                std::future::pending().await
            }
        }
    }
}

/// Resolves once `flag` is set.
pub async fn when_set(flag: Arc<AtomicBool>) {
    while !flag.load(Ordering::SeqCst) {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
}

pub fn event(key: &str, community: &str, title: &str) -> PostEvent {
    PostEvent::new(key, community, title)
}

pub fn labels(table: &Table) -> Vec<String> {
    table.rows().iter().map(|row| row[0].clone()).collect()
}
