// This file is part of postlog.
//
// Copyright (C) 2025 Matheus Cardoso <varvedb@matheus.sbs>
//
// This Source Code Form is subject to the terms of the Mozilla Public License
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashSet;

use crate::error::Result;
use crate::label::Label;
use crate::model::{PostEvent, PostRecord};
use crate::sequencer;
use crate::storage::{Table, TableStore};
use crate::timed_dbg;

/// Append-only post log backed by a [`TableStore`].
///
/// - **Appends** require `&mut self` (single writer by construction; no locks).
/// - The stored document is the only durable record of the sequence: the
///   pending label is recovered from its last row on [`AppendLog::open`].
/// - An append either persists its row and advances the label, or changes
///   nothing.
///
/// # Example
///
/// ```rust
/// use postlog::append_log::AppendLog;
/// use postlog::model::PostEvent;
/// use postlog::storage::OdsStore;
/// use tempfile::tempdir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempdir()?;
/// let mut log = AppendLog::open(OdsStore::new(dir.path().join("posts.ods")))?;
/// assert_eq!(log.pending_label().to_string(), "A001");
///
/// let record = log.append(&PostEvent::new("k1", "rust", "Hello"))?;
/// assert_eq!(record.map(|r| r.url), Some("https://redd.it/k1".to_string()));
/// assert_eq!(log.pending_label().to_string(), "A002");
/// # Ok(())
/// # }
/// ```
pub struct AppendLog<S> {
    store: S,
    table: Table,
    pending: Label,
    last: Option<Label>,
    seen: HashSet<String>,
}

impl<S: TableStore> AppendLog<S> {
    /// Opens the document held by `store`, creating it when absent, and
    /// recovers the next label to issue.
    pub fn open(mut store: S) -> Result<Self> {
        let (table, recovered) = match store.load()? {
            Some(table) => {
                let recovered = recover(&table);
                (table, recovered)
            }
            None => {
                let table = Table::new();
                store.save(&table)?;
                tracing::info!("Created new document");
                (table, None)
            }
        };

        let pending = sequencer::next(recovered.as_ref());
        tracing::info!(
            rows = table.len(),
            last = %recovered.as_ref().map_or_else(|| "none".to_string(), Label::to_string),
            next = %pending,
            "Opened post log"
        );

        Ok(Self {
            store,
            table,
            pending,
            last: recovered,
            seen: HashSet::new(),
        })
    }

    /// Label the next appended row will carry.
    pub fn pending_label(&self) -> &Label {
        &self.pending
    }

    /// Label of the most recent row: recovered on open, then the last
    /// appended one. `None` if the document's last row had no valid label and
    /// nothing was appended since.
    pub fn last_label(&self) -> Option<&Label> {
        self.last.as_ref()
    }

    /// Number of data rows in the document.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Whether `key` was already recorded during this run.
    pub fn is_seen(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Appends `event` under the pending label and persists the document.
    ///
    /// Returns `Ok(None)` when the event's key was already recorded in this
    /// run. On a save error the row is withdrawn, the key stays unseen and the
    /// pending label is not advanced, so the call can be retried.
    pub fn append(&mut self, event: &PostEvent) -> Result<Option<PostRecord>> {
        if self.seen.contains(&event.key) {
            tracing::debug!(key = %event.key, "Skipping duplicate event");
            return Ok(None);
        }

        let record = PostRecord::new(self.pending.clone(), event);
        self.table.push_row(record.to_row());

        if let Err(e) = timed_dbg!("save", self.store.save(&self.table)) {
            self.table.pop_row();
            tracing::error!(label = %record.label, key = %event.key, error = %e, "Failed to persist row");
            return Err(e);
        }

        self.seen.insert(event.key.clone());
        self.pending = sequencer::next(Some(&self.pending));
        self.last = Some(record.label.clone());

        Ok(Some(record))
    }
}

/// Recovers the last issued label from the final row of `table`.
///
/// Any structural problem (no data rows, empty cell, text that is not a
/// label) yields `None` and the sequence restarts at `A001`.
pub fn recover(table: &Table) -> Option<Label> {
    let last = table.last_row()?;
    let Some(cell) = last.first() else {
        tracing::warn!("Last row has no cells; starting a fresh sequence");
        return None;
    };

    match cell.trim().parse::<Label>() {
        Ok(label) => Some(label),
        Err(e) => {
            tracing::warn!(cell = %cell, error = %e, "Last row has no valid label; starting a fresh sequence");
            None
        }
    }
}
