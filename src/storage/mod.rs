// This file is part of postlog.
//
// Copyright (C) 2025 Matheus Cardoso <varvedb@matheus.sbs>
//
// This Source Code Form is subject to the terms of the Mozilla Public License
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at http://mozilla.org/MPL/2.0/.

//! The tabular document and the stores that persist it.

mod ods;

pub use ods::OdsStore;

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::constants::HEADER;
use crate::error::Result;

/// An in-memory table: one header row followed by data rows in append order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// A table holding only the standard `ID | Subreddit | Title | URL` header.
    pub fn new() -> Self {
        Self::with_header(HEADER.iter().map(|h| h.to_string()).collect())
    }

    pub fn with_header(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn last_row(&self) -> Option<&[String]> {
        self.rows.last().map(Vec::as_slice)
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn pop_row(&mut self) -> Option<Vec<String>> {
        self.rows.pop()
    }

    /// Number of data rows (the header is not counted).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// Durable backing for a [`Table`].
///
/// `save` must either persist the whole table or leave the previous
/// document intact.
pub trait TableStore {
    /// Loads the stored table, or `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Table>>;

    /// Replaces the stored table with `table`.
    fn save(&mut self, table: &Table) -> Result<()>;
}

/// Writes `bytes` to `path` via a synced sibling temp file and a rename.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = temp_path(path);

    let mut file: File = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&tmp)?;
    if let Err(e) = file.write_all(bytes).and_then(|()| file.sync_all()) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }
    drop(file);

    std::fs::rename(&tmp, path)?;
    fsync_dir(parent_dir(path))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Makes the rename itself durable.
#[cfg(unix)]
fn fsync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_new_table_has_standard_header() {
        let table = Table::new();
        assert_eq!(table.header(), ["ID", "Subreddit", "Title", "URL"]);
        assert!(table.is_empty());
        assert!(table.last_row().is_none());
    }

    #[test]
    fn test_push_and_pop_rows() {
        let mut table = Table::new();
        table.push_row(vec!["A001".into()]);
        table.push_row(vec!["A002".into()]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.last_row(), Some(&["A002".to_string()][..]));

        assert_eq!(table.pop_row(), Some(vec!["A002".to_string()]));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_write_atomic_replaces_and_cleans_up() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("doc.ods");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_parent_dir_of_bare_file_name() {
        assert_eq!(parent_dir(Path::new("doc.ods")), Path::new("."));
        assert_eq!(parent_dir(Path::new("out/doc.ods")), Path::new("out"));
    }
}
