// This file is part of postlog.
//
// Copyright (C) 2025 Matheus Cardoso <varvedb@matheus.sbs>
//
// This Source Code Form is subject to the terms of the Mozilla Public License
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at http://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use spreadsheet_ods::xmltree::{XmlContent, XmlTag};
use spreadsheet_ods::{Sheet, Value, WorkBook};

use super::{write_atomic, Table, TableStore};
use crate::constants::SHEET_NAME;
use crate::error::Result;
use crate::timed_dbg;

/// Stores the table as the first sheet of an OpenDocument spreadsheet.
///
/// # Example
///
/// ```rust
/// use postlog::storage::{OdsStore, Table, TableStore};
/// use tempfile::tempdir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempdir()?;
/// let mut store = OdsStore::new(dir.path().join("posts.ods"));
/// assert!(store.load()?.is_none());
///
/// store.save(&Table::new())?;
/// assert_eq!(store.load()?, Some(Table::new()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OdsStore {
    path: PathBuf,
}

impl OdsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableStore for OdsStore {
    fn load(&self) -> Result<Option<Table>> {
        if !self.path.try_exists()? {
            return Ok(None);
        }

        let book = timed_dbg!("ods_read", spreadsheet_ods::read_ods(&self.path))?;
        let table = table_from_book(&book);
        tracing::debug!(
            path = %self.path.display(),
            rows = table.len(),
            "Loaded document"
        );
        Ok(Some(table))
    }

    fn save(&mut self, table: &Table) -> Result<()> {
        let mut book = book_from_table(table);
        let bytes = timed_dbg!(
            "ods_encode",
            spreadsheet_ods::write_ods_buf(&mut book, Vec::new())
        )?;
        timed_dbg!("ods_write", write_atomic(&self.path, &bytes))?;
        Ok(())
    }
}

fn table_from_book(book: &WorkBook) -> Table {
    if book.num_sheets() == 0 {
        tracing::warn!("Document has no sheets; starting with an empty table");
        return Table::new();
    }

    let sheet = book.sheet(0);
    let (rows, cols) = sheet.used_grid_size();
    if rows == 0 {
        return Table::new();
    }

    let read_row = |row: u32| -> Vec<String> {
        (0..cols).map(|col| cell_text(sheet.value(row, col))).collect()
    };

    let mut table = Table::with_header(read_row(0));
    for row in 1..rows {
        table.push_row(read_row(row));
    }
    table
}

fn book_from_table(table: &Table) -> WorkBook {
    let mut sheet = Sheet::new(SHEET_NAME);
    for (col, cell) in table.header().iter().enumerate() {
        sheet.set_value(0, col as u32, cell.as_str());
    }
    for (row, cells) in table.rows().iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            sheet.set_value(row as u32 + 1, col as u32, cell.as_str());
        }
    }

    let mut book = WorkBook::new_empty();
    book.push_sheet(sheet);
    book
}

/// Display text of a cell.
///
/// Multi-line text is stored as one paragraph per line and comes back as
/// [`Value::TextXml`]; the paragraphs are joined with `\n`. Cells typed by
/// another editor read as their display string so a rewrite keeps them.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Empty => String::new(),
        Value::Text(text) => text.clone(),
        Value::TextXml(paragraphs) => paragraphs
            .iter()
            .map(|paragraph| {
                let mut text = String::new();
                push_xml_text(paragraph, &mut text);
                text
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Boolean(flag) => flag.to_string(),
        Value::Number(number) | Value::Percentage(number) | Value::Currency(number, _) => {
            number.to_string()
        }
        Value::DateTime(date) => date.to_string(),
        Value::TimeDuration(duration) => duration.to_string(),
        #[allow(unreachable_patterns)]
        _ => String::new(),
    }
}

fn push_xml_text(tag: &XmlTag, out: &mut String) {
    match tag.name() {
        "text:line-break" => out.push('\n'),
        "text:tab" => out.push('\t'),
        "text:s" => out.push(' '),
        _ => {
            for content in tag.content() {
                match content {
                    XmlContent::Text(text) => out.push_str(text),
                    XmlContent::Tag(child) => push_xml_text(child, out),
                }
            }
        }
    }
}
