// This file is part of postlog.
//
// Copyright (C) 2025 Matheus Cardoso <varvedb@matheus.sbs>
//
// This Source Code Form is subject to the terms of the Mozilla Public License
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at http://mozilla.org/MPL/2.0/.

mod common;

use common::{event, labels, FlakyStore};
use postlog::storage::{OdsStore, Table, TableStore};
use postlog::{sequencer, AppendLog, Label};
use tempfile::tempdir;

#[test]
fn test_three_events_into_new_document() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("reddit_output.ods");

    {
        let mut log = AppendLog::open(OdsStore::new(&path))?;
        log.append(&event("k1", "a", "T1"))?;
        log.append(&event("k2", "b", "T2"))?;
        log.append(&event("k3", "c", "T3"))?;
    }

    let table = OdsStore::new(&path).load()?.expect("document should exist");
    assert_eq!(table.header(), ["ID", "Subreddit", "Title", "URL"]);
    assert_eq!(
        table.rows(),
        [
            ["A001", "a", "T1", "https://redd.it/k1"],
            ["A002", "b", "T2", "https://redd.it/k2"],
            ["A003", "c", "T3", "https://redd.it/k3"],
        ]
    );

    Ok(())
}

#[test]
fn test_restart_continues_sequence() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("posts.ods");

    // 1. Open, write, close
    let pending_before_restart = {
        let mut log = AppendLog::open(OdsStore::new(&path))?;
        log.append(&event("k1", "a", "T1"))?;
        log.append(&event("k2", "b", "T2"))?;
        log.pending_label().clone()
    };

    // 2. Reopen: same pending label as if we never stopped
    let mut log = AppendLog::open(OdsStore::new(&path))?;
    assert_eq!(log.pending_label(), &pending_before_restart);
    assert_eq!(log.pending_label().to_string(), "A003");

    let record = log.append(&event("k3", "c", "T3"))?.expect("new key");
    assert_eq!(record.label.to_string(), "A003");
    assert_eq!(labels(log.table()), ["A001", "A002", "A003"]);

    Ok(())
}

#[test]
fn test_resume_from_existing_last_label() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("posts.ods");

    let mut table = Table::new();
    for label in ["ZZ997", "ZZ998", "ZZ999"] {
        table.push_row(vec![
            label.to_string(),
            "sub".to_string(),
            "title".to_string(),
            "https://redd.it/x".to_string(),
        ]);
    }
    OdsStore::new(&path).save(&table)?;

    let log = AppendLog::open(OdsStore::new(&path))?;
    let last: Label = "ZZ999".parse()?;
    assert_eq!(log.pending_label(), &sequencer::next(Some(&last)));
    assert_eq!(log.pending_label().to_string(), "AAA001");

    Ok(())
}

#[test]
fn test_header_only_document_starts_fresh() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("posts.ods");
    OdsStore::new(&path).save(&Table::new())?;

    let log = AppendLog::open(OdsStore::new(&path))?;
    assert_eq!(log.pending_label().to_string(), "A001");
    assert!(log.is_empty());

    Ok(())
}

#[test]
fn test_malformed_last_row_starts_fresh_and_keeps_rows() -> Result<(), Box<dyn std::error::Error>>
{
    let dir = tempdir()?;
    let path = dir.path().join("posts.ods");

    let mut table = Table::new();
    table.push_row(vec!["A001".into(), "a".into(), "T1".into(), "u".into()]);
    table.push_row(vec!["oops".into(), "b".into(), "T2".into(), "u".into()]);
    OdsStore::new(&path).save(&table)?;

    let mut log = AppendLog::open(OdsStore::new(&path))?;
    assert_eq!(log.pending_label().to_string(), "A001");

    log.append(&event("k3", "c", "T3"))?;
    assert_eq!(labels(log.table()), ["A001", "oops", "A001"]);

    Ok(())
}

#[test]
fn test_same_key_twice_appends_once() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("posts.ods");

    let mut log = AppendLog::open(OdsStore::new(&path))?;
    let post = event("k1", "a", "T1");
    assert!(log.append(&post)?.is_some());
    assert!(log.append(&post)?.is_none());

    let table = OdsStore::new(&path).load()?.expect("document should exist");
    assert_eq!(labels(&table), ["A001"]);

    Ok(())
}

#[test]
fn test_failed_save_does_not_consume_label() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("posts.ods");

    // Save #1 writes the header, #2 the first event, #3 (the second event) fails.
    {
        let mut log = AppendLog::open(FlakyStore::new(&path, |attempt| attempt >= 3))?;
        log.append(&event("k1", "a", "T1"))?;
        assert!(log.append(&event("k2", "b", "T2")).is_err());
        assert_eq!(log.pending_label().to_string(), "A002");
        assert_eq!(log.store().attempts(), 3);
    }

    let log = AppendLog::open(OdsStore::new(&path))?;
    assert_eq!(log.pending_label().to_string(), "A002");
    assert_eq!(labels(log.table()), ["A001"]);

    Ok(())
}

#[test]
fn test_open_fails_when_header_cannot_be_written() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("posts.ods");

    let result = AppendLog::open(FlakyStore::new(&path, |_| true));
    assert!(result.is_err());
    assert!(!path.exists());
}

#[test]
fn test_restart_rewrite_keeps_multiline_titles() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("posts.ods");

    {
        let mut log = AppendLog::open(OdsStore::new(&path))?;
        log.append(&event("k1", "a", "line1\nline2"))?;
        log.append(&event("k2", "b", "tab\there and <b>markup</b>"))?;
    }

    // The first append after a restart rewrites every earlier row.
    let mut log = AppendLog::open(OdsStore::new(&path))?;
    log.append(&event("k3", "c", "T3"))?;

    let table = OdsStore::new(&path).load()?.expect("document should exist");
    let titles: Vec<&str> = table.rows().iter().map(|row| row[2].as_str()).collect();
    assert_eq!(titles, ["line1\nline2", "tab\there and <b>markup</b>", "T3"]);
    assert_eq!(labels(&table), ["A001", "A002", "A003"]);

    Ok(())
}
