// This file is part of postlog.
//
// Copyright (C) 2025 Matheus Cardoso <varvedb@matheus.sbs>
//
// This Source Code Form is subject to the terms of the Mozilla Public License
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

use crate::label::{Label, LabelError};

/// Custom error type for postlog operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred (e.g., file system issues).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The spreadsheet document could not be read or written.
    #[error("ODS error: {0}")]
    Ods(#[from] spreadsheet_ods::OdsError),

    /// A label failed validation.
    #[error("Invalid label: {0}")]
    Label(#[from] LabelError),

    /// The credentials file does not exist.
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request to the stream API failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The stream API rejected our credentials.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Saving the row carrying `label` kept failing.
    #[error("Failed to persist row {label} after {attempts} attempts: {source}")]
    PersistenceExhausted {
        label: Label,
        attempts: u32,
        #[source]
        source: Box<Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
