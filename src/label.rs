// This file is part of postlog.
//
// Copyright (C) 2025 Matheus Cardoso <varvedb@matheus.sbs>
//
// This Source Code Form is subject to the terms of the Mozilla Public License
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at http://mozilla.org/MPL/2.0/.

//! Row identifiers of the form `<LETTERS><NNN>`, e.g. `A001`, `Z999`, `AA001`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::constants::{FIRST_PREFIX, MAX_NUMBER, NUMBER_WIDTH};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("label is empty")]
    Empty,
    #[error("label {0:?} does not end with three digits")]
    MissingDigits(String),
    #[error("label {0:?} has a prefix that is not uppercase A-Z")]
    InvalidPrefix(String),
    #[error("label {0:?} has a number outside 001-999")]
    OutOfRange(String),
}

/// A validated sequential identifier.
///
/// Labels order by prefix length first, then prefix text, then number, which
/// is exactly the order in which [`crate::sequencer::next`] issues them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label {
    prefix: String,
    number: u16,
}

impl Label {
    /// Builds a label from its parts, validating both.
    pub fn new(prefix: impl Into<String>, number: u16) -> Result<Self, LabelError> {
        let prefix = prefix.into();
        if !prefix.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(LabelError::InvalidPrefix(format!("{prefix}{number:03}")));
        }
        if !(1..=MAX_NUMBER).contains(&number) {
            return Err(LabelError::OutOfRange(format!("{prefix}{number:03}")));
        }
        Ok(Self { prefix, number })
    }

    /// `A001`, the first label ever issued.
    pub fn first() -> Self {
        Self {
            prefix: FIRST_PREFIX.to_string(),
            number: 1,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn number(&self) -> u16 {
        self.number
    }

    /// Whether this is the last label of its epoch (`...999`).
    pub fn is_epoch_end(&self) -> bool {
        self.number == MAX_NUMBER
    }

    pub(crate) fn from_parts_unchecked(prefix: String, number: u16) -> Self {
        debug_assert!(prefix.bytes().all(|b| b.is_ascii_uppercase()));
        debug_assert!((1..=MAX_NUMBER).contains(&number));
        Self { prefix, number }
    }
}

impl FromStr for Label {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(LabelError::Empty);
        }

        let bytes = s.as_bytes();
        if bytes.len() < NUMBER_WIDTH {
            return Err(LabelError::MissingDigits(s.to_string()));
        }

        let split = bytes.len() - NUMBER_WIDTH;
        if !bytes[split..].iter().all(u8::is_ascii_digit) {
            return Err(LabelError::MissingDigits(s.to_string()));
        }

        // The last three bytes are ASCII, so `split` is a char boundary.
        let (prefix, digits) = s.split_at(split);
        if !prefix.bytes().all(|b| b.is_ascii_uppercase()) {
            // `A1000` is a letter prefix with too many digits, not a bad prefix.
            let letters = prefix.trim_end_matches(|c: char| c.is_ascii_digit());
            if letters.len() < prefix.len() && letters.bytes().all(|b| b.is_ascii_uppercase()) {
                return Err(LabelError::OutOfRange(s.to_string()));
            }
            return Err(LabelError::InvalidPrefix(s.to_string()));
        }

        let number: u16 = digits
            .parse()
            .map_err(|_| LabelError::MissingDigits(s.to_string()))?;
        if number == 0 {
            return Err(LabelError::OutOfRange(s.to_string()));
        }

        Ok(Self {
            prefix: prefix.to_string(),
            number,
        })
    }
}

impl TryFrom<&str> for Label {
    type Error = LabelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:0width$}", self.prefix, self.number, width = NUMBER_WIDTH)
    }
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        self.prefix
            .len()
            .cmp(&other.prefix.len())
            .then_with(|| self.prefix.cmp(&other.prefix))
            .then_with(|| self.number.cmp(&other.number))
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
