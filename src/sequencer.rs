// This file is part of postlog.
//
// Copyright (C) 2025 Matheus Cardoso <varvedb@matheus.sbs>
//
// This Source Code Form is subject to the terms of the Mozilla Public License
// v. 2.0. If a copy of the MPL was not distributed with this file, You can
// obtain one at http://mozilla.org/MPL/2.0/.

//! Pure label sequencing: `A001, A002, ..., A999, B001, ..., Z999, AA001, ...`.
//!
//! The number part counts `001..=999` inside an epoch. When it overflows the
//! prefix is incremented like a base-26 counter whose digits are `A..=Z`.

use crate::constants::FIRST_PREFIX;
use crate::label::{Label, LabelError};

/// Returns the label that follows `previous`, or `A001` when nothing was issued yet.
pub fn next(previous: Option<&Label>) -> Label {
    let Some(previous) = previous else {
        return Label::first();
    };

    if previous.is_epoch_end() {
        Label::from_parts_unchecked(increment_prefix(previous.prefix()), 1)
    } else {
        Label::from_parts_unchecked(previous.prefix().to_string(), previous.number() + 1)
    }
}

/// Same as [`next`], but parses `previous` first.
///
/// Malformed input is rejected rather than guessed at.
pub fn next_from_str(previous: Option<&str>) -> Result<Label, LabelError> {
    let previous = previous.map(str::parse::<Label>).transpose()?;
    Ok(next(previous.as_ref()))
}

/// Increments an `A..=Z` prefix with carry. `""` becomes `"A"`, `"Z"` becomes `"AA"`.
///
/// The caller must pass an uppercase ASCII prefix.
pub fn increment_prefix(prefix: &str) -> String {
    if prefix.is_empty() {
        return FIRST_PREFIX.to_string();
    }

    let mut digits = prefix.as_bytes().to_vec();
    let mut carry = true;
    for digit in digits.iter_mut().rev() {
        if *digit == b'Z' {
            *digit = b'A';
        } else {
            *digit += 1;
            carry = false;
            break;
        }
    }
    if carry {
        digits.insert(0, b'A');
    }

    // Only ASCII uppercase bytes were written.
    digits.into_iter().map(char::from).collect()
}

/// Iterator over consecutive labels starting after `last`.
#[derive(Debug, Clone)]
pub struct Labels {
    last: Option<Label>,
}

impl Labels {
    pub fn after(last: Option<Label>) -> Self {
        Self { last }
    }
}

impl Iterator for Labels {
    type Item = Label;

    fn next(&mut self) -> Option<Self::Item> {
        let label = next(self.last.as_ref());
        self.last = Some(label.clone());
        Some(label)
    }
}
