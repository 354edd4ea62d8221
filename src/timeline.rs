// ABOUTME: Groups activity-log entries into calendar-date buckets for audit timelines
// ABOUTME: Stable first-occurrence grouping in the viewer's time zone
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

//! # Activity Timeline
//!
//! Buckets a user's activity log by calendar day. The input is expected to be
//! ordered newest first already; it is never re-sorted. Days appear in the
//! order they are first seen and entries keep their input order inside a day.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chrono::{Datelike, Local, NaiveDate, TimeZone};
use serde::Serialize;

use crate::models::ActivityLogEntry;

/// Entries sharing one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateGroup {
    /// Calendar day in the viewer's time zone
    pub date: NaiveDate,
    /// Short display label, e.g. `12/3/2025`
    pub label: String,
    /// Entries of that day in input order
    pub entries: Vec<ActivityLogEntry>,
}

/// Short `M/D/YYYY` label for a calendar day
#[must_use]
pub fn date_label(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Group entries by calendar day in the local time zone
#[must_use]
pub fn group_by_date(entries: &[ActivityLogEntry]) -> Vec<DateGroup> {
    group_by_date_in(entries, &Local)
}

/// Group entries by calendar day in `tz`
#[must_use]
pub fn group_by_date_in<Tz: TimeZone>(entries: &[ActivityLogEntry], tz: &Tz) -> Vec<DateGroup> {
    let mut groups: Vec<DateGroup> = Vec::new();
    let mut index_by_date: HashMap<NaiveDate, usize> = HashMap::new();

    for entry in entries {
        let date = entry.timestamp.with_timezone(tz).date_naive();
        match index_by_date.entry(date) {
            Entry::Occupied(slot) => groups[*slot.get()].entries.push(entry.clone()),
            Entry::Vacant(slot) => {
                slot.insert(groups.len());
                groups.push(DateGroup {
                    date,
                    label: date_label(date),
                    entries: vec![entry.clone()],
                });
            }
        }
    }

    groups
}

/// Concatenate the groups back into one sequence
#[must_use]
pub fn flatten(groups: &[DateGroup]) -> Vec<ActivityLogEntry> {
    groups
        .iter()
        .flat_map(|group| group.entries.iter().cloned())
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_date_label_has_no_padding() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 3).unwrap();
        assert_eq!(date_label(date), "12/3/2025");
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_date(&[]).is_empty());
        assert!(flatten(&[]).is_empty());
    }
}
