// ABOUTME: Tests for grouping activity logs by calendar day
// ABOUTME: Order preservation, time zone boundaries, and regrouping stability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use caloriz::models::{ActivityLogEntry, LogAction};
use caloriz::timeline::{flatten, group_by_date, group_by_date_in};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

fn entry(user_id: Uuid, action: LogAction, at: DateTime<Utc>) -> ActivityLogEntry {
    ActivityLogEntry::new(user_id, action, format!("{action} at {at}"), at)
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

#[test]
fn test_three_entries_on_two_days() {
    let user = Uuid::new_v4();
    let logs = vec![
        entry(user, LogAction::Logout, utc(2025, 3, 2, 18, 0)),
        entry(user, LogAction::Login, utc(2025, 3, 2, 9, 0)),
        entry(user, LogAction::Register, utc(2025, 3, 1, 20, 30)),
    ];

    let groups = group_by_date_in(&logs, &Utc);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].label, "3/2/2025");
    assert_eq!(groups[0].entries, logs[..2].to_vec());
    assert_eq!(groups[1].label, "3/1/2025");
    assert_eq!(groups[1].date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    assert_eq!(groups[1].entries, logs[2..].to_vec());
}

#[test]
fn test_empty_input_gives_empty_output() {
    assert!(group_by_date_in(&[], &Utc).is_empty());
    assert!(group_by_date(&[]).is_empty());
}

#[test]
fn test_days_follow_the_viewer_time_zone() {
    let user = Uuid::new_v4();
    // 01:30 UTC is still the previous evening at UTC-3.
    let logs = vec![
        entry(user, LogAction::View, utc(2025, 6, 10, 1, 30)),
        entry(user, LogAction::Login, utc(2025, 6, 9, 23, 0)),
    ];

    assert_eq!(group_by_date_in(&logs, &Utc).len(), 2);

    let sao_paulo = FixedOffset::west_opt(3 * 3600).unwrap();
    let groups = group_by_date_in(&logs, &sao_paulo);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].label, "6/9/2025");
    assert_eq!(groups[0].entries.len(), 2);
}

#[test]
fn test_input_is_never_resorted() {
    let user = Uuid::new_v4();
    // Out of order on purpose: day 5, day 4, day 5 again.
    let logs = vec![
        entry(user, LogAction::Action, utc(2025, 1, 5, 12, 0)),
        entry(user, LogAction::Login, utc(2025, 1, 4, 12, 0)),
        entry(user, LogAction::View, utc(2025, 1, 5, 8, 0)),
    ];

    let groups = group_by_date_in(&logs, &Utc);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].label, "1/5/2025");
    assert_eq!(groups[0].entries, vec![logs[0].clone(), logs[2].clone()]);
    assert_eq!(groups[1].entries, vec![logs[1].clone()]);
}

#[test]
fn test_regrouping_flattened_output_is_stable() {
    let user = Uuid::new_v4();
    let logs: Vec<_> = (0..12)
        .map(|i| entry(user, LogAction::View, utc(2025, 2, 20 - i / 4, 23 - i, 0)))
        .collect();

    let groups = group_by_date_in(&logs, &Utc);
    let flat = flatten(&groups);
    assert_eq!(flat, logs);
    assert_eq!(group_by_date_in(&flat, &Utc), groups);
}

#[test]
fn test_identical_timestamps_keep_input_order() {
    let user = Uuid::new_v4();
    let at = utc(2025, 4, 7, 10, 15);
    let logs: Vec<_> = ["Opened workouts tab", "Opened home tab", "Opened diet tab"]
        .into_iter()
        .map(|details| ActivityLogEntry::new(user, LogAction::View, details.to_owned(), at))
        .collect();

    let groups = group_by_date_in(&logs, &Utc);
    assert_eq!(groups.len(), 1);
    let details: Vec<_> = groups[0]
        .entries
        .iter()
        .map(|log| log.details.as_str())
        .collect();
    assert_eq!(
        details,
        vec!["Opened workouts tab", "Opened home tab", "Opened diet tab"]
    );
    assert_eq!(groups[0].entries, logs);
}
