// ABOUTME: Tests for dashboard calculations over goals, meals, and steps
// ABOUTME: Daily totals per calendar day, remaining budgets, and capped percentages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use caloriz::models::{MacroData, Meal};
use caloriz::nutrition::{daily_totals, DailySummary, MacroProgress};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use common::onboarded_user;

fn macros(calories: f64, protein: f64, carbs: f64, fats: f64) -> MacroData {
    MacroData {
        calories,
        protein,
        carbs,
        fats,
        fiber: 0.0,
    }
}

#[test]
fn test_daily_totals_only_count_that_day() {
    let user = onboarded_user("maria@test.com", Utc::now());
    let meals = vec![
        Meal::new(
            user.id,
            "Breakfast".to_owned(),
            macros(400.0, 20.0, 50.0, 10.0),
            Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap(),
        ),
        Meal::new(
            user.id,
            "Lunch".to_owned(),
            macros(700.0, 40.0, 80.0, 20.0),
            Utc.with_ymd_and_hms(2025, 5, 1, 13, 0, 0).unwrap(),
        ),
        Meal::new(
            user.id,
            "Late dinner".to_owned(),
            macros(900.0, 30.0, 100.0, 40.0),
            Utc.with_ymd_and_hms(2025, 4, 30, 22, 0, 0).unwrap(),
        ),
    ];

    let day = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
    let totals = daily_totals(&meals, day, &Utc);
    assert!((totals.calories - 1100.0).abs() < f64::EPSILON);
    assert!((totals.protein - 60.0).abs() < f64::EPSILON);

    let empty_day = NaiveDate::from_ymd_opt(2025, 5, 2).unwrap();
    assert_eq!(daily_totals(&meals, empty_day, &Utc), MacroData::default());
}

#[test]
fn test_macro_progress_caps_and_floors() {
    let over = MacroProgress::new(200.0, 160.0);
    assert!(over.remaining.abs() < f64::EPSILON);
    assert!((over.percent - 100.0).abs() < f64::EPSILON);

    let half = MacroProgress::new(40.0, 80.0);
    assert!((half.remaining - 40.0).abs() < f64::EPSILON);
    assert!((half.percent - 50.0).abs() < f64::EPSILON);

    let no_goal = MacroProgress::new(10.0, 0.0);
    assert!(no_goal.percent.abs() < f64::EPSILON);
}

#[test]
fn test_summary_uses_default_goals_and_trial() {
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 18, 0, 0).unwrap();
    let mut user = onboarded_user("maria@test.com", now - Duration::hours(30));
    user.current_steps = 3000;
    let meals = vec![Meal::new(
        user.id,
        "Lunch".to_owned(),
        macros(3000.0, 80.0, 140.0, 40.0),
        now - Duration::hours(5),
    )];

    let summary = DailySummary::build(&user, &meals, now, &Utc, false);
    assert_eq!(summary.goals, MacroData::default_goals());
    assert!(summary.calories_left.abs() < f64::EPSILON);
    assert!((summary.protein.percent - 50.0).abs() < f64::EPSILON);
    assert!((summary.carbs.remaining - 140.0).abs() < f64::EPSILON);
    assert_eq!(summary.steps.goal, 6000);
    assert!((summary.steps.percent - 50.0).abs() < f64::EPSILON);
    assert!(summary.on_trial);
    assert_eq!(summary.trial_days_left, 2);

    let privileged = DailySummary::build(&user, &meals, now, &Utc, true);
    assert!(!privileged.on_trial);
}

#[test]
fn test_summary_prefers_custom_goals() {
    let now = Utc::now();
    let mut user = onboarded_user("joao@test.com", now);
    user.custom_macros = Some(MacroData {
        calories: 1800.0,
        protein: 120.0,
        carbs: 150.0,
        fats: 60.0,
        fiber: 25.0,
    });
    let summary = DailySummary::build(&user, &[], now, &Utc, false);
    assert!((summary.calories_left - 1800.0).abs() < f64::EPSILON);
    assert!((summary.goals.fiber - 25.0).abs() < f64::EPSILON);
}
