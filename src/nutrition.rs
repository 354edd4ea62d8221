// ABOUTME: Daily nutrition dashboard calculations over logged meals and step counts
// ABOUTME: Macro totals per calendar day, remaining budgets, and progress percentages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

//! Dashboard numbers derived from a user's goals and logged meals.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::entitlement::{is_on_trial, trial_days_left};
use crate::models::{MacroData, Meal, UserAccount};

/// Progress of one macro against its goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroProgress {
    /// Amount consumed
    pub consumed: f64,
    /// Goal amount
    pub goal: f64,
    /// Amount still available, never negative
    pub remaining: f64,
    /// Percent of goal consumed, capped at 100
    pub percent: f64,
}

impl MacroProgress {
    /// Compute progress of `consumed` against `goal`
    #[must_use]
    pub fn new(consumed: f64, goal: f64) -> Self {
        Self {
            consumed,
            goal,
            remaining: (goal - consumed).max(0.0),
            percent: percent_of(consumed, goal),
        }
    }
}

/// Step count against the daily goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepProgress {
    /// Steps counted today
    pub steps: u32,
    /// Daily step goal
    pub goal: u32,
    /// Percent of goal reached, capped at 100
    pub percent: f64,
}

/// Everything the dashboard shows for one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    /// Calendar day summarized
    pub date: NaiveDate,
    /// Goals in effect
    pub goals: MacroData,
    /// Totals of meals logged that day
    pub consumed: MacroData,
    /// Calories left for the day, never negative
    pub calories_left: f64,
    /// Protein progress
    pub protein: MacroProgress,
    /// Carbohydrate progress
    pub carbs: MacroProgress,
    /// Fat progress
    pub fats: MacroProgress,
    /// Step progress
    pub steps: StepProgress,
    /// Whether the trial badge is shown
    pub on_trial: bool,
    /// Whole trial days remaining
    pub trial_days_left: i64,
}

impl DailySummary {
    /// Build the summary for the calendar day containing `now` in `tz`
    #[must_use]
    pub fn build<Tz: TimeZone>(
        user: &UserAccount,
        meals: &[Meal],
        now: DateTime<Utc>,
        tz: &Tz,
        is_privileged: bool,
    ) -> Self {
        let date = now.with_timezone(tz).date_naive();
        let goals = user.macro_goals();
        let consumed = daily_totals(meals, date, tz);
        let steps_goal = user.effective_steps_goal();

        Self {
            date,
            goals,
            consumed,
            calories_left: (goals.calories - consumed.calories).max(0.0),
            protein: MacroProgress::new(consumed.protein, goals.protein),
            carbs: MacroProgress::new(consumed.carbs, goals.carbs),
            fats: MacroProgress::new(consumed.fats, goals.fats),
            steps: StepProgress {
                steps: user.current_steps,
                goal: steps_goal,
                percent: percent_of(f64::from(user.current_steps), f64::from(steps_goal)),
            },
            on_trial: is_on_trial(user, is_privileged),
            trial_days_left: trial_days_left(user, now),
        }
    }
}

/// Sum the macros of meals eaten on `date` in `tz`
#[must_use]
pub fn daily_totals<Tz: TimeZone>(meals: &[Meal], date: NaiveDate, tz: &Tz) -> MacroData {
    meals
        .iter()
        .filter(|meal| meal.timestamp.with_timezone(tz).date_naive() == date)
        .fold(MacroData::default(), |total, meal| total + meal.macros)
}

fn percent_of(value: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        return 0.0;
    }
    (value / goal * 100.0).min(100.0)
}
