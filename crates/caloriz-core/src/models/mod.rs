// ABOUTME: Domain model module organization and re-exports
// ABOUTME: Accounts, activity logs, nutrition, workouts, notifications, and app config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

//! Core data models shared by the storage layer, services, and binaries.

/// Activity log entries and actions
pub mod activity_log;
/// Platform configuration
pub mod app_config;
/// Meals and macros
pub mod nutrition;
/// Scheduled notifications
pub mod notification;
/// User accounts and profile updates
pub mod user;
/// Workout catalog
pub mod workout;

pub use activity_log::{ActivityLogEntry, LogAction};
pub use app_config::{AppConfig, AppConfigUpdate, SeasonalTheme, ThemeMode};
pub use notification::AppNotification;
pub use nutrition::{MacroData, Meal};
pub use user::{format_user_code, ActivityLevel, GoalType, ProfileUpdate, Sex, UserAccount};
pub use workout::{Exercise, Workout, WorkoutKind, WorkoutLevel};
