// ABOUTME: Output formatting helpers for caloriz-cli
// ABOUTME: Plain-text tables for users, timelines, notifications, config, and stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use caloriz::entitlement::days_since_creation;
use caloriz::models::{AppConfig, AppNotification, UserAccount, Workout};
use caloriz::services::PlatformStats;
use caloriz::timeline::DateGroup;
use chrono::{DateTime, Local, Utc};

const RULE_WIDTH: usize = 72;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Print one row per account
pub fn display_users(users: &[UserAccount], now: DateTime<Utc>) {
    if users.is_empty() {
        println!("No users found");
        return;
    }
    println!("{:<12} {:<24} {:<30} {:>5} {}", "CODE", "NAME", "EMAIL", "DAYS", "STATUS");
    println!("{}", rule());
    for user in users {
        let mut status = Vec::new();
        if user.is_premium {
            status.push("premium");
        }
        if user.is_banned {
            status.push("banned");
        }
        if user.needs_onboarding() {
            status.push("onboarding");
        }
        println!(
            "{:<12} {:<24} {:<30} {:>5.1} {}",
            user.user_code,
            user.name,
            user.email,
            days_since_creation(user, now),
            status.join(",")
        );
    }
    println!("\n{} user(s)", users.len());
}

/// Print date-grouped activity
pub fn display_timeline(groups: &[DateGroup]) {
    if groups.is_empty() {
        println!("No activity recorded");
        return;
    }
    for group in groups {
        println!("\n{}", group.label);
        println!("{}", "-".repeat(group.label.len()));
        for entry in &group.entries {
            println!(
                "  {}  {:<8} {}",
                entry.timestamp.with_timezone(&Local).format("%H:%M:%S"),
                entry.action.as_str(),
                entry.details
            );
        }
    }
}

/// Print scheduled notifications
pub fn display_notifications(notifications: &[AppNotification]) {
    if notifications.is_empty() {
        println!("No notifications scheduled");
        return;
    }
    for notification in notifications {
        println!(
            "{}  {}\n    {}",
            notification.scheduled_for.format("%Y-%m-%d %H:%M UTC"),
            notification.title,
            notification.message
        );
    }
}

/// Print the platform configuration
pub fn display_app_config(config: &AppConfig) {
    println!("{}", rule());
    println!("   Theme: {:?}", config.theme_mode);
    println!("   Seasonal theme: {:?}", config.seasonal_theme);
    println!("   Monthly price: {:.2}", config.monthly_price);
    println!("   Annual price: {:.2}", config.annual_price);
    println!("{}", rule());
}

/// Print platform counters
pub fn display_stats(stats: &PlatformStats) {
    println!("{}", rule());
    println!("   Total users: {}", stats.total_users);
    println!("   Subscribers: {}", stats.subscribers);
    println!("   On trial: {}", stats.trial_users);
    println!("   Trial expired: {}", stats.expired_trials);
    println!("   Banned: {}", stats.banned_users);
    println!(
        "   Estimated monthly revenue: {:.2}",
        stats.estimated_monthly_revenue
    );
    println!("{}", rule());
}

/// Print the workout catalog
pub fn display_workouts(workouts: &[Workout]) {
    if workouts.is_empty() {
        println!("Workout catalog is empty");
        return;
    }
    for workout in workouts {
        println!(
            "{:<36} {:<28} {:>3} min  {:<12} {:<11} {} kcal",
            workout.id,
            workout.title,
            workout.duration_min,
            workout.level.as_str(),
            workout.kind.as_str(),
            workout.calories_burn
        );
    }
}
