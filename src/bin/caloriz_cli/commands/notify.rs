// ABOUTME: Broadcast notification commands for caloriz-cli
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use caloriz::errors::AppResult;
use caloriz::services::AdminService;
use chrono::Utc;

use crate::helpers::display::display_notifications;

/// Schedule a notification
pub async fn schedule(
    admin: &AdminService,
    title: &str,
    message: &str,
    at: &str,
) -> AppResult<()> {
    let notification = admin
        .schedule_notification(title, message, at, Utc::now())
        .await?;
    println!(
        "Scheduled '{}' for {}",
        notification.title,
        notification.scheduled_for.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}

/// List scheduled notifications
pub async fn list(admin: &AdminService) -> AppResult<()> {
    display_notifications(&admin.notifications().await?);
    Ok(())
}
