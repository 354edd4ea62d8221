// ABOUTME: Storage for broadcast notifications scheduled by administrators
// ABOUTME: Adds notifications and lists them by creation time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{from_millis, parse_uuid, Database};
use crate::errors::{AppError, AppResult, DatabaseResultExt};
use crate::models::AppNotification;

impl Database {
    pub(super) async fn migrate_notifications(&self) -> AppResult<()> {
        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS notifications (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                message TEXT NOT NULL,
                scheduled_for TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )
            ",
            "create notifications table",
        )
        .await
    }

    /// Store a scheduled notification
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn add_notification(&self, notification: &AppNotification) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO notifications (id, title, message, scheduled_for, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(notification.id.to_string())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.scheduled_for.to_rfc3339())
        .bind(notification.created_at.timestamp_millis())
        .execute(&self.pool)
        .await
        .db_context("insert notification")?;
        Ok(())
    }

    /// Every notification, most recently created first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn list_notifications(&self) -> AppResult<Vec<AppNotification>> {
        let rows = sqlx::query(
            r"
            SELECT id, title, message, scheduled_for, created_at
            FROM notifications
            ORDER BY created_at DESC, rowid DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .db_context("list notifications")?;
        rows.iter().map(row_to_notification).collect()
    }
}

fn row_to_notification(row: &SqliteRow) -> AppResult<AppNotification> {
    let id: String = row.try_get("id").db_context("read notifications.id")?;
    let scheduled_for: String = row
        .try_get("scheduled_for")
        .db_context("read notifications.scheduled_for")?;
    let created_at: i64 = row
        .try_get("created_at")
        .db_context("read notifications.created_at")?;

    Ok(AppNotification {
        id: parse_uuid(&id, "notifications.id")?,
        title: row.try_get("title").db_context("read notifications.title")?,
        message: row
            .try_get("message")
            .db_context("read notifications.message")?,
        scheduled_for: DateTime::parse_from_rfc3339(&scheduled_for)
            .map_err(|e| {
                AppError::database(format!("Invalid timestamp in notifications.scheduled_for: {e}"))
            })?
            .with_timezone(&Utc),
        created_at: from_millis(created_at, "notifications.created_at")?,
    })
}
