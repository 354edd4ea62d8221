// ABOUTME: Append-only activity log storage behind the admin audit timeline
// ABOUTME: Inserts entries and reads them back newest first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{from_millis, parse_uuid, Database};
use crate::errors::{AppResult, DatabaseResultExt};
use crate::models::{ActivityLogEntry, LogAction};

impl Database {
    /// Create the `user_logs` table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_user_logs(&self) -> AppResult<()> {
        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS user_logs (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
                action TEXT NOT NULL CHECK (action IN ('REGISTER', 'LOGIN', 'LOGOUT', 'VIEW', 'ACTION')),
                details TEXT NOT NULL,
                timestamp INTEGER NOT NULL
            )
            ",
            "create user_logs table",
        )
        .await?;

        self.execute_ddl(
            "CREATE INDEX IF NOT EXISTS idx_user_logs_user_time ON user_logs(user_id, timestamp)",
            "create user_logs index",
        )
        .await
    }

    /// Append an activity entry for `user_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (for example an unknown user)
    pub async fn add_user_log(
        &self,
        user_id: Uuid,
        action: LogAction,
        details: &str,
        at: DateTime<Utc>,
    ) -> AppResult<ActivityLogEntry> {
        let entry = ActivityLogEntry::new(user_id, action, details, at);
        sqlx::query(
            r"
            INSERT INTO user_logs (id, user_id, action, details, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(entry.id.to_string())
        .bind(entry.user_id.to_string())
        .bind(entry.action.as_str())
        .bind(&entry.details)
        .bind(entry.timestamp.timestamp_millis())
        .execute(&self.pool)
        .await
        .db_context("insert user log")?;
        Ok(entry)
    }

    /// Activity of one user, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn get_user_logs(&self, user_id: Uuid) -> AppResult<Vec<ActivityLogEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, action, details, timestamp
            FROM user_logs
            WHERE user_id = ?1
            ORDER BY timestamp DESC, rowid DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .db_context("get user logs")?;
        rows.iter().map(row_to_entry).collect()
    }

    /// Activity of every user, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn get_all_logs(&self) -> AppResult<Vec<ActivityLogEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, action, details, timestamp
            FROM user_logs
            ORDER BY timestamp DESC, rowid DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .db_context("get all logs")?;
        rows.iter().map(row_to_entry).collect()
    }
}

fn row_to_entry(row: &SqliteRow) -> AppResult<ActivityLogEntry> {
    let id: String = row.try_get("id").db_context("read user_logs.id")?;
    let user_id: String = row.try_get("user_id").db_context("read user_logs.user_id")?;
    let action: String = row.try_get("action").db_context("read user_logs.action")?;
    let timestamp: i64 = row
        .try_get("timestamp")
        .db_context("read user_logs.timestamp")?;

    Ok(ActivityLogEntry {
        id: parse_uuid(&id, "user_logs.id")?,
        user_id: parse_uuid(&user_id, "user_logs.user_id")?,
        action: action.parse()?,
        details: row.try_get("details").db_context("read user_logs.details")?,
        timestamp: from_millis(timestamp, "user_logs.timestamp")?,
    })
}
