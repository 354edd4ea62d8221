// ABOUTME: SQLite storage for profiles, activity logs, meals, workouts, notifications, and settings
// ABOUTME: Connection setup, schema migrations, and shared row conversion helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

//! # Database Management
//!
//! A cloneable handle over a sqlx `SQLite` pool. Timestamps are stored as
//! epoch milliseconds; structured columns (macros, exercises) as JSON text.

mod app_settings;
mod meals;
mod notifications;
mod profiles;
mod user_logs;
mod workouts;

use std::fs;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult, DatabaseResultExt};

/// Maximum pool size for file-backed databases
const MAX_FILE_CONNECTIONS: u32 = 5;

/// Database manager for all persisted application data
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open (creating if missing) the database at `database_url` and run migrations
    ///
    /// In-memory databases use a single long-lived connection so every query
    /// sees the same data.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or a
    /// migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let url = DatabaseUrl::parse_url(database_url);

        if let DatabaseUrl::SQLite { path } = &url {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::database(format!(
                        "Failed to create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let options = SqliteConnectOptions::from_str(&url.to_connection_string())
            .db_context("parse database URL")?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(MAX_FILE_CONNECTIONS)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .db_context("connect to database")?;

        let db = Self { pool };
        db.migrate().await?;
        info!(database = %url, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations; safe to call repeatedly
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_profiles().await?;
        self.migrate_user_logs().await?;
        self.migrate_meals().await?;
        self.migrate_workouts().await?;
        self.migrate_notifications().await?;
        self.migrate_app_settings().await?;
        debug!("Database migrations complete");
        Ok(())
    }

    async fn execute_ddl(&self, statement: &str, operation: &str) -> AppResult<()> {
        sqlx::query(statement)
            .execute(&self.pool)
            .await
            .db_context(operation)?;
        Ok(())
    }
}

pub(crate) fn parse_uuid(raw: &str, column: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| AppError::database(format!("Invalid UUID in column {column}: {e}")))
}

pub(crate) fn from_millis(millis: i64, column: &str) -> AppResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| AppError::database(format!("Timestamp out of range in column {column}")))
}

pub(crate) fn to_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}
