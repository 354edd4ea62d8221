// ABOUTME: Key-value settings storage holding the platform configuration document
// ABOUTME: Loads and saves AppConfig as JSON under a fixed key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use chrono::Utc;
use sqlx::Row;
use tracing::warn;

use super::Database;
use crate::constants::settings::APP_CONFIG_KEY;
use crate::errors::{AppResult, DatabaseResultExt};
use crate::models::AppConfig;

impl Database {
    pub(super) async fn migrate_app_settings(&self) -> AppResult<()> {
        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS app_settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )
            ",
            "create app_settings table",
        )
        .await
    }

    /// Load the platform configuration, falling back to defaults
    ///
    /// A stored document that no longer parses is logged and replaced by the
    /// defaults rather than failing every caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn load_app_config(&self) -> AppResult<AppConfig> {
        let row = sqlx::query("SELECT value FROM app_settings WHERE key = ?1")
            .bind(APP_CONFIG_KEY)
            .fetch_optional(&self.pool)
            .await
            .db_context("load app config")?;

        let Some(row) = row else {
            return Ok(AppConfig::default());
        };
        let raw: String = row.try_get("value").db_context("read app_settings.value")?;
        Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "Stored app config is malformed, using defaults");
            AppConfig::default()
        }))
    }

    /// Persist the platform configuration
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub async fn save_app_config(&self, config: &AppConfig) -> AppResult<()> {
        let value = serde_json::to_string(config)?;
        sqlx::query(
            r"
            INSERT INTO app_settings (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
        )
        .bind(APP_CONFIG_KEY)
        .bind(value)
        .bind(Utc::now().timestamp_millis())
        .execute(&self.pool)
        .await
        .db_context("save app config")?;
        Ok(())
    }
}
