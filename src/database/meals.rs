// ABOUTME: Meal log storage with macros persisted as JSON
// ABOUTME: Adds meals and lists a user's meals newest first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{from_millis, parse_uuid, Database};
use crate::errors::{AppResult, DatabaseResultExt};
use crate::models::{MacroData, Meal};

impl Database {
    pub(super) async fn migrate_meals(&self) -> AppResult<()> {
        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS meals (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                timestamp INTEGER NOT NULL,
                image_url TEXT,
                macros TEXT NOT NULL
            )
            ",
            "create meals table",
        )
        .await?;

        self.execute_ddl(
            "CREATE INDEX IF NOT EXISTS idx_meals_user_time ON meals(user_id, timestamp)",
            "create meals index",
        )
        .await
    }

    /// Store a logged meal
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails
    pub async fn add_meal(&self, meal: &Meal) -> AppResult<()> {
        let macros = serde_json::to_string(&meal.macros)?;
        sqlx::query(
            r"
            INSERT INTO meals (id, user_id, name, timestamp, image_url, macros)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(meal.id.to_string())
        .bind(meal.user_id.to_string())
        .bind(&meal.name)
        .bind(meal.timestamp.timestamp_millis())
        .bind(meal.image_url.as_deref())
        .bind(macros)
        .execute(&self.pool)
        .await
        .db_context("insert meal")?;
        Ok(())
    }

    /// Meals logged by `user_id`, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn get_meals(&self, user_id: Uuid) -> AppResult<Vec<Meal>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, name, timestamp, image_url, macros
            FROM meals
            WHERE user_id = ?1
            ORDER BY timestamp DESC, rowid DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .db_context("get meals")?;
        rows.iter().map(row_to_meal).collect()
    }
}

fn row_to_meal(row: &SqliteRow) -> AppResult<Meal> {
    let id: String = row.try_get("id").db_context("read meals.id")?;
    let user_id: String = row.try_get("user_id").db_context("read meals.user_id")?;
    let timestamp: i64 = row.try_get("timestamp").db_context("read meals.timestamp")?;
    let macros: String = row.try_get("macros").db_context("read meals.macros")?;

    Ok(Meal {
        id: parse_uuid(&id, "meals.id")?,
        user_id: parse_uuid(&user_id, "meals.user_id")?,
        name: row.try_get("name").db_context("read meals.name")?,
        timestamp: from_millis(timestamp, "meals.timestamp")?,
        image_url: row.try_get("image_url").db_context("read meals.image_url")?,
        macros: serde_json::from_str::<MacroData>(&macros)?,
    })
}
