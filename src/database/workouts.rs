// ABOUTME: Workout catalog storage with exercises persisted as JSON
// ABOUTME: Seeding inserts plus catalog listing and lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{parse_uuid, to_u32, Database};
use crate::errors::{AppResult, DatabaseResultExt};
use crate::models::{Exercise, Workout};

impl Database {
    pub(super) async fn migrate_workouts(&self) -> AppResult<()> {
        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                duration_min INTEGER NOT NULL,
                level TEXT NOT NULL,
                kind TEXT NOT NULL,
                calories_burn INTEGER NOT NULL,
                thumbnail TEXT NOT NULL,
                exercises TEXT NOT NULL DEFAULT '[]'
            )
            ",
            "create workouts table",
        )
        .await
    }

    /// Insert or replace a catalog workout
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub async fn insert_workout(&self, workout: &Workout) -> AppResult<()> {
        let exercises = serde_json::to_string(&workout.exercises)?;
        sqlx::query(
            r"
            INSERT OR REPLACE INTO workouts
                (id, title, description, duration_min, level, kind, calories_burn, thumbnail, exercises)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
        )
        .bind(workout.id.to_string())
        .bind(&workout.title)
        .bind(workout.description.as_deref())
        .bind(i64::from(workout.duration_min))
        .bind(workout.level.as_str())
        .bind(workout.kind.as_str())
        .bind(i64::from(workout.calories_burn))
        .bind(&workout.thumbnail)
        .bind(exercises)
        .execute(&self.pool)
        .await
        .db_context("insert workout")?;
        Ok(())
    }

    /// Every catalog workout ordered by title
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn list_workouts(&self) -> AppResult<Vec<Workout>> {
        let rows = sqlx::query(
            r"
            SELECT id, title, description, duration_min, level, kind, calories_burn, thumbnail, exercises
            FROM workouts
            ORDER BY title ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .db_context("list workouts")?;
        rows.iter().map(row_to_workout).collect()
    }

    /// Look up one workout
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed
    pub async fn get_workout(&self, workout_id: Uuid) -> AppResult<Option<Workout>> {
        let row = sqlx::query(
            r"
            SELECT id, title, description, duration_min, level, kind, calories_burn, thumbnail, exercises
            FROM workouts
            WHERE id = ?1
            ",
        )
        .bind(workout_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .db_context("get workout")?;
        row.as_ref().map(row_to_workout).transpose()
    }
}

fn row_to_workout(row: &SqliteRow) -> AppResult<Workout> {
    let id: String = row.try_get("id").db_context("read workouts.id")?;
    let level: String = row.try_get("level").db_context("read workouts.level")?;
    let kind: String = row.try_get("kind").db_context("read workouts.kind")?;
    let exercises: String = row
        .try_get("exercises")
        .db_context("read workouts.exercises")?;

    Ok(Workout {
        id: parse_uuid(&id, "workouts.id")?,
        title: row.try_get("title").db_context("read workouts.title")?,
        description: row
            .try_get("description")
            .db_context("read workouts.description")?,
        duration_min: to_u32(
            row.try_get("duration_min")
                .db_context("read workouts.duration_min")?,
        ),
        level: level.parse()?,
        kind: kind.parse()?,
        calories_burn: to_u32(
            row.try_get("calories_burn")
                .db_context("read workouts.calories_burn")?,
        ),
        thumbnail: row.try_get("thumbnail").db_context("read workouts.thumbnail")?,
        exercises: serde_json::from_str::<Vec<Exercise>>(&exercises)?,
    })
}
