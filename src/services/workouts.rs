// ABOUTME: Read access to the workout catalog plus seeding for administrators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use uuid::Uuid;

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::Workout;

/// Workout catalog operations
#[derive(Clone)]
pub struct WorkoutService {
    database: Database,
}

impl WorkoutService {
    /// Create the service
    #[must_use]
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Every workout in the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list(&self) -> AppResult<Vec<Workout>> {
        self.database.list_workouts().await
    }

    /// One workout by id
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if no workout has that id
    pub async fn get(&self, workout_id: Uuid) -> AppResult<Workout> {
        self.database
            .get_workout(workout_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Workout").with_resource_id(workout_id.to_string())
            })
    }

    /// Add or replace catalog entries
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for an untitled workout or a storage error
    pub async fn seed(&self, workouts: &[Workout]) -> AppResult<usize> {
        for workout in workouts {
            if workout.title.trim().is_empty() {
                return Err(AppError::invalid_input("Workout title cannot be empty")
                    .with_resource_id(workout.id.to_string()));
            }
            self.database.insert_workout(workout).await?;
        }
        Ok(workouts.len())
    }
}
