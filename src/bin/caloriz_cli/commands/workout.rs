// ABOUTME: Workout catalog commands for caloriz-cli
// ABOUTME: Lists the catalog and seeds it from a JSON file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use std::fs;

use caloriz::database::Database;
use caloriz::errors::{AppError, AppResult};
use caloriz::models::Workout;
use caloriz::services::WorkoutService;
use tracing::info;

use crate::helpers::display::display_workouts;

/// Print the catalog
pub async fn list(database: Database) -> AppResult<()> {
    display_workouts(&WorkoutService::new(database).list().await?);
    Ok(())
}

/// Load workouts from `path` and store them
pub async fn seed(database: Database, path: &str) -> AppResult<()> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::invalid_input(format!("Cannot read {path}: {e}")))?;
    let workouts: Vec<Workout> = serde_json::from_str(&raw)?;
    let count = WorkoutService::new(database).seed(&workouts).await?;
    info!(count, path, "Workout catalog seeded");
    println!("Seeded {count} workouts from {path}");
    Ok(())
}
