// ABOUTME: Meal logging service and the daily nutrition dashboard
// ABOUTME: Validates meals, stores them, and builds per-day summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::database::Database;
use crate::entitlement::PrivilegedIdentities;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{LogAction, MacroData, Meal};
use crate::nutrition::DailySummary;

/// Meal log operations
#[derive(Clone)]
pub struct MealService {
    database: Database,
    privileged: PrivilegedIdentities,
}

impl MealService {
    /// Create the service
    #[must_use]
    pub fn new(database: Database, privileged: PrivilegedIdentities) -> Self {
        Self {
            database,
            privileged,
        }
    }

    /// Store a meal for `user_id` and record it in the activity log
    ///
    /// # Errors
    ///
    /// Returns `MISSING_REQUIRED_FIELD` for an empty name,
    /// `VALUE_OUT_OF_RANGE` for negative macros, or a storage error
    pub async fn log_meal(
        &self,
        user_id: Uuid,
        name: &str,
        macros: MacroData,
        image: Option<String>,
        now: DateTime<Utc>,
    ) -> AppResult<Meal> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::missing_field("name"));
        }
        if !macros.is_valid() {
            return Err(AppError::out_of_range(
                "Meal macros must be non-negative numbers",
            ));
        }

        let mut meal = Meal::new(user_id, name.to_owned(), macros, now);
        if let Some(image) = image {
            meal = meal.with_image(image);
        }
        self.database.add_meal(&meal).await?;

        let details = format!("Logged meal: {} ({:.0} kcal)", meal.name, macros.calories);
        self.database
            .add_user_log(user_id, LogAction::Action, &details, now)
            .await?;
        AppLogger::log_user_action(user_id, LogAction::Action, &details);
        Ok(meal)
    }

    /// The most recent meals of `user_id`, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn recent_meals(&self, user_id: Uuid, limit: usize) -> AppResult<Vec<Meal>> {
        let mut meals = self.database.get_meals(user_id).await?;
        meals.truncate(limit);
        Ok(meals)
    }

    /// Dashboard numbers for the calendar day containing `now` in `tz`
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown user or a storage error
    pub async fn daily_summary<Tz: TimeZone + Sync>(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> AppResult<DailySummary> {
        let user = self
            .database
            .get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile").with_user_id(user_id))?;
        let meals = self.database.get_meals(user_id).await?;
        Ok(DailySummary::build(
            &user,
            &meals,
            now,
            tz,
            self.privileged.is_privileged(&user),
        ))
    }
}
