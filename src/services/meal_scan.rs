// ABOUTME: Photo-based meal estimation through a pluggable image analyzer
// ABOUTME: Parses the analyzer's JSON reply and logs the estimated meal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{MacroData, Meal};

use super::MealService;

/// Name and macros estimated from a meal photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEstimate {
    /// Dish name
    pub name: String,
    /// Estimated macros
    pub macros: MacroData,
}

#[derive(Deserialize)]
struct ModelReply {
    name: String,
    calories: f64,
    protein: f64,
    carbs: f64,
    fats: f64,
    #[serde(default)]
    fiber: f64,
}

impl MealEstimate {
    /// Parse a model reply such as
    /// `{"name": "Rice and beans", "calories": 450, "protein": 18, ...}`
    ///
    /// Markdown code fences around the object are ignored.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_FORMAT` for unparseable text, `MISSING_REQUIRED_FIELD`
    /// for an empty name, or `VALUE_OUT_OF_RANGE` for negative values
    pub fn from_model_json(text: &str) -> AppResult<Self> {
        let body = strip_code_fence(text);
        let reply: ModelReply = serde_json::from_str(body)
            .map_err(|e| AppError::invalid_format(format!("Unreadable meal estimate: {e}")))?;

        let name = reply.name.trim();
        if name.is_empty() {
            return Err(AppError::missing_field("name"));
        }
        let macros = MacroData {
            calories: reply.calories,
            protein: reply.protein,
            carbs: reply.carbs,
            fats: reply.fats,
            fiber: reply.fiber,
        };
        if !macros.is_valid() {
            return Err(AppError::out_of_range(
                "Meal estimate contains negative values",
            ));
        }

        Ok(Self {
            name: name.to_owned(),
            macros,
        })
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Estimates the contents of a meal photo
#[async_trait]
pub trait FoodImageAnalyzer: Send + Sync {
    /// Analyze a base64-encoded image
    ///
    /// # Errors
    ///
    /// Returns `EXTERNAL_SERVICE_ERROR` when the analyzer cannot be reached
    /// or its reply cannot be parsed
    async fn analyze(&self, image_base64: &str) -> AppResult<MealEstimate>;
}

/// Analyze a photo and log the estimated meal with the photo attached
///
/// # Errors
///
/// Returns the analyzer's error unchanged, or a storage error
pub async fn scan_meal(
    meals: &MealService,
    analyzer: &dyn FoodImageAnalyzer,
    user_id: Uuid,
    image_base64: &str,
    now: DateTime<Utc>,
) -> AppResult<Meal> {
    if image_base64.trim().is_empty() {
        return Err(AppError::missing_field("image"));
    }
    let estimate = analyzer.analyze(image_base64).await?;
    meals
        .log_meal(
            user_id,
            &estimate.name,
            estimate.macros,
            Some(image_base64.to_owned()),
            now,
        )
        .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_plain_reply() {
        let estimate = MealEstimate::from_model_json(
            r#"{"name": "Rice and beans", "calories": 450, "protein": 18, "carbs": 70, "fats": 9, "fiber": 12}"#,
        )
        .unwrap();
        assert_eq!(estimate.name, "Rice and beans");
        assert!((estimate.macros.calories - 450.0).abs() < f64::EPSILON);
        assert!((estimate.macros.fiber - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_strips_code_fence() {
        let text = "```json\n{\"name\": \"Salad\", \"calories\": 120, \"protein\": 3, \"carbs\": 10, \"fats\": 7}\n```";
        let estimate = MealEstimate::from_model_json(text).unwrap();
        assert_eq!(estimate.name, "Salad");
        assert!(estimate.macros.fiber.abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_negative_and_empty() {
        assert!(MealEstimate::from_model_json(
            r#"{"name": "Soup", "calories": -1, "protein": 1, "carbs": 1, "fats": 1}"#
        )
        .is_err());
        assert!(MealEstimate::from_model_json(
            r#"{"name": "  ", "calories": 1, "protein": 1, "carbs": 1, "fats": 1}"#
        )
        .is_err());
        assert!(MealEstimate::from_model_json("not json").is_err());
    }
}
