// ABOUTME: Nutrition models for meal logging and macro goals
// ABOUTME: MacroData and Meal definitions with additive macro arithmetic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use std::ops::{Add, AddAssign};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::nutrition;

/// Calories and macronutrients of a meal, a day, or a goal
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroData {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fats in grams
    pub fats: f64,
    /// Fiber in grams
    pub fiber: f64,
}

impl MacroData {
    /// Default daily goals for users without custom macros
    #[must_use]
    pub const fn default_goals() -> Self {
        Self {
            calories: nutrition::DEFAULT_CALORIES,
            protein: nutrition::DEFAULT_PROTEIN_G,
            carbs: nutrition::DEFAULT_CARBS_G,
            fats: nutrition::DEFAULT_FATS_G,
            fiber: nutrition::DEFAULT_FIBER_G,
        }
    }

    /// Whether every component is finite and non-negative
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [
            self.calories,
            self.protein,
            self.carbs,
            self.fats,
            self.fiber,
        ]
        .iter()
        .all(|value| value.is_finite() && *value >= 0.0)
    }
}

impl Add for MacroData {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fats: self.fats + rhs.fats,
            fiber: self.fiber + rhs.fiber,
        }
    }
}

impl AddAssign for MacroData {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// A logged meal with its estimated macros
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Unique meal identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Dish name
    pub name: String,
    /// When the meal was eaten
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    /// Photo of the meal, URL or base64 data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Estimated macros
    pub macros: MacroData,
}

impl Meal {
    /// Create a new meal entry
    #[must_use]
    pub fn new(
        user_id: Uuid,
        name: String,
        macros: MacroData,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            timestamp,
            image_url: None,
            macros,
        }
    }

    /// Attach a photo to the meal
    #[must_use]
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_addition() {
        let mut total = MacroData::default();
        total += MacroData {
            calories: 500.0,
            protein: 30.0,
            carbs: 50.0,
            fats: 20.0,
            fiber: 5.0,
        };
        total += MacroData {
            calories: 250.0,
            protein: 10.0,
            carbs: 20.0,
            fats: 5.0,
            fiber: 2.0,
        };
        assert!((total.calories - 750.0).abs() < f64::EPSILON);
        assert!((total.fiber - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_macro_validation() {
        assert!(MacroData::default_goals().is_valid());
        let negative = MacroData {
            protein: -1.0,
            ..MacroData::default()
        };
        assert!(!negative.is_valid());
        let nan = MacroData {
            calories: f64::NAN,
            ..MacroData::default()
        };
        assert!(!nan.is_valid());
    }
}
