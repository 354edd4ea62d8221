// ABOUTME: Workout catalog models shown in the training tab
// ABOUTME: Workout, Exercise, WorkoutLevel, and WorkoutKind definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Difficulty of a workout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutLevel {
    /// Beginner
    Beginner,
    /// Intermediate
    Intermediate,
    /// Advanced
    Advanced,
    /// Suitable for everyone
    All,
}

impl WorkoutLevel {
    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::All => "all",
        }
    }
}

impl FromStr for WorkoutLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            "all" => Ok(Self::All),
            _ => Err(AppError::invalid_input(format!("Invalid workout level: {s}"))),
        }
    }
}

/// Training modality of a workout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutKind {
    /// Joint-friendly, no jumping
    LowImpact,
    /// Cardiovascular
    Cardio,
    /// Strength training
    Strength,
    /// Stretching and mobility
    Flexibility,
}

impl WorkoutKind {
    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LowImpact => "low_impact",
            Self::Cardio => "cardio",
            Self::Strength => "strength",
            Self::Flexibility => "flexibility",
        }
    }
}

impl FromStr for WorkoutKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low_impact" => Ok(Self::LowImpact),
            "cardio" => Ok(Self::Cardio),
            "strength" => Ok(Self::Strength),
            "flexibility" => Ok(Self::Flexibility),
            _ => Err(AppError::invalid_input(format!("Invalid workout kind: {s}"))),
        }
    }
}

/// One exercise inside a workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise identifier
    pub id: String,
    /// Exercise name
    pub name: String,
    /// Number of sets
    pub sets: u32,
    /// Repetitions or duration, e.g. "12-15" or "30s"
    pub reps: String,
}

/// A workout from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Unique workout identifier
    pub id: Uuid,
    /// Title
    pub title: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Duration in minutes
    pub duration_min: u32,
    /// Difficulty
    pub level: WorkoutLevel,
    /// Modality
    pub kind: WorkoutKind,
    /// Estimated calories burned
    pub calories_burn: u32,
    /// Thumbnail image URL
    pub thumbnail: String,
    /// Exercises in order
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}
