// ABOUTME: User account models for onboarding, goals, and entitlement checks
// ABOUTME: UserAccount, Sex, GoalType, ActivityLevel, and ProfileUpdate definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{accounts, nutrition, trial::PENDING_WEIGHT_KG};
use crate::errors::AppError;

use super::MacroData;

/// Biological sex used for metric estimates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Sex {
    /// Male
    #[default]
    #[serde(rename = "M")]
    Male,
    /// Female
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

impl FromStr for Sex {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" | "m" => Ok(Self::Male),
            "F" | "f" => Ok(Self::Female),
            _ => Err(AppError::invalid_input(format!("Invalid sex: {s}"))),
        }
    }
}

/// Body-weight goal chosen during onboarding
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum GoalType {
    /// Lose weight
    Lose,
    /// Keep current weight
    #[default]
    Maintain,
    /// Gain weight
    Gain,
}

impl GoalType {
    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lose => "LOSE",
            Self::Maintain => "MAINTAIN",
            Self::Gain => "GAIN",
        }
    }
}

impl FromStr for GoalType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LOSE" => Ok(Self::Lose),
            "MAINTAIN" => Ok(Self::Maintain),
            "GAIN" => Ok(Self::Gain),
            _ => Err(AppError::invalid_input(format!("Invalid goal: {s}"))),
        }
    }
}

/// Self-reported daily activity level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Exercise a few times a week
    #[default]
    Moderate,
    /// Daily exercise
    Active,
}

impl ActivityLevel {
    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sedentary => "SEDENTARY",
            Self::Moderate => "MODERATE",
            Self::Active => "ACTIVE",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SEDENTARY" => Ok(Self::Sedentary),
            "MODERATE" => Ok(Self::Moderate),
            "ACTIVE" => Ok(Self::Active),
            _ => Err(AppError::invalid_input(format!(
                "Invalid activity level: {s}"
            ))),
        }
    }
}

/// A registered member of the platform
///
/// `weight_kg == 0` is the "onboarding not completed" sentinel. New accounts
/// are created with it and the onboarding flow replaces it with a real value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    /// Unique user identifier
    pub id: Uuid,
    /// Email address, unique across accounts
    pub email: String,
    /// Display name
    pub name: String,
    /// Optional phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Age in years
    pub age: u32,
    /// Biological sex
    pub sex: Sex,
    /// Weight goal
    pub goal: GoalType,
    /// Activity level
    pub activity_level: ActivityLevel,
    /// When the account was created, drives the trial window
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Human-friendly member code, e.g. `CZ2919283`
    pub user_code: String,
    /// Whether the user holds an active subscription
    pub is_premium: bool,
    /// Whether an administrator revoked access
    pub is_banned: bool,
    /// Daily step goal
    pub daily_steps_goal: u32,
    /// Custom macro goals overriding the defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_macros: Option<MacroData>,
    /// Steps counted today
    pub current_steps: u32,
    /// Link to the user's meal plan document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_plan_url: Option<String>,
    /// When the terms of use were accepted
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub accepted_terms_at: Option<DateTime<Utc>>,
}

impl UserAccount {
    /// Create a freshly registered account that still has to onboard
    #[must_use]
    pub fn new_pending(
        email: String,
        name: String,
        user_code: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            phone: None,
            weight_kg: PENDING_WEIGHT_KG,
            height_cm: 0.0,
            age: 0,
            sex: Sex::default(),
            goal: GoalType::default(),
            activity_level: ActivityLevel::default(),
            created_at,
            user_code,
            is_premium: false,
            is_banned: false,
            daily_steps_goal: nutrition::DEFAULT_DAILY_STEPS_GOAL,
            custom_macros: None,
            current_steps: 0,
            meal_plan_url: None,
            accepted_terms_at: None,
        }
    }

    /// Whether the onboarding flow still has to run
    ///
    /// Only the exact pending sentinel counts; any other weight has been set.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn needs_onboarding(&self) -> bool {
        self.weight_kg == PENDING_WEIGHT_KG
    }

    /// Macro goals in effect: custom goals if set, defaults otherwise
    #[must_use]
    pub fn macro_goals(&self) -> MacroData {
        self.custom_macros.unwrap_or_else(MacroData::default_goals)
    }

    /// Step goal in effect, falling back to the default for zero
    #[must_use]
    pub const fn effective_steps_goal(&self) -> u32 {
        if self.daily_steps_goal == 0 {
            nutrition::DEFAULT_DAILY_STEPS_GOAL
        } else {
            self.daily_steps_goal
        }
    }

    /// Case-insensitive match of `query` against name, email, and user code
    #[must_use]
    pub fn matches_search(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.email.to_lowercase().contains(&needle)
            || self.user_code.to_lowercase().contains(&needle)
    }
}

impl Display for UserAccount {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} <{}> [{}]", self.name, self.email, self.user_code)
    }
}

/// Format a user code from its numeric part
#[must_use]
pub fn format_user_code(number: u32) -> String {
    format!("{}{number}", accounts::USER_CODE_PREFIX)
}

/// Partial profile update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New weight in kilograms
    pub weight_kg: Option<f64>,
    /// New height in centimeters
    pub height_cm: Option<f64>,
    /// New age
    pub age: Option<u32>,
    /// New sex
    pub sex: Option<Sex>,
    /// New goal
    pub goal: Option<GoalType>,
    /// New activity level
    pub activity_level: Option<ActivityLevel>,
    /// New daily step goal
    pub daily_steps_goal: Option<u32>,
    /// New step count for today
    pub current_steps: Option<u32>,
    /// New meal plan link
    pub meal_plan_url: Option<String>,
    /// New custom macro goals
    pub custom_macros: Option<MacroData>,
    /// New premium flag
    pub is_premium: Option<bool>,
}

impl ProfileUpdate {
    /// Apply every present field to `account`
    pub fn apply_to(&self, account: &mut UserAccount) {
        if let Some(weight) = self.weight_kg {
            account.weight_kg = weight;
        }
        if let Some(height) = self.height_cm {
            account.height_cm = height;
        }
        if let Some(age) = self.age {
            account.age = age;
        }
        if let Some(sex) = self.sex {
            account.sex = sex;
        }
        if let Some(goal) = self.goal {
            account.goal = goal;
        }
        if let Some(level) = self.activity_level {
            account.activity_level = level;
        }
        if let Some(goal) = self.daily_steps_goal {
            account.daily_steps_goal = goal;
        }
        if let Some(steps) = self.current_steps {
            account.current_steps = steps;
        }
        if let Some(url) = &self.meal_plan_url {
            account.meal_plan_url = Some(url.clone());
        }
        if let Some(macros) = self.custom_macros {
            account.custom_macros = Some(macros);
        }
        if let Some(premium) = self.is_premium {
            account.is_premium = premium;
        }
    }

    /// Whether the update changes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn account() -> UserAccount {
        UserAccount::new_pending(
            "maria@test.com".to_owned(),
            "Maria Silva".to_owned(),
            format_user_code(99281),
            Utc::now(),
        )
    }

    #[test]
    fn test_new_pending_account_needs_onboarding() {
        let user = account();
        assert!(user.needs_onboarding());
        assert!(!user.is_premium);
        assert!(!user.is_banned);
        assert_eq!(user.daily_steps_goal, 6000);
        assert_eq!(user.user_code, "CZ99281");
    }

    #[test]
    fn test_matches_search_is_case_insensitive() {
        let user = account();
        assert!(user.matches_search("MARIA"));
        assert!(user.matches_search("test.com"));
        assert!(user.matches_search("cz992"));
        assert!(user.matches_search("  "));
        assert!(!user.matches_search("carlos"));
    }

    #[test]
    fn test_profile_update_applies_only_present_fields() {
        let mut user = account();
        let update = ProfileUpdate {
            weight_kg: Some(70.0),
            goal: Some(GoalType::Lose),
            ..ProfileUpdate::default()
        };
        update.apply_to(&mut user);

        assert!(!user.needs_onboarding());
        assert_eq!(user.goal, GoalType::Lose);
        assert_eq!(user.activity_level, ActivityLevel::Moderate);
        assert!(!update.is_empty());
        assert!(ProfileUpdate::default().is_empty());
    }

    #[test]
    fn test_created_at_serializes_as_epoch_millis() {
        let mut user = account();
        user.created_at = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["created_at"], 1_700_000_000_123_i64);
        assert_eq!(json["sex"], "M");
        assert_eq!(json["goal"], "MAINTAIN");
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("f".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!("gain".parse::<GoalType>().unwrap(), GoalType::Gain);
        assert_eq!(
            "ACTIVE".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::Active
        );
        assert!("X".parse::<Sex>().is_err());
    }
}
