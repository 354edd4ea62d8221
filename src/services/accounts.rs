// ABOUTME: Account lifecycle service for registration, login, onboarding, and goals
// ABOUTME: Records every session event in the activity log and runs the access gate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::task;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::constants::{accounts, log_details, nutrition};
use crate::database::Database;
use crate::entitlement::{decide_access, AccessDecision, PrivilegedIdentities};
use crate::errors::{hashing_error, AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{
    format_user_code, ActivityLevel, GoalType, LogAction, MacroData, ProfileUpdate, Sex,
    UserAccount,
};

/// Sign-up form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRequest {
    /// Email address
    pub email: String,
    /// Plain-text password
    pub password: String,
    /// Display name
    pub name: String,
    /// Optional phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Whether the terms of use were accepted
    #[serde(default)]
    pub accepted_terms: bool,
}

/// Body metrics collected by the onboarding flow
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OnboardingData {
    /// Weight in kilograms
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
}

/// Goal values editable from the profile screen
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GoalsUpdate {
    /// Daily calories
    pub calories: f64,
    /// Daily protein grams
    pub protein: f64,
    /// Daily carbohydrate grams
    pub carbs: f64,
    /// Daily fat grams
    pub fats: f64,
}

/// Account lifecycle operations
#[derive(Clone)]
pub struct AccountService {
    database: Database,
    privileged: PrivilegedIdentities,
    bcrypt_cost: u32,
}

impl AccountService {
    /// Create the service from a database handle and server configuration
    #[must_use]
    pub fn new(database: Database, config: &ServerConfig) -> Self {
        Self {
            database,
            privileged: config.privileged.clone(),
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    /// Register a new account that still has to complete onboarding
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for a malformed form, `RESOURCE_ALREADY_EXISTS`
    /// for a taken email, or a storage/hashing error
    pub async fn register(
        &self,
        request: RegistrationRequest,
        now: DateTime<Utc>,
    ) -> AppResult<UserAccount> {
        let email = request.email.trim().to_lowercase();
        validate_email(&email)?;
        if request.password.len() < accounts::MIN_PASSWORD_LENGTH {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {} characters",
                accounts::MIN_PASSWORD_LENGTH
            )));
        }
        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::missing_field("name"));
        }

        let password_hash = hash_password(request.password, self.bcrypt_cost).await?;

        let mut account =
            UserAccount::new_pending(email, name.to_owned(), generate_user_code(), now);
        account.phone = request
            .phone
            .map(|phone| phone.trim().to_owned())
            .filter(|phone| !phone.is_empty());
        if request.accepted_terms {
            account.accepted_terms_at = Some(now);
        }

        self.database
            .create_user_account(&account, &password_hash)
            .await?;
        self.log(account.id, LogAction::Register, log_details::ACCOUNT_CREATED, now)
            .await?;

        AppLogger::log_auth_event(&account.email, "register", true);
        info!(user_id = %account.id, user_code = %account.user_code, "Account registered");
        Ok(account)
    }

    /// Verify credentials and return the profile
    ///
    /// A missing profile row is recreated with defaults so an account whose
    /// profile was lost can still sign in and redo onboarding.
    ///
    /// # Errors
    ///
    /// Returns `AUTH_INVALID` for unknown emails or wrong passwords
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> AppResult<UserAccount> {
        let email = email.trim().to_lowercase();
        let Some((user_id, hash)) = self.database.get_password_hash(&email).await? else {
            AppLogger::log_auth_event(&email, "login", false);
            return Err(AppError::auth_invalid("Invalid email or password"));
        };

        if !verify_password(password.to_owned(), hash).await? {
            AppLogger::log_auth_event(&email, "login", false);
            return Err(AppError::auth_invalid("Invalid email or password"));
        }

        let account = if let Some(account) = self.database.get_profile(user_id).await? {
            account
        } else {
            warn!(user_id = %user_id, "Profile missing for authenticated account, recreating");
            let mut account = UserAccount::new_pending(
                email.clone(),
                display_name_from_email(&email),
                generate_user_code(),
                now,
            );
            account.id = user_id;
            self.database.upsert_profile(&account).await?;
            account
        };

        self.log(account.id, LogAction::Login, log_details::LOGIN_SUCCEEDED, now)
            .await?;
        AppLogger::log_auth_event(&email, "login", true);
        Ok(account)
    }

    /// Record the end of a session
    ///
    /// # Errors
    ///
    /// Returns an error if the log write fails
    pub async fn logout(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<()> {
        self.log(user_id, LogAction::Logout, log_details::LOGGED_OUT, now)
            .await
    }

    /// Record that a tab was opened
    ///
    /// # Errors
    ///
    /// Returns an error if the log write fails
    pub async fn record_view(&self, user_id: Uuid, tab: &str, now: DateTime<Utc>) -> AppResult<()> {
        self.log(user_id, LogAction::View, &format!("Opened {tab} tab"), now)
            .await
    }

    /// Load the session's profile and run the access gate
    ///
    /// An id without a stored profile is treated like no session.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile lookup fails
    pub async fn check_access(
        &self,
        user_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> AppResult<AccessDecision> {
        let user = match user_id {
            Some(id) => self.database.get_profile(id).await?,
            None => None,
        };
        let privileged = user
            .as_ref()
            .is_some_and(|user| self.privileged.is_privileged(user));
        Ok(decide_access(user.as_ref(), now, privileged))
    }

    /// Whether `user` is exempt from the trial paywall
    #[must_use]
    pub fn is_privileged(&self, user: &UserAccount) -> bool {
        self.privileged.is_privileged(user)
    }

    /// Store the onboarding metrics, lifting the onboarding sentinel
    ///
    /// # Errors
    ///
    /// Returns `VALUE_OUT_OF_RANGE` for non-positive metrics or
    /// `RESOURCE_NOT_FOUND` for an unknown user
    pub async fn complete_onboarding(
        &self,
        user_id: Uuid,
        data: OnboardingData,
        now: DateTime<Utc>,
    ) -> AppResult<UserAccount> {
        if !data.weight_kg.is_finite() || data.weight_kg <= 0.0 {
            return Err(AppError::out_of_range("Weight must be greater than zero"));
        }
        if !data.height_cm.is_finite() || data.height_cm <= 0.0 {
            return Err(AppError::out_of_range("Height must be greater than zero"));
        }
        if data.age == 0 {
            return Err(AppError::out_of_range("Age must be greater than zero"));
        }

        let update = ProfileUpdate {
            weight_kg: Some(data.weight_kg),
            height_cm: Some(data.height_cm),
            age: Some(data.age),
            sex: Some(data.sex),
            goal: Some(data.goal),
            activity_level: Some(data.activity_level),
            ..ProfileUpdate::default()
        };
        let account = self.database.update_profile(user_id, &update).await?;
        self.log(user_id, LogAction::Action, log_details::ONBOARDING_COMPLETED, now)
            .await?;
        Ok(account)
    }

    /// Replace the custom macro goals and the daily step goal
    ///
    /// Fiber is not editable here; it keeps the current custom value or the
    /// default.
    ///
    /// # Errors
    ///
    /// Returns `VALUE_OUT_OF_RANGE` for negative goals or
    /// `RESOURCE_NOT_FOUND` for an unknown user
    pub async fn update_goals(
        &self,
        user_id: Uuid,
        daily_steps_goal: u32,
        goals: GoalsUpdate,
    ) -> AppResult<UserAccount> {
        let current = self
            .database
            .get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile").with_user_id(user_id))?;

        let macros = MacroData {
            calories: goals.calories,
            protein: goals.protein,
            carbs: goals.carbs,
            fats: goals.fats,
            fiber: current
                .custom_macros
                .map_or(nutrition::DEFAULT_FIBER_G, |macros| macros.fiber),
        };
        if !macros.is_valid() {
            return Err(AppError::out_of_range(
                "Macro goals must be non-negative numbers",
            ));
        }

        let update = ProfileUpdate {
            custom_macros: Some(macros),
            daily_steps_goal: Some(daily_steps_goal),
            ..ProfileUpdate::default()
        };
        self.database.update_profile(user_id, &update).await
    }

    /// Add steps to today's count, saturating at the maximum
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown user
    pub async fn add_steps(&self, user_id: Uuid, amount: u32) -> AppResult<UserAccount> {
        let current = self
            .database
            .get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile").with_user_id(user_id))?;
        let update = ProfileUpdate {
            current_steps: Some(current.current_steps.saturating_add(amount)),
            ..ProfileUpdate::default()
        };
        self.database.update_profile(user_id, &update).await
    }

    async fn log(
        &self,
        user_id: Uuid,
        action: LogAction,
        details: &str,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        self.database
            .add_user_log(user_id, action, details, now)
            .await?;
        AppLogger::log_user_action(user_id, action, details);
        Ok(())
    }
}

fn validate_email(email: &str) -> AppResult<()> {
    if email.is_empty() {
        return Err(AppError::missing_field("email"));
    }
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    });
    if valid {
        Ok(())
    } else {
        Err(AppError::invalid_format(format!("Invalid email address: {email}")))
    }
}

fn generate_user_code() -> String {
    format_user_code(rand::thread_rng().gen_range(0..accounts::USER_CODE_RANGE))
}

fn display_name_from_email(email: &str) -> String {
    email
        .split('@')
        .next()
        .filter(|local| !local.is_empty())
        .unwrap_or(accounts::FALLBACK_DISPLAY_NAME)
        .to_owned()
}

/// Hash on the blocking pool so bcrypt does not stall the runtime
async fn hash_password(password: String, cost: u32) -> AppResult<String> {
    task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
        .map_err(hashing_error)
}

async fn verify_password(password: String, hash: String) -> AppResult<bool> {
    task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
        .map_err(hashing_error)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("maria@test.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("maria").is_err());
        assert!(validate_email("@test.com").is_err());
        assert!(validate_email("maria@localhost").is_err());
    }

    #[test]
    fn test_generated_user_code_has_prefix() {
        let code = generate_user_code();
        assert!(code.starts_with("CZ"));
        assert!(code[2..].parse::<u32>().is_ok());
    }

    #[test]
    fn test_display_name_from_email() {
        assert_eq!(display_name_from_email("joao@test.com"), "joao");
        assert_eq!(display_name_from_email("@test.com"), "User");
    }
}
