// ABOUTME: Privileged platform administration for user moderation and settings
// ABOUTME: Search, bans, audit timelines, scheduled notifications, pricing, and stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

//! # Administration
//!
//! An [`AdminService`] is bound to one acting account and can only be
//! created for a privileged identity; every operation inherits that check.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::constants::trial::TRIAL_DAYS;
use crate::database::Database;
use crate::entitlement::{
    days_since_creation, decide_access, AccessDecision, PrivilegedIdentities,
};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{AppConfig, AppConfigUpdate, AppNotification, UserAccount};
use crate::timeline::{group_by_date_in, DateGroup};

/// Minute-precision format accepted for notification schedules
const SCHEDULE_MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Platform-wide counters for the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlatformStats {
    /// Registered accounts
    pub total_users: usize,
    /// Accounts with an active subscription
    pub subscribers: usize,
    /// Free accounts still inside the trial window
    pub trial_users: usize,
    /// Free accounts whose trial has lapsed
    pub expired_trials: usize,
    /// Banned accounts
    pub banned_users: usize,
    /// Subscribers times the current monthly price
    pub estimated_monthly_revenue: f64,
}

/// Administrative operations performed by one privileged account
#[derive(Clone)]
pub struct AdminService {
    database: Database,
    privileged: PrivilegedIdentities,
    actor: String,
}

impl AdminService {
    /// Bind the service to `actor_email`
    ///
    /// # Errors
    ///
    /// Returns `PERMISSION_DENIED` if `actor_email` is not privileged
    pub fn new(
        database: Database,
        privileged: PrivilegedIdentities,
        actor_email: &str,
    ) -> AppResult<Self> {
        if !privileged.contains(actor_email) {
            warn!(actor = %actor_email, "Rejected admin access for unprivileged account");
            return Err(AppError::permission_denied(format!(
                "{actor_email} is not allowed to administer the platform"
            )));
        }
        Ok(Self {
            database,
            privileged,
            actor: actor_email.trim().to_lowercase(),
        })
    }

    /// Email of the acting administrator
    #[must_use]
    pub fn actor(&self) -> &str {
        &self.actor
    }

    /// Accounts whose name, email, or user code contains `query`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn search_users(&self, query: &str) -> AppResult<Vec<UserAccount>> {
        let users = self.database.list_profiles().await?;
        Ok(users
            .into_iter()
            .filter(|user| user.matches_search(query))
            .collect())
    }

    /// Look up an account by email
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if no account uses that email
    pub async fn user_by_email(&self, email: &str) -> AppResult<UserAccount> {
        self.database
            .get_profile_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("User").with_resource_id(email.trim()))
    }

    /// Flip the ban flag of an account and return the new value
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown user
    pub async fn toggle_ban(&self, user_id: Uuid) -> AppResult<bool> {
        let user = self
            .database
            .get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User").with_user_id(user_id))?;
        let banned = !user.is_banned;
        self.database.set_banned(user_id, banned).await?;
        AppLogger::log_admin_action(
            &self.actor,
            if banned { "ban_user" } else { "unban_user" },
            Some(&user.email),
        );
        Ok(banned)
    }

    /// Access decision the gate would make for `user` right now
    #[must_use]
    pub fn access_for(&self, user: &UserAccount, now: DateTime<Utc>) -> AccessDecision {
        decide_access(Some(user), now, self.privileged.is_privileged(user))
    }

    /// Activity of one account grouped by calendar day in `tz`, newest first
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` for an unknown user
    pub async fn user_timeline<Tz: TimeZone + Sync>(
        &self,
        user_id: Uuid,
        tz: &Tz,
    ) -> AppResult<Vec<DateGroup>> {
        let user = self
            .database
            .get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User").with_user_id(user_id))?;
        let logs = self.database.get_user_logs(user_id).await?;
        AppLogger::log_admin_action(&self.actor, "view_timeline", Some(&user.email));
        Ok(group_by_date_in(&logs, tz))
    }

    /// Schedule a broadcast notification
    ///
    /// `scheduled_for` accepts RFC 3339 or `YYYY-MM-DDTHH:MM` (read as UTC).
    ///
    /// # Errors
    ///
    /// Returns `MISSING_REQUIRED_FIELD` for blank fields or `INVALID_FORMAT`
    /// for an unreadable schedule
    pub async fn schedule_notification(
        &self,
        title: &str,
        message: &str,
        scheduled_for: &str,
        now: DateTime<Utc>,
    ) -> AppResult<AppNotification> {
        let title = title.trim();
        let message = message.trim();
        if title.is_empty() {
            return Err(AppError::missing_field("title"));
        }
        if message.is_empty() {
            return Err(AppError::missing_field("message"));
        }
        if scheduled_for.trim().is_empty() {
            return Err(AppError::missing_field("scheduled_for"));
        }
        let scheduled_for = parse_schedule(scheduled_for)?;

        let notification =
            AppNotification::new(title.to_owned(), message.to_owned(), scheduled_for, now);
        self.database.add_notification(&notification).await?;
        AppLogger::log_admin_action(&self.actor, "schedule_notification", Some(title));
        Ok(notification)
    }

    /// Every scheduled notification, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn notifications(&self) -> AppResult<Vec<AppNotification>> {
        self.database.list_notifications().await
    }

    /// Current platform configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn app_config(&self) -> AppResult<AppConfig> {
        self.database.load_app_config().await
    }

    /// Apply a partial configuration update and persist the result
    ///
    /// # Errors
    ///
    /// Returns `VALUE_OUT_OF_RANGE` for invalid prices; nothing is stored then
    pub async fn update_app_config(&self, update: &AppConfigUpdate) -> AppResult<AppConfig> {
        let config = self.database.load_app_config().await?.merged(update);
        config.validate()?;
        self.database.save_app_config(&config).await?;
        AppLogger::log_admin_action(&self.actor, "update_app_config", None);
        Ok(config)
    }

    /// Compute platform counters as of `now`
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn platform_stats(&self, now: DateTime<Utc>) -> AppResult<PlatformStats> {
        let users = self.database.list_profiles().await?;
        let config = self.database.load_app_config().await?;

        let mut stats = PlatformStats {
            total_users: users.len(),
            subscribers: 0,
            trial_users: 0,
            expired_trials: 0,
            banned_users: 0,
            estimated_monthly_revenue: 0.0,
        };
        for user in &users {
            if user.is_banned {
                stats.banned_users += 1;
            }
            if user.is_premium {
                stats.subscribers += 1;
            } else if !self.privileged.is_privileged(user) {
                if days_since_creation(user, now) > TRIAL_DAYS as f64 {
                    stats.expired_trials += 1;
                } else {
                    stats.trial_users += 1;
                }
            }
        }
        stats.estimated_monthly_revenue = stats.subscribers as f64 * config.monthly_price;
        Ok(stats)
    }
}

/// Parse a notification schedule in RFC 3339 or minute precision
///
/// # Errors
///
/// Returns `INVALID_FORMAT` if neither format matches
pub fn parse_schedule(raw: &str) -> AppResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, SCHEDULE_MINUTE_FORMAT)
        .map(|at| at.and_utc())
        .map_err(|_| {
            AppError::invalid_format(format!(
                "Invalid schedule '{raw}', expected RFC 3339 or YYYY-MM-DDTHH:MM"
            ))
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schedule_formats() {
        let minute = parse_schedule("2025-12-24T20:00").unwrap();
        assert_eq!(minute.to_rfc3339(), "2025-12-24T20:00:00+00:00");

        let offset = parse_schedule("2025-12-24T20:00:00-03:00").unwrap();
        assert_eq!(offset.to_rfc3339(), "2025-12-24T23:00:00+00:00");

        assert!(parse_schedule("24/12/2025").is_err());
    }
}
