// ABOUTME: Access gate deciding login, onboarding, paywall, ban, or content for a session
// ABOUTME: Pure decision over a loaded account, the current instant, and privilege
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

//! # Entitlement Gate
//!
//! Decides which screen a session may see. The checks run in a fixed order
//! and the first match wins:
//!
//! 1. no account: [`AccessDecision::RequireLogin`]
//! 2. onboarding sentinel weight: [`AccessDecision::RequireOnboarding`]
//! 3. trial expired without subscription or privilege: [`AccessDecision::RequirePaywall`]
//! 4. banned: [`AccessDecision::Banned`]
//! 5. otherwise [`AccessDecision::Allowed`]
//!
//! The paywall check runs before the ban check, so a banned account whose
//! trial lapsed sees the paywall rather than the ban notice.

use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{time::MS_PER_DAY, trial::TRIAL_DAYS};
use crate::models::UserAccount;

/// Outcome of the access gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    /// No session; show the login screen
    RequireLogin,
    /// Body metrics missing; show onboarding
    RequireOnboarding,
    /// Trial over without subscription; show the paywall
    RequirePaywall,
    /// Access revoked by an administrator
    Banned,
    /// Show the requested content
    Allowed,
}

impl AccessDecision {
    /// Whether protected content may be rendered
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

impl Display for AccessDecision {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::RequireLogin => "require_login",
            Self::RequireOnboarding => "require_onboarding",
            Self::RequirePaywall => "require_paywall",
            Self::Banned => "banned",
            Self::Allowed => "allowed",
        };
        f.write_str(label)
    }
}

/// Accounts exempt from the trial paywall and allowed to administer the platform
///
/// Emails are compared case-insensitively with surrounding whitespace ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrivilegedIdentities {
    emails: HashSet<String>,
}

impl PrivilegedIdentities {
    /// Build from a list of emails
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            emails: emails
                .into_iter()
                .map(|email| normalize_email(email.as_ref()))
                .filter(|email| !email.is_empty())
                .collect(),
        }
    }

    /// Parse a comma-separated list, as found in `CALORIZ_ADMIN_EMAILS`
    #[must_use]
    pub fn parse_list(value: &str) -> Self {
        Self::new(value.split(','))
    }

    /// Whether `email` belongs to a privileged account
    #[must_use]
    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(&normalize_email(email))
    }

    /// Whether `user` is privileged
    #[must_use]
    pub fn is_privileged(&self, user: &UserAccount) -> bool {
        self.contains(&user.email)
    }

    /// Number of privileged accounts
    #[must_use]
    pub fn len(&self) -> usize {
        self.emails.len()
    }

    /// Whether no account is privileged
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Fractional days elapsed since the account was created
#[must_use]
pub fn days_since_creation(user: &UserAccount, now: DateTime<Utc>) -> f64 {
    let elapsed_ms = now.timestamp_millis() - user.created_at.timestamp_millis();
    elapsed_ms as f64 / MS_PER_DAY as f64
}

/// Decide what a session may see
///
/// Pure function of its inputs; see the module documentation for the order
/// of checks.
#[must_use]
pub fn decide_access(
    user: Option<&UserAccount>,
    now: DateTime<Utc>,
    is_privileged: bool,
) -> AccessDecision {
    let Some(user) = user else {
        return AccessDecision::RequireLogin;
    };

    if user.needs_onboarding() {
        return AccessDecision::RequireOnboarding;
    }

    let days = days_since_creation(user, now);
    if !is_privileged && !user.is_premium && days > TRIAL_DAYS as f64 {
        return AccessDecision::RequirePaywall;
    }

    if user.is_banned {
        return AccessDecision::Banned;
    }

    AccessDecision::Allowed
}

/// Whether the account is still on the free plan and subject to the trial
#[must_use]
pub const fn is_on_trial(user: &UserAccount, is_privileged: bool) -> bool {
    !user.is_premium && !is_privileged
}

/// Whole trial days remaining; zero or negative once the trial is over
#[must_use]
pub fn trial_days_left(user: &UserAccount, now: DateTime<Utc>) -> i64 {
    TRIAL_DAYS - days_since_creation(user, now).floor() as i64
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::models::format_user_code;
    use chrono::Duration;

    fn onboarded(created_at: DateTime<Utc>) -> UserAccount {
        let mut user = UserAccount::new_pending(
            "carlos@test.com".to_owned(),
            "Carlos".to_owned(),
            format_user_code(11223),
            created_at,
        );
        user.weight_kg = 70.0;
        user
    }

    #[test]
    fn test_days_since_creation_is_fractional() {
        let now = Utc::now();
        let user = onboarded(now - Duration::hours(36));
        assert!((days_since_creation(&user, now) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_trial_days_left_counts_down() {
        let now = Utc::now();
        assert_eq!(trial_days_left(&onboarded(now), now), 3);
        assert_eq!(
            trial_days_left(&onboarded(now - Duration::hours(30)), now),
            2
        );
        assert_eq!(trial_days_left(&onboarded(now - Duration::days(5)), now), -2);
    }

    #[test]
    fn test_exactly_three_days_is_still_trial() {
        let now = Utc::now();
        let user = onboarded(now - Duration::days(3));
        assert_eq!(decide_access(Some(&user), now, false), AccessDecision::Allowed);
    }

    #[test]
    fn test_privileged_identities_normalize() {
        let privileged = PrivilegedIdentities::parse_list(" Admin@Caloriz.app , ,ops@caloriz.app");
        assert_eq!(privileged.len(), 2);
        assert!(privileged.contains("admin@caloriz.app"));
        assert!(privileged.contains("OPS@caloriz.app "));
        assert!(!privileged.contains("maria@test.com"));
    }
}
