// ABOUTME: Append-only user activity log models used for admin audit timelines
// ABOUTME: LogAction and ActivityLogEntry definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Kind of tracked user action
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogAction {
    /// Account registration
    Register,
    /// Successful login
    Login,
    /// Logout
    Logout,
    /// Screen or tab view
    View,
    /// Any other tracked action (payments, scans)
    Action,
}

impl LogAction {
    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Register => "REGISTER",
            Self::Login => "LOGIN",
            Self::Logout => "LOGOUT",
            Self::View => "VIEW",
            Self::Action => "ACTION",
        }
    }
}

impl Display for LogAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REGISTER" => Ok(Self::Register),
            "LOGIN" => Ok(Self::Login),
            "LOGOUT" => Ok(Self::Logout),
            "VIEW" => Ok(Self::View),
            "ACTION" => Ok(Self::Action),
            _ => Err(AppError::invalid_input(format!("Invalid log action: {s}"))),
        }
    }
}

/// One entry of a user's activity log
///
/// Entries are never mutated or deleted once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    /// Unique entry identifier
    pub id: Uuid,
    /// User who performed the action
    pub user_id: Uuid,
    /// Kind of action
    pub action: LogAction,
    /// Free-text description, e.g. "Opened Workouts tab"
    pub details: String,
    /// When the action happened
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl ActivityLogEntry {
    /// Create a new log entry
    #[must_use]
    pub fn new(
        user_id: Uuid,
        action: LogAction,
        details: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            action,
            details: details.into(),
            timestamp,
        }
    }
}
