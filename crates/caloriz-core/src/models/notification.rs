// ABOUTME: Scheduled broadcast notification model created by administrators
// ABOUTME: AppNotification definition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A notification scheduled for all members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppNotification {
    /// Unique notification identifier
    pub id: Uuid,
    /// Title line
    pub title: String,
    /// Body text
    pub message: String,
    /// When the notification should go out
    pub scheduled_for: DateTime<Utc>,
    /// When the administrator created it
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl AppNotification {
    /// Create a new notification
    #[must_use]
    pub fn new(
        title: String,
        message: String,
        scheduled_for: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            message,
            scheduled_for,
            created_at,
        }
    }
}
