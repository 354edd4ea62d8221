// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory databases, configs, and account fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz
#![allow(
    dead_code,
    clippy::wildcard_in_or_patterns,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `caloriz`

use std::sync::Once;

use anyhow::Result;
use caloriz::config::ServerConfig;
use caloriz::database::Database;
use caloriz::entitlement::PrivilegedIdentities;
use caloriz::models::{format_user_code, UserAccount};
use chrono::{DateTime, Utc};

static INIT_LOGGER: Once = Once::new();

/// Privileged account used across tests
pub const ADMIN_EMAIL: &str = "admin@caloriz.app";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new("sqlite::memory:").await?)
}

/// Configuration with a cheap bcrypt cost and [`ADMIN_EMAIL`] privileged
pub fn test_config() -> ServerConfig {
    ServerConfig {
        bcrypt_cost: 4,
        privileged: PrivilegedIdentities::new([ADMIN_EMAIL]),
        ..ServerConfig::default()
    }
}

/// Account that completed onboarding, created at `created_at`
pub fn onboarded_user(email: &str, created_at: DateTime<Utc>) -> UserAccount {
    let mut user = UserAccount::new_pending(
        email.to_owned(),
        email.split('@').next().unwrap_or("User").to_owned(),
        format_user_code(1_234_567),
        created_at,
    );
    user.weight_kg = 70.0;
    user.height_cm = 175.0;
    user.age = 30;
    user
}

/// Store an onboarded account without credentials
pub async fn insert_user(
    database: &Database,
    email: &str,
    created_at: DateTime<Utc>,
) -> Result<UserAccount> {
    let user = onboarded_user(email, created_at);
    database.upsert_profile(&user).await?;
    Ok(user)
}
