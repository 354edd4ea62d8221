// ABOUTME: Main library entry point for the Caloriz nutrition and fitness platform
// ABOUTME: Access gating, audit timelines, storage, and domain services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

#![deny(unsafe_code)]

//! # Caloriz
//!
//! Backend library for a nutrition and fitness tracker with a free trial,
//! a subscription paywall, and an administrator audit trail.
//!
//! ## Features
//!
//! - **Entitlement gate**: decides login, onboarding, paywall, ban, or access
//! - **Activity timelines**: groups audit logs by calendar day
//! - **Nutrition dashboard**: macro goals, daily totals, and step progress
//! - **Administration**: user search, bans, notifications, pricing, stats
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use caloriz::config::ServerConfig;
//! use caloriz::database::Database;
//! use caloriz::errors::AppResult;
//! use caloriz::services::AccountService;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     let database = Database::new(&config.database_url.to_connection_string()).await?;
//!     let accounts = AccountService::new(database, &config);
//!
//!     let decision = accounts.check_access(None, chrono::Utc::now()).await?;
//!     println!("Anonymous session: {decision}");
//!     Ok(())
//! }
//! ```

/// Configuration loaded from environment variables
pub mod config;

/// `SQLite` persistence for every domain entity
pub mod database;

/// Access gate and privileged identities
pub mod entitlement;

/// Unified error handling
pub mod errors;

/// Structured logging setup and helpers
pub mod logging;

/// Daily nutrition dashboard calculations
pub mod nutrition;

/// Domain services
pub mod services;

/// Activity log grouping by calendar day
pub mod timeline;

pub use caloriz_core::{constants, models};
