// ABOUTME: Configuration management module for centralized settings
// ABOUTME: Environment-driven server configuration and typed settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

//! Configuration module
//!
//! - **Environment**: server configuration from environment variables
//!
//! Platform presentation and pricing settings live in
//! [`crate::models::AppConfig`] and are persisted by the database layer.

/// Environment and server configuration
pub mod environment;

pub use environment::{DatabaseUrl, Environment, LogLevel, ServerConfig};
