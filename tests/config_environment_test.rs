// ABOUTME: Unit tests for config environment functionality
// ABOUTME: Validates parsing helpers, environment loading, and validation errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::path::PathBuf;

use caloriz::config::{DatabaseUrl, Environment, LogLevel, ServerConfig};
use caloriz::errors::ErrorCode;
use caloriz::logging::LogFormat;
use serial_test::serial;

const CONFIG_VARS: &[&str] = &[
    "ENVIRONMENT",
    "RUST_LOG",
    "DATABASE_URL",
    "CALORIZ_ADMIN_EMAILS",
    "BCRYPT_COST",
    "PAYMENT_SUCCESS_RATE",
];

fn clear_config_env() {
    for var in CONFIG_VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_log_level_parsing() {
    assert_eq!(LogLevel::from_str_or_default("error"), LogLevel::Error);
    assert_eq!(LogLevel::from_str_or_default("WARN"), LogLevel::Warn);
    assert_eq!(LogLevel::from_str_or_default("Debug"), LogLevel::Debug);
    assert_eq!(LogLevel::from_str_or_default("invalid"), LogLevel::Info);
    assert_eq!(LogLevel::Trace.to_tracing_level(), tracing::Level::TRACE);
}

#[test]
fn test_environment_parsing() {
    assert_eq!(
        Environment::from_str_or_default("PROD"),
        Environment::Production
    );
    assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
    assert_eq!(
        Environment::from_str_or_default("staging"),
        Environment::Development
    );
    assert!(Environment::Production.is_production());
}

#[test]
fn test_database_url_parsing() {
    assert_eq!(DatabaseUrl::parse_url("sqlite::memory:"), DatabaseUrl::Memory);
    assert_eq!(
        DatabaseUrl::parse_url("sqlite:./data/caloriz.db"),
        DatabaseUrl::SQLite {
            path: PathBuf::from("./data/caloriz.db")
        }
    );
    assert_eq!(
        DatabaseUrl::parse_url("/var/lib/caloriz.db").to_connection_string(),
        "sqlite:/var/lib/caloriz.db"
    );
    assert!(DatabaseUrl::Memory.is_memory());
}

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str_or_default("JSON"), LogFormat::Json);
    assert_eq!(LogFormat::from_str_or_default("compact"), LogFormat::Compact);
    assert_eq!(LogFormat::from_str_or_default("other"), LogFormat::Pretty);
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_config_env();
    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.database_url, DatabaseUrl::default());
    assert!(config.privileged.is_empty());
    assert!((config.payment_success_rate - 0.9).abs() < f64::EPSILON);
}

#[test]
#[serial]
fn test_from_env_reads_admins_and_overrides() {
    clear_config_env();
    env::set_var("CALORIZ_ADMIN_EMAILS", "admin@caloriz.app, Ops@Caloriz.app");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("BCRYPT_COST", "4");
    env::set_var("PAYMENT_SUCCESS_RATE", "0.5");

    let config = ServerConfig::from_env().unwrap();
    clear_config_env();

    assert_eq!(config.privileged.len(), 2);
    assert!(config.privileged.contains("ops@caloriz.app"));
    assert!(config.database_url.is_memory());
    assert_eq!(config.bcrypt_cost, 4);
    assert!(config.summary().contains("Privileged Accounts: 2"));
}

#[test]
#[serial]
fn test_from_env_rejects_invalid_values() {
    clear_config_env();
    env::set_var("PAYMENT_SUCCESS_RATE", "1.5");
    let err = ServerConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);

    env::set_var("PAYMENT_SUCCESS_RATE", "abc");
    let err = ServerConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);

    env::set_var("PAYMENT_SUCCESS_RATE", "0.5");
    env::set_var("BCRYPT_COST", "2");
    let err = ServerConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    clear_config_env();
}
