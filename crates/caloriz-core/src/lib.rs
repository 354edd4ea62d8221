// ABOUTME: Core types and constants for the Caloriz nutrition tracking platform
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

#![deny(unsafe_code)]

//! # Caloriz Core
//!
//! Foundation crate providing shared types and constants for the Caloriz
//! nutrition and fitness tracker. This crate is designed to change
//! infrequently, enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Trial window, nutrition defaults, pricing, and log details
//! - **models**: User accounts, activity logs, meals, workouts, notifications, app config

/// Unified error handling system with standard error codes and HTTP statuses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (`UserAccount`, `ActivityLogEntry`, `Meal`, `Workout`, etc.)
pub mod models;
