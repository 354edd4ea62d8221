// ABOUTME: Re-exports command modules for caloriz-cli
// ABOUTME: Provides access to user, notification, config, workout, and stats commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

pub mod config;
pub mod notify;
pub mod stats;
pub mod user;
pub mod workout;
