// ABOUTME: Domain service layer combining storage, the access gate, and activity logging
// ABOUTME: Accounts, meals, workouts, meal scanning, subscriptions, and administration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

//! Domain service layer
//!
//! Services own a [`Database`](crate::database::Database) handle and carry
//! the business rules shared by every entry point (the admin CLI and tests).

/// Registration, login, onboarding, goals, and access checks
pub mod accounts;

/// Privileged operations: user search, bans, timelines, notifications, settings, stats
pub mod admin;

/// Photo-based meal estimation
pub mod meal_scan;

/// Meal logging and the daily dashboard
pub mod meals;

/// Premium upgrades through a payment gateway
pub mod subscription;

/// Workout catalog
pub mod workouts;

pub use accounts::{AccountService, GoalsUpdate, OnboardingData, RegistrationRequest};
pub use admin::{parse_schedule, AdminService, PlatformStats};
pub use meal_scan::{scan_meal, FoodImageAnalyzer, MealEstimate};
pub use meals::MealService;
pub use subscription::{PaymentGateway, SimulatedPaymentGateway, SubscriptionService};
pub use workouts::WorkoutService;
