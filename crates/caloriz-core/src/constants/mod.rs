// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Trial window, nutrition defaults, pricing, and activity log wording
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

//! Constants module
//!
//! Constants are grouped into logical domains rather than being spread
//! across the modules that use them.

/// Time arithmetic
pub mod time {
    /// Milliseconds in one day
    pub const MS_PER_DAY: i64 = 86_400_000;
}

/// Free trial gating
pub mod trial {
    /// Length of the free trial in days
    pub const TRIAL_DAYS: i64 = 3;
    /// Weight stored on new accounts until onboarding records a real one
    pub const PENDING_WEIGHT_KG: f64 = 0.0;
}

/// Default nutrition goals used when a user has no custom macros
pub mod nutrition {
    /// Daily calorie goal (kcal)
    pub const DEFAULT_CALORIES: f64 = 2500.0;
    /// Daily protein goal (g)
    pub const DEFAULT_PROTEIN_G: f64 = 160.0;
    /// Daily carbohydrate goal (g)
    pub const DEFAULT_CARBS_G: f64 = 280.0;
    /// Daily fat goal (g)
    pub const DEFAULT_FATS_G: f64 = 80.0;
    /// Daily fiber goal (g)
    pub const DEFAULT_FIBER_G: f64 = 30.0;
    /// Daily step goal for new accounts
    pub const DEFAULT_DAILY_STEPS_GOAL: u32 = 6000;
}

/// Subscription pricing defaults
pub mod pricing {
    /// Monthly subscription price (BRL)
    pub const DEFAULT_MONTHLY_PRICE: f64 = 19.90;
    /// Annual subscription price (BRL)
    pub const DEFAULT_ANNUAL_PRICE: f64 = 127.00;
}

/// Account registration rules
pub mod accounts {
    /// Prefix of generated user codes
    pub const USER_CODE_PREFIX: &str = "CZ";
    /// Exclusive upper bound of the numeric part of a user code
    pub const USER_CODE_RANGE: u32 = 10_000_000;
    /// Minimum accepted password length
    pub const MIN_PASSWORD_LENGTH: usize = 6;
    /// Display name used when a profile is recreated without metadata
    pub const FALLBACK_DISPLAY_NAME: &str = "User";
}

/// Details recorded in the activity log
pub mod log_details {
    /// Written on registration
    pub const ACCOUNT_CREATED: &str = "Account created on the platform";
    /// Written on successful login
    pub const LOGIN_SUCCEEDED: &str = "Logged in successfully";
    /// Written on logout
    pub const LOGGED_OUT: &str = "Logged out of the platform";
    /// Written when a subscription payment is approved
    pub const PAYMENT_APPROVED: &str = "Payment approved - Premium";
    /// Written when onboarding completes
    pub const ONBOARDING_COMPLETED: &str = "Completed onboarding";
}

/// Keys used in the `app_settings` table
pub mod settings {
    /// Key holding the serialized `AppConfig`
    pub const APP_CONFIG_KEY: &str = "caloriz_config";
}

/// Service identity for structured logging
pub mod service_names {
    /// Service name reported in logs
    pub const CALORIZ: &str = "caloriz";
}
