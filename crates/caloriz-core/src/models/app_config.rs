// ABOUTME: Platform-wide presentation and pricing configuration
// ABOUTME: AppConfig value with partial updates merged into new immutable values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::pricing;
use crate::errors::{AppError, AppResult};

/// Color scheme of the app
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light scheme
    Light,
    /// Dark scheme
    #[default]
    Dark,
}

impl ThemeMode {
    /// The other theme
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(AppError::invalid_input(format!("Invalid theme mode: {s}"))),
        }
    }
}

/// Seasonal decoration applied on top of the theme
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeasonalTheme {
    /// No decoration
    #[default]
    None,
    /// Christmas
    Xmas,
    /// Halloween
    Halloween,
}

impl FromStr for SeasonalTheme {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NONE" => Ok(Self::None),
            "XMAS" => Ok(Self::Xmas),
            "HALLOWEEN" => Ok(Self::Halloween),
            _ => Err(AppError::invalid_input(format!(
                "Invalid seasonal theme: {s}"
            ))),
        }
    }
}

/// Platform configuration managed by administrators
///
/// Values are immutable; [`AppConfig::merged`] produces the updated config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Color scheme
    pub theme_mode: ThemeMode,
    /// Monthly subscription price
    pub monthly_price: f64,
    /// Annual subscription price
    pub annual_price: f64,
    /// Seasonal decoration
    pub seasonal_theme: SeasonalTheme,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::Dark,
            monthly_price: pricing::DEFAULT_MONTHLY_PRICE,
            annual_price: pricing::DEFAULT_ANNUAL_PRICE,
            seasonal_theme: SeasonalTheme::None,
        }
    }
}

impl AppConfig {
    /// Return a new config with every present field of `update` applied
    #[must_use]
    pub fn merged(&self, update: &AppConfigUpdate) -> Self {
        Self {
            theme_mode: update.theme_mode.unwrap_or(self.theme_mode),
            monthly_price: update.monthly_price.unwrap_or(self.monthly_price),
            annual_price: update.annual_price.unwrap_or(self.annual_price),
            seasonal_theme: update.seasonal_theme.unwrap_or(self.seasonal_theme),
        }
    }

    /// Check that prices are positive finite amounts
    ///
    /// # Errors
    ///
    /// Returns a `VALUE_OUT_OF_RANGE` error naming the offending price
    pub fn validate(&self) -> AppResult<()> {
        for (field, price) in [
            ("monthly_price", self.monthly_price),
            ("annual_price", self.annual_price),
        ] {
            if !price.is_finite() || price <= 0.0 {
                return Err(AppError::out_of_range(format!(
                    "{field} must be a positive amount, got {price}"
                )));
            }
        }
        Ok(())
    }
}

/// Partial update of [`AppConfig`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfigUpdate {
    /// New color scheme
    pub theme_mode: Option<ThemeMode>,
    /// New monthly price
    pub monthly_price: Option<f64>,
    /// New annual price
    pub annual_price: Option<f64>,
    /// New seasonal decoration
    pub seasonal_theme: Option<SeasonalTheme>,
}
