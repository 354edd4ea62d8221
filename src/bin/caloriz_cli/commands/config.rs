// ABOUTME: Platform configuration commands for caloriz-cli
// ABOUTME: Shows and updates subscription prices and themes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use caloriz::errors::{AppError, AppResult};
use caloriz::models::{AppConfigUpdate, SeasonalTheme, ThemeMode};
use caloriz::services::AdminService;

use crate::helpers::display::display_app_config;

/// Print the current configuration
pub async fn show(admin: &AdminService) -> AppResult<()> {
    display_app_config(&admin.app_config().await?);
    Ok(())
}

/// Apply the given changes
pub async fn set(
    admin: &AdminService,
    monthly_price: Option<f64>,
    annual_price: Option<f64>,
    theme_mode: Option<ThemeMode>,
    seasonal_theme: Option<SeasonalTheme>,
) -> AppResult<()> {
    let update = AppConfigUpdate {
        theme_mode,
        monthly_price,
        annual_price,
        seasonal_theme,
    };
    if update == AppConfigUpdate::default() {
        return Err(AppError::invalid_input(
            "Nothing to update; pass at least one option",
        ));
    }
    let config = admin.update_app_config(&update).await?;
    println!("Configuration updated");
    display_app_config(&config);
    Ok(())
}
