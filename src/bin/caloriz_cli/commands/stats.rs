// ABOUTME: Platform statistics command for caloriz-cli
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use caloriz::errors::AppResult;
use caloriz::services::AdminService;
use chrono::Utc;

use crate::helpers::display::display_stats;

/// Print platform counters
pub async fn show(admin: &AdminService) -> AppResult<()> {
    display_stats(&admin.platform_stats(Utc::now()).await?);
    Ok(())
}
