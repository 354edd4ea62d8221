// ABOUTME: User moderation commands for caloriz-cli
// ABOUTME: Handles listing, ban toggling, timelines, and access checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use caloriz::errors::AppResult;
use caloriz::services::AdminService;
use chrono::{Local, Utc};
use tracing::info;

use crate::helpers::display::{display_timeline, display_users};

/// List accounts matching `search`
pub async fn list(admin: &AdminService, search: Option<&str>) -> AppResult<()> {
    let users = admin.search_users(search.unwrap_or_default()).await?;
    display_users(&users, Utc::now());
    Ok(())
}

/// Toggle the ban flag of the account using `email`
pub async fn ban(admin: &AdminService, email: &str) -> AppResult<()> {
    let user = admin.user_by_email(email).await?;
    let banned = admin.toggle_ban(user.id).await?;
    info!(user_id = %user.id, banned, "Ban flag updated");
    if banned {
        println!("{user} is now banned");
    } else {
        println!("{user} is no longer banned");
    }
    Ok(())
}

/// Print the activity of the account using `email`, grouped by local day
pub async fn timeline(admin: &AdminService, email: &str) -> AppResult<()> {
    let user = admin.user_by_email(email).await?;
    let groups = admin.user_timeline(user.id, &Local).await?;
    println!("Activity of {user}");
    display_timeline(&groups);
    Ok(())
}

/// Print the access decision for the account using `email`
pub async fn access(admin: &AdminService, email: &str) -> AppResult<()> {
    let user = admin.user_by_email(email).await?;
    let decision = admin.access_for(&user, Utc::now());
    println!("{user}: {decision}");
    Ok(())
}
