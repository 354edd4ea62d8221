// ABOUTME: Integration tests for privileged administration operations
// ABOUTME: Permission checks, search, bans, timelines, notifications, settings, and stats
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use caloriz::database::Database;
use caloriz::entitlement::{AccessDecision, PrivilegedIdentities};
use caloriz::errors::ErrorCode;
use caloriz::models::{AppConfigUpdate, LogAction, ProfileUpdate, SeasonalTheme, ThemeMode};
use caloriz::services::AdminService;
use chrono::{Duration, FixedOffset, TimeZone, Utc};
use common::{create_test_database, insert_user, ADMIN_EMAIL};

fn admin(database: &Database) -> AdminService {
    AdminService::new(
        database.clone(),
        PrivilegedIdentities::new([ADMIN_EMAIL]),
        ADMIN_EMAIL,
    )
    .unwrap()
}

#[tokio::test]
async fn test_unprivileged_actor_is_denied() {
    let database = create_test_database().await.unwrap();
    let result = AdminService::new(
        database,
        PrivilegedIdentities::new([ADMIN_EMAIL]),
        "maria@test.com",
    );
    assert_eq!(result.err().map(|e| e.code), Some(ErrorCode::PermissionDenied));
}

#[tokio::test]
async fn test_search_users() {
    let database = create_test_database().await.unwrap();
    let service = admin(&database);
    let now = Utc::now();
    insert_user(&database, "maria.silva@test.com", now).await.unwrap();
    insert_user(&database, "joao@test.com", now).await.unwrap();

    assert_eq!(service.search_users("").await.unwrap().len(), 2);
    let found = service.search_users("SILVA").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].email, "maria.silva@test.com");
    assert!(service.search_users("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_toggle_ban_flips_flag() {
    let database = create_test_database().await.unwrap();
    let service = admin(&database);
    let now = Utc::now();
    let user = insert_user(&database, "carlos@test.com", now).await.unwrap();

    assert!(service.toggle_ban(user.id).await.unwrap());
    let banned = service.user_by_email("carlos@test.com").await.unwrap();
    assert!(banned.is_banned);
    assert_eq!(service.access_for(&banned, now), AccessDecision::Banned);

    assert!(!service.toggle_ban(user.id).await.unwrap());
    assert_eq!(
        service.user_by_email("ghost@test.com").await.unwrap_err().code,
        ErrorCode::ResourceNotFound
    );
}

#[tokio::test]
async fn test_user_timeline_groups_by_day() {
    let database = create_test_database().await.unwrap();
    let service = admin(&database);
    let user = insert_user(&database, "maria@test.com", Utc::now())
        .await
        .unwrap();
    let day_one = Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap();
    let day_two = day_one + Duration::days(1);

    database
        .add_user_log(user.id, LogAction::Register, "created", day_one)
        .await
        .unwrap();
    database
        .add_user_log(user.id, LogAction::Login, "login", day_two)
        .await
        .unwrap();
    database
        .add_user_log(user.id, LogAction::View, "Opened Home tab", day_two + Duration::hours(1))
        .await
        .unwrap();

    let offset = FixedOffset::east_opt(0).unwrap();
    let groups = service.user_timeline(user.id, &offset).await.unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].label, "7/2/2025");
    assert_eq!(groups[0].entries[0].action, LogAction::View);
    assert_eq!(groups[0].entries[1].action, LogAction::Login);
    assert_eq!(groups[1].label, "7/1/2025");
}

#[tokio::test]
async fn test_schedule_notification_validation() {
    let database = create_test_database().await.unwrap();
    let service = admin(&database);
    let now = Utc::now();

    assert_eq!(
        service
            .schedule_notification(" ", "body", "2025-12-24T20:00", now)
            .await
            .unwrap_err()
            .code,
        ErrorCode::MissingRequiredField
    );
    assert_eq!(
        service
            .schedule_notification("Title", "body", "tomorrow", now)
            .await
            .unwrap_err()
            .code,
        ErrorCode::InvalidFormat
    );

    let notification = service
        .schedule_notification("Merry Xmas", "Enjoy a light dinner", "2025-12-24T20:00", now)
        .await
        .unwrap();
    assert_eq!(
        notification.scheduled_for,
        Utc.with_ymd_and_hms(2025, 12, 24, 20, 0, 0).unwrap()
    );
    assert_eq!(service.notifications().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_app_config_validates_before_saving() {
    let database = create_test_database().await.unwrap();
    let service = admin(&database);

    let invalid = AppConfigUpdate {
        monthly_price: Some(0.0),
        ..AppConfigUpdate::default()
    };
    assert_eq!(
        service.update_app_config(&invalid).await.unwrap_err().code,
        ErrorCode::ValueOutOfRange
    );
    assert!((service.app_config().await.unwrap().monthly_price - 19.90).abs() < f64::EPSILON);

    let update = AppConfigUpdate {
        theme_mode: Some(ThemeMode::Dark.toggled()),
        seasonal_theme: Some(SeasonalTheme::Halloween),
        ..AppConfigUpdate::default()
    };
    let config = service.update_app_config(&update).await.unwrap();
    assert_eq!(config.theme_mode, ThemeMode::Light);
    assert_eq!(service.app_config().await.unwrap(), config);
}

#[tokio::test]
async fn test_platform_stats() {
    let database = create_test_database().await.unwrap();
    let service = admin(&database);
    let now = Utc::now();

    insert_user(&database, ADMIN_EMAIL, now - Duration::days(90))
        .await
        .unwrap();
    insert_user(&database, "fresh@test.com", now - Duration::days(1))
        .await
        .unwrap();
    let lapsed = insert_user(&database, "lapsed@test.com", now - Duration::days(6))
        .await
        .unwrap();
    let subscriber = insert_user(&database, "paid@test.com", now - Duration::days(40))
        .await
        .unwrap();
    database.set_banned(lapsed.id, true).await.unwrap();
    database
        .update_profile(
            subscriber.id,
            &ProfileUpdate {
                is_premium: Some(true),
                ..ProfileUpdate::default()
            },
        )
        .await
        .unwrap();

    let stats = service.platform_stats(now).await.unwrap();
    assert_eq!(stats.total_users, 4);
    assert_eq!(stats.subscribers, 1);
    assert_eq!(stats.trial_users, 1);
    assert_eq!(stats.expired_trials, 1);
    assert_eq!(stats.banned_users, 1);
    assert!((stats.estimated_monthly_revenue - 19.90).abs() < 1e-9);
}
