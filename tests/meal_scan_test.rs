// ABOUTME: Integration tests for photo-based meal logging and the daily dashboard
// ABOUTME: Uses a canned analyzer in place of a vision model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use async_trait::async_trait;
use caloriz::entitlement::PrivilegedIdentities;
use caloriz::errors::{AppError, AppResult, ErrorCode};
use caloriz::models::LogAction;
use caloriz::services::{scan_meal, FoodImageAnalyzer, MealEstimate, MealService};
use chrono::{Duration, Utc};
use common::{create_test_database, insert_user};

struct CannedAnalyzer {
    reply: &'static str,
}

#[async_trait]
impl FoodImageAnalyzer for CannedAnalyzer {
    async fn analyze(&self, _image_base64: &str) -> AppResult<MealEstimate> {
        MealEstimate::from_model_json(self.reply)
            .map_err(|e| AppError::external_service("vision", e.message))
    }
}

const FEIJOADA: &str = r#"{"name": "Feijoada", "calories": 850, "protein": 45, "carbs": 60, "fats": 40, "fiber": 15}"#;

#[tokio::test]
async fn test_scan_logs_meal_with_photo() {
    let database = create_test_database().await.unwrap();
    let user = insert_user(&database, "maria@test.com", Utc::now())
        .await
        .unwrap();
    let meals = MealService::new(database.clone(), PrivilegedIdentities::default());
    let now = Utc::now();

    let meal = scan_meal(
        &meals,
        &CannedAnalyzer { reply: FEIJOADA },
        user.id,
        "aGVsbG8=",
        now,
    )
    .await
    .unwrap();
    assert_eq!(meal.name, "Feijoada");
    assert_eq!(meal.image_url.as_deref(), Some("aGVsbG8="));

    let stored = meals.recent_meals(user.id, 10).await.unwrap();
    assert_eq!(stored.len(), 1);
    let logs = database.get_user_logs(user.id).await.unwrap();
    assert_eq!(logs[0].action, LogAction::Action);
    assert!(logs[0].details.contains("Feijoada"));

    let summary = meals.daily_summary(user.id, now, &Utc).await.unwrap();
    assert!((summary.consumed.calories - 850.0).abs() < f64::EPSILON);
    assert!((summary.calories_left - 1650.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_unreadable_reply_stores_nothing() {
    let database = create_test_database().await.unwrap();
    let user = insert_user(&database, "joao@test.com", Utc::now())
        .await
        .unwrap();
    let meals = MealService::new(database.clone(), PrivilegedIdentities::default());

    let err = scan_meal(
        &meals,
        &CannedAnalyzer {
            reply: "I think this is pasta",
        },
        user.id,
        "aGVsbG8=",
        Utc::now(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert!(database.get_meals(user.id).await.unwrap().is_empty());

    let err = scan_meal(
        &meals,
        &CannedAnalyzer { reply: FEIJOADA },
        user.id,
        "",
        Utc::now(),
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);
}

#[tokio::test]
async fn test_recent_meals_limit_and_order() {
    let database = create_test_database().await.unwrap();
    let user = insert_user(&database, "ana@test.com", Utc::now())
        .await
        .unwrap();
    let meals = MealService::new(database, PrivilegedIdentities::default());
    let start = Utc::now() - Duration::hours(3);
    let analyzer = CannedAnalyzer { reply: FEIJOADA };

    for hour in 0..3 {
        scan_meal(&meals, &analyzer, user.id, "aGVsbG8=", start + Duration::hours(hour))
            .await
            .unwrap();
    }

    let recent = meals.recent_meals(user.id, 2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert!(recent[0].timestamp > recent[1].timestamp);
}
