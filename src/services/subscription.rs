// ABOUTME: Premium upgrades charged through a pluggable payment gateway
// ABOUTME: Includes a simulated gateway with a configurable approval rate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use tokio::time::sleep;
use tracing::info;
use uuid::Uuid;

use crate::constants::log_details;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{LogAction, ProfileUpdate, UserAccount};

/// Charges a subscription fee
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charge `amount` to `user_id`; `Ok(false)` means the payment was declined
    ///
    /// # Errors
    ///
    /// Returns `EXTERNAL_SERVICE_ERROR` when the gateway cannot be reached
    async fn charge(&self, user_id: Uuid, amount: f64) -> AppResult<bool>;
}

/// Gateway that approves payments at random
#[derive(Debug, Clone)]
pub struct SimulatedPaymentGateway {
    success_rate: f64,
    delay: Option<Duration>,
}

impl SimulatedPaymentGateway {
    /// Approve with probability `success_rate`, clamped to `[0, 1]`
    #[must_use]
    pub fn new(success_rate: f64) -> Self {
        let success_rate = if success_rate.is_nan() {
            0.0
        } else {
            success_rate.clamp(0.0, 1.0)
        };
        Self {
            success_rate,
            delay: None,
        }
    }

    /// Wait `delay` before answering, like a real processor would
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Configured approval probability
    #[must_use]
    pub const fn success_rate(&self) -> f64 {
        self.success_rate
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn charge(&self, user_id: Uuid, amount: f64) -> AppResult<bool> {
        if let Some(delay) = self.delay {
            sleep(delay).await;
        }
        let approved = rand::thread_rng().gen_bool(self.success_rate);
        info!(user_id = %user_id, amount, approved, "Simulated payment processed");
        Ok(approved)
    }
}

/// Subscription purchase flow
#[derive(Clone)]
pub struct SubscriptionService {
    database: Database,
    gateway: Arc<dyn PaymentGateway>,
}

impl SubscriptionService {
    /// Create the service
    #[must_use]
    pub fn new(database: Database, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { database, gateway }
    }

    /// Charge the monthly price and mark the account premium
    ///
    /// Already premium accounts are returned unchanged without a charge.
    ///
    /// # Errors
    ///
    /// Returns `PAYMENT_DECLINED` when the gateway declines,
    /// `RESOURCE_NOT_FOUND` for an unknown user, or a storage error
    pub async fn upgrade(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<UserAccount> {
        let account = self
            .database
            .get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile").with_user_id(user_id))?;
        if account.is_premium {
            return Ok(account);
        }

        let price = self.database.load_app_config().await?.monthly_price;
        let approved = self.gateway.charge(user_id, price).await?;
        AppLogger::log_payment(user_id, approved);
        if !approved {
            return Err(AppError::payment_declined("Payment was declined, please try again")
                .with_user_id(user_id));
        }

        let update = ProfileUpdate {
            is_premium: Some(true),
            ..ProfileUpdate::default()
        };
        let account = self.database.update_profile(user_id, &update).await?;
        self.database
            .add_user_log(user_id, LogAction::Action, log_details::PAYMENT_APPROVED, now)
            .await?;
        AppLogger::log_user_action(user_id, LogAction::Action, log_details::PAYMENT_APPROVED);
        Ok(account)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_extreme_rates_are_deterministic() {
        let user_id = Uuid::new_v4();
        assert!(SimulatedPaymentGateway::new(1.0)
            .charge(user_id, 19.9)
            .await
            .unwrap());
        assert!(!SimulatedPaymentGateway::new(0.0)
            .charge(user_id, 19.9)
            .await
            .unwrap());
    }

    #[test]
    fn test_rate_is_clamped() {
        assert!((SimulatedPaymentGateway::new(3.0).success_rate() - 1.0).abs() < f64::EPSILON);
        assert!(SimulatedPaymentGateway::new(-1.0).success_rate().abs() < f64::EPSILON);
        assert!(SimulatedPaymentGateway::new(f64::NAN).success_rate().abs() < f64::EPSILON);
    }
}
