// ABOUTME: Profile and credential storage for registered accounts
// ABOUTME: Account creation with password hash, lookups by id and email, updates, and ban flag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

use chrono::Utc;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, Sqlite};
use uuid::Uuid;

use super::{from_millis, parse_uuid, to_u32, Database};
use crate::errors::{AppError, AppResult, DatabaseResultExt};
use crate::models::{MacroData, ProfileUpdate, UserAccount};

const PROFILE_COLUMNS: &str = "id, email, name, phone, weight, height, age, sex, goal, \
     activity_level, created_at, user_code, is_premium, is_banned, daily_steps_goal, \
     custom_macros, current_steps, meal_plan_url, accepted_terms_at";

impl Database {
    /// Create profiles and credentials tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_profiles(&self) -> AppResult<()> {
        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS profiles (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE COLLATE NOCASE,
                name TEXT NOT NULL,
                phone TEXT,
                weight REAL NOT NULL DEFAULT 0,
                height REAL NOT NULL DEFAULT 0,
                age INTEGER NOT NULL DEFAULT 0,
                sex TEXT NOT NULL DEFAULT 'M' CHECK (sex IN ('M', 'F')),
                goal TEXT NOT NULL DEFAULT 'MAINTAIN',
                activity_level TEXT NOT NULL DEFAULT 'MODERATE',
                created_at INTEGER,
                user_code TEXT NOT NULL,
                is_premium BOOLEAN NOT NULL DEFAULT 0,
                is_banned BOOLEAN NOT NULL DEFAULT 0,
                daily_steps_goal INTEGER NOT NULL DEFAULT 6000,
                custom_macros TEXT,
                current_steps INTEGER NOT NULL DEFAULT 0,
                meal_plan_url TEXT,
                accepted_terms_at INTEGER
            )
            ",
            "create profiles table",
        )
        .await?;

        self.execute_ddl(
            r"
            CREATE TABLE IF NOT EXISTS credentials (
                user_id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE COLLATE NOCASE,
                password_hash TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )
            ",
            "create credentials table",
        )
        .await?;

        self.execute_ddl(
            "CREATE INDEX IF NOT EXISTS idx_profiles_user_code ON profiles(user_code)",
            "create profiles user_code index",
        )
        .await
    }

    /// Create a new account together with its password hash
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` if the email is taken, or a database
    /// error if either insert fails
    pub async fn create_user_account(
        &self,
        account: &UserAccount,
        password_hash: &str,
    ) -> AppResult<Uuid> {
        if self.get_password_hash(&account.email).await?.is_some()
            || self.get_profile_by_email(&account.email).await?.is_some()
        {
            return Err(AppError::already_exists(format!(
                "Email {} is already registered",
                account.email
            )));
        }

        let mut tx = self.pool.begin().await.db_context("begin transaction")?;
        upsert_profile_query(account)?
            .execute(&mut *tx)
            .await
            .db_context("insert profile")?;
        sqlx::query(
            "INSERT INTO credentials (user_id, email, password_hash, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(account.id.to_string())
        .bind(account.email.trim())
        .bind(password_hash)
        .bind(account.created_at.timestamp_millis())
        .execute(&mut *tx)
        .await
        .db_context("insert credentials")?;
        tx.commit().await.db_context("commit account creation")?;

        Ok(account.id)
    }

    /// Insert or fully replace a profile row
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub async fn upsert_profile(&self, account: &UserAccount) -> AppResult<()> {
        upsert_profile_query(account)?
            .execute(&self.pool)
            .await
            .db_context("upsert profile")?;
        Ok(())
    }

    /// Get a profile by user id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<UserAccount>> {
        let row = sqlx::query(&format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = ?1"))
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .db_context("get profile")?;
        row.as_ref().map(row_to_account).transpose()
    }

    /// Get a profile by email (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn get_profile_by_email(&self, email: &str) -> AppResult<Option<UserAccount>> {
        let row = sqlx::query(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE email = ?1"
        ))
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await
        .db_context("get profile by email")?;
        row.as_ref().map(row_to_account).transpose()
    }

    /// Get the stored password hash and user id for an email
    ///
    /// Credentials are kept apart from profiles, so a hit here does not
    /// guarantee a profile row exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_password_hash(&self, email: &str) -> AppResult<Option<(Uuid, String)>> {
        let row = sqlx::query(
            r"
            SELECT user_id, password_hash
            FROM credentials
            WHERE email = ?1
            ",
        )
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await
        .db_context("get password hash")?;

        let Some(row) = row else {
            return Ok(None);
        };
        let user_id: String = row
            .try_get("user_id")
            .db_context("read credentials.user_id")?;
        let hash: String = row
            .try_get("password_hash")
            .db_context("read credentials.password_hash")?;
        Ok(Some((parse_uuid(&user_id, "credentials.user_id")?, hash)))
    }

    /// Apply a partial update and return the stored result
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if the profile does not exist
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> AppResult<UserAccount> {
        let mut account = self
            .get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile").with_user_id(user_id))?;
        if update.is_empty() {
            return Ok(account);
        }
        update.apply_to(&mut account);
        self.upsert_profile(&account).await?;
        Ok(account)
    }

    /// Set the ban flag of an account
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_NOT_FOUND` if the profile does not exist
    pub async fn set_banned(&self, user_id: Uuid, banned: bool) -> AppResult<()> {
        let result = sqlx::query("UPDATE profiles SET is_banned = ?2 WHERE id = ?1")
            .bind(user_id.to_string())
            .bind(banned)
            .execute(&self.pool)
            .await
            .db_context("set ban flag")?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Profile").with_user_id(user_id));
        }
        Ok(())
    }

    /// List every profile, newest account first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn list_profiles(&self) -> AppResult<Vec<UserAccount>> {
        let rows = sqlx::query(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at DESC, rowid DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .db_context("list profiles")?;
        rows.iter().map(row_to_account).collect()
    }
}

fn upsert_profile_query(account: &UserAccount) -> AppResult<Query<'_, Sqlite, SqliteArguments<'_>>> {
    let custom_macros = account
        .custom_macros
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    Ok(sqlx::query(
        r"
        INSERT INTO profiles (
            id, email, name, phone, weight, height, age, sex, goal, activity_level,
            created_at, user_code, is_premium, is_banned, daily_steps_goal,
            custom_macros, current_steps, meal_plan_url, accepted_terms_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)
        ON CONFLICT(id) DO UPDATE SET
            email = excluded.email,
            name = excluded.name,
            phone = excluded.phone,
            weight = excluded.weight,
            height = excluded.height,
            age = excluded.age,
            sex = excluded.sex,
            goal = excluded.goal,
            activity_level = excluded.activity_level,
            created_at = excluded.created_at,
            user_code = excluded.user_code,
            is_premium = excluded.is_premium,
            is_banned = excluded.is_banned,
            daily_steps_goal = excluded.daily_steps_goal,
            custom_macros = excluded.custom_macros,
            current_steps = excluded.current_steps,
            meal_plan_url = excluded.meal_plan_url,
            accepted_terms_at = excluded.accepted_terms_at
        ",
    )
    .bind(account.id.to_string())
    .bind(account.email.trim())
    .bind(&account.name)
    .bind(account.phone.as_deref())
    .bind(account.weight_kg)
    .bind(account.height_cm)
    .bind(i64::from(account.age))
    .bind(account.sex.as_str())
    .bind(account.goal.as_str())
    .bind(account.activity_level.as_str())
    .bind(account.created_at.timestamp_millis())
    .bind(&account.user_code)
    .bind(account.is_premium)
    .bind(account.is_banned)
    .bind(i64::from(account.daily_steps_goal))
    .bind(custom_macros)
    .bind(i64::from(account.current_steps))
    .bind(account.meal_plan_url.as_deref())
    .bind(account.accepted_terms_at.map(|at| at.timestamp_millis())))
}

fn row_to_account(row: &SqliteRow) -> AppResult<UserAccount> {
    let id: String = row.try_get("id").db_context("read profiles.id")?;
    // A missing creation instant counts as "now": zero elapsed trial days.
    let created_at = match row
        .try_get::<Option<i64>, _>("created_at")
        .db_context("read profiles.created_at")?
    {
        Some(millis) => from_millis(millis, "profiles.created_at")?,
        None => Utc::now(),
    };
    let accepted_terms_at = row
        .try_get::<Option<i64>, _>("accepted_terms_at")
        .db_context("read profiles.accepted_terms_at")?
        .map(|millis| from_millis(millis, "profiles.accepted_terms_at"))
        .transpose()?;
    let custom_macros = row
        .try_get::<Option<String>, _>("custom_macros")
        .db_context("read profiles.custom_macros")?
        .map(|raw| serde_json::from_str::<MacroData>(&raw))
        .transpose()?;
    let sex: String = row.try_get("sex").db_context("read profiles.sex")?;
    let goal: String = row.try_get("goal").db_context("read profiles.goal")?;
    let activity_level: String = row
        .try_get("activity_level")
        .db_context("read profiles.activity_level")?;

    Ok(UserAccount {
        id: parse_uuid(&id, "profiles.id")?,
        email: row.try_get("email").db_context("read profiles.email")?,
        name: row.try_get("name").db_context("read profiles.name")?,
        phone: row.try_get("phone").db_context("read profiles.phone")?,
        weight_kg: row.try_get("weight").db_context("read profiles.weight")?,
        height_cm: row.try_get("height").db_context("read profiles.height")?,
        age: to_u32(row.try_get("age").db_context("read profiles.age")?),
        sex: sex.parse()?,
        goal: goal.parse()?,
        activity_level: activity_level.parse()?,
        created_at,
        user_code: row.try_get("user_code").db_context("read profiles.user_code")?,
        is_premium: row.try_get("is_premium").db_context("read profiles.is_premium")?,
        is_banned: row.try_get("is_banned").db_context("read profiles.is_banned")?,
        daily_steps_goal: to_u32(
            row.try_get("daily_steps_goal")
                .db_context("read profiles.daily_steps_goal")?,
        ),
        custom_macros,
        current_steps: to_u32(
            row.try_get("current_steps")
                .db_context("read profiles.current_steps")?,
        ),
        meal_plan_url: row
            .try_get("meal_plan_url")
            .db_context("read profiles.meal_plan_url")?,
        accepted_terms_at,
    })
}
