// ABOUTME: Re-exports the unified error system and adds storage error conversions
// ABOUTME: Maps sqlx and bcrypt failures into AppError with operation context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriz

//! # Unified Error Handling System
//!
//! The error types live in `caloriz-core`; this module re-exports them and
//! adds conversions for the storage and hashing crates used by this crate.

pub use caloriz_core::errors::*;

/// Attach operation context to storage errors
pub trait DatabaseResultExt<T> {
    /// Convert the error into a `DATABASE_ERROR` describing the failed operation
    ///
    /// # Errors
    ///
    /// Returns the converted error when `self` is an error
    fn db_context(self, operation: &str) -> AppResult<T>;
}

impl<T> DatabaseResultExt<T> for Result<T, sqlx::Error> {
    fn db_context(self, operation: &str) -> AppResult<T> {
        self.map_err(|e| AppError::database(format!("Failed to {operation}: {e}")).with_source(e))
    }
}

/// Convert a password hashing failure into an internal error
#[must_use]
pub fn hashing_error(error: bcrypt::BcryptError) -> AppError {
    AppError::internal(format!("Password hashing failed: {error}")).with_source(error)
}
