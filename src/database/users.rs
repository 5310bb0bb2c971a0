// ABOUTME: Minimal user storage backing recipe ownership and per-user plans
// ABOUTME: Identity is asserted upstream; this table only anchors foreign keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use chrono::{DateTime, Utc};
use planner_core::models::UserId;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::{query_error, DatabaseError, DatabaseResult};

/// Registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User identifier
    pub id: UserId,
    /// Unique email address
    pub email: String,
    /// Optional display name
    pub display_name: Option<String>,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

/// User manager
#[derive(Clone, Debug)]
pub struct UserManager {
    pool: SqlitePool,
}

impl UserManager {
    /// Create a new user manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a user and return it
    ///
    /// # Errors
    ///
    /// Returns an error if the email is taken or the insert fails
    pub async fn create_user(&self, email: &str, display_name: Option<&str>) -> DatabaseResult<User> {
        let now = Utc::now();
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (email, display_name, created_at) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(email)
        .bind(display_name)
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        .map_err(query_error(format!("Failed to create user {email}")))?;

        Ok(User {
            id,
            email: email.to_owned(),
            display_name: display_name.map(ToOwned::to_owned),
            created_at: now,
        })
    }

    /// Check that a user exists
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn exists(&self, id: UserId) -> DatabaseResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error(format!("Failed to check user {id}")))?;
        Ok(found.is_some())
    }
}

/// Parse an RFC 3339 column value
pub(crate) fn parse_timestamp(raw: &str) -> DatabaseResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::SerializationError {
            context: format!("Invalid timestamp '{raw}': {e}"),
        })
}
