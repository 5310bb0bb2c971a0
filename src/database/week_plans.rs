// ABOUTME: Database operations for the per-user weekly plan document
// ABOUTME: Stores the whole week as one JSON column and replaces it wholesale on save
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use chrono::Utc;
use planner_core::models::{UserId, Week, WeekPlan};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::users::parse_timestamp;
use super::{query_error, DatabaseError, DatabaseResult, TransactionGuard};

/// Week plan manager
#[derive(Clone, Debug)]
pub struct WeekPlanManager {
    pool: SqlitePool,
}

impl WeekPlanManager {
    /// Create a new week plan manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Stored plan of a user, `None` before the first save
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored document is corrupt
    pub async fn load(&self, user_id: UserId) -> DatabaseResult<Option<WeekPlan>> {
        let row = sqlx::query("SELECT week, version, updated_at FROM week_plans WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error(format!("Failed to load week plan of user {user_id}")))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let week_json: String = row.get("week");
        let updated_at: String = row.get("updated_at");
        Ok(Some(WeekPlan {
            user_id,
            week: serde_json::from_str(&week_json)?,
            version: row.get("version"),
            updated_at: parse_timestamp(&updated_at)?,
        }))
    }

    /// Replace the whole plan of a user
    ///
    /// A user without a stored plan is at version 0. When `expected_version`
    /// is given it must equal the stored version.
    ///
    /// # Errors
    ///
    /// Returns `VersionConflict` on a stale `expected_version` or a query error
    pub async fn save(
        &self,
        user_id: UserId,
        week: &Week,
        expected_version: Option<i64>,
    ) -> DatabaseResult<WeekPlan> {
        let week_json = serde_json::to_string(week)?;
        let mut guard = TransactionGuard::begin(&self.pool).await?;

        let current: Option<i64> =
            sqlx::query_scalar("SELECT version FROM week_plans WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(guard.executor()?)
                .await
                .map_err(query_error(format!("Failed to read week plan version of user {user_id}")))?;
        let current = current.unwrap_or(0);

        if let Some(expected) = expected_version {
            if expected != current {
                return Err(DatabaseError::VersionConflict {
                    entity_type: "week plan",
                    entity_id: user_id.to_string(),
                    expected,
                    actual: current,
                });
            }
        }

        let now = Utc::now();
        let version = current + 1;
        sqlx::query(
            r"
            INSERT INTO week_plans (user_id, week, version, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT(user_id) DO UPDATE SET
                week = excluded.week,
                version = excluded.version,
                updated_at = excluded.updated_at
            ",
        )
        .bind(user_id)
        .bind(&week_json)
        .bind(version)
        .bind(now.to_rfc3339())
        .execute(guard.executor()?)
        .await
        .map_err(query_error(format!("Failed to save week plan of user {user_id}")))?;

        guard.commit().await?;
        debug!(user_id, version, "Week plan saved");

        Ok(WeekPlan {
            user_id,
            week: week.clone(),
            version,
            updated_at: now,
        })
    }
}
