// ABOUTME: Database operations for the user/recipe favorite relation
// ABOUTME: Read by the recommendation flow; writes are idempotent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use chrono::Utc;
use planner_core::models::{RecipeId, UserId};
use sqlx::SqlitePool;

use super::{query_error, DatabaseError, DatabaseResult};

/// Favorite manager
#[derive(Clone, Debug)]
pub struct FavoriteManager {
    pool: SqlitePool,
}

impl FavoriteManager {
    /// Create a new favorite manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Mark a recipe as favorite, returns false when it already was
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the recipe does not exist, or a query error
    pub async fn add_favorite(&self, user_id: UserId, recipe_id: RecipeId) -> DatabaseResult<bool> {
        let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error(format!("Failed to check recipe {recipe_id}")))?;
        if exists.is_none() {
            return Err(DatabaseError::NotFound {
                entity_type: "recipe",
                entity_id: recipe_id.to_string(),
            });
        }

        let result = sqlx::query(
            "INSERT OR IGNORE INTO favorites (user_id, recipe_id, created_at) VALUES ($1, $2, $3)",
        )
        .bind(user_id)
        .bind(recipe_id)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(query_error(format!(
            "Failed to add favorite {recipe_id} for user {user_id}"
        )))?;
        Ok(result.rows_affected() > 0)
    }

    /// Unmark a favorite, returns false when it was not marked
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn remove_favorite(&self, user_id: UserId, recipe_id: RecipeId) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND recipe_id = $2")
            .bind(user_id)
            .bind(recipe_id)
            .execute(&self.pool)
            .await
            .map_err(query_error(format!(
                "Failed to remove favorite {recipe_id} for user {user_id}"
            )))?;
        Ok(result.rows_affected() > 0)
    }

    /// Favorite recipe ids of a user
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn favorite_ids(&self, user_id: UserId) -> DatabaseResult<Vec<RecipeId>> {
        sqlx::query_scalar(
            "SELECT recipe_id FROM favorites WHERE user_id = $1 ORDER BY created_at, recipe_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(query_error(format!("Failed to list favorites of user {user_id}")))
    }
}
