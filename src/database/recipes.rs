// ABOUTME: Database operations for recipes and their ordered ingredient lines
// ABOUTME: Applies reconciliation outcomes atomically with a version compare-and-swap
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use std::collections::HashMap;

use chrono::Utc;
use planner_core::models::{
    Ingredient, IngredientId, NewRecipe, Quantity, Recipe, RecipeId, UserId,
};
use planner_engine::ReconcileOutcome;
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};
use tracing::{debug, info};

use super::users::parse_timestamp;
use super::{query_error, DatabaseError, DatabaseResult, TransactionGuard};

const RECIPE_COLUMNS: &str = "r.id, r.user_id, r.name, r.description, r.instructions, \
     r.time_minutes, r.servings, r.classification, r.image, r.version, r.created_at, r.updated_at";

/// Recipe manager
#[derive(Clone, Debug)]
pub struct RecipeManager {
    pool: SqlitePool,
}

impl RecipeManager {
    /// Create a new recipe manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Get a recipe with its ingredients
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or stored data is corrupt
    pub async fn get_recipe(&self, id: RecipeId) -> DatabaseResult<Option<Recipe>> {
        let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes r WHERE r.id = $1");
        let rows = sqlx::query(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error(format!("Failed to get recipe {id}")))?;

        Ok(self.hydrate(&rows).await?.into_iter().next())
    }

    /// Ingredients of a recipe in display order, `None` when the recipe is gone
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_ingredients(&self, recipe_id: RecipeId) -> DatabaseResult<Option<Vec<Ingredient>>> {
        let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error(format!("Failed to check recipe {recipe_id}")))?;
        if exists.is_none() {
            return Ok(None);
        }

        let mut grouped = self.load_ingredients_for(&[recipe_id]).await?;
        Ok(Some(grouped.remove(&recipe_id).unwrap_or_default()))
    }

    /// Every recipe, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_catalog(&self) -> DatabaseResult<Vec<Recipe>> {
        let sql = format!("SELECT {RECIPE_COLUMNS} FROM recipes r ORDER BY r.id");
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error("Failed to list recipe catalog"))?;
        self.hydrate(&rows).await
    }

    /// Newest recipes first, at most `limit`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_recent(&self, limit: usize) -> DatabaseResult<Vec<Recipe>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let sql = format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes r ORDER BY r.created_at DESC, r.id DESC LIMIT $1"
        );
        let rows = sqlx::query(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error("Failed to list recent recipes"))?;
        self.hydrate(&rows).await
    }

    /// Favorite recipes of a user in the order they were marked
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_favorites(&self, user_id: UserId) -> DatabaseResult<Vec<Recipe>> {
        let sql = format!(
            "SELECT {RECIPE_COLUMNS} FROM recipes r \
             JOIN favorites f ON f.recipe_id = r.id \
             WHERE f.user_id = $1 ORDER BY f.created_at, r.id"
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(query_error(format!("Failed to list favorites of user {user_id}")))?;
        self.hydrate(&rows).await
    }

    async fn hydrate(&self, rows: &[SqliteRow]) -> DatabaseResult<Vec<Recipe>> {
        let ids: Vec<RecipeId> = rows.iter().map(|r| r.get("id")).collect();
        let mut ingredients = self.load_ingredients_for(&ids).await?;
        rows.iter()
            .map(|row| {
                let id: RecipeId = row.get("id");
                row_to_recipe(row, ingredients.remove(&id).unwrap_or_default())
            })
            .collect()
    }

    async fn load_ingredients_for(
        &self,
        recipe_ids: &[RecipeId],
    ) -> DatabaseResult<HashMap<RecipeId, Vec<Ingredient>>> {
        if recipe_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let placeholders = vec!["?"; recipe_ids.len()].join(", ");
        let sql = format!(
            "SELECT id, recipe_id, name, quantity, unit FROM ingredients \
             WHERE recipe_id IN ({placeholders}) ORDER BY recipe_id, position, id"
        );
        let mut query = sqlx::query(&sql);
        for id in recipe_ids {
            query = query.bind(id);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(query_error("Failed to load ingredients"))?;

        let mut grouped: HashMap<RecipeId, Vec<Ingredient>> = HashMap::new();
        for row in rows {
            let recipe_id: RecipeId = row.get("recipe_id");
            grouped.entry(recipe_id).or_default().push(row_to_ingredient(&row));
        }
        Ok(grouped)
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Create a recipe with its ingredients in one transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the owner does not exist or an insert fails
    pub async fn create_recipe(&self, owner: UserId, recipe: &NewRecipe) -> DatabaseResult<Recipe> {
        let now = Utc::now().to_rfc3339();
        let instructions = serde_json::to_string(&recipe.instructions)?;

        let mut guard = TransactionGuard::begin(&self.pool).await?;
        let id: RecipeId = sqlx::query_scalar(
            r"
            INSERT INTO recipes (user_id, name, description, instructions, time_minutes,
                                 servings, classification, image, version, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 1, $9, $9)
            RETURNING id
            ",
        )
        .bind(owner)
        .bind(&recipe.name)
        .bind(&recipe.description)
        .bind(&instructions)
        .bind(i64::from(recipe.time))
        .bind(i64::from(recipe.servings))
        .bind(&recipe.classification)
        .bind(&recipe.image)
        .bind(&now)
        .fetch_one(guard.executor()?)
        .await
        .map_err(query_error(format!("Failed to create recipe '{}'", recipe.name)))?;

        for (position, ingredient) in recipe.ingredients.iter().enumerate() {
            insert_ingredient(guard.executor()?, id, position, ingredient).await?;
        }
        guard.commit().await?;

        info!(recipe_id = id, user_id = owner, ingredients = recipe.ingredients.len(), "Recipe created");
        self.get_recipe(id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound {
                entity_type: "recipe",
                entity_id: id.to_string(),
            })
    }

    /// Write a reconciliation outcome and bump the recipe version
    ///
    /// Runs in one transaction: the version check, deletes, updates and
    /// inserts either all apply or none do. Updated lines take positions in
    /// outcome order, inserted lines follow them.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the recipe is gone, `VersionConflict` when
    /// `expected_version` is given and stale, or a query error.
    pub async fn apply_reconciliation(
        &self,
        recipe_id: RecipeId,
        expected_version: Option<i64>,
        outcome: &ReconcileOutcome,
    ) -> DatabaseResult<i64> {
        let mut guard = TransactionGuard::begin(&self.pool).await?;

        let current: Option<i64> = sqlx::query_scalar("SELECT version FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .fetch_optional(guard.executor()?)
            .await
            .map_err(query_error(format!("Failed to read version of recipe {recipe_id}")))?;
        let current = current.ok_or_else(|| DatabaseError::NotFound {
            entity_type: "recipe",
            entity_id: recipe_id.to_string(),
        })?;
        if let Some(expected) = expected_version {
            if expected != current {
                return Err(DatabaseError::VersionConflict {
                    entity_type: "recipe",
                    entity_id: recipe_id.to_string(),
                    expected,
                    actual: current,
                });
            }
        }

        for id in outcome.deleted_ids() {
            sqlx::query("DELETE FROM ingredients WHERE id = $1 AND recipe_id = $2")
                .bind(id)
                .bind(recipe_id)
                .execute(guard.executor()?)
                .await
                .map_err(query_error(format!("Failed to delete ingredient {id}")))?;
        }

        for (position, ingredient) in outcome.updated.iter().enumerate() {
            let Some(id) = ingredient.id else { continue };
            update_ingredient(guard.executor()?, recipe_id, id, position, ingredient).await?;
        }

        let offset = outcome.updated.len();
        for (index, ingredient) in outcome.inserted.iter().enumerate() {
            insert_ingredient(guard.executor()?, recipe_id, offset + index, ingredient).await?;
        }

        let next_version = current + 1;
        sqlx::query("UPDATE recipes SET version = $1, updated_at = $2 WHERE id = $3")
            .bind(next_version)
            .bind(Utc::now().to_rfc3339())
            .bind(recipe_id)
            .execute(guard.executor()?)
            .await
            .map_err(query_error(format!("Failed to bump version of recipe {recipe_id}")))?;

        guard.commit().await?;
        debug!(
            recipe_id,
            version = next_version,
            updated = outcome.updated.len(),
            inserted = outcome.inserted.len(),
            deleted = outcome.deleted.len(),
            "Ingredient changes persisted"
        );
        Ok(next_version)
    }

    /// Delete a recipe; ingredients and favorites cascade
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn delete_recipe(&self, id: RecipeId) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(query_error(format!("Failed to delete recipe {id}")))?;
        Ok(result.rows_affected() > 0)
    }
}

async fn insert_ingredient(
    conn: &mut SqliteConnection,
    recipe_id: RecipeId,
    position: usize,
    ingredient: &Ingredient,
) -> DatabaseResult<IngredientId> {
    sqlx::query_scalar(
        "INSERT INTO ingredients (recipe_id, position, name, quantity, unit) \
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind(recipe_id)
    .bind(i64::try_from(position).unwrap_or(i64::MAX))
    .bind(&ingredient.name)
    .bind(ingredient.quantity.to_storage())
    .bind(&ingredient.unit)
    .fetch_one(conn)
    .await
    .map_err(query_error(format!("Failed to insert ingredient '{}'", ingredient.name)))
}

async fn update_ingredient(
    conn: &mut SqliteConnection,
    recipe_id: RecipeId,
    id: IngredientId,
    position: usize,
    ingredient: &Ingredient,
) -> DatabaseResult<()> {
    sqlx::query(
        "UPDATE ingredients SET position = $1, name = $2, quantity = $3, unit = $4 \
         WHERE id = $5 AND recipe_id = $6",
    )
    .bind(i64::try_from(position).unwrap_or(i64::MAX))
    .bind(&ingredient.name)
    .bind(ingredient.quantity.to_storage())
    .bind(&ingredient.unit)
    .bind(id)
    .bind(recipe_id)
    .execute(conn)
    .await
    .map_err(query_error(format!("Failed to update ingredient {id}")))?;
    Ok(())
}

fn row_to_ingredient(row: &SqliteRow) -> Ingredient {
    Ingredient {
        id: Some(row.get("id")),
        name: row.get("name"),
        quantity: Quantity::from_storage(row.get("quantity")),
        unit: row.get("unit"),
    }
}

fn row_to_recipe(row: &SqliteRow, ingredients: Vec<Ingredient>) -> DatabaseResult<Recipe> {
    let instructions_json: String = row.get("instructions");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");
    let time_minutes: i64 = row.get("time_minutes");
    let servings: i64 = row.get("servings");

    Ok(Recipe {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        description: row.get("description"),
        ingredients,
        instructions: serde_json::from_str(&instructions_json)?,
        time: u32::try_from(time_minutes).unwrap_or(0),
        servings: u32::try_from(servings).unwrap_or(0),
        classification: row.get("classification"),
        image: row.get("image"),
        version: row.get("version"),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
