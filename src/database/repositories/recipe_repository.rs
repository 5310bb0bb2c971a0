// ABOUTME: Recipe repository implementation over SQLite
// ABOUTME: Retries ingredient write-back when the database reports lock contention
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use async_trait::async_trait;
use planner_core::models::{Ingredient, NewRecipe, Recipe, RecipeId, UserId};
use planner_engine::ReconcileOutcome;

use super::RecipeRepository;
use crate::constants::defaults;
use crate::database::{retry_transaction, Database, DatabaseError};

/// `SQLite` implementation of `RecipeRepository`
#[derive(Clone, Debug)]
pub struct RecipeRepositoryImpl {
    db: Database,
}

impl RecipeRepositoryImpl {
    /// Create a new `RecipeRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecipeRepository for RecipeRepositoryImpl {
    async fn get_recipe(&self, id: RecipeId) -> Result<Option<Recipe>, DatabaseError> {
        self.db.recipes().get_recipe(id).await
    }

    async fn resolve_recipe_ingredients(
        &self,
        id: RecipeId,
    ) -> Result<Option<Vec<Ingredient>>, DatabaseError> {
        self.db.recipes().get_ingredients(id).await
    }

    async fn list_catalog(&self) -> Result<Vec<Recipe>, DatabaseError> {
        self.db.recipes().list_catalog().await
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Recipe>, DatabaseError> {
        self.db.recipes().list_recent(limit).await
    }

    async fn create_recipe(
        &self,
        owner: UserId,
        recipe: &NewRecipe,
    ) -> Result<Recipe, DatabaseError> {
        self.db.recipes().create_recipe(owner, recipe).await
    }

    async fn persist_ingredient_sets(
        &self,
        recipe_id: RecipeId,
        expected_version: Option<i64>,
        outcome: &ReconcileOutcome,
    ) -> Result<i64, DatabaseError> {
        let recipes = self.db.recipes();
        retry_transaction(
            || recipes.apply_reconciliation(recipe_id, expected_version, outcome),
            defaults::TRANSACTION_RETRIES,
        )
        .await
    }
}
