// ABOUTME: Repository traits the planning service depends on
// ABOUTME: SQLite implementations delegate to the managers; tests may substitute fakes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

//! # Repository Pattern
//!
//! Each trait covers one collaborator of the planning engine: recipe lookup
//! and ingredient write-back, the week plan document, and the favorites
//! relation. Every method returns [`DatabaseError`] so callers can tell a
//! missing entity or a version conflict from an infrastructure failure.

/// Favorite repository implementation
pub mod favorite_repository;
/// Recipe repository implementation
pub mod recipe_repository;
/// Week plan repository implementation
pub mod week_plan_repository;

use async_trait::async_trait;
use planner_core::models::{Ingredient, NewRecipe, Recipe, RecipeId, UserId, Week, WeekPlan};
use planner_engine::ReconcileOutcome;

pub use favorite_repository::FavoriteRepositoryImpl;
pub use recipe_repository::RecipeRepositoryImpl;
pub use week_plan_repository::WeekPlanRepositoryImpl;

use super::DatabaseError;

/// Recipe lookup and ingredient persistence
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Recipe with ingredients, `None` when it does not exist
    async fn get_recipe(&self, id: RecipeId) -> Result<Option<Recipe>, DatabaseError>;

    /// Ingredient list of a recipe, `None` when the recipe does not exist
    async fn resolve_recipe_ingredients(
        &self,
        id: RecipeId,
    ) -> Result<Option<Vec<Ingredient>>, DatabaseError>;

    /// Whole catalog in stable order
    async fn list_catalog(&self) -> Result<Vec<Recipe>, DatabaseError>;

    /// Newest recipes first
    async fn list_recent(&self, limit: usize) -> Result<Vec<Recipe>, DatabaseError>;

    /// Create a recipe owned by `owner`
    async fn create_recipe(&self, owner: UserId, recipe: &NewRecipe)
        -> Result<Recipe, DatabaseError>;

    /// Atomically apply a reconciliation outcome, returning the new version
    async fn persist_ingredient_sets(
        &self,
        recipe_id: RecipeId,
        expected_version: Option<i64>,
        outcome: &ReconcileOutcome,
    ) -> Result<i64, DatabaseError>;
}

/// Whole-document access to the week plan
#[async_trait]
pub trait WeekPlanRepository: Send + Sync {
    /// Stored plan, `None` before the first save
    async fn load_week_plan(&self, user_id: UserId) -> Result<Option<WeekPlan>, DatabaseError>;

    /// Replace the stored plan
    async fn save_week_plan(
        &self,
        user_id: UserId,
        week: &Week,
        expected_version: Option<i64>,
    ) -> Result<WeekPlan, DatabaseError>;
}

/// Favorites relation
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Favorite recipes of a user with their ingredients
    async fn load_favorites(&self, user_id: UserId) -> Result<Vec<Recipe>, DatabaseError>;

    /// Mark a favorite, false when it already was one
    async fn add_favorite(&self, user_id: UserId, recipe_id: RecipeId)
        -> Result<bool, DatabaseError>;
}
