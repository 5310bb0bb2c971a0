// ABOUTME: Planning service: ingredient edits, shopping lists, recommendations, week plans
// ABOUTME: Loads collaborators, runs one engine computation, and writes back the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use std::collections::HashMap;
use std::sync::Arc;

use planner_core::models::{
    validate_ingredient_inputs, ConsolidatedIngredient, Ingredient, IngredientInput, Recipe,
    RecipeId, ShoppingList, UserId, Week, WeekPlan,
};
use planner_engine::{consolidate, recommend, reconcile, scale_ingredients};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::PlanningConfig;
use crate::database::repositories::{
    FavoriteRepository, FavoriteRepositoryImpl, RecipeRepository, RecipeRepositoryImpl,
    WeekPlanRepository, WeekPlanRepositoryImpl,
};
use crate::database::Database;
use crate::errors::{AppError, AppResult};

/// Result of an ingredient edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientUpdate {
    /// Recipe as persisted after the edit
    pub recipe: Recipe,
    /// Number of new ingredient lines
    pub inserted: usize,
    /// Number of kept lines (possibly modified)
    pub updated: usize,
    /// Number of removed lines
    pub deleted: usize,
    /// Number of submitted lines ignored as duplicate id claims
    #[serde(default)]
    pub discarded: usize,
}

/// Where a recommendation list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    /// Filtered against the user's favorites
    Favorites,
    /// Newest catalog recipes, the user has no favorites
    Fallback,
    /// Inputs could not be loaded
    Unavailable,
}

/// Recommendation response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    /// Recommended recipes
    pub recipes: Vec<Recipe>,
    /// Which path produced them
    pub source: RecommendationSource,
}

impl Recommendations {
    const fn unavailable() -> Self {
        Self {
            recipes: Vec::new(),
            source: RecommendationSource::Unavailable,
        }
    }
}

/// A single recipe's ingredients scaled to a serving count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledShoppingList {
    /// Scaled recipe
    pub recipe_id: RecipeId,
    /// Recipe name
    pub recipe_name: String,
    /// Servings the recipe is written for
    pub base_servings: u32,
    /// Requested servings
    pub servings: u32,
    /// Scaled ingredient lines
    pub items: Vec<ConsolidatedIngredient>,
}

/// Planning service
#[derive(Clone)]
pub struct PlanningService {
    recipes: Arc<dyn RecipeRepository>,
    week_plans: Arc<dyn WeekPlanRepository>,
    favorites: Arc<dyn FavoriteRepository>,
    config: PlanningConfig,
}

impl PlanningService {
    /// Create a service over explicit collaborators
    #[must_use]
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        week_plans: Arc<dyn WeekPlanRepository>,
        favorites: Arc<dyn FavoriteRepository>,
        config: PlanningConfig,
    ) -> Self {
        Self {
            recipes,
            week_plans,
            favorites,
            config,
        }
    }

    /// Create a service backed by `SQLite` repositories
    #[must_use]
    pub fn from_database(database: &Database, config: PlanningConfig) -> Self {
        Self::new(
            Arc::new(RecipeRepositoryImpl::new(database.clone())),
            Arc::new(WeekPlanRepositoryImpl::new(database.clone())),
            Arc::new(FavoriteRepositoryImpl::new(database.clone())),
            config,
        )
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &PlanningConfig {
        &self.config
    }

    // ========================================================================
    // Ingredient editing
    // ========================================================================

    /// Replace a recipe's ingredient list, keeping ids of matched lines
    ///
    /// Only the recipe's owner may edit it.
    ///
    /// # Errors
    ///
    /// Validation errors (400) leave the recipe untouched. A missing recipe is
    /// `ResourceNotFound`, another user's recipe is `PermissionDenied`, a stale
    /// `expected_version` is `ResourceConflict`.
    pub async fn update_recipe_ingredients(
        &self,
        editor: UserId,
        recipe_id: RecipeId,
        inputs: Vec<IngredientInput>,
        expected_version: Option<i64>,
    ) -> AppResult<IngredientUpdate> {
        let incoming = validate_ingredient_inputs(inputs)?;
        let existing = self
            .recipes
            .get_recipe(recipe_id)
            .await?
            .ok_or_else(|| recipe_not_found(recipe_id))?;
        if existing.user_id != editor {
            warn!(
                recipe_id,
                editor,
                owner = existing.user_id,
                "Ingredient edit by non-owner refused"
            );
            return Err(AppError::permission_denied(format!(
                "Recipe {recipe_id} belongs to another user"
            )));
        }

        let outcome = reconcile(&existing.ingredients, incoming);
        let noop = outcome.is_noop(&existing.ingredients);
        let version = self
            .recipes
            .persist_ingredient_sets(recipe_id, expected_version, &outcome)
            .await?;

        let recipe = self
            .recipes
            .get_recipe(recipe_id)
            .await?
            .ok_or_else(|| recipe_not_found(recipe_id))?;

        info!(
            recipe_id,
            version,
            inserted = outcome.inserted.len(),
            updated = outcome.updated.len(),
            deleted = outcome.deleted.len(),
            discarded = outcome.discarded.len(),
            noop,
            "Recipe ingredients updated"
        );

        Ok(IngredientUpdate {
            recipe,
            inserted: outcome.inserted.len(),
            updated: outcome.updated.len(),
            deleted: outcome.deleted.len(),
            discarded: outcome.discarded.len(),
        })
    }

    // ========================================================================
    // Shopping lists
    // ========================================================================

    /// Consolidated ingredients of every recipe scheduled in the user's week
    ///
    /// Plan references that no longer resolve, or whose lookup fails, are
    /// skipped and reported in `skipped_recipe_ids`.
    ///
    /// # Errors
    ///
    /// Returns an error when the plan cannot be loaded, or a
    /// `NonNumericQuantity` validation error under the reject policy.
    pub async fn generate_shopping_list(&self, user_id: UserId) -> AppResult<ShoppingList> {
        let Some(plan) = self.week_plans.load_week_plan(user_id).await? else {
            debug!(user_id, "No week plan stored, shopping list is empty");
            return Ok(ShoppingList::default());
        };

        let mut resolved: HashMap<RecipeId, Option<Vec<Ingredient>>> = HashMap::new();
        let mut lists: Vec<Vec<Ingredient>> = Vec::new();
        let mut skipped = Vec::new();

        for recipe_id in plan.week.recipe_ids() {
            if !resolved.contains_key(&recipe_id) {
                let lookup = self.resolve_ingredients(recipe_id).await;
                resolved.insert(recipe_id, lookup);
            }
            match resolved.get(&recipe_id) {
                Some(Some(ingredients)) => lists.push(ingredients.clone()),
                _ => skipped.push(recipe_id),
            }
        }

        let items = consolidate(&lists, self.config.quantity_policy)?;
        info!(
            user_id,
            recipes = lists.len(),
            skipped = skipped.len(),
            items = items.len(),
            "Shopping list generated"
        );

        Ok(ShoppingList {
            items,
            recipe_count: lists.len(),
            skipped_recipe_ids: skipped,
        })
    }

    async fn resolve_ingredients(&self, recipe_id: RecipeId) -> Option<Vec<Ingredient>> {
        match self.recipes.resolve_recipe_ingredients(recipe_id).await {
            Ok(Some(ingredients)) => Some(ingredients),
            Ok(None) => {
                warn!(recipe_id, "Planned recipe no longer exists, skipping");
                None
            }
            Err(e) => {
                warn!(recipe_id, error = %e, "Failed to resolve planned recipe, skipping");
                None
            }
        }
    }

    /// One recipe's ingredients scaled to `servings`
    ///
    /// Without `servings` the recipe's own serving count is used (at least 1).
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for a missing recipe and a validation error
    /// for `servings` of zero.
    pub async fn scaled_shopping_list(
        &self,
        recipe_id: RecipeId,
        servings: Option<u32>,
    ) -> AppResult<ScaledShoppingList> {
        let recipe = self
            .recipes
            .get_recipe(recipe_id)
            .await?
            .ok_or_else(|| recipe_not_found(recipe_id))?;
        let servings = servings.unwrap_or_else(|| recipe.servings.max(1));
        let items = scale_ingredients(&recipe, servings, self.config.quantity_policy)?;

        Ok(ScaledShoppingList {
            recipe_id,
            recipe_name: recipe.name,
            base_servings: recipe.servings,
            servings,
            items,
        })
    }

    // ========================================================================
    // Recommendations
    // ========================================================================

    /// Recipes related to the user's favorites
    ///
    /// Falls back to the newest catalog recipes when the user has no
    /// favorites. Load failures degrade to an empty `unavailable` list.
    pub async fn recommendations(&self, user_id: UserId) -> Recommendations {
        let favorites = match self.favorites.load_favorites(user_id).await {
            Ok(favorites) => favorites,
            Err(e) => {
                warn!(user_id, error = %e, "Failed to load favorites, no recommendations");
                return Recommendations::unavailable();
            }
        };

        if favorites.is_empty() {
            return match self.recipes.list_recent(self.config.fallback_limit).await {
                Ok(recipes) => {
                    debug!(user_id, count = recipes.len(), "No favorites, using newest recipes");
                    Recommendations {
                        recipes,
                        source: RecommendationSource::Fallback,
                    }
                }
                Err(e) => {
                    warn!(user_id, error = %e, "Failed to load fallback recipes");
                    Recommendations::unavailable()
                }
            };
        }

        let catalog = match self.recipes.list_catalog().await {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(user_id, error = %e, "Failed to load recipe catalog, no recommendations");
                return Recommendations::unavailable();
            }
        };

        let recipes: Vec<Recipe> = recommend(&catalog, &favorites)
            .into_iter()
            .cloned()
            .collect();
        debug!(
            user_id,
            favorites = favorites.len(),
            recommended = recipes.len(),
            "Recommendations computed"
        );
        Recommendations {
            recipes,
            source: RecommendationSource::Favorites,
        }
    }

    // ========================================================================
    // Week plans
    // ========================================================================

    /// Stored week plan, `None` before the first save
    ///
    /// # Errors
    ///
    /// Returns an error if the plan cannot be loaded
    pub async fn load_week_plan(&self, user_id: UserId) -> AppResult<Option<WeekPlan>> {
        Ok(self.week_plans.load_week_plan(user_id).await?)
    }

    /// Replace the user's week plan
    ///
    /// # Errors
    ///
    /// Returns `ResourceConflict` for a stale `expected_version`
    pub async fn save_week_plan(
        &self,
        user_id: UserId,
        week: &Week,
        expected_version: Option<i64>,
    ) -> AppResult<WeekPlan> {
        let plan = self
            .week_plans
            .save_week_plan(user_id, week, expected_version)
            .await?;
        info!(
            user_id,
            version = plan.version,
            scheduled = week.recipe_ids().len(),
            "Week plan saved"
        );
        Ok(plan)
    }
}

fn recipe_not_found(recipe_id: RecipeId) -> AppError {
    AppError::not_found(format!("Recipe {recipe_id}")).with_resource_id(recipe_id.to_string())
}
