// ABOUTME: Integration tests for the planning service over SQLite and over failing fakes
// ABOUTME: Covers ingredient edits, shopping lists, scaling and recommendation sources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use common::{create_test_database, create_test_user, recipe_with, seed_recipe};
use planner_core::errors::ErrorCode;
use planner_core::models::{
    Day, Ingredient, IngredientInput, MealSlot, NewRecipe, Quantity, Recipe, RecipeId, UserId,
    Week, WeekPlan, WeekSlot,
};
use planner_engine::{QuantityPolicy, ReconcileOutcome};
use recipe_planner::config::PlanningConfig;
use recipe_planner::database::repositories::{
    FavoriteRepository, RecipeRepository, WeekPlanRepository,
};
use recipe_planner::database::{Database, DatabaseError};
use recipe_planner::services::{PlanningService, RecommendationSource};

fn service(db: &Database) -> PlanningService {
    PlanningService::from_database(db, PlanningConfig::default())
}

fn input(id: Option<i64>, name: &str, quantity: f64, unit: &str) -> IngredientInput {
    IngredientInput {
        id,
        name: Some(name.to_owned()),
        quantity: Some(Quantity::Number(quantity)),
        unit: Some(unit.to_owned()),
    }
}

// ============================================================================
// Ingredient editing
// ============================================================================

#[tokio::test]
async fn test_update_recipe_ingredients_reports_counts() {
    let db = create_test_database().await.unwrap();
    let owner = create_test_user(&db, "cook@example.com").await.unwrap();
    let recipe = seed_recipe(
        &db,
        owner,
        recipe_with("Bread", 1, &[("Flour", 500.0, "g"), ("Salt", 10.0, "g")]),
    )
    .await
    .unwrap();
    let flour_id = recipe.ingredients[0].id;

    let update = service(&db)
        .update_recipe_ingredients(
            owner,
            recipe.id,
            vec![
                input(flour_id, "Flour", 450.0, "g"),
                input(None, "Yeast", 7.0, "g"),
                input(None, "Water", 300.0, "ml"),
            ],
            Some(1),
        )
        .await
        .unwrap();

    assert_eq!(update.updated, 1);
    assert_eq!(update.inserted, 2);
    assert_eq!(update.deleted, 1);
    assert_eq!(update.discarded, 0);
    assert_eq!(update.recipe.version, 2);
    let names: Vec<&str> = update.recipe.ingredient_names().collect();
    assert_eq!(names, vec!["Flour", "Yeast", "Water"]);
    assert_eq!(update.recipe.ingredients[0].id, flour_id);
}

#[tokio::test]
async fn test_invalid_input_leaves_recipe_untouched() {
    let db = create_test_database().await.unwrap();
    let owner = create_test_user(&db, "cook@example.com").await.unwrap();
    let recipe = seed_recipe(&db, owner, recipe_with("Tea", 1, &[("Tea", 1.0, "bag")]))
        .await
        .unwrap();

    let blank_name = IngredientInput {
        name: Some("   ".to_owned()),
        unit: Some("g".to_owned()),
        ..IngredientInput::default()
    };
    let err = service(&db)
        .update_recipe_ingredients(
            owner,
            recipe.id,
            vec![input(None, "Milk", 50.0, "ml"), blank_name],
            None,
        )
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), 400);

    let stored = db.recipes().get_recipe(recipe.id).await.unwrap().unwrap();
    assert_eq!(stored.version, 1);
    assert_eq!(stored.ingredients.len(), 1);
}

#[tokio::test]
async fn test_update_missing_recipe_is_not_found() {
    let db = create_test_database().await.unwrap();
    let err = service(&db)
        .update_recipe_ingredients(1, 77, vec![input(None, "Rice", 1.0, "cup")], None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_stale_expected_version_is_conflict() {
    let db = create_test_database().await.unwrap();
    let owner = create_test_user(&db, "cook@example.com").await.unwrap();
    let recipe = seed_recipe(&db, owner, recipe_with("Tea", 1, &[("Tea", 1.0, "bag")]))
        .await
        .unwrap();
    let planning = service(&db);

    planning
        .update_recipe_ingredients(owner, recipe.id, vec![input(None, "Honey", 1.0, "tsp")], Some(1))
        .await
        .unwrap();
    let err = planning
        .update_recipe_ingredients(owner, recipe.id, vec![input(None, "Lemon", 1.0, "slice")], Some(1))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceConflict);
}

#[tokio::test]
async fn test_only_owner_may_edit_ingredients() {
    let db = create_test_database().await.unwrap();
    let owner = create_test_user(&db, "cook@example.com").await.unwrap();
    let guest = create_test_user(&db, "guest@example.com").await.unwrap();
    let recipe = seed_recipe(&db, owner, recipe_with("Tea", 1, &[("Tea", 1.0, "bag")]))
        .await
        .unwrap();

    let err = service(&db)
        .update_recipe_ingredients(guest, recipe.id, Vec::new(), None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);
    assert_eq!(err.http_status(), 403);

    let stored = db.recipes().get_recipe(recipe.id).await.unwrap().unwrap();
    assert_eq!(stored.version, 1);
    assert_eq!(stored.ingredients.len(), 1);
}

// ============================================================================
// Shopping lists
// ============================================================================

#[tokio::test]
async fn test_shopping_list_without_plan_is_empty() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "planner@example.com").await.unwrap();

    let list = service(&db).generate_shopping_list(user).await.unwrap();
    assert!(list.items.is_empty());
    assert_eq!(list.recipe_count, 0);
    assert!(list.skipped_recipe_ids.is_empty());
}

#[tokio::test]
async fn test_shopping_list_sums_and_skips_missing_recipes() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "planner@example.com").await.unwrap();
    let pancakes = seed_recipe(
        &db,
        user,
        recipe_with("Pancakes", 2, &[("Flour", 200.0, "g"), ("Egg", 2.0, "")]),
    )
    .await
    .unwrap();
    let bread = seed_recipe(&db, user, recipe_with("Bread", 1, &[("Flour", 100.0, "g")]))
        .await
        .unwrap();

    let mut week = Week::default();
    week.schedule(Day::Monday, MealSlot::Breakfast, WeekSlot::new(pancakes.id));
    week.schedule(Day::Monday, MealSlot::Lunch, WeekSlot::new(9_999));
    week.schedule(Day::Tuesday, MealSlot::Dinner, WeekSlot::new(bread.id));
    let planning = service(&db);
    planning.save_week_plan(user, &week, None).await.unwrap();

    let list = planning.generate_shopping_list(user).await.unwrap();
    assert_eq!(list.recipe_count, 2);
    assert_eq!(list.skipped_recipe_ids, vec![9_999]);
    assert_eq!(list.items.len(), 2);
    assert_eq!(list.items[0].name, "Flour");
    assert!((list.items[0].quantity - 300.0).abs() < f64::EPSILON);
    assert_eq!(list.items[0].unit, "g");
    assert_eq!(list.items[1].name, "Egg");
}

#[tokio::test]
async fn test_scaled_shopping_list_defaults_to_recipe_servings() {
    let db = create_test_database().await.unwrap();
    let owner = create_test_user(&db, "cook@example.com").await.unwrap();
    let recipe = seed_recipe(&db, owner, recipe_with("Risotto", 4, &[("Rice", 400.0, "g")]))
        .await
        .unwrap();
    let planning = service(&db);

    let unscaled = planning.scaled_shopping_list(recipe.id, None).await.unwrap();
    assert_eq!(unscaled.servings, 4);
    assert!((unscaled.items[0].quantity - 400.0).abs() < f64::EPSILON);

    let scaled = planning.scaled_shopping_list(recipe.id, Some(2)).await.unwrap();
    assert_eq!(scaled.base_servings, 4);
    assert!((scaled.items[0].quantity - 200.0).abs() < f64::EPSILON);

    let err = planning.scaled_shopping_list(recipe.id, Some(0)).await.unwrap_err();
    assert_eq!(err.http_status(), 400);
}

#[tokio::test]
async fn test_reject_policy_fails_on_text_quantity() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "planner@example.com").await.unwrap();
    let recipe = seed_recipe(
        &db,
        user,
        NewRecipe::new("Stew", 2).with_ingredient(Ingredient::new("Salt", "a pinch", "")),
    )
    .await
    .unwrap();
    let mut week = Week::default();
    week.schedule(Day::Sunday, MealSlot::Dinner, WeekSlot::new(recipe.id));

    let lenient = service(&db);
    lenient.save_week_plan(user, &week, None).await.unwrap();
    let list = lenient.generate_shopping_list(user).await.unwrap();
    assert!(list.items[0].coerced);

    let strict = PlanningService::from_database(
        &db,
        PlanningConfig {
            quantity_policy: QuantityPolicy::Reject,
            ..PlanningConfig::default()
        },
    );
    let err = strict.generate_shopping_list(user).await.unwrap_err();
    assert_eq!(err.http_status(), 400);
}

// ============================================================================
// Recommendations
// ============================================================================

#[tokio::test]
async fn test_recommendations_from_favorites() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "vegan@example.com").await.unwrap();
    let favorite = seed_recipe(
        &db,
        user,
        NewRecipe::new("Tofu Bowl", 1)
            .with_classification("Vegan")
            .with_ingredient(Ingredient::new("Tofu", 200.0, "g")),
    )
    .await
    .unwrap();
    let related = seed_recipe(
        &db,
        user,
        NewRecipe::new("Tofu Stir Fry", 2).with_ingredient(Ingredient::new("Tofu", 300.0, "g")),
    )
    .await
    .unwrap();
    seed_recipe(
        &db,
        user,
        NewRecipe::new("Steak", 1)
            .with_classification("Meat")
            .with_ingredient(Ingredient::new("Beef", 250.0, "g")),
    )
    .await
    .unwrap();
    db.favorites().add_favorite(user, favorite.id).await.unwrap();

    let recommendations = service(&db).recommendations(user).await;
    assert_eq!(recommendations.source, RecommendationSource::Favorites);
    let ids: Vec<RecipeId> = recommendations.recipes.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![related.id]);
}

#[tokio::test]
async fn test_recommendations_fall_back_to_newest() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "new@example.com").await.unwrap();
    let older = seed_recipe(&db, user, NewRecipe::new("Older", 1)).await.unwrap();
    let newer = seed_recipe(&db, user, NewRecipe::new("Newer", 1)).await.unwrap();

    let recommendations = service(&db).recommendations(user).await;
    assert_eq!(recommendations.source, RecommendationSource::Fallback);
    let ids: Vec<RecipeId> = recommendations.recipes.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
}

// ============================================================================
// Failing collaborators
// ============================================================================

struct UnavailableStore;

fn unavailable() -> DatabaseError {
    DatabaseError::QueryError {
        context: "store offline".to_owned(),
    }
}

#[async_trait]
impl RecipeRepository for UnavailableStore {
    async fn get_recipe(&self, _id: RecipeId) -> Result<Option<Recipe>, DatabaseError> {
        Err(unavailable())
    }

    async fn resolve_recipe_ingredients(
        &self,
        _id: RecipeId,
    ) -> Result<Option<Vec<Ingredient>>, DatabaseError> {
        Err(unavailable())
    }

    async fn list_catalog(&self) -> Result<Vec<Recipe>, DatabaseError> {
        Err(unavailable())
    }

    async fn list_recent(&self, _limit: usize) -> Result<Vec<Recipe>, DatabaseError> {
        Err(unavailable())
    }

    async fn create_recipe(
        &self,
        _owner: UserId,
        _recipe: &NewRecipe,
    ) -> Result<Recipe, DatabaseError> {
        Err(unavailable())
    }

    async fn persist_ingredient_sets(
        &self,
        _recipe_id: RecipeId,
        _expected_version: Option<i64>,
        _outcome: &ReconcileOutcome,
    ) -> Result<i64, DatabaseError> {
        Err(unavailable())
    }
}

#[async_trait]
impl FavoriteRepository for UnavailableStore {
    async fn load_favorites(&self, _user_id: UserId) -> Result<Vec<Recipe>, DatabaseError> {
        Err(unavailable())
    }

    async fn add_favorite(
        &self,
        _user_id: UserId,
        _recipe_id: RecipeId,
    ) -> Result<bool, DatabaseError> {
        Err(unavailable())
    }
}

struct FixedPlan(Week);

#[async_trait]
impl WeekPlanRepository for FixedPlan {
    async fn load_week_plan(&self, user_id: UserId) -> Result<Option<WeekPlan>, DatabaseError> {
        Ok(Some(WeekPlan {
            user_id,
            week: self.0.clone(),
            version: 1,
            updated_at: chrono::Utc::now(),
        }))
    }

    async fn save_week_plan(
        &self,
        _user_id: UserId,
        _week: &Week,
        _expected_version: Option<i64>,
    ) -> Result<WeekPlan, DatabaseError> {
        Err(unavailable())
    }
}

fn offline_service(week: Week) -> PlanningService {
    PlanningService::new(
        Arc::new(UnavailableStore),
        Arc::new(FixedPlan(week)),
        Arc::new(UnavailableStore),
        PlanningConfig::default(),
    )
}

#[tokio::test]
async fn test_recommendations_degrade_when_store_fails() {
    let recommendations = offline_service(Week::default()).recommendations(1).await;
    assert_eq!(recommendations.source, RecommendationSource::Unavailable);
    assert!(recommendations.recipes.is_empty());
}

#[tokio::test]
async fn test_failing_lookups_are_skipped_in_shopping_list() {
    let mut week = Week::default();
    week.schedule(Day::Monday, MealSlot::Dinner, WeekSlot::new(4));
    week.schedule(Day::Tuesday, MealSlot::Dinner, WeekSlot::new(4));

    let list = offline_service(week).generate_shopping_list(1).await.unwrap();
    assert!(list.items.is_empty());
    assert_eq!(list.recipe_count, 0);
    assert_eq!(list.skipped_recipe_ids, vec![4, 4]);
}
