// ABOUTME: Integration tests for SQLite persistence of recipes, week plans and favorites
// ABOUTME: Covers reconciliation write-back, version conflicts, cascades and plan upserts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{create_test_database, create_test_user, recipe_with, seed_recipe};
use planner_core::models::{Day, Ingredient, MealSlot, NewRecipe, Week, WeekSlot};
use planner_engine::reconcile;
use recipe_planner::database::DatabaseError;

#[tokio::test]
async fn test_create_recipe_keeps_ingredient_order() {
    let db = create_test_database().await.unwrap();
    let owner = create_test_user(&db, "cook@example.com").await.unwrap();

    let recipe = seed_recipe(
        &db,
        owner,
        recipe_with("Pancakes", 4, &[("Flour", 200.0, "g"), ("Milk", 300.0, "ml"), ("Egg", 2.0, "")]),
    )
    .await
    .unwrap();

    assert_eq!(recipe.version, 1);
    assert_eq!(recipe.servings, 4);
    let names: Vec<&str> = recipe.ingredient_names().collect();
    assert_eq!(names, vec!["Flour", "Milk", "Egg"]);
    assert!(recipe.ingredients.iter().all(|i| i.id.is_some()));
    assert_eq!(recipe.ingredients[0].quantity.as_number(), Some(200.0));
}

#[tokio::test]
async fn test_apply_reconciliation_updates_inserts_and_deletes() {
    let db = create_test_database().await.unwrap();
    let owner = create_test_user(&db, "cook@example.com").await.unwrap();
    let recipe = seed_recipe(
        &db,
        owner,
        recipe_with("Cake", 8, &[("Flour", 200.0, "g"), ("Sugar", 50.0, "g")]),
    )
    .await
    .unwrap();

    let flour_id = recipe.ingredients[0].id.unwrap();
    let sugar_id = recipe.ingredients[1].id.unwrap();
    let incoming = vec![
        Ingredient::new("Flour", 250.0, "g").with_id(flour_id),
        Ingredient::new("Egg", 3.0, ""),
    ];
    let outcome = reconcile(&recipe.ingredients, incoming);

    let version = db
        .recipes()
        .apply_reconciliation(recipe.id, Some(recipe.version), &outcome)
        .await
        .unwrap();
    assert_eq!(version, 2);

    let stored = db.recipes().get_recipe(recipe.id).await.unwrap().unwrap();
    assert_eq!(stored.version, 2);
    assert_eq!(stored.ingredients.len(), 2);
    assert_eq!(stored.ingredients[0].id, Some(flour_id));
    assert_eq!(stored.ingredients[0].quantity.as_number(), Some(250.0));
    assert_eq!(stored.ingredients[1].name, "Egg");
    assert!(stored.ingredients[1].id.is_some());
    assert!(stored.ingredients.iter().all(|i| i.id != Some(sugar_id)));
}

#[tokio::test]
async fn test_stale_version_is_rejected_without_writes() {
    let db = create_test_database().await.unwrap();
    let owner = create_test_user(&db, "cook@example.com").await.unwrap();
    let recipe = seed_recipe(&db, owner, recipe_with("Soup", 2, &[("Leek", 1.0, "")]))
        .await
        .unwrap();

    let outcome = reconcile(&recipe.ingredients, Vec::new());
    let err = db
        .recipes()
        .apply_reconciliation(recipe.id, Some(7), &outcome)
        .await
        .unwrap_err();

    match err {
        DatabaseError::VersionConflict {
            expected, actual, ..
        } => {
            assert_eq!(expected, 7);
            assert_eq!(actual, 1);
        }
        other => panic!("expected version conflict, got {other:?}"),
    }

    let stored = db.recipes().get_recipe(recipe.id).await.unwrap().unwrap();
    assert_eq!(stored.version, 1);
    assert_eq!(stored.ingredients.len(), 1);
}

#[tokio::test]
async fn test_reconciliation_of_missing_recipe_is_not_found() {
    let db = create_test_database().await.unwrap();
    let outcome = reconcile(&[], vec![Ingredient::new("Salt", 1.0, "pinch")]);

    let err = db
        .recipes()
        .apply_reconciliation(999, None, &outcome)
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound { .. }));
}

#[tokio::test]
async fn test_deleting_recipe_cascades_to_ingredients_and_favorites() {
    let db = create_test_database().await.unwrap();
    let owner = create_test_user(&db, "cook@example.com").await.unwrap();
    let recipe = seed_recipe(&db, owner, recipe_with("Salad", 1, &[("Lettuce", 1.0, "head")]))
        .await
        .unwrap();
    assert!(db.favorites().add_favorite(owner, recipe.id).await.unwrap());

    assert!(db.recipes().delete_recipe(recipe.id).await.unwrap());

    assert!(db.recipes().get_ingredients(recipe.id).await.unwrap().is_none());
    assert!(db.favorites().favorite_ids(owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_recent_returns_newest_first() {
    let db = create_test_database().await.unwrap();
    let owner = create_test_user(&db, "cook@example.com").await.unwrap();
    let first = seed_recipe(&db, owner, NewRecipe::new("First", 1)).await.unwrap();
    let second = seed_recipe(&db, owner, NewRecipe::new("Second", 1)).await.unwrap();
    let third = seed_recipe(&db, owner, NewRecipe::new("Third", 1)).await.unwrap();

    let recent = db.recipes().list_recent(2).await.unwrap();
    let ids: Vec<i64> = recent.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![third.id, second.id]);

    let catalog = db.recipes().list_catalog().await.unwrap();
    let ids: Vec<i64> = catalog.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);
}

#[tokio::test]
async fn test_favorites_are_idempotent_and_require_recipe() {
    let db = create_test_database().await.unwrap();
    let owner = create_test_user(&db, "cook@example.com").await.unwrap();
    let recipe = seed_recipe(&db, owner, NewRecipe::new("Curry", 2).with_classification("Vegan"))
        .await
        .unwrap();

    assert!(db.favorites().add_favorite(owner, recipe.id).await.unwrap());
    assert!(!db.favorites().add_favorite(owner, recipe.id).await.unwrap());

    let favorites = db.recipes().list_favorites(owner).await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].classification.as_deref(), Some("Vegan"));

    let err = db.favorites().add_favorite(owner, 4242).await.unwrap_err();
    assert!(matches!(err, DatabaseError::NotFound { .. }));

    assert!(db.favorites().remove_favorite(owner, recipe.id).await.unwrap());
    assert!(!db.favorites().remove_favorite(owner, recipe.id).await.unwrap());
}

#[tokio::test]
async fn test_week_plan_upsert_bumps_version() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "planner@example.com").await.unwrap();
    assert!(db.week_plans().load(user).await.unwrap().is_none());

    let mut week = Week::default();
    week.schedule(Day::Monday, MealSlot::Dinner, WeekSlot::new(3).at("19:00"));
    let saved = db.week_plans().save(user, &week, None).await.unwrap();
    assert_eq!(saved.version, 1);

    week.schedule(Day::Friday, MealSlot::Lunch, WeekSlot::new(5));
    let saved = db.week_plans().save(user, &week, Some(1)).await.unwrap();
    assert_eq!(saved.version, 2);

    let loaded = db.week_plans().load(user).await.unwrap().unwrap();
    assert_eq!(loaded.version, 2);
    assert_eq!(loaded.week, week);
    assert_eq!(loaded.week.recipe_ids(), vec![3, 5]);
}

#[tokio::test]
async fn test_week_plan_stale_version_conflicts() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "planner@example.com").await.unwrap();

    let err = db
        .week_plans()
        .save(user, &Week::default(), Some(3))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DatabaseError::VersionConflict { actual: 0, .. }
    ));

    db.week_plans().save(user, &Week::default(), Some(0)).await.unwrap();
    assert_eq!(db.week_plans().load(user).await.unwrap().unwrap().version, 1);
}

#[tokio::test]
async fn test_file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = recipe_planner::config::DatabaseUrl::SQLite {
        path: dir.path().join("planner.db"),
    };

    let recipe_id = {
        let db = recipe_planner::database::Database::new(&url).await.unwrap();
        let owner = create_test_user(&db, "cook@example.com").await.unwrap();
        let recipe = seed_recipe(&db, owner, recipe_with("Jam", 6, &[("Berries", 1.0, "kg")]))
            .await
            .unwrap();
        db.pool().close().await;
        recipe.id
    };

    let reopened = recipe_planner::database::Database::new(&url).await.unwrap();
    let recipe = reopened.recipes().get_recipe(recipe_id).await.unwrap().unwrap();
    assert_eq!(recipe.name, "Jam");
    assert_eq!(recipe.ingredients[0].name, "Berries");
}

#[tokio::test]
async fn test_user_exists_only_after_registration() {
    let db = create_test_database().await.unwrap();
    assert!(!db.users().exists(1).await.unwrap());

    let user = create_test_user(&db, "cook@example.com").await.unwrap();
    assert!(db.users().exists(user).await.unwrap());
    assert!(!db.users().exists(user + 1).await.unwrap());
}
