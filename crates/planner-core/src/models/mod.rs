// ABOUTME: Domain models for recipes, ingredients, weekly plans and shopping lists
// ABOUTME: Canonical record types every boundary converts into and out of
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

/// Ingredient records, quantities, and loose incoming ingredient payloads
pub mod ingredient;
/// Recipes and recipe creation payloads
pub mod recipe;
/// Consolidated shopping list entries
pub mod shopping;
/// Per-user weekly meal plan document
pub mod week_plan;

pub use ingredient::{
    validate_ingredient_inputs, Ingredient, IngredientId, IngredientInput, Quantity,
};
pub use recipe::{NewRecipe, Recipe, RecipeId, UserId};
pub use shopping::{ConsolidatedIngredient, ShoppingList};
pub use week_plan::{Day, DayPlan, MealSlot, Week, WeekPlan, WeekSlot};
