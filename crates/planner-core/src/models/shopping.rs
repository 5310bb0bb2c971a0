// ABOUTME: Derived shopping list records produced by ingredient consolidation
// ABOUTME: Never persisted; recomputed on every request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use serde::{Deserialize, Serialize};

use super::recipe::RecipeId;

#[allow(clippy::trivially_copy_pass_by_ref)] // serde skip_serializing_if passes a reference
const fn is_false(value: &bool) -> bool {
    !*value
}

/// One line of a shopping list, one per distinct ingredient name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsolidatedIngredient {
    /// Ingredient name (exact match grouping key)
    pub name: String,
    /// Summed quantity
    pub quantity: f64,
    /// Unit of the first occurrence of this name
    pub unit: String,
    /// A later occurrence used a different unit but was summed anyway
    #[serde(default, skip_serializing_if = "is_false")]
    pub unit_mismatch: bool,
    /// At least one non-numeric quantity was counted as zero
    #[serde(default, skip_serializing_if = "is_false")]
    pub coerced: bool,
}

/// Consolidated ingredients for a week plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    /// Consolidated lines in first-appearance order
    pub items: Vec<ConsolidatedIngredient>,
    /// Number of resolved recipe references, duplicates included
    pub recipe_count: usize,
    /// Plan references that no longer resolve, in plan order
    pub skipped_recipe_ids: Vec<RecipeId>,
}
