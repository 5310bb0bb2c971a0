// ABOUTME: Recipe record with ordered ingredients, instructions, and classification label
// ABOUTME: Carries a version counter used for optimistic concurrency on ingredient edits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ingredient::Ingredient;

/// Recipe identifier
pub type RecipeId = i64;
/// User identifier
pub type UserId = i64;

/// A complete recipe with ingredients and instructions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique recipe identifier
    pub id: RecipeId,
    /// Owning user
    pub user_id: UserId,
    /// Recipe name
    pub name: String,
    /// Recipe description
    #[serde(default)]
    pub description: String,
    /// Ingredient lines in display order
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Cooking instructions (ordered steps)
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Total time in minutes
    #[serde(default)]
    pub time: u32,
    /// Number of servings this recipe makes
    #[serde(default)]
    pub servings: u32,
    /// Category label such as "Vegan"
    #[serde(default)]
    pub classification: Option<String>,
    /// Image location
    #[serde(default)]
    pub image: Option<String>,
    /// Incremented on every ingredient persistence
    #[serde(default)]
    pub version: i64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Classification label, `None` when absent or empty
    #[must_use]
    pub fn classification_label(&self) -> Option<&str> {
        self.classification.as_deref().filter(|label| !label.is_empty())
    }

    /// Ingredient names in recipe order
    pub fn ingredient_names(&self) -> impl Iterator<Item = &str> {
        self.ingredients.iter().map(|i| i.name.as_str())
    }
}

/// Payload for creating a recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    /// Recipe name
    pub name: String,
    /// Recipe description
    #[serde(default)]
    pub description: String,
    /// Ingredient lines
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Ordered steps
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Total time in minutes
    #[serde(default)]
    pub time: u32,
    /// Servings
    #[serde(default)]
    pub servings: u32,
    /// Category label
    #[serde(default)]
    pub classification: Option<String>,
    /// Image location
    #[serde(default)]
    pub image: Option<String>,
}

impl NewRecipe {
    /// Create a recipe payload with a name and serving count
    #[must_use]
    pub fn new(name: impl Into<String>, servings: u32) -> Self {
        Self {
            name: name.into(),
            servings,
            ..Self::default()
        }
    }

    /// Set the classification label
    #[must_use]
    pub fn with_classification(mut self, classification: impl Into<String>) -> Self {
        self.classification = Some(classification.into());
        self
    }

    /// Add an ingredient
    #[must_use]
    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Add an instruction step
    #[must_use]
    pub fn with_instruction(mut self, step: impl Into<String>) -> Self {
        self.instructions.push(step.into());
        self
    }
}
