// ABOUTME: Content-based recommendation filter over the recipe catalog
// ABOUTME: Matches candidates sharing a classification or ingredient name with the user's favorites
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use std::collections::HashSet;

use planner_core::models::{Recipe, RecipeId};
use tracing::debug;

/// Similarity signals extracted from a user's favorite recipes
#[derive(Debug, Clone, Default)]
pub struct FavoriteProfile<'a> {
    ids: HashSet<RecipeId>,
    classifications: HashSet<&'a str>,
    ingredient_names: HashSet<&'a str>,
}

impl<'a> FavoriteProfile<'a> {
    /// Collect ids, non-empty classifications and ingredient names
    #[must_use]
    pub fn from_favorites(favorites: &'a [Recipe]) -> Self {
        let mut profile = Self::default();
        for favorite in favorites {
            profile.ids.insert(favorite.id);
            if let Some(label) = favorite.classification_label() {
                profile.classifications.insert(label);
            }
            profile.ingredient_names.extend(favorite.ingredient_names());
        }
        profile
    }

    /// True when there were no favorites at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// True when `id` is one of the favorites
    #[must_use]
    pub fn is_favorite(&self, id: RecipeId) -> bool {
        self.ids.contains(&id)
    }

    /// True when `candidate` is not a favorite and shares a signal with one
    #[must_use]
    pub fn matches(&self, candidate: &Recipe) -> bool {
        if self.is_favorite(candidate.id) {
            return false;
        }
        let shares_classification = candidate
            .classification_label()
            .is_some_and(|label| self.classifications.contains(label));
        shares_classification
            || candidate
                .ingredient_names()
                .any(|name| self.ingredient_names.contains(name))
    }
}

/// Catalog recipes related to `favorites`, in catalog order
///
/// Returns nothing when `favorites` is empty; picking a fallback is up to the
/// caller.
#[must_use]
pub fn recommend<'c>(catalog: &'c [Recipe], favorites: &[Recipe]) -> Vec<&'c Recipe> {
    let profile = FavoriteProfile::from_favorites(favorites);
    if profile.is_empty() {
        return Vec::new();
    }

    let picked: Vec<&Recipe> = catalog
        .iter()
        .filter(|candidate| profile.matches(candidate))
        .collect();

    debug!(
        catalog = catalog.len(),
        favorites = favorites.len(),
        recommended = picked.len(),
        "Filtered catalog against favorites"
    );
    picked
}
