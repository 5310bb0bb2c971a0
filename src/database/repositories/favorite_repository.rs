// ABOUTME: Favorite repository implementation over SQLite
// ABOUTME: Loads favorite recipes with ingredients for the recommendation filter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use async_trait::async_trait;
use planner_core::models::{Recipe, RecipeId, UserId};

use super::FavoriteRepository;
use crate::database::{Database, DatabaseError};

/// `SQLite` implementation of `FavoriteRepository`
#[derive(Clone, Debug)]
pub struct FavoriteRepositoryImpl {
    db: Database,
}

impl FavoriteRepositoryImpl {
    /// Create a new `FavoriteRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FavoriteRepository for FavoriteRepositoryImpl {
    async fn load_favorites(&self, user_id: UserId) -> Result<Vec<Recipe>, DatabaseError> {
        self.db.recipes().list_favorites(user_id).await
    }

    async fn add_favorite(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<bool, DatabaseError> {
        self.db.favorites().add_favorite(user_id, recipe_id).await
    }
}
