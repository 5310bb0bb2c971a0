// ABOUTME: Route handlers for recipe ingredient editing and per-recipe shopping lists
// ABOUTME: PUT replaces an ingredient list by reconciliation, GET scales a recipe to N servings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

//! Recipe routes
//!
//! Ingredient edits keep the ids of lines the client sent back, delete the
//! lines it dropped and insert the new ones, all in one transaction.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use planner_core::models::{IngredientInput, RecipeId};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::middleware::authenticate;
use crate::resources::ServerResources;

// ============================================================================
// Request Types
// ============================================================================

/// Body of `PUT /api/recipes/:id/ingredients`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIngredientsRequest {
    /// Complete desired ingredient list
    pub ingredients: Vec<IngredientInput>,
    /// Recipe version the client edited, enables the conflict check
    #[serde(default)]
    pub expected_version: Option<i64>,
}

/// Query of `GET /api/recipes/:id/shopping-list`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShoppingListQuery {
    /// Target serving count
    pub servings: Option<u32>,
}

// ============================================================================
// Routes
// ============================================================================

/// Recipe routes implementation
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/recipes/:id/ingredients",
                put(Self::handle_update_ingredients),
            )
            .route(
                "/api/recipes/:id/shopping-list",
                get(Self::handle_shopping_list),
            )
            .with_state(resources)
    }

    /// Handle PUT /api/recipes/:id/ingredients
    async fn handle_update_ingredients(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        path: Result<Path<RecipeId>, PathRejection>,
        body: Result<Json<UpdateIngredientsRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let Path(recipe_id) = path.map_err(|e| AppError::invalid_input(e.body_text()))?;
        let Json(body) = body.map_err(|e| AppError::invalid_input(e.body_text()))?;

        let update = resources
            .planning
            .update_recipe_ingredients(
                auth.user_id,
                recipe_id,
                body.ingredients,
                body.expected_version,
            )
            .await?;

        Ok((StatusCode::OK, Json(update)).into_response())
    }

    /// Handle GET /api/recipes/:id/shopping-list
    async fn handle_shopping_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        path: Result<Path<RecipeId>, PathRejection>,
        query: Result<Query<ShoppingListQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources).await?;
        let Path(recipe_id) = path.map_err(|e| AppError::invalid_input(e.body_text()))?;
        let Query(query) = query.map_err(|e| AppError::invalid_input(e.body_text()))?;

        let list = resources
            .planning
            .scaled_shopping_list(recipe_id, query.servings)
            .await?;

        Ok((StatusCode::OK, Json(list)).into_response())
    }
}
