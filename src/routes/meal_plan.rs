// ABOUTME: Route handlers for the weekly meal plan and its consolidated shopping list
// ABOUTME: The plan is read and replaced as one document per user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use planner_core::models::Week;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::middleware::authenticate;
use crate::resources::ServerResources;

/// Body of `POST /api/mealplan`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveWeekPlanRequest {
    /// Replacement week
    pub week: Week,
    /// Plan version the client edited, enables the conflict check
    #[serde(default)]
    pub expected_version: Option<i64>,
}

/// Meal plan routes implementation
pub struct MealPlanRoutes;

impl MealPlanRoutes {
    /// Create all meal plan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/mealplan",
                get(Self::handle_get_plan).post(Self::handle_save_plan),
            )
            .route(
                "/api/mealplan/shopping-list",
                get(Self::handle_shopping_list),
            )
            .with_state(resources)
    }

    /// Handle GET /api/mealplan - stored plan or `null`
    async fn handle_get_plan(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let plan = resources.planning.load_week_plan(auth.user_id).await?;
        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    /// Handle POST /api/mealplan - replace the whole plan
    async fn handle_save_plan(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<SaveWeekPlanRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let Json(body) = body.map_err(|e| AppError::invalid_input(e.body_text()))?;

        let plan = resources
            .planning
            .save_week_plan(auth.user_id, &body.week, body.expected_version)
            .await?;
        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    /// Handle GET /api/mealplan/shopping-list
    async fn handle_shopping_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let list = resources.planning.generate_shopping_list(auth.user_id).await?;
        Ok((StatusCode::OK, Json(list)).into_response())
    }
}
