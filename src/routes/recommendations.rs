// ABOUTME: Route handler for favorite-based recipe recommendations
// ABOUTME: Always answers 200 once authenticated; the body names the source of the list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::errors::AppError;
use crate::middleware::authenticate;
use crate::resources::ServerResources;

/// Recommendation routes implementation
pub struct RecommendationRoutes;

impl RecommendationRoutes {
    /// Create all recommendation routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recommendations", get(Self::handle_recommendations))
            .with_state(resources)
    }

    /// Handle GET /api/recommendations
    async fn handle_recommendations(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources).await?;
        let recommendations = resources.planning.recommendations(auth.user_id).await;
        Ok((StatusCode::OK, Json(recommendations)).into_response())
    }
}
