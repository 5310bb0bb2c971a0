// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, user and recipe seeding, and router helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::expect_used
)]
//! Shared test utilities for `recipe_planner`

use std::sync::{Arc, Once};

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, Response},
    Router,
};
use planner_core::models::{Ingredient, NewRecipe, Recipe, UserId};
use recipe_planner::{
    config::{DatabaseUrl, ServerConfig},
    constants::headers,
    database::Database,
    resources::ServerResources,
    server::build_router,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Fresh in-memory database with the schema applied
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new(&DatabaseUrl::Memory).await
}

/// Server configuration pointing at an in-memory database
pub fn test_config() -> ServerConfig {
    ServerConfig {
        database: DatabaseUrl::Memory,
        ..ServerConfig::default()
    }
}

/// Create a user and return its id
pub async fn create_test_user(database: &Database, email: &str) -> Result<UserId> {
    let user = database.users().create_user(email, Some("Test User")).await?;
    Ok(user.id)
}

/// Persist a recipe owned by `owner`
pub async fn seed_recipe(database: &Database, owner: UserId, recipe: NewRecipe) -> Result<Recipe> {
    Ok(database.recipes().create_recipe(owner, &recipe).await?)
}

/// Recipe with the given ingredients, written for `servings`
pub fn recipe_with(name: &str, servings: u32, ingredients: &[(&str, f64, &str)]) -> NewRecipe {
    ingredients
        .iter()
        .fold(NewRecipe::new(name, servings), |recipe, (n, q, u)| {
            recipe.with_ingredient(Ingredient::new(*n, *q, *u))
        })
}

/// Resources and router over `database` with the default configuration
pub fn create_test_router(database: Database) -> (Arc<ServerResources>, Router) {
    let resources = Arc::new(ServerResources::new(database, Arc::new(test_config())));
    let router = build_router(Arc::clone(&resources));
    (resources, router)
}

/// Build a request, optionally authenticated and with a JSON body
pub fn json_request(
    method: Method,
    uri: &str,
    user_id: Option<UserId>,
    body: Option<&serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user_id) = user_id {
        builder = builder.header(headers::USER_ID, user_id.to_string());
    }
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("valid request")
}

/// Read a response body as JSON
pub async fn body_json(response: Response<Body>) -> Result<serde_json::Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
