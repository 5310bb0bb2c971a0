// ABOUTME: Route module organization for the planner HTTP API
// ABOUTME: Each route group exposes a `routes` constructor merged by the server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

//! HTTP route groups
//!
//! Every group authenticates per handler from the `x-user-id` header and
//! returns `Result<Response, AppError>`, so failures render as the JSON
//! error envelope.

/// Health and readiness probes
pub mod health;
/// Weekly plan and its shopping list
pub mod meal_plan;
/// Recipe ingredient editing and per-recipe shopping lists
pub mod recipes;
/// Favorite-based recommendations
pub mod recommendations;

pub use health::HealthRoutes;
pub use meal_plan::MealPlanRoutes;
pub use recipes::RecipeRoutes;
pub use recommendations::RecommendationRoutes;
