// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Orchestrates repositories and the pure planning engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

//! Domain service layer
//!
//! Services own the request-level flow: load collaborators, run one engine
//! computation to completion, write back. Route handlers only translate HTTP
//! to service calls.

/// Ingredient editing, shopping lists, recommendations and week plans
pub mod planning;

pub use planning::{
    IngredientUpdate, PlanningService, RecommendationSource, Recommendations, ScaledShoppingList,
};
