// ABOUTME: Planning engine: ingredient reconciliation, consolidation, and recommendations
// ABOUTME: Pure synchronous transformations over already-fetched recipe data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

#![deny(unsafe_code)]

//! # Planner Engine
//!
//! The three pieces of the service with real logic. None of them perform I/O:
//! callers fetch recipes, plans and favorites, run one of these functions to
//! completion, and write back whatever the result asks for.
//!
//! - [`reconcile`] classifies an edited ingredient list into updates, inserts
//!   and deletes against the persisted list, keeping ids of matched records.
//! - [`consolidate`] sums ingredient quantities across recipes into one
//!   shopping list, and scales a single recipe to a serving count.
//! - [`recommend`] picks catalog recipes sharing a classification or an
//!   ingredient name with a user's favorites.

/// Ingredient consolidation and serving scaling
pub mod consolidate;
/// Favorites-based recommendation filter
pub mod recommend;
/// Ingredient list reconciliation
pub mod reconcile;

pub use consolidate::{consolidate, scale_ingredients, IngredientConsolidator, QuantityPolicy};
pub use recommend::{recommend, FavoriteProfile};
pub use reconcile::{reconcile, reconcile_inputs, ReconcileOutcome};
