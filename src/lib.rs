// ABOUTME: Main library entry point for the recipe planner service
// ABOUTME: Wires configuration, persistence, the planning service and the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

#![deny(unsafe_code)]

//! # Recipe Planner
//!
//! Backend for a recipe and weekly meal-planning app.
//!
//! ## Features
//!
//! - **Ingredient editing**: a submitted ingredient list is reconciled against
//!   the stored one so unchanged lines keep their identity
//! - **Shopping lists**: every recipe scheduled in the week is consolidated into
//!   one list, quantities of same-named ingredients summed
//! - **Recommendations**: catalog recipes related to the user's favorites by
//!   classification or shared ingredients
//!
//! ## Architecture
//!
//! - **`planner-core`**: domain models, errors and constants
//! - **`planner-engine`**: the pure reconciliation, consolidation and
//!   recommendation algorithms
//! - **This crate**: `SQLite` persistence behind repository traits, the
//!   planning service, and the axum HTTP surface
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use recipe_planner::config::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     recipe_planner::logging::init_from_env()?;
//!     recipe_planner::server::serve(config).await
//! }
//! ```

/// Environment configuration
pub mod config;

/// Shared constants
pub mod constants;

/// `SQLite` persistence, managers and repositories
pub mod database;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Domain models
pub mod models;

/// Shared server resources
pub mod resources;

/// HTTP route groups
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;

/// Planning service
pub mod services;

pub use planner_engine as engine;
