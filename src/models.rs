// ABOUTME: Domain models re-exported from the core crate
// ABOUTME: Recipes, ingredients, shopping lists and week plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

pub use planner_core::models::*;
