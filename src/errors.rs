// ABOUTME: Unified error handling re-exported from the core crate
// ABOUTME: AppError renders itself as a JSON error envelope with a mapped HTTP status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

//! # Unified Error Handling System
//!
//! Handlers return `Result<Response, AppError>`; engine and persistence errors
//! convert into `AppError` with `?`.

pub use planner_core::errors::{
    AppError, AppResult, DatabaseError, ErrorCode, ErrorResponse, ErrorResponseDetails,
    PlanningError,
};
