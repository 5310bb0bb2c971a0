// ABOUTME: Core types and constants for the recipe planning service
// ABOUTME: Foundation crate with domain models, unified error handling, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

#![deny(unsafe_code)]

//! # Planner Core
//!
//! Foundation crate providing shared types for the recipe planning service.
//! This crate changes infrequently, which keeps incremental builds of the
//! engine and server crates cheap.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and domain-specific errors
//! - **models**: Ingredient, recipe, week plan and shopping list records
//! - **constants**: Application-wide defaults, environment variable names and header names

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Domain models shared by the engine and the server
pub mod models;

/// Application constants organized by domain
pub mod constants;
