// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports the environment-driven server configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

//! Configuration module for the recipe planner server
//!
//! All settings come from environment variables; the server binary may
//! override a few of them from command-line flags.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    CorsConfig, DatabaseUrl, Environment, LogLevel, PlanningConfig, ServerConfig,
};
