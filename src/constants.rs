// ABOUTME: System-wide constants re-exported from the core crate
// ABOUTME: Defaults, environment variable names, and header names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

pub use planner_core::constants::{defaults, env_config, headers, service_names};
