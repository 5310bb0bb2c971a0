// ABOUTME: HTTP middleware for authentication, request ids, and CORS
// ABOUTME: Layers applied to the planner router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

/// User identity extraction from the upstream authentication header
pub mod auth;
/// CORS configuration
pub mod cors;
/// Request id propagation
pub mod request_id;
/// Request spans
pub mod tracing;

pub use auth::{authenticate, AuthenticatedUser};
pub use cors::setup_cors;
pub use request_id::{request_id_middleware, RequestId};
pub use self::tracing::create_request_span;
