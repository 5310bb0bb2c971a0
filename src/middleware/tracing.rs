// ABOUTME: Span construction for HTTP requests handled by the planner
// ABOUTME: Fields left empty here are filled in by the request id and auth steps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use axum::http::Request;
use tracing::Span;

/// Create a tracing span for an HTTP request
///
/// Used as the `make_span_with` callback of the `TraceLayer`.
pub fn create_request_span<B>(request: &Request<B>) -> Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = tracing::field::Empty,
        user_id = tracing::field::Empty,
    )
}
