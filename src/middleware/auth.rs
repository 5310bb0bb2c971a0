// ABOUTME: Resolves the calling user from the x-user-id header set by the upstream auth layer
// ABOUTME: Missing header is AUTH_REQUIRED, malformed or unknown ids are AUTH_INVALID
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use axum::http::HeaderMap;
use planner_core::models::UserId;
use tracing::{debug, Span};

use crate::constants::headers;
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;

/// Identity of the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Verified user id
    pub user_id: UserId,
}

/// Authenticate a request from its headers
///
/// # Errors
///
/// Returns `AuthRequired` when the header is absent, `AuthInvalid` when it is
/// not an integer or names an unknown user, or a database error
pub async fn authenticate(
    headers: &HeaderMap,
    resources: &ServerResources,
) -> AppResult<AuthenticatedUser> {
    let user_id = parse_user_header(headers)?;

    if !resources.database.users().exists(user_id).await? {
        return Err(AppError::auth_invalid(format!("Unknown user {user_id}")));
    }

    Span::current().record("user_id", user_id);
    debug!(user_id, "Request authenticated");
    Ok(AuthenticatedUser { user_id })
}

/// Read the user id header without touching the database
///
/// # Errors
///
/// Returns `AuthRequired` when the header is absent and `AuthInvalid` when it
/// does not hold an integer
pub fn parse_user_header(headers: &HeaderMap) -> AppResult<UserId> {
    let Some(value) = headers.get(headers::USER_ID) else {
        return Err(AppError::auth_required());
    };

    value
        .to_str()
        .ok()
        .map(str::trim)
        .and_then(|raw| raw.parse::<UserId>().ok())
        .ok_or_else(|| AppError::auth_invalid(format!("Malformed {} header", headers::USER_ID)))
}
