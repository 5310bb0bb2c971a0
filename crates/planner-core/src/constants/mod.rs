// ABOUTME: Application constants organized by domain
// ABOUTME: Defaults, environment variable names, HTTP header names, and service identity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

/// Service identity used in structured logs
pub mod service_names {
    /// Server binary / log service name
    pub const RECIPE_PLANNER_SERVER: &str = "recipe-planner-server";
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8081;
    /// Default bind host
    pub const HOST: &str = "127.0.0.1";
    /// Default `SQLite` database location
    pub const DATABASE_URL: &str = "sqlite:./data/recipe_planner.db";
    /// Catalog recipes offered when a user has no favorites
    pub const RECOMMENDATION_FALLBACK_LIMIT: usize = 10;
    /// Per-request timeout applied at the HTTP layer
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Retries for transactions that hit `SQLITE_BUSY`
    pub const TRANSACTION_RETRIES: u32 = 3;
}

/// Environment variable names read by the server configuration
pub mod env_config {
    /// HTTP port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Bind host
    pub const HOST: &str = "HOST";
    /// Database connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// `coerce` or `reject`
    pub const QUANTITY_POLICY: &str = "QUANTITY_POLICY";
    /// Number of catalog recipes used as fallback recommendations
    pub const RECOMMENDATION_FALLBACK_LIMIT: &str = "RECOMMENDATION_FALLBACK_LIMIT";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Comma separated list of allowed CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// Application log level
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    /// HTTP request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
}

/// HTTP header names
pub mod headers {
    /// Authenticated user id injected by the upstream auth layer
    pub const USER_ID: &str = "x-user-id";
    /// Request correlation id
    pub const REQUEST_ID: &str = "x-request-id";
}
