// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses ports, database location, quantity policy and CORS origins from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

//! Environment-based configuration for the planner server

use std::env;
use std::fmt;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use planner_engine::QuantityPolicy;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::{defaults, env_config};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback to `Info`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback to `Development`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Testing => "testing",
        };
        f.write_str(name)
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// File path
        path: PathBuf,
    },
    /// In-memory `SQLite`, used by tests
    Memory,
}

impl DatabaseUrl {
    /// Parse from a `sqlite:` URL or a bare file path
    ///
    /// # Errors
    ///
    /// Returns an error for non-`SQLite` URLs or an empty path
    pub fn parse_url(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.starts_with("postgres://") || trimmed.starts_with("postgresql://") {
            return Err(anyhow!("Only SQLite databases are supported, got '{trimmed}'"));
        }
        let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
        let path_str = path_str.strip_prefix("//").unwrap_or(path_str);
        match path_str {
            "" => Err(anyhow!("Database URL must name a file or ':memory:'")),
            ":memory:" => Ok(Self::Memory),
            path => Ok(Self::SQLite {
                path: PathBuf::from(path),
            }),
        }
    }

    /// Convert to a connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from(
                defaults::DATABASE_URL
                    .strip_prefix("sqlite:")
                    .unwrap_or(defaults::DATABASE_URL),
            ),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_connection_string())
    }
}

/// Planning behavior knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// Treatment of non-numeric quantities while consolidating
    pub quantity_policy: QuantityPolicy,
    /// Number of newest recipes offered when a user has no favorites
    pub fallback_limit: usize,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            quantity_policy: QuantityPolicy::default(),
            fallback_limit: defaults::RECOMMENDATION_FALLBACK_LIMIT,
        }
    }
}

/// CORS settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origin list, empty or `*` for any origin
    pub allowed_origins: String,
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Database location
    pub database: DatabaseUrl,
    /// Planning behavior
    pub planning: PlanningConfig,
    /// CORS settings
    pub cors: CorsConfig,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::HOST.to_owned(),
            http_port: defaults::HTTP_PORT,
            log_level: LogLevel::default(),
            environment: Environment::default(),
            database: DatabaseUrl::default(),
            planning: PlanningConfig::default(),
            cors: CorsConfig::default(),
            request_timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is present but cannot be parsed
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let http_port = env_var_or(env_config::HTTP_PORT, &defaults::HTTP_PORT.to_string())
            .parse()
            .with_context(|| format!("Invalid {} value", env_config::HTTP_PORT))?;

        let database = DatabaseUrl::parse_url(&env_var_or(
            env_config::DATABASE_URL,
            defaults::DATABASE_URL,
        ))
        .with_context(|| format!("Invalid {} value", env_config::DATABASE_URL))?;

        let quantity_policy = match env::var(env_config::QUANTITY_POLICY) {
            Ok(raw) => QuantityPolicy::parse(&raw).ok_or_else(|| {
                anyhow!(
                    "Invalid {} value '{raw}', expected 'coerce' or 'reject'",
                    env_config::QUANTITY_POLICY
                )
            })?,
            Err(_) => QuantityPolicy::default(),
        };

        let fallback_limit = env_var_or(
            env_config::RECOMMENDATION_FALLBACK_LIMIT,
            &defaults::RECOMMENDATION_FALLBACK_LIMIT.to_string(),
        )
        .parse()
        .with_context(|| {
            format!(
                "Invalid {} value",
                env_config::RECOMMENDATION_FALLBACK_LIMIT
            )
        })?;

        let request_timeout_secs = env_var_or(
            env_config::REQUEST_TIMEOUT_SECS,
            &defaults::REQUEST_TIMEOUT_SECS.to_string(),
        )
        .parse()
        .with_context(|| format!("Invalid {} value", env_config::REQUEST_TIMEOUT_SECS))?;

        let config = Self {
            host: env_var_or(env_config::HOST, defaults::HOST),
            http_port,
            log_level: LogLevel::from_str_or_default(&env_var_or(env_config::LOG_LEVEL, "info")),
            environment: Environment::from_str_or_default(&env_var_or(
                env_config::ENVIRONMENT,
                "development",
            )),
            database,
            planning: PlanningConfig {
                quantity_policy,
                fallback_limit,
            },
            cors: CorsConfig {
                allowed_origins: env_var_or(env_config::CORS_ALLOWED_ORIGINS, "*"),
            },
            request_timeout_secs,
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is unusable
    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            return Err(anyhow!("{} must not be 0", env_config::HTTP_PORT));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow!("{} must not be 0", env_config::REQUEST_TIMEOUT_SECS));
        }
        if self.environment.is_production() && self.database.is_memory() {
            warn!("Production environment is running on an in-memory database");
        }
        if self.environment.is_production() && self.cors.allowed_origins.trim() == "*" {
            warn!("Production environment allows any CORS origin");
        }
        Ok(())
    }

    /// One-line summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Recipe Planner Server Configuration:\n\
             - Environment: {}\n\
             - Listen: {}:{}\n\
             - Log Level: {}\n\
             - Database: {}\n\
             - Quantity Policy: {}\n\
             - Recommendation Fallback: {} recipes\n\
             - Request Timeout: {}s",
            self.environment,
            self.host,
            self.http_port,
            self.log_level,
            self.database,
            self.planning.quantity_policy,
            self.planning.fallback_limit,
            self.request_timeout_secs,
        )
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_parsing() {
        assert_eq!(
            DatabaseUrl::parse_url("sqlite::memory:").ok(),
            Some(DatabaseUrl::Memory)
        );
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/planner.db").ok(),
            Some(DatabaseUrl::SQLite {
                path: PathBuf::from("./data/planner.db")
            })
        );
        assert_eq!(
            DatabaseUrl::parse_url("planner.db").ok(),
            Some(DatabaseUrl::SQLite {
                path: PathBuf::from("planner.db")
            })
        );
        assert!(DatabaseUrl::parse_url("postgres://localhost/planner").is_err());
        assert!(DatabaseUrl::parse_url("sqlite:").is_err());
    }

    #[test]
    fn test_connection_string_round_trip() {
        let url = DatabaseUrl::SQLite {
            path: PathBuf::from("./x.db"),
        };
        assert_eq!(url.to_connection_string(), "sqlite:./x.db");
        assert_eq!(DatabaseUrl::Memory.to_string(), "sqlite::memory:");
    }

    #[test]
    fn test_environment_and_log_level_fallbacks() {
        assert_eq!(Environment::from_str_or_default("PROD"), Environment::Production);
        assert_eq!(Environment::from_str_or_default("staging"), Environment::Development);
        assert_eq!(LogLevel::from_str_or_default("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("loud"), LogLevel::Info);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.http_port, defaults::HTTP_PORT);
        assert!(config.summary().contains("Quantity Policy: coerce"));
    }
}
