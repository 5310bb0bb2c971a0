// ABOUTME: Structured error types for database operations
// ABOUTME: Provides entity context for not-found and version-conflict failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Errors raised by the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Entity does not exist
    #[error("{entity_type} {entity_id} not found")]
    NotFound {
        /// Kind of entity (recipe, week plan)
        entity_type: &'static str,
        /// Identifier that was looked up
        entity_id: String,
    },

    /// Compare-and-swap on a version counter failed
    #[error("{entity_type} {entity_id} was modified concurrently (expected version {expected}, found {actual})")]
    VersionConflict {
        /// Kind of entity
        entity_type: &'static str,
        /// Identifier of the entity
        entity_id: String,
        /// Version the caller based its edit on
        expected: i64,
        /// Version currently stored
        actual: i64,
    },

    /// Lock contention or pool exhaustion; the operation may succeed if retried
    #[error("Database is busy: {context}")]
    Contention {
        /// What was being done
        context: String,
    },

    /// Query failed
    #[error("Database query failed: {context}")]
    QueryError {
        /// What was being done
        context: String,
    },

    /// Schema creation failed
    #[error("Database migration failed: {context}")]
    MigrationError {
        /// Migration step that failed
        context: String,
    },

    /// Stored JSON could not be decoded or encoded
    #[error("Stored data could not be (de)serialized: {context}")]
    SerializationError {
        /// What was being converted
        context: String,
    },
}

#[cfg(feature = "database-errors")]
impl DatabaseError {
    /// Wrap a sqlx failure that happened while doing `context`
    ///
    /// `SQLITE_BUSY` and `SQLITE_LOCKED` (including their extended codes) and
    /// pool acquisition timeouts become [`DatabaseError::Contention`];
    /// everything else is a [`DatabaseError::QueryError`].
    #[must_use]
    pub fn from_sqlx(context: &str, error: &sqlx::Error) -> Self {
        let context = format!("{context}: {error}");
        if is_contention(error) {
            Self::Contention { context }
        } else {
            Self::QueryError { context }
        }
    }
}

#[cfg(feature = "database-errors")]
fn is_contention(error: &sqlx::Error) -> bool {
    const SQLITE_BUSY: i32 = 5;
    const SQLITE_LOCKED: i32 = 6;

    match error {
        sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(db) => db
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .is_some_and(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED)),
        _ => false,
    }
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        if is_contention(&error) {
            Self::Contention {
                context: error.to_string(),
            }
        } else {
            Self::QueryError {
                context: error.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for DatabaseError {
    fn from(error: serde_json::Error) -> Self {
        Self::SerializationError {
            context: error.to_string(),
        }
    }
}

impl From<DatabaseError> for AppError {
    fn from(error: DatabaseError) -> Self {
        match &error {
            DatabaseError::NotFound { entity_id, .. } => {
                let id = entity_id.clone();
                Self::new(ErrorCode::ResourceNotFound, error.to_string()).with_resource_id(id)
            }
            DatabaseError::VersionConflict {
                entity_id,
                expected,
                actual,
                ..
            } => {
                let details = serde_json::json!({
                    "expected_version": expected,
                    "current_version": actual,
                });
                let id = entity_id.clone();
                Self::new(ErrorCode::ResourceConflict, error.to_string())
                    .with_resource_id(id)
                    .with_details(details)
            }
            DatabaseError::SerializationError { .. } => {
                Self::new(ErrorCode::SerializationError, error.to_string())
            }
            DatabaseError::Contention { .. } => {
                Self::new(ErrorCode::ResourceUnavailable, error.to_string())
            }
            DatabaseError::QueryError { .. } | DatabaseError::MigrationError { .. } => {
                Self::new(ErrorCode::DatabaseError, error.to_string())
            }
        }
    }
}
