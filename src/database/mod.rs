// ABOUTME: SQLite database handle, connection pooling, and schema creation
// ABOUTME: Entry point to the recipe, week plan, favorite and user managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

//! # Database Management
//!
//! One `SQLite` pool shared by all managers. Every manager borrows the pool by
//! clone; there is no other shared state. Schema creation is idempotent and
//! runs on every start.

/// Favorite relation storage
pub mod favorites;
/// Recipe and ingredient storage
pub mod recipes;
/// Repository traits consumed by the planning service
pub mod repositories;
/// Transaction guard and retry helpers
pub mod transactions;
/// User storage
pub mod users;
/// Week plan document storage
pub mod week_plans;

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

pub use favorites::FavoriteManager;
pub use planner_core::errors::DatabaseError;
pub use recipes::RecipeManager;
pub use transactions::{retry_transaction, TransactionGuard};
pub use users::{User, UserManager};
pub use week_plans::WeekPlanManager;

use crate::config::DatabaseUrl;

/// Result type of the persistence layer
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Wrap a `sqlx` error with a description of what was being done
pub(crate) fn query_error(context: impl Into<String>) -> impl FnOnce(sqlx::Error) -> DatabaseError {
    let context = context.into();
    move |e| DatabaseError::from_sqlx(&context, &e)
}

/// Database handle
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to `url` and create the schema
    ///
    /// In-memory databases use a single long-lived connection so every query
    /// sees the same data.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema creation fails
    pub async fn new(url: &DatabaseUrl) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&url.to_connection_string())
            .with_context(|| format!("Invalid database URL {url}"))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let pool_options = if url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(8)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to {url}"))?;

        let db = Self { pool };
        db.migrate().await?;
        info!(database = %url, "Database ready");
        Ok(db)
    }

    /// Wrap an existing pool without running migrations
    #[must_use]
    pub const fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Recipe manager on this pool
    #[must_use]
    pub fn recipes(&self) -> RecipeManager {
        RecipeManager::new(self.pool.clone())
    }

    /// Week plan manager on this pool
    #[must_use]
    pub fn week_plans(&self) -> WeekPlanManager {
        WeekPlanManager::new(self.pool.clone())
    }

    /// Favorite manager on this pool
    #[must_use]
    pub fn favorites(&self) -> FavoriteManager {
        FavoriteManager::new(self.pool.clone())
    }

    /// User manager on this pool
    #[must_use]
    pub fn users(&self) -> UserManager {
        UserManager::new(self.pool.clone())
    }

    /// Cheap round trip used by the readiness probe
    ///
    /// # Errors
    ///
    /// Returns an error if the database does not answer
    pub async fn ping(&self) -> DatabaseResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(query_error("Database ping failed"))?;
        Ok(())
    }

    /// Create all tables and indexes
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails
    pub async fn migrate(&self) -> DatabaseResult<()> {
        self.migrate_users().await?;
        self.migrate_recipes().await?;
        self.migrate_favorites().await?;
        self.migrate_week_plans().await?;
        debug!("Schema up to date");
        Ok(())
    }

    async fn run_migration(&self, step: &str, statements: &[&str]) -> DatabaseResult<()> {
        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| DatabaseError::MigrationError {
                    context: format!("{step}: {e}"),
                })?;
        }
        Ok(())
    }

    async fn migrate_users(&self) -> DatabaseResult<()> {
        self.run_migration(
            "users",
            &[r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                display_name TEXT,
                created_at TEXT NOT NULL
            )
            "],
        )
        .await
    }

    async fn migrate_recipes(&self) -> DatabaseResult<()> {
        self.run_migration(
            "recipes",
            &[
                r"
                CREATE TABLE IF NOT EXISTS recipes (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                    name TEXT NOT NULL,
                    description TEXT NOT NULL DEFAULT '',
                    instructions TEXT NOT NULL DEFAULT '[]',
                    time_minutes INTEGER NOT NULL DEFAULT 0,
                    servings INTEGER NOT NULL DEFAULT 0,
                    classification TEXT,
                    image TEXT,
                    version INTEGER NOT NULL DEFAULT 1,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                )
                ",
                r"
                CREATE TABLE IF NOT EXISTS ingredients (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                    position INTEGER NOT NULL DEFAULT 0,
                    name TEXT NOT NULL,
                    quantity TEXT NOT NULL DEFAULT '',
                    unit TEXT NOT NULL DEFAULT ''
                )
                ",
                "CREATE INDEX IF NOT EXISTS idx_recipes_created_at ON recipes(created_at)",
                "CREATE INDEX IF NOT EXISTS idx_ingredients_recipe ON ingredients(recipe_id, position)",
            ],
        )
        .await
    }

    async fn migrate_favorites(&self) -> DatabaseResult<()> {
        self.run_migration(
            "favorites",
            &[r"
            CREATE TABLE IF NOT EXISTS favorites (
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                PRIMARY KEY (user_id, recipe_id)
            )
            "],
        )
        .await
    }

    async fn migrate_week_plans(&self) -> DatabaseResult<()> {
        self.run_migration(
            "week_plans",
            &[r"
            CREATE TABLE IF NOT EXISTS week_plans (
                user_id INTEGER PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                week TEXT NOT NULL,
                version INTEGER NOT NULL DEFAULT 1,
                updated_at TEXT NOT NULL
            )
            "],
        )
        .await
    }
}
