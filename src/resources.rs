// ABOUTME: Shared server resources handed to every route group
// ABOUTME: Holds the database handle, the planning service, and the server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::database::Database;
use crate::services::PlanningService;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Database handle, used for identity checks and readiness
    pub database: Database,
    /// Planning operations
    pub planning: PlanningService,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Wire the `SQLite`-backed planning service for `config`
    #[must_use]
    pub fn new(database: Database, config: Arc<ServerConfig>) -> Self {
        let planning = PlanningService::from_database(&database, config.planning);
        Self {
            database,
            planning,
            config,
        }
    }

    /// Use an explicit planning service, e.g. one built over test repositories
    #[must_use]
    pub const fn with_planning(
        database: Database,
        planning: PlanningService,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            database,
            planning,
            config,
        }
    }
}
