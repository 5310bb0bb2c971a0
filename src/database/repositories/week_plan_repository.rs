// ABOUTME: Week plan repository implementation over SQLite
// ABOUTME: Delegates whole-document load and save to the week plan manager
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use async_trait::async_trait;
use planner_core::models::{UserId, Week, WeekPlan};

use super::WeekPlanRepository;
use crate::constants::defaults;
use crate::database::{retry_transaction, Database, DatabaseError};

/// `SQLite` implementation of `WeekPlanRepository`
#[derive(Clone, Debug)]
pub struct WeekPlanRepositoryImpl {
    db: Database,
}

impl WeekPlanRepositoryImpl {
    /// Create a new `WeekPlanRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WeekPlanRepository for WeekPlanRepositoryImpl {
    async fn load_week_plan(&self, user_id: UserId) -> Result<Option<WeekPlan>, DatabaseError> {
        self.db.week_plans().load(user_id).await
    }

    async fn save_week_plan(
        &self,
        user_id: UserId,
        week: &Week,
        expected_version: Option<i64>,
    ) -> Result<WeekPlan, DatabaseError> {
        let plans = self.db.week_plans();
        retry_transaction(
            || plans.save(user_id, week, expected_version),
            defaults::TRANSACTION_RETRIES,
        )
        .await
    }
}
