// ABOUTME: Error types raised by the planning engine (validation and aggregation)
// ABOUTME: Converts into AppError with field-level details for HTTP responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Errors produced while validating or aggregating ingredient records
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanningError {
    /// An incoming ingredient is malformed
    #[error("ingredient {index}: {message}")]
    Validation {
        /// Position of the offending ingredient in the submitted list
        index: usize,
        /// Name of the offending field
        field: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// A quantity could not be read as a number under the strict policy
    #[error("ingredient '{name}' has a non-numeric quantity '{raw}'")]
    NonNumericQuantity {
        /// Ingredient name
        name: String,
        /// Quantity as submitted
        raw: String,
    },

    /// A summed or scaled quantity no longer fits a finite number
    #[error("total quantity of ingredient '{name}' is too large")]
    QuantityOverflow {
        /// Ingredient name
        name: String,
    },

    /// Requested serving count is not usable for scaling
    #[error("servings must be at least 1, got {servings}")]
    InvalidServings {
        /// Requested servings
        servings: u32,
    },
}

impl PlanningError {
    /// Validation error for a missing field
    #[must_use]
    pub fn missing_field(index: usize, field: &'static str) -> Self {
        Self::Validation {
            index,
            field,
            message: format!("'{field}' is required"),
        }
    }
}

impl From<PlanningError> for AppError {
    fn from(error: PlanningError) -> Self {
        match &error {
            PlanningError::Validation { index, field, .. } => {
                let details = serde_json::json!({ "index": index, "field": field });
                Self::new(ErrorCode::MissingRequiredField, error.to_string()).with_details(details)
            }
            PlanningError::NonNumericQuantity { name, raw } => {
                let details = serde_json::json!({ "name": name, "quantity": raw });
                Self::new(ErrorCode::InvalidFormat, error.to_string()).with_details(details)
            }
            PlanningError::QuantityOverflow { name } => {
                let details = serde_json::json!({ "name": name });
                Self::new(ErrorCode::ValueOutOfRange, error.to_string()).with_details(details)
            }
            PlanningError::InvalidServings { servings } => {
                let details = serde_json::json!({ "servings": servings });
                Self::new(ErrorCode::ValueOutOfRange, error.to_string()).with_details(details)
            }
        }
    }
}
