// ABOUTME: Ingredient record, quantity value type, and incoming ingredient validation
// ABOUTME: Converts loose client payloads into the canonical Ingredient before any planning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::errors::PlanningError;

/// Persisted ingredient identifier
pub type IngredientId = i64;

/// Ingredient quantity as submitted by clients
///
/// The mobile client sends quantities either as JSON numbers or as numeric
/// strings. Both are kept verbatim; conversion to a number happens only when
/// quantities are aggregated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    /// JSON number
    Number(f64),
    /// Free text, usually a numeric string such as `"200"`
    Text(String),
}

impl Quantity {
    /// Numeric value of this quantity, `None` when it is not a finite number
    ///
    /// Text is trimmed first and empty text counts as zero.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Some(0.0);
                }
                trimmed.parse::<f64>().ok()?
            }
        };
        value.is_finite().then_some(value)
    }

    /// Text form used for the `quantity` column
    #[must_use]
    pub fn to_storage(&self) -> String {
        self.to_string()
    }

    /// Rebuild a quantity from its stored text form
    #[must_use]
    pub fn from_storage(raw: String) -> Self {
        Self::Text(raw)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(raw) => f.write_str(raw),
        }
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// A single ingredient line of a recipe
///
/// `id` is present only once the ingredient has been persisted. `name` is the
/// grouping key for consolidation and is matched exactly (case-sensitive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Persisted identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<IngredientId>,
    /// Ingredient name
    pub name: String,
    /// Amount in `unit`
    #[serde(default)]
    pub quantity: Quantity,
    /// Opaque unit label (`g`, `cup`, or empty for countable items)
    pub unit: String,
}

impl Ingredient {
    /// Create an ingredient that has not been persisted yet
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: impl Into<Quantity>, unit: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            quantity: quantity.into(),
            unit: unit.into(),
        }
    }

    /// Set the persisted identifier
    #[must_use]
    pub const fn with_id(mut self, id: IngredientId) -> Self {
        self.id = Some(id);
        self
    }

    /// True when name, quantity and unit are identical (ids are ignored)
    #[must_use]
    pub fn same_fields(&self, other: &Self) -> bool {
        self.name == other.name && self.quantity == other.quantity && self.unit == other.unit
    }
}

/// Ingredient as submitted by an editor, before validation
///
/// Every field is optional so that a malformed item produces a field-level
/// validation error instead of an opaque deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientInput {
    /// Identifier of the persisted ingredient this item edits
    #[serde(default)]
    pub id: Option<IngredientId>,
    /// Ingredient name
    #[serde(default)]
    pub name: Option<String>,
    /// Amount, number or numeric string
    #[serde(default)]
    pub quantity: Option<Quantity>,
    /// Unit label
    #[serde(default)]
    pub unit: Option<String>,
}

impl IngredientInput {
    /// Validate this item, `index` is its position in the submitted list
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::Validation` when `name` is missing or blank or
    /// when `unit` is missing.
    pub fn into_ingredient(self, index: usize) -> Result<Ingredient, PlanningError> {
        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name,
            Some(_) => {
                return Err(PlanningError::Validation {
                    index,
                    field: "name",
                    message: "'name' must not be blank".to_owned(),
                })
            }
            None => return Err(PlanningError::missing_field(index, "name")),
        };
        let unit = self
            .unit
            .ok_or_else(|| PlanningError::missing_field(index, "unit"))?;

        Ok(Ingredient {
            id: self.id,
            name,
            quantity: self.quantity.unwrap_or_default(),
            unit,
        })
    }
}

impl From<Ingredient> for IngredientInput {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: Some(ingredient.name),
            quantity: Some(ingredient.quantity),
            unit: Some(ingredient.unit),
        }
    }
}

/// Validate a whole submitted list, failing on the first malformed item
///
/// # Errors
///
/// Returns the validation error of the first malformed item; no partial
/// result is produced.
pub fn validate_ingredient_inputs(
    inputs: Vec<IngredientInput>,
) -> Result<Vec<Ingredient>, PlanningError> {
    inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| input.into_ingredient(index))
        .collect()
}
