// ABOUTME: Consolidates ingredient lists of many recipes into one summed shopping list
// ABOUTME: Also scales a single recipe's ingredients to a requested serving count
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use std::collections::HashMap;
use std::fmt;

use planner_core::errors::PlanningError;
use planner_core::models::{ConsolidatedIngredient, Ingredient, Recipe};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How non-numeric quantities are treated while summing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityPolicy {
    /// Count the quantity as zero and flag the line as coerced
    #[default]
    Coerce,
    /// Abort the whole consolidation with an error
    Reject,
}

impl QuantityPolicy {
    /// Parse a policy name, case-insensitive
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "coerce" => Some(Self::Coerce),
            "reject" | "strict" => Some(Self::Reject),
            _ => None,
        }
    }

    /// Policy name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Coerce => "coerce",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for QuantityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulates ingredients into one line per distinct name
///
/// Lines keep the order in which each name was first seen. The unit of a line
/// is the unit of its first occurrence; later occurrences with another unit
/// are summed anyway and mark the line with `unit_mismatch`.
#[derive(Debug, Clone, Default)]
pub struct IngredientConsolidator {
    policy: QuantityPolicy,
    lines: Vec<ConsolidatedIngredient>,
    positions: HashMap<String, usize>,
}

impl IngredientConsolidator {
    /// Empty consolidator
    #[must_use]
    pub fn new(policy: QuantityPolicy) -> Self {
        Self {
            policy,
            lines: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Add one ingredient at its listed quantity
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::NonNumericQuantity` under the reject policy.
    pub fn add(&mut self, ingredient: &Ingredient) -> Result<(), PlanningError> {
        self.add_with(ingredient, |quantity| quantity)
    }

    /// Add every ingredient of a list
    ///
    /// # Errors
    ///
    /// Returns `PlanningError::NonNumericQuantity` under the reject policy.
    pub fn add_all(&mut self, ingredients: &[Ingredient]) -> Result<(), PlanningError> {
        ingredients.iter().try_for_each(|ingredient| self.add(ingredient))
    }

    fn add_with(
        &mut self,
        ingredient: &Ingredient,
        transform: impl Fn(f64) -> f64,
    ) -> Result<(), PlanningError> {
        let (quantity, coerced) = self.resolve_quantity(ingredient)?;
        let (quantity, clamped) = self.bound_total(&ingredient.name, transform(quantity))?;
        let coerced = coerced || clamped;

        if let Some(&position) = self.positions.get(&ingredient.name) {
            let (total, clamped) =
                self.bound_total(&ingredient.name, self.lines[position].quantity + quantity)?;
            let line = &mut self.lines[position];
            line.quantity = total;
            line.coerced |= coerced || clamped;
            if line.unit != ingredient.unit {
                debug!(
                    name = %ingredient.name,
                    kept_unit = %line.unit,
                    other_unit = %ingredient.unit,
                    "Summing quantities across different units"
                );
                line.unit_mismatch = true;
            }
        } else {
            self.positions
                .insert(ingredient.name.clone(), self.lines.len());
            self.lines.push(ConsolidatedIngredient {
                name: ingredient.name.clone(),
                quantity,
                unit: ingredient.unit.clone(),
                unit_mismatch: false,
                coerced,
            });
        }
        Ok(())
    }

    fn resolve_quantity(&self, ingredient: &Ingredient) -> Result<(f64, bool), PlanningError> {
        if let Some(value) = ingredient.quantity.as_number() {
            return Ok((value, false));
        }
        match self.policy {
            QuantityPolicy::Coerce => {
                debug!(
                    name = %ingredient.name,
                    quantity = %ingredient.quantity,
                    "Counting non-numeric quantity as zero"
                );
                Ok((0.0, true))
            }
            QuantityPolicy::Reject => Err(PlanningError::NonNumericQuantity {
                name: ingredient.name.clone(),
                raw: ingredient.quantity.to_string(),
            }),
        }
    }

    /// Keep a running total finite
    ///
    /// Under the lenient policy an overflowing total is clamped to the largest
    /// finite value and reported as coerced.
    fn bound_total(&self, name: &str, total: f64) -> Result<(f64, bool), PlanningError> {
        if total.is_finite() {
            return Ok((total, false));
        }
        match self.policy {
            QuantityPolicy::Coerce => {
                debug!(name = %name, "Clamping overflowing quantity");
                Ok((f64::MAX.copysign(total), true))
            }
            QuantityPolicy::Reject => Err(PlanningError::QuantityOverflow {
                name: name.to_owned(),
            }),
        }
    }

    /// Number of distinct names seen so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when nothing has been added
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Consolidated lines in first-appearance order
    #[must_use]
    pub fn finish(self) -> Vec<ConsolidatedIngredient> {
        self.lines
    }
}

/// Sum the ingredient lists of several recipes
///
/// Lists are visited in the given order; a recipe listed twice contributes
/// twice.
///
/// # Errors
///
/// Returns `PlanningError::NonNumericQuantity` or
/// `PlanningError::QuantityOverflow` under the reject policy; no partial list
/// is produced.
pub fn consolidate<I>(
    ingredient_lists: I,
    policy: QuantityPolicy,
) -> Result<Vec<ConsolidatedIngredient>, PlanningError>
where
    I: IntoIterator,
    I::Item: AsRef<[Ingredient]>,
{
    let mut consolidator = IngredientConsolidator::new(policy);
    let mut recipes = 0_usize;
    for list in ingredient_lists {
        consolidator.add_all(list.as_ref())?;
        recipes += 1;
    }
    debug!(
        recipes,
        lines = consolidator.len(),
        "Consolidated ingredient lists"
    );
    Ok(consolidator.finish())
}

/// Ingredients of one recipe adjusted to `servings`
///
/// Each quantity becomes `quantity / recipe.servings * servings`. A recipe
/// with zero servings, or a request for its own serving count, is returned
/// unscaled.
///
/// # Errors
///
/// Returns `PlanningError::InvalidServings` when `servings` is zero, and
/// `PlanningError::NonNumericQuantity` or `PlanningError::QuantityOverflow`
/// under the reject policy.
pub fn scale_ingredients(
    recipe: &Recipe,
    servings: u32,
    policy: QuantityPolicy,
) -> Result<Vec<ConsolidatedIngredient>, PlanningError> {
    if servings == 0 {
        return Err(PlanningError::InvalidServings { servings });
    }

    let mut consolidator = IngredientConsolidator::new(policy);
    if recipe.servings == 0 || recipe.servings == servings {
        consolidator.add_all(&recipe.ingredients)?;
    } else {
        let base = f64::from(recipe.servings);
        let target = f64::from(servings);
        for ingredient in &recipe.ingredients {
            consolidator.add_with(ingredient, |quantity| quantity / base * target)?;
        }
    }
    Ok(consolidator.finish())
}
