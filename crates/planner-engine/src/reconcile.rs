// ABOUTME: Reconciles an edited ingredient list against the persisted one
// ABOUTME: Produces disjoint updated/inserted/deleted sets while preserving ids of matched records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Planner Contributors

use std::collections::{HashMap, HashSet};

use planner_core::errors::PlanningError;
use planner_core::models::{validate_ingredient_inputs, Ingredient, IngredientId, IngredientInput};
use tracing::{debug, warn};

/// Result of reconciling an edited ingredient list
///
/// The caller persists the three sets, ideally in one transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileOutcome {
    /// Matched records: persisted id with the incoming name, quantity and unit
    pub updated: Vec<Ingredient>,
    /// New records without an id; a fresh id is assigned on insert
    pub inserted: Vec<Ingredient>,
    /// Persisted records absent from the incoming list
    pub deleted: Vec<Ingredient>,
    /// Incoming records that claimed an id already claimed earlier in the list
    pub discarded: Vec<Ingredient>,
}

impl ReconcileOutcome {
    /// Ids of the records to delete
    #[must_use]
    pub fn deleted_ids(&self) -> Vec<IngredientId> {
        self.deleted.iter().filter_map(|i| i.id).collect()
    }

    /// True when applying this outcome would not change the persisted list
    #[must_use]
    pub fn is_noop(&self, existing: &[Ingredient]) -> bool {
        if !self.inserted.is_empty() || !self.deleted.is_empty() {
            return false;
        }
        self.updated.iter().all(|update| {
            existing
                .iter()
                .any(|current| current.id == update.id && current.same_fields(update))
        })
    }

    /// Ingredient list after the outcome is applied, inserts last
    #[must_use]
    pub fn resulting_ingredients(&self) -> Vec<Ingredient> {
        self.updated
            .iter()
            .chain(self.inserted.iter())
            .cloned()
            .collect()
    }
}

/// Classify `incoming` against `existing`
///
/// An incoming record whose id matches an existing record becomes an update
/// that keeps the persisted id. Records without an id, or with an id that
/// matches nothing, become inserts and lose the stale id. Existing records
/// whose id no incoming record claims are deleted. When two incoming records
/// claim the same id the first one wins and the later one is discarded.
/// Existing records without an id cannot be matched and are left alone.
#[must_use]
pub fn reconcile(existing: &[Ingredient], incoming: Vec<Ingredient>) -> ReconcileOutcome {
    let lookup: HashMap<IngredientId, &Ingredient> = existing
        .iter()
        .filter_map(|ingredient| ingredient.id.map(|id| (id, ingredient)))
        .collect();

    let mut retained: HashSet<IngredientId> = HashSet::with_capacity(lookup.len());
    let mut outcome = ReconcileOutcome::default();

    for item in incoming {
        match item.id {
            Some(id) if lookup.contains_key(&id) => {
                if retained.insert(id) {
                    outcome.updated.push(item);
                } else {
                    warn!(
                        ingredient_id = id,
                        name = %item.name,
                        "Duplicate ingredient id in edit, keeping first occurrence"
                    );
                    outcome.discarded.push(item);
                }
            }
            _ => outcome.inserted.push(Ingredient { id: None, ..item }),
        }
    }

    outcome.deleted = existing
        .iter()
        .filter(|ingredient| ingredient.id.is_some_and(|id| !retained.contains(&id)))
        .cloned()
        .collect();

    debug!(
        updated = outcome.updated.len(),
        inserted = outcome.inserted.len(),
        deleted = outcome.deleted.len(),
        discarded = outcome.discarded.len(),
        "Reconciled ingredient list"
    );

    outcome
}

/// Validate submitted ingredients, then reconcile them against `existing`
///
/// # Errors
///
/// Returns the validation error of the first malformed input; nothing is
/// reconciled in that case.
pub fn reconcile_inputs(
    existing: &[Ingredient],
    inputs: Vec<IngredientInput>,
) -> Result<ReconcileOutcome, PlanningError> {
    let incoming = validate_ingredient_inputs(inputs)?;
    Ok(reconcile(existing, incoming))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persisted() -> Vec<Ingredient> {
        vec![
            Ingredient::new("Flour", "200", "g").with_id(1),
            Ingredient::new("Milk", "1", "cup").with_id(2),
            Ingredient::new("Eggs", "2", "").with_id(3),
        ]
    }

    #[test]
    fn test_identical_list_is_idempotent() {
        let existing = persisted();
        let outcome = reconcile(&existing, existing.clone());

        assert!(outcome.inserted.is_empty());
        assert!(outcome.deleted.is_empty());
        assert_eq!(outcome.updated, existing);
        assert!(outcome.is_noop(&existing));
    }

    #[test]
    fn test_empty_incoming_deletes_everything() {
        let existing = persisted();
        let outcome = reconcile(&existing, Vec::new());

        assert_eq!(outcome.deleted, existing);
        assert!(outcome.inserted.is_empty());
        assert!(outcome.updated.is_empty());
        assert_eq!(outcome.deleted_ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_items_without_id_are_always_inserted() {
        let existing = persisted();
        let incoming = vec![
            Ingredient::new("Flour", "200", "g"),
            Ingredient::new("Butter", "50", "g"),
        ];
        let outcome = reconcile(&existing, incoming.clone());

        assert_eq!(outcome.inserted, incoming);
        assert!(outcome.updated.is_empty());
        assert_eq!(outcome.deleted.len(), 3);
    }

    #[test]
    fn test_rename_keeps_identity_and_new_item_is_inserted() {
        let existing = vec![Ingredient::new("Salt", "1", "tsp").with_id(1)];
        let incoming = vec![
            Ingredient::new("Pepper", "1", "tsp").with_id(1),
            Ingredient::new("Sugar", "2", "tbsp"),
        ];
        let outcome = reconcile(&existing, incoming);

        assert_eq!(
            outcome.updated,
            vec![Ingredient::new("Pepper", "1", "tsp").with_id(1)]
        );
        assert_eq!(outcome.inserted, vec![Ingredient::new("Sugar", "2", "tbsp")]);
        assert!(outcome.deleted.is_empty());
        assert!(!outcome.is_noop(&existing));
    }

    #[test]
    fn test_unknown_id_becomes_insert_without_id() {
        let existing = persisted();
        let incoming = vec![Ingredient::new("Yeast", "7", "g").with_id(99)];
        let outcome = reconcile(&existing, incoming);

        assert_eq!(outcome.inserted, vec![Ingredient::new("Yeast", "7", "g")]);
        assert!(outcome.updated.is_empty());
    }

    #[test]
    fn test_duplicate_claims_keep_first_occurrence() {
        let existing = persisted();
        let incoming = vec![
            Ingredient::new("Whole wheat flour", "250", "g").with_id(1),
            Ingredient::new("Rye flour", "100", "g").with_id(1),
        ];
        let outcome = reconcile(&existing, incoming);

        assert_eq!(outcome.updated.len(), 1);
        assert_eq!(outcome.updated[0].name, "Whole wheat flour");
        assert_eq!(outcome.discarded.len(), 1);
        assert_eq!(outcome.discarded[0].name, "Rye flour");
        assert_eq!(outcome.deleted_ids(), vec![2, 3]);
    }

    #[test]
    fn test_sets_are_disjoint_by_id() {
        let existing = persisted();
        let incoming = vec![
            Ingredient::new("Milk", "2", "cup").with_id(2),
            Ingredient::new("Sugar", "10", "g"),
        ];
        let outcome = reconcile(&existing, incoming);

        let updated: HashSet<_> = outcome.updated.iter().filter_map(|i| i.id).collect();
        let deleted: HashSet<_> = outcome.deleted_ids().into_iter().collect();
        assert!(updated.is_disjoint(&deleted));
        assert!(outcome.inserted.iter().all(|i| i.id.is_none()));
    }

    #[test]
    fn test_validation_failure_prevents_reconciliation() {
        let existing = persisted();
        let inputs = vec![
            IngredientInput::from(Ingredient::new("Milk", "2", "cup").with_id(2)),
            IngredientInput {
                unit: Some("g".to_owned()),
                ..IngredientInput::default()
            },
        ];

        let result = reconcile_inputs(&existing, inputs);
        assert_eq!(result, Err(PlanningError::missing_field(1, "name")));
    }

    #[test]
    fn test_resulting_ingredients_lists_updates_then_inserts() {
        let existing = persisted();
        let incoming = vec![
            Ingredient::new("Sugar", "10", "g"),
            Ingredient::new("Eggs", "3", "").with_id(3),
        ];
        let names: Vec<String> = reconcile(&existing, incoming)
            .resulting_ingredients()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["Eggs", "Sugar"]);
    }
}
