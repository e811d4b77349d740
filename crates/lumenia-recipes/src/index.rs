//! Bidirectional recipe index.
//!
//! This module provides:
//! - `produced_by`: item ID -> recipes that produce it
//! - `consumed_by`: item ID -> recipes that consume it
//! - Idempotent ingestion and tolerant removal of recipe batches
//!
//! For every recipe currently indexed, each output item maps back to the
//! recipe's ID and each resolved input item does the same; removal restores
//! both maps exactly. Insertion order within a map entry is the order
//! batches were processed and is never re-sorted.

use lumenia_common::{ItemId, RecipeId};
use std::collections::{HashMap, HashSet};

use crate::catalog::Recipe;
use crate::resolver::InputResolver;

/// Derived bidirectional index over the recipe catalog.
#[derive(Debug, Default)]
pub struct RecipeIndex {
    /// Item ID -> recipe IDs that produce it, in ingestion order.
    produced_by: HashMap<ItemId, Vec<RecipeId>>,
    /// Item ID -> recipe IDs that consume it, in ingestion order.
    consumed_by: HashMap<ItemId, Vec<RecipeId>>,
    /// Recipe IDs currently indexed; guards idempotent re-delivery.
    indexed: HashSet<RecipeId>,
    /// Input field resolution, shared by insert and remove.
    resolver: InputResolver,
}

impl RecipeIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes a recipe.
    ///
    /// Re-delivery of an already indexed ID is a no-op; the host is
    /// expected to re-send batches and edges must not duplicate. Input
    /// entries without an item reference (resource-typed or unknown
    /// materials) contribute no edges.
    pub fn insert(&mut self, recipe: &Recipe) {
        if self.indexed.contains(&recipe.id) {
            return;
        }

        for output in &recipe.outputs {
            if let Some(item_id) = &output.item_id {
                self.produced_by
                    .entry(item_id.clone())
                    .or_default()
                    .push(recipe.id.clone());
            }
        }

        for input in self.resolver.resolve(recipe) {
            if let Some(item_id) = input.item_id {
                self.consumed_by
                    .entry(item_id)
                    .or_default()
                    .push(recipe.id.clone());
            }
        }

        self.indexed.insert(recipe.id.clone());
    }

    /// Unindexes a recipe. Removing an ID that was never indexed is a no-op.
    pub fn remove(&mut self, recipe: &Recipe) {
        if !self.indexed.remove(&recipe.id) {
            return;
        }

        for output in &recipe.outputs {
            if let Some(item_id) = &output.item_id {
                remove_edge(&mut self.produced_by, item_id, &recipe.id);
            }
        }

        for input in self.resolver.resolve(recipe) {
            if let Some(item_id) = &input.item_id {
                remove_edge(&mut self.consumed_by, item_id, &recipe.id);
            }
        }
    }

    /// Recipes that produce the given item, in ingestion order.
    #[must_use]
    pub fn produced_by(&self, item_id: &str) -> &[RecipeId] {
        self.produced_by.get(item_id).map_or(&[], Vec::as_slice)
    }

    /// Recipes that consume the given item, in ingestion order.
    #[must_use]
    pub fn consumed_by(&self, item_id: &str) -> &[RecipeId] {
        self.consumed_by.get(item_id).map_or(&[], Vec::as_slice)
    }

    /// Checks whether a recipe is currently indexed.
    #[must_use]
    pub fn contains(&self, recipe_id: &str) -> bool {
        self.indexed.contains(recipe_id)
    }

    /// Returns the number of indexed recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indexed.len()
    }

    /// Returns true if no recipes are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indexed.is_empty()
    }
}

/// Removes one recipe edge from an index map, dropping the entry when it
/// empties.
fn remove_edge(map: &mut HashMap<ItemId, Vec<RecipeId>>, item_id: &ItemId, recipe_id: &RecipeId) {
    if let Some(entries) = map.get_mut(item_id) {
        entries.retain(|id| id != recipe_id);
        if entries.is_empty() {
            map.remove(item_id);
        }
    }
}
