//! Read-only query facade over the catalog and index.
//!
//! Browsing GUIs, chat commands, and loot displays read the recipe graph
//! exclusively through [`RecipeView`]; nothing here mutates state or
//! caches beyond what the index already holds.

use lumenia_common::RecipeId;

use crate::catalog::{Catalog, Item, Recipe};
use crate::index::RecipeIndex;

/// Borrowed, read-only view of the recipe graph.
#[derive(Debug, Clone, Copy)]
pub struct RecipeView<'a> {
    catalog: &'a Catalog,
    index: &'a RecipeIndex,
}

impl<'a> RecipeView<'a> {
    /// Creates a view over a catalog and its index.
    #[must_use]
    pub fn new(catalog: &'a Catalog, index: &'a RecipeIndex) -> Self {
        Self { catalog, index }
    }

    /// Recipes that produce the given item, in ingestion order.
    #[must_use]
    pub fn produced_by(&self, item_id: &str) -> &'a [RecipeId] {
        self.index.produced_by(item_id)
    }

    /// Recipes that consume the given item, in ingestion order.
    #[must_use]
    pub fn consumed_by(&self, item_id: &str) -> &'a [RecipeId] {
        self.index.consumed_by(item_id)
    }

    /// Direct recipe lookup.
    #[must_use]
    pub fn recipe(&self, id: &str) -> Option<&'a Recipe> {
        self.catalog.recipe(id)
    }

    /// Direct item lookup.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&'a Item> {
        self.catalog.item(id)
    }
}
