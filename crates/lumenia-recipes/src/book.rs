//! Catalog ingestion pipeline binding catalog, index, and synthesis.
//!
//! The host delivers load/remove batches synchronously on one thread; all
//! mutation happens here, in delivery order. Synthetic rubble recipes
//! re-enter through the same ingestion path as catalog recipes, so the
//! index never distinguishes the two.

use lumenia_common::RecipeId;
use tracing::{debug, info};

use crate::catalog::{Catalog, Item, Recipe};
use crate::gateway::RecipeView;
use crate::index::RecipeIndex;
use crate::synthesis::RubbleSynthesizer;

/// Owns the live catalog, its derived index, and the rubble synthesizer.
#[derive(Debug, Default)]
pub struct RecipeBook {
    catalog: Catalog,
    index: RecipeIndex,
    synthesizer: RubbleSynthesizer,
}

impl RecipeBook {
    /// Creates an empty recipe book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests an item-load batch, then derives any missing rubble
    /// conversion recipes.
    ///
    /// The derivation pass always rescans every known item: the two sides
    /// of a rock/rubble pair need not arrive in the same batch, or in any
    /// particular order.
    pub fn on_items_loaded(&mut self, items: Vec<Item>) {
        let batch_size = items.len();
        for item in items {
            self.catalog.insert_item(item);
        }
        debug!(
            "Ingested item batch of {} ({} items known)",
            batch_size,
            self.catalog.item_count()
        );

        self.synthesize_missing();
    }

    /// Ingests a recipe-load batch.
    ///
    /// Re-delivered IDs overwrite the catalog snapshot but never duplicate
    /// index edges.
    pub fn on_recipes_loaded(&mut self, recipes: Vec<Recipe>) {
        let batch_size = recipes.len();
        for recipe in recipes {
            self.index.insert(&recipe);
            self.catalog.insert_recipe(recipe);
        }
        debug!(
            "Ingested recipe batch of {} ({} recipes known)",
            batch_size,
            self.catalog.recipe_count()
        );
    }

    /// Removes recipes from the catalog and prunes their index entries.
    ///
    /// IDs that were never loaded are ignored.
    pub fn on_recipes_removed(&mut self, ids: &[RecipeId]) {
        for id in ids {
            if let Some(recipe) = self.catalog.remove_recipe(id.as_str()) {
                self.index.remove(&recipe);
            }
        }
    }

    /// Read-only query surface for presentation and command layers.
    #[must_use]
    pub fn view(&self) -> RecipeView<'_> {
        RecipeView::new(&self.catalog, &self.index)
    }

    /// The live catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The derived index.
    #[must_use]
    pub fn index(&self) -> &RecipeIndex {
        &self.index
    }

    /// Scans all known items and ingests any conversion recipes that are
    /// newly derivable.
    fn synthesize_missing(&mut self) {
        let mut synthesized: Vec<Recipe> = Vec::new();
        for (item_id, item) in self.catalog.items() {
            if let Some(recipe) = self.synthesizer.derive(&self.catalog, item_id, item) {
                // Both sides of a pair can derive the same recipe within
                // one pass; keep the first.
                if synthesized.iter().all(|r| r.id != recipe.id) {
                    synthesized.push(recipe);
                }
            }
        }

        if !synthesized.is_empty() {
            info!("Ingesting {} synthesized recipes", synthesized.len());
            self.on_recipes_loaded(synthesized);
        }
    }
}
