//! # Lumenia Recipes
//!
//! Recipe graph index and synthetic recipe generation for Lumenia.
//!
//! This crate provides the ingestion-side core the browsing and command
//! layers read from:
//! - Catalog data model and the owned item/recipe store
//! - Input field resolution across drifting catalog schemas
//! - The bidirectional produced-by / consumed-by recipe index
//! - Tag-driven item classification
//! - Rubble conversion recipe synthesis
//! - The read-only query facade

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod book;
pub mod catalog;
pub mod gateway;
pub mod index;
pub mod resolver;
pub mod synthesis;
pub mod tags;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::book::*;
    pub use crate::catalog::*;
    pub use crate::gateway::*;
    pub use crate::index::*;
    pub use crate::resolver::*;
    pub use crate::synthesis::*;
    pub use crate::tags::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use lumenia_common::RecipeId;

    #[test]
    fn test_catalog_recipe_flows_into_index() {
        let mut book = RecipeBook::new();
        book.on_recipes_loaded(vec![Recipe::builder("plank_from_log")
            .input(MaterialQuantity::item("Log_Oak", 1))
            .output(MaterialQuantity::item("Plank_Oak", 4))
            .build()]);

        let view = book.view();
        assert_eq!(
            view.produced_by("Plank_Oak"),
            [RecipeId::new("plank_from_log")]
        );
        assert_eq!(
            view.consumed_by("Log_Oak"),
            [RecipeId::new("plank_from_log")]
        );
    }

    #[test]
    fn test_rock_pair_synthesizes_hand_recipe() {
        let mut book = RecipeBook::new();
        book.on_items_loaded(vec![
            Item::builder("Stone_Slate")
                .tag("Type", &["Rock"])
                .tag("Family", &["Slate"])
                .build(),
            Item::builder("Rubble_Slate").build(),
        ]);

        let view = book.view();
        let recipe = view
            .recipe("lumenia_rubble_from_stone_slate")
            .expect("synthesized recipe");
        assert!(recipe.bench_requirements.is_empty());
        assert_eq!(recipe.outputs, [MaterialQuantity::item("Rubble_Slate", 4)]);
    }
}
