//! Synthetic rubble recipe generation.
//!
//! Rock items carrying a `Family` tag are paired with a `Rubble_<family>`
//! item; once both sides of a pair are loaded, a fixed-ratio conversion
//! recipe (1 rock -> 4 rubble, crafted by hand) is derived and fed through
//! the normal recipe ingestion path. Either side of the pair may load
//! first, and either side triggers the same deterministic recipe ID, so
//! generation is idempotent regardless of load order.

use lumenia_common::{ItemId, RecipeId};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Item, MaterialQuantity, Recipe};
use crate::tags;

/// Item ID prefix of derived rubble items.
pub const RUBBLE_PREFIX: &str = "Rubble_";

/// Recipe ID prefix of synthesized rock-to-rubble recipes.
pub const RUBBLE_RECIPE_PREFIX: &str = "lumenia_rubble_from_stone_";

/// Rubble produced per rock consumed.
pub const RUBBLE_PER_ROCK: u32 = 4;

/// Errors that can occur while constructing a synthetic recipe.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// The rock and rubble side of the pair resolved to the same item.
    #[error("conversion input and output are the same item: {0}")]
    SelfConversion(ItemId),
}

/// Deterministic recipe ID for a family's rock-to-rubble conversion.
///
/// The family is lowercased so mixed-case tag values always map to the
/// same ID.
#[must_use]
pub fn conversion_recipe_id(family: &str) -> RecipeId {
    RecipeId::new(format!("{RUBBLE_RECIPE_PREFIX}{}", family.to_lowercase()))
}

/// Derives fixed-ratio rock <-> rubble conversion recipes from item tags.
#[derive(Debug, Default)]
pub struct RubbleSynthesizer;

impl RubbleSynthesizer {
    /// Creates a synthesizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Derives the missing conversion recipe for one item, if the item
    /// completes a rock/rubble pair.
    ///
    /// Returns `None` when the item is neither side of a pair, the
    /// counterpart is not loaded, the recipe already exists, or
    /// construction fails (logged, never propagated).
    #[must_use]
    pub fn derive(&self, catalog: &Catalog, item_id: &ItemId, item: &Item) -> Option<Recipe> {
        // A degenerate item that is both a rock and `Rubble_`-prefixed is
        // classified by the rock path first.
        if let Some(recipe) = self.derive_from_rock(catalog, item_id, item) {
            return Some(recipe);
        }
        self.derive_from_rubble(catalog, item_id)
    }

    /// Trigger path 1: a rock item whose rubble counterpart is loaded.
    fn derive_from_rock(&self, catalog: &Catalog, rock_id: &ItemId, item: &Item) -> Option<Recipe> {
        if !tags::is_source_material(item) {
            return None;
        }
        let family = tags::family_of(item)?;
        if family.is_empty() {
            debug!("Rock item {} has an empty family tag", rock_id);
            return None;
        }

        let rubble_id = format!("{RUBBLE_PREFIX}{family}");
        if !catalog.contains_item(&rubble_id) {
            return None;
        }

        self.build_conversion(catalog, rock_id.clone(), ItemId::new(rubble_id), family)
    }

    /// Trigger path 2: a rubble item whose rock counterpart is loaded.
    fn derive_from_rubble(&self, catalog: &Catalog, rubble_id: &ItemId) -> Option<Recipe> {
        let family = rubble_id.as_str().strip_prefix(RUBBLE_PREFIX)?;
        if family.is_empty() {
            return None;
        }

        let rock_id = find_rock_by_family(catalog, family)?;
        self.build_conversion(catalog, rock_id, rubble_id.clone(), family)
    }

    /// Builds the conversion recipe unless it already exists.
    fn build_conversion(
        &self,
        catalog: &Catalog,
        rock_id: ItemId,
        rubble_id: ItemId,
        family: &str,
    ) -> Option<Recipe> {
        let recipe_id = conversion_recipe_id(family);
        if catalog.contains_recipe(recipe_id.as_str()) {
            debug!("Conversion recipe already exists: {}", recipe_id);
            return None;
        }

        info!(
            "Creating conversion recipe {} (1x {} -> {}x {})",
            recipe_id, rock_id, RUBBLE_PER_ROCK, rubble_id
        );
        match build_conversion_recipe(recipe_id, rock_id, rubble_id) {
            Ok(recipe) => Some(recipe),
            Err(err) => {
                warn!(
                    "Failed to construct conversion recipe for family {}: {}",
                    family, err
                );
                None
            }
        }
    }
}

/// Reverse lookup: a loaded rock item with the given family.
///
/// When several rock items share a family, whichever the catalog yields
/// first wins; the pairing is not required to be unique.
fn find_rock_by_family(catalog: &Catalog, family: &str) -> Option<ItemId> {
    catalog
        .items()
        .find(|(_, item)| tags::is_source_material(item) && tags::family_of(item) == Some(family))
        .map(|(id, _)| id.clone())
}

/// The single construction path for conversion recipes: 1 rock in, 4
/// rubble out, no bench requirement (craftable by hand).
fn build_conversion_recipe(
    recipe_id: RecipeId,
    rock_id: ItemId,
    rubble_id: ItemId,
) -> Result<Recipe, SynthesisError> {
    if rock_id == rubble_id {
        return Err(SynthesisError::SelfConversion(rock_id));
    }

    Ok(Recipe::builder(recipe_id)
        .input(MaterialQuantity::item(rock_id, 1))
        .output(MaterialQuantity::item(rubble_id, RUBBLE_PER_ROCK))
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rock(id: &str, family: &str) -> Item {
        Item::builder(id)
            .tag("Type", &["Rock"])
            .tag("Family", &[family])
            .build()
    }

    fn rubble(id: &str) -> Item {
        Item::builder(id).build()
    }

    fn catalog_with(items: Vec<Item>) -> Catalog {
        let mut catalog = Catalog::new();
        for item in items {
            catalog.insert_item(item);
        }
        catalog
    }

    #[test]
    fn test_rock_path_derives_conversion() {
        let catalog = catalog_with(vec![
            rock("Stone_Granite", "Granite"),
            rubble("Rubble_Granite"),
        ]);
        let synthesizer = RubbleSynthesizer::new();

        let item_id = ItemId::new("Stone_Granite");
        let item = catalog.item("Stone_Granite").expect("item").clone();
        let recipe = synthesizer
            .derive(&catalog, &item_id, &item)
            .expect("conversion derived");

        assert_eq!(recipe.id.as_str(), "lumenia_rubble_from_stone_granite");
        assert_eq!(recipe.outputs.len(), 1);
        assert_eq!(
            recipe.outputs[0],
            MaterialQuantity::item("Rubble_Granite", 4)
        );
        assert!(recipe.bench_requirements.is_empty());
    }

    #[test]
    fn test_rubble_path_derives_conversion() {
        let catalog = catalog_with(vec![
            rock("Stone_Granite", "Granite"),
            rubble("Rubble_Granite"),
        ]);
        let synthesizer = RubbleSynthesizer::new();

        let item_id = ItemId::new("Rubble_Granite");
        let item = catalog.item("Rubble_Granite").expect("item").clone();
        let recipe = synthesizer
            .derive(&catalog, &item_id, &item)
            .expect("conversion derived");

        assert_eq!(recipe.id.as_str(), "lumenia_rubble_from_stone_granite");
        assert_eq!(
            recipe.outputs[0],
            MaterialQuantity::item("Rubble_Granite", 4)
        );
    }

    #[test]
    fn test_no_counterpart_no_recipe() {
        let catalog = catalog_with(vec![rock("Stone_Granite", "Granite")]);
        let synthesizer = RubbleSynthesizer::new();

        let item_id = ItemId::new("Stone_Granite");
        let item = catalog.item("Stone_Granite").expect("item").clone();
        assert!(synthesizer.derive(&catalog, &item_id, &item).is_none());
    }

    #[test]
    fn test_existing_recipe_is_not_regenerated() {
        let mut catalog = catalog_with(vec![
            rock("Stone_Granite", "Granite"),
            rubble("Rubble_Granite"),
        ]);
        catalog.insert_recipe(
            Recipe::builder("lumenia_rubble_from_stone_granite")
                .input(MaterialQuantity::item("Stone_Granite", 1))
                .output(MaterialQuantity::item("Rubble_Granite", 4))
                .build(),
        );
        let synthesizer = RubbleSynthesizer::new();

        let item_id = ItemId::new("Stone_Granite");
        let item = catalog.item("Stone_Granite").expect("item").clone();
        assert!(synthesizer.derive(&catalog, &item_id, &item).is_none());

        let item_id = ItemId::new("Rubble_Granite");
        let item = catalog.item("Rubble_Granite").expect("item").clone();
        assert!(synthesizer.derive(&catalog, &item_id, &item).is_none());
    }

    #[test]
    fn test_mixed_case_family_lowers_into_recipe_id() {
        assert_eq!(
            conversion_recipe_id("BasaltDark").as_str(),
            "lumenia_rubble_from_stone_basaltdark"
        );
        assert_eq!(
            conversion_recipe_id("basaltdark").as_str(),
            "lumenia_rubble_from_stone_basaltdark"
        );
    }

    #[test]
    fn test_empty_family_rubble_item_is_noop() {
        let catalog = catalog_with(vec![rubble("Rubble_")]);
        let synthesizer = RubbleSynthesizer::new();

        let item_id = ItemId::new("Rubble_");
        let item = catalog.item("Rubble_").expect("item").clone();
        assert!(synthesizer.derive(&catalog, &item_id, &item).is_none());
    }

    #[test]
    fn test_rock_without_family_is_noop() {
        let catalog = catalog_with(vec![
            Item::builder("Stone_Odd").tag("Type", &["Rock"]).build(),
            rubble("Rubble_Odd"),
        ]);
        let synthesizer = RubbleSynthesizer::new();

        let item_id = ItemId::new("Stone_Odd");
        let item = catalog.item("Stone_Odd").expect("item").clone();
        assert!(synthesizer.derive(&catalog, &item_id, &item).is_none());
    }

    #[test]
    fn test_self_conversion_is_refused() {
        // A rock item that is itself the rubble of its family.
        let catalog = catalog_with(vec![rock("Rubble_Granite", "Granite")]);
        let synthesizer = RubbleSynthesizer::new();

        let item_id = ItemId::new("Rubble_Granite");
        let item = catalog.item("Rubble_Granite").expect("item").clone();
        assert!(synthesizer.derive(&catalog, &item_id, &item).is_none());
    }
}
