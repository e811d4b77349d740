//! Catalog data model and the owned item/recipe store.
//!
//! This module provides:
//! - Material quantities referencing items or resource types
//! - Item snapshots with raw classification tags
//! - Recipe snapshots with schema-drifting raw input fields
//! - The [`Catalog`] context owning all currently loaded assets

use lumenia_common::{ItemId, RecipeId, ResourceTypeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::resolver::CANONICAL_INPUT_FIELD;

/// Default stack size for items that do not declare one.
const DEFAULT_STACK_SIZE: u32 = 64;

/// A quantity of some material, referenced by item ID or resource type ID.
///
/// Either reference may be absent; an entry with neither is tolerated and
/// treated as an unknown material (the quantity stays meaningful).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialQuantity {
    /// Item this entry refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    /// Resource type this entry refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type_id: Option<ResourceTypeId>,
    /// Quantity of the material.
    pub quantity: u32,
}

impl MaterialQuantity {
    /// Creates an entry referencing an item.
    #[must_use]
    pub fn item(item_id: impl Into<ItemId>, quantity: u32) -> Self {
        Self {
            item_id: Some(item_id.into()),
            resource_type_id: None,
            quantity,
        }
    }

    /// Creates an entry referencing a resource type.
    #[must_use]
    pub fn resource(resource_type_id: impl Into<ResourceTypeId>, quantity: u32) -> Self {
        Self {
            item_id: None,
            resource_type_id: Some(resource_type_id.into()),
            quantity,
        }
    }

    /// Returns true when neither an item nor a resource type is referenced.
    #[must_use]
    pub fn is_unknown_material(&self) -> bool {
        self.item_id.is_none() && self.resource_type_id.is_none()
    }
}

/// Kind of bench a requirement refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BenchType {
    /// Standard crafting bench.
    #[default]
    Crafting,
    /// Smelting bench (furnace).
    Smelting,
    /// Cooking bench.
    Cooking,
}

impl BenchType {
    /// Get display name for this bench type.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Crafting => "Crafting",
            Self::Smelting => "Smelting",
            Self::Cooking => "Cooking",
        }
    }
}

/// A bench a recipe requires. Display-only pass-through for browsing UIs;
/// an empty requirement list means the recipe is crafted by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchRequirement {
    /// Opaque requirement identifier.
    pub id: String,
    /// Required bench tier.
    pub required_tier_level: u32,
    /// Kind of bench.
    #[serde(default)]
    pub bench_type: BenchType,
    /// UI categories the requirement is listed under.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl BenchRequirement {
    /// Requirement ID used for fieldcraft (hand-adjacent) recipes.
    pub const FIELDCRAFT: &'static str = "Fieldcraft";

    /// Creates a requirement for the given bench.
    #[must_use]
    pub fn new(id: impl Into<String>, required_tier_level: u32, bench_type: BenchType) -> Self {
        Self {
            id: id.into(),
            required_tier_level,
            bench_type,
            categories: Vec::new(),
        }
    }
}

/// An item snapshot as delivered by the host catalog.
///
/// The core never mutates an item; tags drive classification, the rest is
/// presentation pass-through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Item identifier.
    pub id: ItemId,
    /// Raw tags: tag name to list of values.
    #[serde(default)]
    pub tags: HashMap<String, Vec<String>>,
    /// Translation key for display names.
    #[serde(default)]
    pub translation_key: Option<String>,
    /// Maximum stack size.
    #[serde(default = "default_stack_size")]
    pub stack_size: u32,
}

fn default_stack_size() -> u32 {
    DEFAULT_STACK_SIZE
}

impl Item {
    /// Creates a new item builder.
    #[must_use]
    pub fn builder(id: impl Into<ItemId>) -> ItemBuilder {
        ItemBuilder::new(id)
    }

    /// Returns the values of a tag, or an empty slice if the tag is absent.
    #[must_use]
    pub fn tag_values(&self, tag: &str) -> &[String] {
        self.tags.get(tag).map_or(&[], Vec::as_slice)
    }

    /// Checks whether a tag contains a specific value.
    #[must_use]
    pub fn has_tag_value(&self, tag: &str, value: &str) -> bool {
        self.tag_values(tag).iter().any(|v| v == value)
    }
}

/// Builder for creating items.
#[derive(Debug)]
pub struct ItemBuilder {
    id: ItemId,
    tags: HashMap<String, Vec<String>>,
    translation_key: Option<String>,
    stack_size: u32,
}

impl ItemBuilder {
    /// Creates a new item builder.
    fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            tags: HashMap::new(),
            translation_key: None,
            stack_size: DEFAULT_STACK_SIZE,
        }
    }

    /// Sets a tag and its values, replacing any previous values.
    #[must_use]
    pub fn tag(mut self, name: impl Into<String>, values: &[&str]) -> Self {
        self.tags
            .insert(name.into(), values.iter().map(|v| (*v).to_owned()).collect());
        self
    }

    /// Sets the translation key.
    #[must_use]
    pub fn translation_key(mut self, key: impl Into<String>) -> Self {
        self.translation_key = Some(key.into());
        self
    }

    /// Sets the maximum stack size.
    #[must_use]
    pub const fn stack_size(mut self, stack_size: u32) -> Self {
        self.stack_size = stack_size;
        self
    }

    /// Builds the item.
    #[must_use]
    pub fn build(self) -> Item {
        Item {
            id: self.id,
            tags: self.tags,
            translation_key: self.translation_key,
            stack_size: self.stack_size,
        }
    }
}

/// One recipe input field as it appears in a raw catalog record.
///
/// Catalog releases have shipped inputs as a single entry or as a list that
/// may contain null holes; every shape normalizes to one flat sequence
/// (see [`crate::resolver`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputsValue {
    /// A single material entry.
    Single(MaterialQuantity),
    /// A list of entries, possibly containing nulls.
    Many(Vec<Option<MaterialQuantity>>),
}

/// Raw, schema-drifting fields of a catalog recipe record.
///
/// The field name carrying a recipe's inputs is not contractually fixed
/// across catalog releases; whatever fields the record shipped with are
/// kept verbatim and probed by [`crate::resolver::InputResolver`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeFields(HashMap<String, InputsValue>);

impl RecipeFields {
    /// Creates an empty field map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a field's value, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&InputsValue> {
        self.0.get(name)
    }

    /// Sets a field's value.
    pub fn insert(&mut self, name: impl Into<String>, value: InputsValue) {
        self.0.insert(name.into(), value);
    }

    /// Returns true if no fields are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A recipe snapshot as delivered by the host catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe identifier.
    pub id: RecipeId,
    /// Produced materials, in declaration order.
    pub outputs: Vec<MaterialQuantity>,
    /// Benches required to craft this recipe; empty means hand craft.
    #[serde(default)]
    pub bench_requirements: Vec<BenchRequirement>,
    /// Raw input fields in whatever shape the catalog shipped them.
    #[serde(flatten)]
    pub fields: RecipeFields,
}

impl Recipe {
    /// Creates a new recipe builder.
    #[must_use]
    pub fn builder(id: impl Into<RecipeId>) -> RecipeBuilder {
        RecipeBuilder::new(id)
    }

    /// Checks if this recipe produces the given item.
    #[must_use]
    pub fn produces_item(&self, item_id: &str) -> bool {
        self.outputs
            .iter()
            .any(|o| o.item_id.as_ref().is_some_and(|id| id.as_str() == item_id))
    }

    /// Checks if this recipe consumes the given item.
    ///
    /// Inputs are resolved through the field probe, so the answer is the
    /// same regardless of which catalog release shipped the recipe.
    #[must_use]
    pub fn uses_item(&self, item_id: &str) -> bool {
        crate::resolver::resolve_inputs(self)
            .iter()
            .any(|i| i.item_id.as_ref().is_some_and(|id| id.as_str() == item_id))
    }
}

/// Builder for creating recipes.
///
/// This is the only construction path for recipes originating inside this
/// core; inputs are written under the canonical field name so they resolve
/// on any catalog version.
#[derive(Debug)]
pub struct RecipeBuilder {
    id: RecipeId,
    inputs: Vec<MaterialQuantity>,
    outputs: Vec<MaterialQuantity>,
    bench_requirements: Vec<BenchRequirement>,
}

impl RecipeBuilder {
    /// Creates a new recipe builder.
    fn new(id: impl Into<RecipeId>) -> Self {
        Self {
            id: id.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            bench_requirements: Vec::new(),
        }
    }

    /// Adds an input material.
    #[must_use]
    pub fn input(mut self, input: MaterialQuantity) -> Self {
        self.inputs.push(input);
        self
    }

    /// Adds an output material.
    #[must_use]
    pub fn output(mut self, output: MaterialQuantity) -> Self {
        self.outputs.push(output);
        self
    }

    /// Adds a bench requirement.
    #[must_use]
    pub fn bench_requirement(mut self, requirement: BenchRequirement) -> Self {
        self.bench_requirements.push(requirement);
        self
    }

    /// Builds the recipe.
    ///
    /// # Panics
    /// Panics if no output was set.
    #[must_use]
    pub fn build(self) -> Recipe {
        assert!(!self.outputs.is_empty(), "recipe must have an output");

        let mut fields = RecipeFields::new();
        fields.insert(
            CANONICAL_INPUT_FIELD,
            InputsValue::Many(self.inputs.into_iter().map(Some).collect()),
        );

        Recipe {
            id: self.id,
            outputs: self.outputs,
            bench_requirements: self.bench_requirements,
            fields,
        }
    }
}

/// Owned store of all currently loaded items and recipes.
///
/// The catalog is constructed at session start and passed by reference to
/// every component that needs it; assets are created and destroyed only
/// through load/remove batches.
#[derive(Debug, Default)]
pub struct Catalog {
    /// All loaded items by ID.
    items: HashMap<ItemId, Item>,
    /// All loaded recipes by ID.
    recipes: HashMap<RecipeId, Recipe>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an item.
    pub fn insert_item(&mut self, item: Item) {
        self.items.insert(item.id.clone(), item);
    }

    /// Inserts or replaces a recipe.
    pub fn insert_recipe(&mut self, recipe: Recipe) {
        self.recipes.insert(recipe.id.clone(), recipe);
    }

    /// Removes a recipe, returning it if it was present.
    pub fn remove_recipe(&mut self, id: &str) -> Option<Recipe> {
        self.recipes.remove(id)
    }

    /// Gets an item by ID.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Gets a recipe by ID.
    #[must_use]
    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    /// Checks whether an item is loaded.
    #[must_use]
    pub fn contains_item(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Checks whether a recipe is loaded.
    #[must_use]
    pub fn contains_recipe(&self, id: &str) -> bool {
        self.recipes.contains_key(id)
    }

    /// Iterates over all loaded items.
    pub fn items(&self) -> impl Iterator<Item = (&ItemId, &Item)> {
        self.items.iter()
    }

    /// Iterates over all loaded recipes.
    pub fn recipes(&self) -> impl Iterator<Item = (&RecipeId, &Recipe)> {
        self.recipes.iter()
    }

    /// Returns the number of loaded items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of loaded recipes.
    #[must_use]
    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }
}
