//! Resolution of recipe input fields across catalog schema versions.
//!
//! The field name under which the catalog exposes a recipe's inputs is not
//! contractually fixed: releases have shipped it as `input`, `inputs`,
//! `ingredients`, and others, holding either a single entry or a list.
//! [`InputResolver`] probes the known names in priority order, normalizes
//! whatever shape it finds into one flat sequence, and caches the winning
//! name for subsequent lookups.

use tracing::warn;

use crate::catalog::{InputsValue, MaterialQuantity, Recipe};

/// Canonical input field name, written by [`crate::catalog::RecipeBuilder`]
/// and probed first.
pub const CANONICAL_INPUT_FIELD: &str = "input";

/// Input field names probed in priority order.
pub const INPUT_FIELD_CANDIDATES: [&str; 6] = [
    CANONICAL_INPUT_FIELD,
    "inputs",
    "ingredients",
    "materials",
    "recipe_inputs",
    "required_materials",
];

/// Resolves recipe inputs against a drifting catalog schema.
///
/// The cache is an optimization only: a cold lookup and a cached lookup
/// return the same sequence for the same recipe.
#[derive(Debug, Default)]
pub struct InputResolver {
    /// Field name that resolved successfully, if any.
    resolved_field: Option<&'static str>,
    /// Whether the schema-miss warning has been emitted.
    warned_miss: bool,
}

impl InputResolver {
    /// Creates a resolver with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the field name that resolved on a previous lookup, if any.
    #[must_use]
    pub fn resolved_field(&self) -> Option<&'static str> {
        self.resolved_field
    }

    /// Returns the recipe's inputs as one flat ordered sequence.
    ///
    /// An empty sequence means "ingredients not known for this recipe";
    /// it is not an error and callers must not treat it as one.
    pub fn resolve(&mut self, recipe: &Recipe) -> Vec<MaterialQuantity> {
        if let Some(field) = self.resolved_field {
            if let Some(value) = recipe.fields.get(field) {
                return normalize(value);
            }
            // The cached name is missing on this record; fall through to a
            // full probe so cached and cold lookups agree.
        }

        if let Some((candidate, value)) = probe(recipe) {
            self.resolved_field = Some(candidate);
            return normalize(value);
        }

        if !self.warned_miss {
            warn!(
                "No known input field on recipe {}; inputs treated as unknown",
                recipe.id
            );
            self.warned_miss = true;
        }
        Vec::new()
    }
}

/// Resolves a recipe's inputs without a cache.
///
/// Cold equivalent of [`InputResolver::resolve`], for recipe helpers that
/// have no resolver in scope.
#[must_use]
pub fn resolve_inputs(recipe: &Recipe) -> Vec<MaterialQuantity> {
    probe(recipe).map_or_else(Vec::new, |(_, value)| normalize(value))
}

/// Probes the candidate field names in priority order.
fn probe(recipe: &Recipe) -> Option<(&'static str, &InputsValue)> {
    INPUT_FIELD_CANDIDATES
        .iter()
        .find_map(|name| recipe.fields.get(name).map(|value| (*name, value)))
}

/// Flattens an input field value into a canonical entry sequence,
/// dropping null holes.
fn normalize(value: &InputsValue) -> Vec<MaterialQuantity> {
    match value {
        InputsValue::Single(entry) => vec![entry.clone()],
        InputsValue::Many(entries) => entries.iter().flatten().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RecipeFields;

    fn granite_entry(quantity: u32) -> MaterialQuantity {
        MaterialQuantity::item("Stone_Granite", quantity)
    }

    fn recipe_with_field(name: &str, value: InputsValue) -> Recipe {
        let mut recipe = Recipe::builder("test")
            .output(MaterialQuantity::item("Rubble_Granite", 4))
            .build();
        recipe.fields = RecipeFields::new();
        recipe.fields.insert(name, value);
        recipe
    }

    #[test]
    fn test_resolves_canonical_field() {
        let mut resolver = InputResolver::new();
        let recipe = recipe_with_field("input", InputsValue::Single(granite_entry(1)));

        let inputs = resolver.resolve(&recipe);
        assert_eq!(inputs, vec![granite_entry(1)]);
        assert_eq!(resolver.resolved_field(), Some("input"));
    }

    #[test]
    fn test_resolves_fallback_field() {
        let mut resolver = InputResolver::new();
        let recipe = recipe_with_field(
            "ingredients",
            InputsValue::Many(vec![Some(granite_entry(1)), Some(granite_entry(2))]),
        );

        let inputs = resolver.resolve(&recipe);
        assert_eq!(inputs.len(), 2);
        assert_eq!(resolver.resolved_field(), Some("ingredients"));
    }

    #[test]
    fn test_normalizes_single_to_sequence() {
        let mut resolver = InputResolver::new();
        let recipe = recipe_with_field("inputs", InputsValue::Single(granite_entry(3)));

        assert_eq!(resolver.resolve(&recipe), vec![granite_entry(3)]);
    }

    #[test]
    fn test_filters_null_holes() {
        let mut resolver = InputResolver::new();
        let recipe = recipe_with_field(
            "input",
            InputsValue::Many(vec![None, Some(granite_entry(1)), None]),
        );

        assert_eq!(resolver.resolve(&recipe), vec![granite_entry(1)]);
    }

    #[test]
    fn test_unresolvable_yields_empty() {
        let mut resolver = InputResolver::new();
        let mut recipe = Recipe::builder("test")
            .output(MaterialQuantity::item("Rubble_Granite", 4))
            .build();
        recipe.fields = RecipeFields::new();

        assert!(resolver.resolve(&recipe).is_empty());
        assert_eq!(resolver.resolved_field(), None);
    }

    #[test]
    fn test_cached_miss_falls_back_to_probe() {
        let mut resolver = InputResolver::new();
        let canonical = recipe_with_field("input", InputsValue::Single(granite_entry(1)));
        let drifted = recipe_with_field("materials", InputsValue::Single(granite_entry(2)));

        assert_eq!(resolver.resolve(&canonical), vec![granite_entry(1)]);
        // The cache points at "input", which the drifted record lacks.
        assert_eq!(resolver.resolve(&drifted), vec![granite_entry(2)]);
        assert_eq!(resolver.resolved_field(), Some("materials"));
    }

    #[test]
    fn test_shapes_parse_from_raw_records() {
        // Catalog records arrive as JSON-like documents; both input shapes
        // must deserialize into the same normalized sequence.
        let single: Recipe = serde_json::from_str(
            r#"{
                "id": "r_single",
                "outputs": [{ "item_id": "Plank", "quantity": 2 }],
                "input": { "item_id": "Log", "quantity": 1 }
            }"#,
        )
        .expect("parse single-shape record");

        let listed: Recipe = serde_json::from_str(
            r#"{
                "id": "r_listed",
                "outputs": [{ "item_id": "Plank", "quantity": 2 }],
                "ingredients": [{ "item_id": "Log", "quantity": 1 }, null]
            }"#,
        )
        .expect("parse list-shape record");

        let mut resolver = InputResolver::new();
        let expected = vec![MaterialQuantity::item("Log", 1)];
        assert_eq!(resolver.resolve(&single), expected);
        assert_eq!(resolver.resolve(&listed), expected);
    }

    #[test]
    fn test_uncached_resolution_matches_cached() {
        let mut resolver = InputResolver::new();
        let recipe = recipe_with_field(
            "materials",
            InputsValue::Many(vec![Some(granite_entry(2)), None]),
        );

        assert_eq!(resolve_inputs(&recipe), resolver.resolve(&recipe));
        assert_eq!(resolve_inputs(&recipe), vec![granite_entry(2)]);
    }

    #[test]
    fn test_builder_recipes_resolve_via_canonical_field() {
        let recipe = Recipe::builder("built")
            .input(granite_entry(1))
            .output(MaterialQuantity::item("Rubble_Granite", 4))
            .build();

        let mut resolver = InputResolver::new();
        assert_eq!(resolver.resolve(&recipe), vec![granite_entry(1)]);
        assert_eq!(resolver.resolved_field(), Some(CANONICAL_INPUT_FIELD));
    }
}
