//! Tag-driven item classification.
//!
//! Source materials and their derived variants are paired through two raw
//! tags: `Type` (contains `Rock` for source materials) and `Family` (the
//! grouping string). Missing or malformed tag structures are common and
//! classify silently as negative.

use crate::catalog::Item;

/// Tag holding an item's coarse type classification.
pub const TYPE_TAG: &str = "Type";

/// Tag grouping a source material with its derived variants.
pub const FAMILY_TAG: &str = "Family";

/// `Type` tag value marking a source (rock) material.
pub const ROCK_TYPE: &str = "Rock";

/// Checks whether an item is a source rock material.
#[must_use]
pub fn is_source_material(item: &Item) -> bool {
    item.has_tag_value(TYPE_TAG, ROCK_TYPE)
}

/// Returns the item's family, taken from the first `Family` tag value.
#[must_use]
pub fn family_of(item: &Item) -> Option<&str> {
    item.tag_values(FAMILY_TAG).first().map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rock_classification() {
        let rock = Item::builder("Stone_Granite")
            .tag("Type", &["Rock"])
            .build();
        let wood = Item::builder("Log_Oak").tag("Type", &["Wood"]).build();

        assert!(is_source_material(&rock));
        assert!(!is_source_material(&wood));
    }

    #[test]
    fn test_rock_among_multiple_type_values() {
        let item = Item::builder("Stone_Granite")
            .tag("Type", &["Block", "Rock"])
            .build();
        assert!(is_source_material(&item));
    }

    #[test]
    fn test_missing_tags_classify_negative() {
        let item = Item::builder("Mystery").build();
        assert!(!is_source_material(&item));
        assert_eq!(family_of(&item), None);
    }

    #[test]
    fn test_empty_tag_value_list() {
        let item = Item::builder("Stone_Granite")
            .tag("Type", &[])
            .tag("Family", &[])
            .build();
        assert!(!is_source_material(&item));
        assert_eq!(family_of(&item), None);
    }

    #[test]
    fn test_family_takes_first_value() {
        let item = Item::builder("Stone_Granite")
            .tag("Family", &["Granite", "Igneous"])
            .build();
        assert_eq!(family_of(&item), Some("Granite"));
    }
}
