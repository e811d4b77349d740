//! Catalog asset loading and batch delivery.
//!
//! This module provides:
//! - Loading item definitions from `<base>/items/*.toml`
//! - Loading recipe definitions from `<base>/recipes/*.toml`
//! - Validation before registration, with warn-and-continue on failure
//! - Delivery of per-file batches into a [`RecipeBook`]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use lumenia_common::{ItemId, RecipeId};
use lumenia_recipes::book::RecipeBook;
use lumenia_recipes::catalog::{BenchRequirement, Item, MaterialQuantity, Recipe, RecipeFields};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default asset path for the catalog.
pub const DEFAULT_ASSET_PATH: &str = "assets";

/// Item files directory under the base path.
const ITEMS_DIR: &str = "items";

/// Recipe files directory under the base path.
const RECIPES_DIR: &str = "recipes";

/// Errors that can occur during asset loading.
#[derive(Debug, Error)]
pub enum AssetLoadError {
    /// Failed to read file.
    #[error("Failed to read asset file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML.
    #[error("Failed to parse asset TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Validation error.
    #[error("Asset validation error: {0}")]
    ValidationError(String),
}

/// Result type for asset loading operations.
pub type AssetLoadResult<T> = Result<T, AssetLoadError>;

/// An item definition loaded from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Unique item identifier.
    pub id: String,
    /// Raw classification tags.
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
    64
}

impl ItemDefinition {
    /// Validates the item definition.
    pub fn validate(&self) -> AssetLoadResult<()> {
        if self.id.is_empty() {
            return Err(AssetLoadError::ValidationError(
                "item has empty id".to_string(),
            ));
        }
        if self.stack_size == 0 {
            return Err(AssetLoadError::ValidationError(format!(
                "item {} has zero stack size",
                self.id
            )));
        }
        Ok(())
    }

    /// Converts to a catalog item.
    #[must_use]
    pub fn to_item(&self) -> Item {
        Item {
            id: ItemId::new(&self.id),
            tags: self.tags.clone(),
            translation_key: self.translation_key.clone(),
            stack_size: self.stack_size,
        }
    }
}

/// A collection of items from a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemFile {
    /// File format version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Items in this file.
    pub items: Vec<ItemDefinition>,
}

/// A recipe definition loaded from file.
///
/// Outputs and bench requirements have one canonical shape; the input
/// field is kept raw because its name and shape drift between catalog
/// releases (see `lumenia_recipes::resolver`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDefinition {
    /// Unique recipe identifier.
    pub id: String,
    /// Produced materials.
    pub outputs: Vec<MaterialQuantity>,
    /// Benches required to craft this recipe; empty means hand craft.
    #[serde(default)]
    pub bench_requirements: Vec<BenchRequirement>,
    /// Raw input fields, passed through verbatim.
    #[serde(flatten)]
    pub fields: RecipeFields,
}

impl RecipeDefinition {
    /// Validates the recipe definition.
    pub fn validate(&self) -> AssetLoadResult<()> {
        if self.id.is_empty() {
            return Err(AssetLoadError::ValidationError(
                "recipe has empty id".to_string(),
            ));
        }
        if self.outputs.is_empty() {
            return Err(AssetLoadError::ValidationError(format!(
                "recipe {} has no outputs",
                self.id
            )));
        }
        for (i, output) in self.outputs.iter().enumerate() {
            if output.quantity == 0 {
                return Err(AssetLoadError::ValidationError(format!(
                    "recipe {} output {} has zero quantity",
                    self.id, i
                )));
            }
        }
        Ok(())
    }

    /// Converts to a catalog recipe.
    #[must_use]
    pub fn to_recipe(&self) -> Recipe {
        Recipe {
            id: RecipeId::new(&self.id),
            outputs: self.outputs.clone(),
            bench_requirements: self.bench_requirements.clone(),
            fields: self.fields.clone(),
        }
    }
}

/// A collection of recipes from a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeFile {
    /// File format version.
    #[serde(default = "default_version")]
    pub version: String,
    /// Recipes in this file.
    pub recipes: Vec<RecipeDefinition>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// Statistics for the catalog loader.
#[derive(Debug, Default, Clone)]
pub struct LoaderStats {
    /// Number of files loaded.
    pub files_loaded: u32,
    /// Number of items loaded.
    pub items_loaded: u32,
    /// Number of recipes loaded.
    pub recipes_loaded: u32,
    /// Number of validation errors.
    pub validation_errors: u32,
}

/// Catalog asset loader.
///
/// Walks the item and recipe directories under a base path and delivers
/// each file's definitions as one batch to a [`RecipeBook`], so the
/// ingestion core sees the same batch granularity the host asset store
/// produces.
pub struct CatalogLoader {
    /// Base path for asset files.
    base_path: PathBuf,
    /// Statistics.
    stats: LoaderStats,
}

impl CatalogLoader {
    /// Creates a new catalog loader.
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        info!("Initializing catalog loader at: {:?}", base_path);

        Self {
            base_path,
            stats: LoaderStats::default(),
        }
    }

    /// Creates a loader with the default path.
    #[must_use]
    pub fn with_default_path() -> Self {
        Self::new(DEFAULT_ASSET_PATH)
    }

    /// Returns the base path.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns loader statistics.
    #[must_use]
    pub fn stats(&self) -> &LoaderStats {
        &self.stats
    }

    /// Loads all catalog assets and delivers them to the book.
    ///
    /// Items load before recipes, though the core tolerates any order. A
    /// file that fails to read or parse is skipped with a warning;
    /// remaining files still load.
    pub fn load_all(&mut self, book: &mut RecipeBook) -> AssetLoadResult<()> {
        if !self.base_path.exists() {
            info!(
                "Asset directory does not exist, creating: {:?}",
                self.base_path
            );
            fs::create_dir_all(&self.base_path)?;
            return Ok(());
        }

        for path in toml_files(&self.base_path.join(ITEMS_DIR))? {
            if let Err(e) = self.load_items_file(&path, book) {
                warn!("Failed to load item file {:?}: {}", path, e);
                self.stats.validation_errors += 1;
            }
        }

        for path in toml_files(&self.base_path.join(RECIPES_DIR))? {
            if let Err(e) = self.load_recipes_file(&path, book) {
                warn!("Failed to load recipe file {:?}: {}", path, e);
                self.stats.validation_errors += 1;
            }
        }

        info!(
            "Loaded {} items and {} recipes from {} files",
            self.stats.items_loaded, self.stats.recipes_loaded, self.stats.files_loaded
        );

        Ok(())
    }

    /// Loads items from a single file and delivers them as one batch.
    pub fn load_items_file(&mut self, path: &Path, book: &mut RecipeBook) -> AssetLoadResult<()> {
        debug!("Loading item file: {:?}", path);

        let content = fs::read_to_string(path)?;
        let item_file: ItemFile = toml::from_str(&content)?;

        let mut batch = Vec::new();
        for item in item_file.items {
            if let Err(e) = item.validate() {
                warn!("Invalid item in {:?}: {}", path, e);
                self.stats.validation_errors += 1;
                continue;
            }
            batch.push(item.to_item());
        }

        self.stats.files_loaded += 1;
        self.stats.items_loaded += batch.len() as u32;
        debug!("Loaded {} items from {:?}", batch.len(), path);

        book.on_items_loaded(batch);
        Ok(())
    }

    /// Loads recipes from a single file and delivers them as one batch.
    pub fn load_recipes_file(&mut self, path: &Path, book: &mut RecipeBook) -> AssetLoadResult<()> {
        debug!("Loading recipe file: {:?}", path);

        let content = fs::read_to_string(path)?;
        let recipe_file: RecipeFile = toml::from_str(&content)?;

        let mut batch = Vec::new();
        for recipe in recipe_file.recipes {
            if let Err(e) = recipe.validate() {
                warn!("Invalid recipe in {:?}: {}", path, e);
                self.stats.validation_errors += 1;
                continue;
            }
            batch.push(recipe.to_recipe());
        }

        self.stats.files_loaded += 1;
        self.stats.recipes_loaded += batch.len() as u32;
        debug!("Loaded {} recipes from {:?}", batch.len(), path);

        book.on_recipes_loaded(batch);
        Ok(())
    }
}

/// Lists the TOML files in a directory, in name order so load order is
/// deterministic. A missing directory yields no files.
fn toml_files(dir: &Path) -> AssetLoadResult<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();
    Ok(paths)
}
