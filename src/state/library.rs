use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use super::data::{Category, ImageRecord};
use crate::error::{Error, Result};

/// Catalog shipped inside the binary
const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.json");

/// On-disk shape of a catalog file
#[derive(Deserialize)]
struct CatalogFile {
    categories: Vec<Category>,
    images: Vec<ImageRecord>,
}

/// The Catalog is the read-only image set the gallery displays.
/// It stores the image records in display order together with the
/// ordered list of categories the filter bar offers.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    images: Vec<ImageRecord>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog, checking that ids and categories are unique and that
    /// every image uses a declared category.
    pub fn new(images: Vec<ImageRecord>, categories: Vec<Category>) -> Result<Self> {
        let mut seen_categories = HashSet::new();
        for category in &categories {
            if !seen_categories.insert(category) {
                return Err(Error::Catalog(format!("category '{}' declared twice", category)));
            }
        }

        let mut seen_ids = HashSet::new();
        for image in &images {
            if !seen_ids.insert(image.id) {
                return Err(Error::Catalog(format!("duplicate image id {}", image.id)));
            }
            if !seen_categories.contains(&image.category) {
                return Err(Error::Catalog(format!(
                    "image {} uses undeclared category '{}'",
                    image.id, image.category
                )));
            }
        }

        Ok(Catalog { images, categories })
    }

    /// The catalog compiled into the application
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Load a catalog file in the same JSON shape as the built-in one
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;

        tracing::info!("📁 Loaded catalog from {} ({} images)", path.display(), catalog.len());
        Ok(catalog)
    }

    /// Parse a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| Error::Catalog(e.to_string()))?;
        Self::new(file.images, file.categories)
    }

    /// All images in display order
    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    /// Declared categories in filter-bar order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up an image by id
    pub fn get(&self, id: i64) -> Option<&ImageRecord> {
        self.images.iter().find(|image| image.id == id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.get(id).is_some()
    }

    /// Whether the filter bar offers this category
    pub fn declares(&self, category: &Category) -> bool {
        self.categories.contains(category)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
