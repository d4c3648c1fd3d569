//! Shared data structures for the application state
//!
//! These structs represent the data model that flows between
//! the catalog and the UI layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A category tag (e.g. "landscape")
///
/// The set of valid tags is declared by the catalog, not by this type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(tag: impl Into<String>) -> Self {
        Category(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tag with its first letter capitalized, for filter buttons
    pub fn label(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The active grid filter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// Show every image
    #[default]
    All,
    /// Show only images tagged with this category
    Only(Category),
}

impl CategoryFilter {
    /// Whether an image with `category` passes this filter
    pub fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }

    pub fn label(&self) -> String {
        match self {
            CategoryFilter::All => "All".to_string(),
            CategoryFilter::Only(category) => category.label(),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => category.fmt(f),
        }
    }
}

/// Represents a single image in the gallery
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ImageRecord {
    /// Unique catalog ID
    pub id: i64,
    /// Path to the image file, absolute or relative to the image root
    pub src: String,
    /// Display title
    pub title: String,
    /// One-line caption shown under the title
    pub description: String,
    /// Category tag; must be declared by the catalog
    pub category: Category,
    /// Base like count, fixed at load time
    pub likes: u32,
}
