//! Gallery view controller
//!
//! Owns all interactive state of the gallery view (filter, lightbox
//! selection, liked set) and exposes render-ready derived views.
//! Operations never perform side effects; the application shell reacts to
//! state transitions instead.

use std::collections::HashSet;
use thiserror::Error;

use super::data::{Category, CategoryFilter, ImageRecord};
use super::library::Catalog;

/// A request that referenced something outside the current valid sets.
/// Rejected requests leave the state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSelection {
    #[error("category '{0}' is not offered by this gallery")]
    UnknownCategory(Category),
    #[error("image {0} is not in the current view")]
    NotInView(i64),
    #[error("image {0} does not exist")]
    UnknownImage(i64),
    #[error("the lightbox is closed")]
    LightboxClosed,
}

/// Lightbox navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Discrete user intents recognized while the lightbox is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Dismiss,
    Previous,
    Next,
}

/// Mutable view state, created with defaults when the view mounts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryState {
    selected_category: CategoryFilter,
    selected_image: Option<i64>,
    /// Position of `selected_image` in the filtered sequence
    current_index: usize,
    liked: HashSet<i64>,
}

/// The gallery controller: a read-only catalog plus the view state over it
#[derive(Debug, Clone)]
pub struct Gallery {
    catalog: Catalog,
    state: GalleryState,
}

impl Gallery {
    pub fn new(catalog: Catalog) -> Self {
        Gallery {
            catalog,
            state: GalleryState::default(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[cfg(test)]
    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn selected_category(&self) -> &CategoryFilter {
        &self.state.selected_category
    }

    /// Images matching the current filter, in catalog order
    pub fn filtered_images(&self) -> Vec<&ImageRecord> {
        self.catalog
            .images()
            .iter()
            .filter(|image| self.state.selected_category.matches(&image.category))
            .collect()
    }

    /// Position of `id` in the filtered sequence
    fn filtered_position(&self, id: i64) -> Option<usize> {
        self.filtered_images().iter().position(|image| image.id == id)
    }

    /// Change the category filter.
    ///
    /// If the open lightbox image drops out of the new filtered sequence the
    /// lightbox is closed; otherwise its index is recomputed.
    pub fn set_category_filter(&mut self, filter: CategoryFilter) -> Result<(), InvalidSelection> {
        if let CategoryFilter::Only(category) = &filter {
            if !self.catalog.declares(category) {
                return Err(InvalidSelection::UnknownCategory(category.clone()));
            }
        }

        tracing::debug!("Category filter: {} -> {}", self.state.selected_category, filter);
        self.state.selected_category = filter;

        if let Some(id) = self.state.selected_image {
            match self.filtered_position(id) {
                Some(index) => self.state.current_index = index,
                None => {
                    tracing::debug!("Image {} filtered out, closing lightbox", id);
                    self.close_lightbox();
                }
            }
        }

        Ok(())
    }

    /// Open the lightbox on an image of the current filtered sequence
    pub fn open_lightbox(&mut self, id: i64) -> Result<(), InvalidSelection> {
        let index = self
            .filtered_position(id)
            .ok_or(InvalidSelection::NotInView(id))?;

        self.state.selected_image = Some(id);
        self.state.current_index = index;
        tracing::debug!("Lightbox opened on image {} (index {})", id, index);
        Ok(())
    }

    pub fn close_lightbox(&mut self) {
        if self.state.selected_image.take().is_some() {
            self.state.current_index = 0;
            tracing::debug!("Lightbox closed");
        }
    }

    /// Step to the neighbouring image, wrapping at both ends
    pub fn navigate(&mut self, direction: Direction) -> Result<(), InvalidSelection> {
        if self.state.selected_image.is_none() {
            return Err(InvalidSelection::LightboxClosed);
        }

        // An open lightbox always has a non-empty filtered sequence
        let len = self.filtered_images().len();
        if len == 0 {
            return Err(InvalidSelection::LightboxClosed);
        }

        let index = self.state.current_index;
        let next_index = match direction {
            Direction::Next => (index + 1) % len,
            Direction::Previous => (index + len - 1) % len,
        };
        let next_id = self.filtered_images()[next_index].id;

        self.state.current_index = next_index;
        self.state.selected_image = Some(next_id);
        tracing::debug!("Navigated {:?} to image {} (index {})", direction, next_id, next_index);
        Ok(())
    }

    /// Flip the liked flag of an image, returning the new flag
    pub fn toggle_like(&mut self, id: i64) -> Result<bool, InvalidSelection> {
        if !self.catalog.contains(id) {
            return Err(InvalidSelection::UnknownImage(id));
        }

        let liked = if self.state.liked.remove(&id) {
            false
        } else {
            self.state.liked.insert(id);
            true
        };
        tracing::debug!("Image {} liked: {}", id, liked);
        Ok(liked)
    }

    /// Keyboard contract: intents only act while the lightbox is open
    pub fn apply_intent(&mut self, intent: Intent) {
        if !self.is_lightbox_open() {
            return;
        }

        let result = match intent {
            Intent::Dismiss => {
                self.close_lightbox();
                Ok(())
            }
            Intent::Previous => self.navigate(Direction::Previous),
            Intent::Next => self.navigate(Direction::Next),
        };
        if let Err(rejected) = result {
            tracing::debug!("Ignored {:?}: {}", intent, rejected);
        }
    }

    pub fn is_liked(&self, id: i64) -> bool {
        self.state.liked.contains(&id)
    }

    /// Base likes plus one if the user liked the image this session
    pub fn display_like_count(&self, image: &ImageRecord) -> u32 {
        image.likes.saturating_add(u32::from(self.is_liked(image.id)))
    }

    pub fn is_lightbox_open(&self) -> bool {
        self.state.selected_image.is_some()
    }

    /// Index of the lightbox image in the filtered sequence
    pub fn current_index(&self) -> Option<usize> {
        self.state.selected_image.map(|_| self.state.current_index)
    }

    /// The image shown in the lightbox, if open
    pub fn current_image(&self) -> Option<&ImageRecord> {
        if !self.is_lightbox_open() {
            return None;
        }
        self.filtered_images().get(self.state.current_index).copied()
    }

    /// One-based position and total, for the "n / total" counter
    pub fn position(&self) -> Option<(usize, usize)> {
        self.current_index()
            .map(|index| (index + 1, self.filtered_images().len()))
    }
}
