//! State management module
//!
//! This module handles all application state, including:
//! - The read-only image catalog (library.rs)
//! - Shared data structures (data.rs)
//! - The gallery view controller: filter, lightbox, likes (gallery.rs)
//! - User settings (settings.rs)

pub mod library;
pub mod data;
pub mod gallery;
pub mod settings;
