//! Image file handling
//!
//! This module handles:
//! - Decoding gallery images into grid thumbnails
//! - Caching thumbnails to disk

pub mod thumbnail;
