//! User settings for the gallery
//!
//! Settings are read from a JSON file in the user's config directory:
//! - Linux: ~/.config/photo-gallery/settings.json
//! - macOS: ~/Library/Application Support/photo-gallery/settings.json
//! - Windows: %APPDATA%\photo-gallery\settings.json
//!
//! The file is optional and never written by the application. Any field
//! left out takes its default value.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const APP_DIR: &str = "photo-gallery";
const SETTINGS_FILE: &str = "settings.json";

/// Default edge length of grid thumbnails in pixels
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 256;

/// Default duration of the loading placeholder phase
pub const DEFAULT_LOADING_DELAY_MS: u64 = 500;

/// Color scheme of the window
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Dark,
    Light,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Base directory for relative image locators (None = working directory)
    pub image_root: Option<PathBuf>,

    /// Catalog file to show instead of the built-in one
    pub catalog_path: Option<PathBuf>,

    /// Edge length of grid thumbnails in pixels
    pub thumbnail_size: u32,

    /// How long the grid shows placeholders before the first real paint
    pub loading_delay_ms: u64,

    pub theme: ThemeChoice,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            image_root: None,
            catalog_path: None,
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
            loading_delay_ms: DEFAULT_LOADING_DELAY_MS,
            theme: ThemeChoice::Dark,
        }
    }
}

impl Settings {
    /// Path where the settings file is looked up
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push(APP_DIR);
            path.push(SETTINGS_FILE);
            path
        })
    }

    /// Load settings from the default location.
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&content)?;

        tracing::info!("⚙️  Settings loaded from {}", path.display());
        Ok(settings)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| Error::Settings(e.to_string()))?;

        if settings.thumbnail_size == 0 {
            return Err(Error::Settings("thumbnail_size must be positive".to_string()));
        }

        Ok(settings)
    }

    /// Resolve an image locator against the configured image root
    pub fn resolve_src(&self, src: &str) -> PathBuf {
        let path = Path::new(src);
        match &self.image_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.thumbnail_size, 256);
        assert_eq!(settings.loading_delay_ms, 500);
    }

    #[test]
    fn test_partial_settings() {
        let settings = Settings::from_json(r#"{ "theme": "light", "loading_delay_ms": 0 }"#).unwrap();

        assert_eq!(settings.theme, ThemeChoice::Light);
        assert_eq!(settings.loading_delay_ms, 0);
        assert_eq!(settings.thumbnail_size, DEFAULT_THUMBNAIL_SIZE);
    }

    #[test]
    fn test_malformed_settings() {
        assert!(matches!(Settings::from_json("[1, 2"), Err(Error::Settings(_))));
        assert!(matches!(
            Settings::from_json(r#"{ "theme": "sepia" }"#),
            Err(Error::Settings(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "thumbnail_size": 0 }"#),
            Err(Error::Settings(_))
        ));
    }

    #[test]
    fn test_resolve_src() {
        let mut settings = Settings::default();
        assert_eq!(settings.resolve_src("photos/a.jpg"), PathBuf::from("photos/a.jpg"));

        settings.image_root = Some(PathBuf::from("/srv/gallery"));
        assert_eq!(
            settings.resolve_src("photos/a.jpg"),
            PathBuf::from("/srv/gallery/photos/a.jpg")
        );

        let absolute = std::env::temp_dir().join("b.jpg");
        let absolute_str = absolute.to_string_lossy().to_string();
        assert_eq!(settings.resolve_src(&absolute_str), absolute);
    }

    #[test]
    fn test_load_from_path() {
        let path = std::env::temp_dir()
            .join(format!("photo-gallery-settings-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "thumbnail_size": 128 }"#).unwrap();

        let settings = Settings::load_from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.thumbnail_size, 128);
    }
}
