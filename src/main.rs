use iced::widget::{image, scrollable};
use iced::widget::scrollable::AbsoluteOffset;
use iced::{Element, Subscription, Task, Theme};
use std::collections::HashMap;
use std::time::Duration;

mod error;
mod logging;
mod media;
mod state;
mod ui;

use error::Error;
use media::thumbnail::{self, Thumbnail};
use state::data::CategoryFilter;
use state::gallery::{Direction, Gallery, Intent, InvalidSelection};
use state::library::Catalog;
use state::settings::{Settings, ThemeChoice};
use ui::Effect;

/// Main application state
struct PhotoGallery {
    /// Filter, lightbox and likes over the catalog
    gallery: Gallery,
    settings: Settings,
    /// Decoded grid thumbnails by image id
    thumbnails: HashMap<i64, image::Handle>,
    /// Placeholder phase before the first real paint
    is_loading: bool,
    /// Last known grid scroll offset
    grid_offset: AbsoluteOffset,
    /// Grid offset stashed while the lightbox is open
    saved_offset: Option<AbsoluteOffset>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User picked a filter button
    FilterSelected(CategoryFilter),
    /// User clicked a card
    OpenLightbox(i64),
    /// Close button or backdrop click
    CloseLightbox,
    /// Lightbox arrow buttons
    Navigate(Direction),
    /// Heart button on a card or in the lightbox
    ToggleLike(i64),
    /// Key press recognized as a lightbox intent
    Key(Intent),
    /// Grid scrollable moved
    GridScrolled(AbsoluteOffset),
    /// Loading placeholder phase is over
    LoadingFinished,
    /// Background thumbnail decode completed
    ThumbnailLoaded(i64, Result<Thumbnail, Error>),
}

impl PhotoGallery {
    /// Create the application and start loading thumbnails
    fn new(settings: Settings, catalog: Catalog) -> (Self, Task<Message>) {
        tracing::info!("🎨 Photo Gallery initialized with {} images", catalog.len());

        let thumbnail_cache = match thumbnail::get_thumbnail_cache_dir() {
            Ok(dir) => Some(dir),
            Err(e) => {
                tracing::warn!("⚠️  Thumbnail cache disabled: {}", e);
                None
            }
        };

        let mut tasks: Vec<Task<Message>> = catalog
            .images()
            .iter()
            .map(|image| {
                let id = image.id;
                Task::perform(
                    thumbnail::load_thumbnail(
                        settings.resolve_src(&image.src),
                        id,
                        settings.thumbnail_size,
                        thumbnail_cache.clone(),
                    ),
                    move |result| Message::ThumbnailLoaded(id, result),
                )
            })
            .collect();

        let is_loading = settings.loading_delay_ms > 0;
        if is_loading {
            tasks.push(Task::perform(
                tokio::time::sleep(Duration::from_millis(settings.loading_delay_ms)),
                |_| Message::LoadingFinished,
            ));
        }

        let app = PhotoGallery {
            gallery: Gallery::new(catalog),
            settings,
            thumbnails: HashMap::new(),
            is_loading,
            grid_offset: AbsoluteOffset { x: 0.0, y: 0.0 },
            saved_offset: None,
        };

        (app, Task::batch(tasks))
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        let was_open = self.gallery.is_lightbox_open();

        let task = match message {
            Message::FilterSelected(filter) => {
                ignore(self.gallery.set_category_filter(filter));
                Task::none()
            }
            Message::OpenLightbox(id) => {
                ignore(self.gallery.open_lightbox(id));
                Task::none()
            }
            Message::CloseLightbox => {
                self.gallery.close_lightbox();
                Task::none()
            }
            Message::Navigate(direction) => {
                ignore(self.gallery.navigate(direction));
                Task::none()
            }
            Message::ToggleLike(id) => {
                ignore(self.gallery.toggle_like(id));
                Task::none()
            }
            Message::Key(intent) => {
                self.gallery.apply_intent(intent);
                Task::none()
            }
            Message::GridScrolled(offset) => {
                self.grid_offset = offset;
                Task::none()
            }
            Message::LoadingFinished => {
                self.is_loading = false;
                Task::none()
            }
            Message::ThumbnailLoaded(id, Ok(thumbnail)) => {
                let handle =
                    image::Handle::from_rgba(thumbnail.width, thumbnail.height, thumbnail.pixels);
                self.thumbnails.insert(id, handle);
                Task::none()
            }
            Message::ThumbnailLoaded(id, Err(e)) => {
                tracing::warn!("⚠️  No thumbnail for image {}: {}", id, e);
                Task::none()
            }
        };

        match ui::lightbox_effect(was_open, self.gallery.is_lightbox_open()) {
            Some(effect) => Task::batch([task, self.apply_effect(effect)]),
            None => task,
        }
    }

    /// Apply the presentation effect of a lightbox transition
    fn apply_effect(&mut self, effect: Effect) -> Task<Message> {
        tracing::debug!("Applying {:?}", effect);
        match effect {
            Effect::LockScroll => {
                self.saved_offset = Some(self.grid_offset);
                Task::none()
            }
            Effect::UnlockScroll => match self.saved_offset.take() {
                Some(offset) => scrollable::scroll_to(ui::grid::scroll_id(), offset),
                None => Task::none(),
            },
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        match ui::lightbox::view(&self.gallery, &self.settings) {
            Some(lightbox) => lightbox,
            None => ui::grid::view(&self.gallery, &self.thumbnails, self.is_loading),
        }
    }

    /// Keyboard intents are only listened for while the lightbox is open
    fn subscription(&self) -> Subscription<Message> {
        if self.gallery.is_lightbox_open() {
            ui::keyboard::subscription()
        } else {
            Subscription::none()
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        match self.settings.theme {
            ThemeChoice::Dark => Theme::Dark,
            ThemeChoice::Light => Theme::Light,
        }
    }
}

/// Rejected requests are no-ops for the user
fn ignore<T>(result: Result<T, InvalidSelection>) {
    if let Err(rejected) = result {
        tracing::debug!("Ignored request: {}", rejected);
    }
}

fn load_settings() -> Settings {
    Settings::load().unwrap_or_else(|e| {
        tracing::warn!("⚠️  {}; using default settings", e);
        Settings::default()
    })
}

/// The configured catalog, falling back to the built-in one
fn load_catalog(settings: &Settings) -> error::Result<Catalog> {
    if let Some(path) = &settings.catalog_path {
        match Catalog::load_from_path(path) {
            Ok(catalog) => return Ok(catalog),
            Err(e) => tracing::error!(
                "❌ Could not load catalog {}: {}; using built-in catalog",
                path.display(),
                e
            ),
        }
    }

    Catalog::builtin()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let settings = load_settings();
    let catalog = load_catalog(&settings)?;

    iced::application("Photo Gallery", PhotoGallery::update, PhotoGallery::view)
        .subscription(PhotoGallery::subscription)
        .theme(PhotoGallery::theme)
        .centered()
        .run_with(move || PhotoGallery::new(settings, catalog))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> PhotoGallery {
        let settings = Settings {
            loading_delay_ms: 0,
            ..Settings::default()
        };
        PhotoGallery {
            gallery: Gallery::new(Catalog::builtin().unwrap()),
            settings,
            thumbnails: HashMap::new(),
            is_loading: false,
            grid_offset: AbsoluteOffset { x: 0.0, y: 0.0 },
            saved_offset: None,
        }
    }

    fn offset(y: f32) -> AbsoluteOffset {
        AbsoluteOffset { x: 0.0, y }
    }

    #[test]
    fn test_opening_lightbox_stashes_grid_offset() {
        let mut app = app();
        let _ = app.update(Message::GridScrolled(offset(420.0)));

        let _ = app.update(Message::OpenLightbox(2));

        assert!(app.gallery.is_lightbox_open());
        assert_eq!(app.saved_offset.map(|o| o.y), Some(420.0));
    }

    #[test]
    fn test_closing_lightbox_releases_offset() {
        let mut app = app();
        let _ = app.update(Message::GridScrolled(offset(80.0)));
        let _ = app.update(Message::OpenLightbox(1));

        let _ = app.update(Message::Key(Intent::Dismiss));

        assert!(!app.gallery.is_lightbox_open());
        assert!(app.saved_offset.is_none());
    }

    #[test]
    fn test_rejected_open_has_no_effect() {
        let mut app = app();
        let _ = app.update(Message::FilterSelected(CategoryFilter::Only(
            state::data::Category::new("landscape"),
        )));

        let _ = app.update(Message::OpenLightbox(1));

        assert!(!app.gallery.is_lightbox_open());
        assert!(app.saved_offset.is_none());
    }

    #[test]
    fn test_like_then_navigate() {
        let mut app = app();
        let _ = app.update(Message::OpenLightbox(1));
        let _ = app.update(Message::ToggleLike(1));
        let _ = app.update(Message::Navigate(Direction::Next));

        let current = app.gallery.current_image().unwrap();
        assert_eq!(current.id, 2);
        assert_eq!(app.gallery.display_like_count(current), 256);
        assert!(app.gallery.is_liked(1));
    }

    #[test]
    fn test_failed_thumbnail_leaves_placeholder() {
        let mut app = app();
        let _ = app.update(Message::ThumbnailLoaded(1, Err(Error::Io("gone".to_string()))));
        assert!(app.thumbnails.is_empty());

        let thumbnail = Thumbnail { image_id: 1, width: 1, height: 1, pixels: vec![0; 4] };
        let _ = app.update(Message::ThumbnailLoaded(1, Ok(thumbnail)));
        assert!(app.thumbnails.contains_key(&1));
    }

    #[test]
    fn test_view_follows_lightbox_state() {
        let mut app = app();
        let _grid = app.view();
        drop(_grid);

        let _ = app.update(Message::OpenLightbox(3));
        assert!(ui::lightbox::view(&app.gallery, &app.settings).is_some());
        let _lightbox = app.view();
    }

    #[test]
    fn test_loading_finishes() {
        let mut app = app();
        app.is_loading = true;
        let _ = app.update(Message::LoadingFinished);
        assert!(!app.is_loading);
    }
}
