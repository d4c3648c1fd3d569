//! Gallery page: header, filter bar, card grid and footer

use chrono::Datelike;
use iced::widget::{
    button, column, container, horizontal_space, image, mouse_area, row, scrollable, text,
    Image, Row, Space,
};
use iced::{Alignment, ContentFit, Element, Length, Theme};
use iced_aw::Wrap;
use std::collections::HashMap;

use crate::state::data::{CategoryFilter, ImageRecord};
use crate::state::gallery::Gallery;
use crate::Message;

/// Width of a grid card
const CARD_WIDTH: f32 = 300.0;
/// Height of the picture area of a card
const CARD_IMAGE_HEIGHT: f32 = 220.0;

type ButtonStyle = fn(&Theme, button::Status) -> button::Style;

/// Id of the grid scrollable, used to restore the offset after the lightbox closes
pub fn scroll_id() -> scrollable::Id {
    scrollable::Id::new("gallery-grid")
}

/// Build the gallery page
pub fn view<'a>(
    gallery: &'a Gallery,
    thumbnails: &'a HashMap<i64, image::Handle>,
    is_loading: bool,
) -> Element<'a, Message> {
    let content = column![
        header(gallery.catalog().len()),
        text("Step into a world of visual beauty. Every photograph is a story frozen in time.")
            .size(16),
        filter_bar(gallery),
        cards(gallery, thumbnails, is_loading),
        footer(),
    ]
    .spacing(32)
    .padding(40)
    .width(Length::Fill);

    scrollable(content)
        .id(scroll_id())
        .on_scroll(|viewport| Message::GridScrolled(viewport.absolute_offset()))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn header<'a>(count: usize) -> Element<'a, Message> {
    row![
        column![
            text("Photo Gallery").size(32),
            text("Moments caught in time").size(14),
        ]
        .spacing(4),
        horizontal_space(),
        text(format!("{} works", count)).size(16),
    ]
    .align_y(Alignment::Center)
    .into()
}

/// "All" followed by the catalog's categories, the active one highlighted
fn filter_bar<'a>(gallery: &'a Gallery) -> Element<'a, Message> {
    let filters = std::iter::once(CategoryFilter::All).chain(
        gallery
            .catalog()
            .categories()
            .iter()
            .cloned()
            .map(CategoryFilter::Only),
    );

    let buttons = filters.map(|filter| -> Element<'a, Message> {
        let style: ButtonStyle = if &filter == gallery.selected_category() {
            button::primary
        } else {
            button::secondary
        };

        button(text(filter.label()))
            .padding([8, 16])
            .style(style)
            .on_press(Message::FilterSelected(filter))
            .into()
    });

    Row::with_children(buttons).spacing(8).into()
}

fn cards<'a>(
    gallery: &'a Gallery,
    thumbnails: &'a HashMap<i64, image::Handle>,
    is_loading: bool,
) -> Element<'a, Message> {
    if is_loading {
        let skeletons = (0..gallery.catalog().len())
            .map(|_| skeleton_card())
            .collect();
        return Wrap::with_elements(skeletons)
            .spacing(24.0)
            .line_spacing(24.0)
            .into();
    }

    if let Some(message) = empty_message(gallery) {
        return container(text(message).size(18))
            .padding(60)
            .center_x(Length::Fill)
            .into();
    }

    let filtered = gallery.filtered_images();

    let elements = filtered
        .into_iter()
        .map(|image| card(gallery, image, thumbnails.get(&image.id)))
        .collect();

    Wrap::with_elements(elements)
        .spacing(24.0)
        .line_spacing(24.0)
        .into()
}

/// Text shown instead of the grid when there is nothing to display
fn empty_message(gallery: &Gallery) -> Option<&'static str> {
    if gallery.catalog().is_empty() {
        Some("This gallery has no images yet")
    } else if gallery.filtered_images().is_empty() {
        Some("No images in this category")
    } else {
        None
    }
}

fn card<'a>(
    gallery: &'a Gallery,
    image: &'a ImageRecord,
    thumbnail: Option<&image::Handle>,
) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match thumbnail {
        Some(handle) => Image::new(handle.clone())
            .width(Length::Fill)
            .height(CARD_IMAGE_HEIGHT)
            .content_fit(ContentFit::Cover)
            .into(),
        None => picture_placeholder(),
    };

    let like_style: ButtonStyle = if gallery.is_liked(image.id) {
        button::danger
    } else {
        button::secondary
    };

    let actions = row![
        button(text(format!("♥ {}", gallery.display_like_count(image))))
            .style(like_style)
            .on_press(Message::ToggleLike(image.id)),
        horizontal_space(),
        button(text("Open"))
            .style(button::text)
            .on_press(Message::OpenLightbox(image.id)),
    ]
    .align_y(Alignment::Center);

    let body = column![
        mouse_area(picture).on_press(Message::OpenLightbox(image.id)),
        text(image.category.label()).size(12),
        text(&image.title).size(20),
        text(&image.description).size(14),
        actions,
    ]
    .spacing(8)
    .padding(12)
    .width(CARD_WIDTH);

    container(body).style(container::rounded_box).into()
}

/// Grey block shown while a thumbnail is missing
fn picture_placeholder<'a>() -> Element<'a, Message> {
    container(Space::new(Length::Fill, CARD_IMAGE_HEIGHT))
        .style(container::bordered_box)
        .into()
}

/// Card outline shown during the loading phase
fn skeleton_card<'a>() -> Element<'a, Message> {
    container(
        column![picture_placeholder(), Space::with_height(72.0)]
            .spacing(8)
            .padding(12)
            .width(CARD_WIDTH),
    )
    .style(container::rounded_box)
    .into()
}

fn footer<'a>() -> Element<'a, Message> {
    let year = chrono::Local::now().year();

    container(text(format!("© {} Photo Gallery. All rights reserved.", year)).size(12))
        .center_x(Length::Fill)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::Category;
    use crate::state::library::Catalog;

    fn gallery_with_empty_category() -> Gallery {
        let builtin = Catalog::builtin().unwrap();
        let mut categories = builtin.categories().to_vec();
        categories.push(Category::new("macro"));
        Gallery::new(Catalog::new(builtin.images().to_vec(), categories).unwrap())
    }

    #[test]
    fn test_empty_message() {
        let mut gallery = gallery_with_empty_category();
        assert_eq!(empty_message(&gallery), None);

        gallery
            .set_category_filter(CategoryFilter::Only(Category::new("macro")))
            .unwrap();
        assert_eq!(empty_message(&gallery), Some("No images in this category"));

        let empty = Gallery::new(Catalog::new(vec![], vec![Category::new("macro")]).unwrap());
        assert_eq!(empty_message(&empty), Some("This gallery has no images yet"));
    }

    #[test]
    fn test_view_builds_while_loading() {
        let gallery = Gallery::new(Catalog::builtin().unwrap());
        let thumbnails = HashMap::new();

        let _page = view(&gallery, &thumbnails, true);
    }

    #[test]
    fn test_view_builds_for_empty_filter() {
        let mut gallery = gallery_with_empty_category();
        gallery
            .set_category_filter(CategoryFilter::Only(Category::new("macro")))
            .unwrap();
        let thumbnails = HashMap::new();

        let _page = view(&gallery, &thumbnails, false);
    }

    #[test]
    fn test_view_builds_with_thumbnails() {
        let gallery = Gallery::new(Catalog::builtin().unwrap());
        let mut thumbnails = HashMap::new();
        thumbnails.insert(1, image::Handle::from_rgba(1, 1, vec![0u8; 4]));

        let _page = view(&gallery, &thumbnails, false);
    }
}
