//! Full-window lightbox overlay

use iced::widget::{button, column, container, horizontal_space, image, mouse_area, opaque, row, text, Image};
use iced::{Alignment, Background, Color, ContentFit, Element, Length, Theme};

use crate::state::gallery::{Direction, Gallery};
use crate::state::settings::Settings;
use crate::Message;

/// Backdrop behind the lightbox panel
const BACKDROP: Color = Color { r: 0.01, g: 0.02, b: 0.05, a: 0.95 };

/// Build the lightbox, or `None` when it is closed.
///
/// Clicking the backdrop closes it; clicks on the panel itself are swallowed.
pub fn view<'a>(gallery: &'a Gallery, settings: &Settings) -> Option<Element<'a, Message>> {
    let record = gallery.current_image()?;
    let (position, total) = gallery.position()?;

    // iced loads the full-size file itself
    let picture = Image::new(image::Handle::from_path(settings.resolve_src(&record.src)))
        .width(Length::Fill)
        .height(Length::Fill)
        .content_fit(ContentFit::Contain);

    let like_style: fn(&Theme, button::Status) -> button::Style = if gallery.is_liked(record.id) {
        button::danger
    } else {
        button::secondary
    };

    let info = column![
        text(record.category.label()).size(12),
        text(&record.title).size(28),
        text(&record.description).size(16),
        row![
            button(text(format!("♥ {}", gallery.display_like_count(record))))
                .padding([8, 16])
                .style(like_style)
                .on_press(Message::ToggleLike(record.id)),
            horizontal_space(),
            text(format!("{} / {}", position, total)).size(14),
        ]
        .align_y(Alignment::Center),
    ]
    .spacing(8);

    let panel = column![picture, info].spacing(16).padding(24).max_width(1000);

    // Arrows only make sense with something to step to
    let mut body = row![].spacing(16).align_y(Alignment::Center);
    if total > 1 {
        body = body.push(
            button(text("‹").size(32))
                .style(button::text)
                .on_press(Message::Navigate(Direction::Previous)),
        );
    }
    body = body.push(opaque(panel));
    if total > 1 {
        body = body.push(
            button(text("›").size(32))
                .style(button::text)
                .on_press(Message::Navigate(Direction::Next)),
        );
    }

    let close = button(text("✕").size(24))
        .style(button::text)
        .on_press(Message::CloseLightbox);

    let layout = column![
        row![horizontal_space(), close],
        container(body)
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    ];

    let backdrop = container(layout)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(16)
        .style(|_theme: &Theme| container::Style {
            background: Some(Background::Color(BACKDROP)),
            text_color: Some(Color::WHITE),
            ..container::Style::default()
        });

    Some(mouse_area(backdrop).on_press(Message::CloseLightbox).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::library::Catalog;

    #[test]
    fn test_closed_lightbox_renders_nothing() {
        let gallery = Gallery::new(Catalog::builtin().unwrap());
        assert!(view(&gallery, &Settings::default()).is_none());
    }

    #[test]
    fn test_open_lightbox_renders() {
        let mut gallery = Gallery::new(Catalog::builtin().unwrap());
        gallery.open_lightbox(2).unwrap();
        assert!(view(&gallery, &Settings::default()).is_some());
    }
}
