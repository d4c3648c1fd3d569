use iced::keyboard::{self, key::Named, Key};
use iced::Subscription;

use crate::state::gallery::Intent;
use crate::Message;

/// Map a key to the lightbox intent it triggers
pub fn intent_for_key(key: &Key) -> Option<Intent> {
    match key {
        Key::Named(Named::Escape) => Some(Intent::Dismiss),
        Key::Named(Named::ArrowLeft) => Some(Intent::Previous),
        Key::Named(Named::ArrowRight) => Some(Intent::Next),
        _ => None,
    }
}

/// Key presses as discrete lightbox intents
pub fn subscription() -> Subscription<Message> {
    keyboard::on_key_press(|key, _modifiers| intent_for_key(&key).map(Message::Key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lightbox_keys() {
        assert_eq!(intent_for_key(&Key::Named(Named::Escape)), Some(Intent::Dismiss));
        assert_eq!(intent_for_key(&Key::Named(Named::ArrowLeft)), Some(Intent::Previous));
        assert_eq!(intent_for_key(&Key::Named(Named::ArrowRight)), Some(Intent::Next));
    }

    #[test]
    fn test_other_keys_ignored() {
        assert_eq!(intent_for_key(&Key::Named(Named::ArrowUp)), None);
        assert_eq!(intent_for_key(&Key::Named(Named::Enter)), None);
        assert_eq!(intent_for_key(&Key::Character("a".into())), None);
    }
}
