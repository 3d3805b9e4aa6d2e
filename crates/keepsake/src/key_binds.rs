use crate::message::{Message, PreviewMessage};
use cosmic::{
    iced::keyboard::{Key, key::Named},
    widget::menu::{
        Action,
        key_bind::{KeyBind, Modifier},
    },
};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    Next,
    Prev,
    First,
    Last,
    ClosePreview,
    ToggleAudio,
    Quit,
}

impl MenuAction {
    pub fn message(self) -> Message {
        match self {
            MenuAction::Next => Message::Preview(PreviewMessage::Next),
            MenuAction::Prev => Message::Preview(PreviewMessage::Previous),
            MenuAction::First => Message::Preview(PreviewMessage::First),
            MenuAction::Last => Message::Preview(PreviewMessage::Last),
            MenuAction::ClosePreview => Message::Preview(PreviewMessage::Close),
            MenuAction::ToggleAudio => Message::ToggleAudio,
            MenuAction::Quit => Message::Quit,
        }
    }
}

impl Action for MenuAction {
    type Message = Message;

    fn message(&self) -> Message {
        (*self).message()
    }
}

pub fn init_key_binds() -> HashMap<KeyBind, MenuAction> {
    let mut binds = HashMap::new();

    binds.insert(
        KeyBind {
            modifiers: vec![Modifier::Ctrl],
            key: Key::Character("q".into()),
        },
        MenuAction::Quit,
    );

    binds.insert(
        KeyBind {
            modifiers: vec![Modifier::Alt],
            key: Key::Named(Named::F4),
        },
        MenuAction::Quit,
    );

    binds.insert(
        KeyBind {
            modifiers: vec![Modifier::Ctrl],
            key: Key::Character("m".into()),
        },
        MenuAction::ToggleAudio,
    );

    // Preview navigation
    binds.insert(
        KeyBind {
            modifiers: vec![],
            key: Key::Named(Named::ArrowLeft),
        },
        MenuAction::Prev,
    );

    binds.insert(
        KeyBind {
            modifiers: vec![],
            key: Key::Named(Named::ArrowRight),
        },
        MenuAction::Next,
    );

    binds.insert(
        KeyBind {
            modifiers: vec![],
            key: Key::Named(Named::Home),
        },
        MenuAction::First,
    );

    binds.insert(
        KeyBind {
            modifiers: vec![],
            key: Key::Named(Named::End),
        },
        MenuAction::Last,
    );

    binds.insert(
        KeyBind {
            modifiers: vec![],
            key: Key::Named(Named::Escape),
        },
        MenuAction::ClosePreview,
    );

    binds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_step_the_preview() {
        let binds = init_key_binds();
        let right = KeyBind {
            modifiers: vec![],
            key: Key::Named(Named::ArrowRight),
        };
        assert_eq!(binds.get(&right), Some(&MenuAction::Next));

        let escape = KeyBind {
            modifiers: vec![],
            key: Key::Named(Named::Escape),
        };
        assert_eq!(binds.get(&escape), Some(&MenuAction::ClosePreview));
    }

    #[test]
    fn test_actions_map_to_messages() {
        assert!(matches!(
            MenuAction::Prev.message(),
            Message::Preview(PreviewMessage::Previous)
        ));
        assert!(matches!(MenuAction::Quit.message(), Message::Quit));
    }
}
