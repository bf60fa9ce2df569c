//! Event handling.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Terminal input the app reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Paste(String),
    Resize,
}

/// Terminal event classification.
pub struct EventHandler;

impl EventHandler {
    /// Maps a raw terminal event. Key releases and unrelated events are dropped.
    #[must_use]
    pub fn translate(event: Event) -> Option<InputEvent> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Some(InputEvent::Key(key)),
            Event::Paste(text) => Some(InputEvent::Paste(text)),
            Event::Resize(..) => Some(InputEvent::Resize),
            _ => None,
        }
    }

    /// Ctrl+C, honored on every screen.
    #[must_use]
    pub fn is_interrupt(key: &KeyEvent) -> bool {
        key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
    }

    /// Quit keys on screens whose letters go to a text field.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        Self::is_interrupt(key)
            || matches!(
                key,
                KeyEvent {
                    code: KeyCode::Esc,
                    modifiers: KeyModifiers::NONE,
                    ..
                }
            )
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test]
    fn test_quit_events() {
        assert!(EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(EventHandler::is_quit_event(&make_key_event(
            KeyCode::Esc,
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn test_non_quit_events() {
        assert!(!EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('q'),
            KeyModifiers::NONE
        )));
        assert!(!EventHandler::is_quit_event(&make_key_event(
            KeyCode::Enter,
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn test_translate_drops_release() {
        let release =
            KeyEvent::new_with_kind(KeyCode::Char('a'), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(EventHandler::translate(Event::Key(release)), None);

        let press = make_key_event(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(
            EventHandler::translate(Event::Key(press)),
            Some(InputEvent::Key(press))
        );
    }

    #[test]
    fn test_translate_paste_and_resize() {
        assert_eq!(
            EventHandler::translate(Event::Paste("abc".into())),
            Some(InputEvent::Paste("abc".into()))
        );
        assert_eq!(
            EventHandler::translate(Event::Resize(80, 24)),
            Some(InputEvent::Resize)
        );
        assert_eq!(EventHandler::translate(Event::FocusGained), None);
    }
}
