//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Not handled; the caller may try other handlers.
    Continue,
    /// Exit application.
    Exit,
    /// Event was consumed.
    Consumed,
}

/// Release and repeat events are ignored on terminals that report them.
#[must_use]
pub fn is_key_press(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}

/// Checks if key quits the application. A bare `q` only counts outside text
/// inputs.
#[must_use]
pub fn is_quit_event(key: &KeyEvent, editing_text: bool) -> bool {
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') => key.modifiers == KeyModifiers::NONE && !editing_text,
        _ => false,
    }
}

/// Checks if key is a submit event.
#[must_use]
pub fn is_submit_event(key: &KeyEvent) -> bool {
    key.code == KeyCode::Enter
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn make_key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test_case(KeyCode::Char('c'), KeyModifiers::CONTROL, false, true ; "ctrl c")]
    #[test_case(KeyCode::Char('c'), KeyModifiers::CONTROL, true, true ; "ctrl c while typing")]
    #[test_case(KeyCode::Char('q'), KeyModifiers::NONE, false, true ; "q outside input")]
    #[test_case(KeyCode::Char('q'), KeyModifiers::NONE, true, false ; "q typed into input")]
    #[test_case(KeyCode::Esc, KeyModifiers::NONE, false, false ; "esc")]
    #[test_case(KeyCode::Char('a'), KeyModifiers::NONE, false, false ; "letter")]
    fn test_quit_events(code: KeyCode, modifiers: KeyModifiers, editing: bool, expected: bool) {
        assert_eq!(
            is_quit_event(&make_key_event(code, modifiers), editing),
            expected
        );
    }

    #[test]
    fn test_submit_event() {
        assert!(is_submit_event(&make_key_event(
            KeyCode::Enter,
            KeyModifiers::NONE
        )));
        assert!(!is_submit_event(&make_key_event(
            KeyCode::Char('a'),
            KeyModifiers::NONE
        )));
    }

    #[test]
    fn test_release_is_not_press() {
        let release =
            KeyEvent::new_with_kind(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Release);
        assert!(!is_key_press(&release));
    }
}
