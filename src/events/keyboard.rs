//! Keyboard event handling for the focused field.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::select::{Intent, Mode, SelectHost};

use super::Action;

/// Handle keyboard events and return the appropriate action.
pub fn handle_key_event(app: &App, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Action::Quit,
            KeyCode::Char('r') => Action::ReloadOptions,
            _ => Action::None,
        };
    }

    let Some(index) = app.focused else {
        return handle_unfocused(key);
    };
    let Some(field) = app.fields.get(index) else {
        return handle_unfocused(key);
    };

    let is_open = field.control.is_open();
    let has_query = !field.host.query().is_empty();
    let to_field = |intent| Action::Field { field: index, intent };

    match key.code {
        KeyCode::Tab => Action::FocusNext,
        KeyCode::BackTab => Action::FocusPrev,
        KeyCode::Esc => to_field(Intent::Close),

        KeyCode::Enter if is_open => to_field(Intent::SelectHighlighted),
        KeyCode::Enter => to_field(Intent::ToggleVisibility),
        KeyCode::Char(' ') if !has_query => to_field(Intent::ToggleVisibility),

        KeyCode::Down => to_field(Intent::HighlightNext),
        KeyCode::Up => to_field(Intent::HighlightPrev),

        KeyCode::Delete => to_field(Intent::Clear),
        KeyCode::Backspace if has_query => Action::FilterBackspace,
        // Empty filter: backspace removes the newest chip
        KeyCode::Backspace => match field.control.mode() {
            Mode::Multiple => match field.host.value().items().len() {
                0 => Action::None,
                len => to_field(Intent::DeselectChip(len - 1)),
            },
            Mode::Single => Action::None,
        },

        KeyCode::Char('q') if !has_query && !is_open => Action::Quit,
        KeyCode::Char(c) => Action::Filter(c),

        _ => Action::None,
    }
}

fn handle_unfocused(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Tab => Action::FocusNext,
        KeyCode::BackTab => Action::FocusPrev,
        KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn app() -> App {
        App::new(Config::default()).unwrap()
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_toggles_then_selects() {
        let mut app = app();

        let action = handle_key_event(&app, press(KeyCode::Enter));
        assert_eq!(action, Action::Field { field: 0, intent: Intent::ToggleVisibility });
        app.dispatch(action);

        let action = handle_key_event(&app, press(KeyCode::Enter));
        assert_eq!(action, Action::Field { field: 0, intent: Intent::SelectHighlighted });
    }

    #[test]
    fn test_space_filters_once_query_started() {
        let mut app = app();
        assert_eq!(
            handle_key_event(&app, press(KeyCode::Char(' '))),
            Action::Field { field: 0, intent: Intent::ToggleVisibility }
        );

        app.dispatch(Action::Filter('f'));
        assert_eq!(handle_key_event(&app, press(KeyCode::Char(' '))), Action::Filter(' '));
    }

    #[test]
    fn test_backspace_removes_last_chip() {
        let mut app = app();
        app.dispatch(Action::Field { field: 0, intent: Intent::SelectOption(2) });

        assert_eq!(
            handle_key_event(&app, press(KeyCode::Backspace)),
            Action::Field { field: 0, intent: Intent::DeselectChip(1) }
        );

        app.dispatch(Action::FocusNext);
        assert_eq!(handle_key_event(&app, press(KeyCode::Backspace)), Action::None);
    }

    #[test]
    fn test_q_quits_only_when_idle() {
        let mut app = app();
        assert_eq!(handle_key_event(&app, press(KeyCode::Char('q'))), Action::Quit);

        app.dispatch(Action::Field { field: 0, intent: Intent::ToggleVisibility });
        assert_eq!(handle_key_event(&app, press(KeyCode::Char('q'))), Action::Filter('q'));
    }

    #[test]
    fn test_control_keys() {
        let app = app();
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);

        assert_eq!(handle_key_event(&app, ctrl('c')), Action::Quit);
        assert_eq!(handle_key_event(&app, ctrl('r')), Action::ReloadOptions);
        assert_eq!(handle_key_event(&app, ctrl('x')), Action::None);
    }

    #[test]
    fn test_navigation_keys() {
        let app = app();
        assert_eq!(
            handle_key_event(&app, press(KeyCode::Down)),
            Action::Field { field: 0, intent: Intent::HighlightNext }
        );
        assert_eq!(
            handle_key_event(&app, press(KeyCode::Delete)),
            Action::Field { field: 0, intent: Intent::Clear }
        );
        assert_eq!(handle_key_event(&app, press(KeyCode::Tab)), Action::FocusNext);
    }
}
