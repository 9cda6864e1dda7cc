use crate::app::{AppState, ModalKind, UiMode};
use crate::domain::Phase;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Modal => handle_modal_mode(app, key),
        UiMode::Form => handle_input_form_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation (with Shift modifier for reordering)
        KeyCode::Up => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_task_up();
            } else {
                app.move_selection_up();
            }
            Ok(false)
        }
        KeyCode::Down => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_task_down();
            } else {
                app.move_selection_down();
            }
            Ok(false)
        }

        // Timer
        KeyCode::Char(' ') => {
            app.toggle_timer();
            Ok(false)
        }
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.skip_phase();
            Ok(false)
        }
        KeyCode::Char('1') => {
            app.switch_mode(Phase::Focus);
            Ok(false)
        }
        KeyCode::Char('2') => {
            app.switch_mode(Phase::ShortBreak);
            Ok(false)
        }
        KeyCode::Char('3') => {
            app.switch_mode(Phase::LongBreak);
            Ok(false)
        }

        // Tasks
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.start_add_task();
            Ok(false)
        }
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.start_edit_task();
            Ok(false)
        }
        KeyCode::Enter => {
            app.activate_selected();
            Ok(false)
        }
        KeyCode::Char('x') | KeyCode::Char('X') => {
            app.toggle_done_selected();
            Ok(false)
        }
        KeyCode::Char('m') | KeyCode::Char('M') => {
            app.toggle_mark();
            Ok(false)
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
            app.request_delete();
            Ok(false)
        }

        // Settings
        KeyCode::Char('o') | KeyCode::Char('O') => {
            app.start_edit_settings();
            Ok(false)
        }
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.toggle_dark_mode();
            Ok(false)
        }

        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),

        KeyCode::Esc => {
            app.marked.clear();
            app.status_message = None;
            Ok(false)
        }

        _ => Ok(false),
    }
}

/// Handle keys while a modal is shown
fn handle_modal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let confirming = matches!(
        app.modal.as_ref().map(|m| &m.kind),
        Some(ModalKind::ConfirmDelete(_))
    );

    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') if confirming => {
            app.confirm_delete();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.dismiss_modal();
        }
        KeyCode::Enter if !confirming => {
            app.dismiss_modal();
        }
        _ => {}
    }
    Ok(false)
}

/// Handle keys in input form mode
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Submit form
        KeyCode::Enter => {
            app.submit_input_form();
            Ok(false)
        }

        // Cancel form
        KeyCode::Esc => {
            app.cancel_input_form();
            Ok(false)
        }

        // Next field
        KeyCode::Tab | KeyCode::Down => {
            app.input_form_toggle_field();
            Ok(false)
        }

        KeyCode::Backspace => {
            app.input_form_backspace();
            Ok(false)
        }

        KeyCode::Char(c) => {
            app.input_form_add_char(c);
            Ok(false)
        }

        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::SessionController;
    use crate::domain::{Settings, Task};
    use crate::persistence::{MemoryStorage, PersistedState};
    use crate::sound::SilentPlayer;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn create_test_app() -> AppState {
        let state = PersistedState {
            settings: Settings::default(),
            tasks: vec![Task::new("Test task".to_string(), 1)],
        };
        let controller = SessionController::new(state, Box::new(MemoryStorage::new()), Box::new(SilentPlayer));
        AppState::new(controller)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_handle_navigation() {
        let mut app = create_test_app();
        app.controller.add_task("Task 2", 1).unwrap();

        assert_eq!(app.selected_index, 0);

        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected_index, 1);

        handle_key(&mut app, key(KeyCode::Up)).unwrap();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_handle_reorder() {
        let mut app = create_test_app();
        app.controller.add_task("Task 2", 1).unwrap();

        handle_key(&mut app, KeyEvent::new(KeyCode::Down, KeyModifiers::SHIFT)).unwrap();
        assert_eq!(app.selected_index, 1);
        assert_eq!(app.controller.tasks().get(0).unwrap().text, "Task 2");
    }

    #[test]
    fn test_handle_quit() {
        let mut app = create_test_app();
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))).unwrap());
        assert!(handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)).unwrap());
    }

    #[test]
    fn test_handle_start_pause() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert!(app.controller.session().is_running());

        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert!(!app.controller.session().is_running());
    }

    #[test]
    fn test_handle_switch_mode() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('3'))).unwrap();
        assert_eq!(app.controller.session().phase(), Phase::LongBreak);
        assert_eq!(app.controller.session().formatted_remaining(), "15:00");
    }

    #[test]
    fn test_handle_add_task() {
        let mut app = create_test_app();
        let initial_count = app.controller.tasks().len();

        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Form);
        assert!(app.input_form.is_some());

        // Keys that are shortcuts in normal mode are plain text here
        for c in "New q".chars() {
            handle_key(&mut app, key(KeyCode::Char(c))).unwrap();
        }

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.controller.tasks().len(), initial_count + 1);
        assert_eq!(app.controller.tasks().get(1).unwrap().text, "New q");
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
    }

    #[test]
    fn test_handle_delete_confirm() {
        let mut app = create_test_app();

        handle_key(&mut app, key(KeyCode::Delete)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Modal);

        // Enter does not confirm a delete
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.controller.tasks().len(), 1);

        handle_key(&mut app, key(KeyCode::Char('y'))).unwrap();
        assert!(app.controller.tasks().is_empty());
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_handle_delete_decline() {
        let mut app = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('d'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.controller.tasks().len(), 1);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }
}
