//! Input mapping
//!
//! Maps keyboard and mouse events to actions. This is where keybindings
//! are defined. Both functions are pure: they read the UI state and a
//! snapshot of the store and never change either.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use libpostboard::view::PostDetail;
use libpostboard::AppState;
use ratatui::layout::{Position, Rect};

use super::actions::UiAction;
use super::state::{Focus, UiState};
use crate::ui::AppLayout;

/// Map a key press to an action
///
/// Returns `None` for keys with no binding. While the comment form has
/// focus, unbound keys are text input for the active field.
pub fn map_key(ui: &UiState, app: &AppState, key: KeyEvent) -> Option<UiAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global keybindings (work everywhere)
    match key.code {
        KeyCode::F(1) => return Some(UiAction::ToggleHelp),
        KeyCode::Esc if ui.help_visible => return Some(UiAction::HideHelp),
        _ => {}
    }

    if ui.help_visible {
        return None;
    }
    if ui.picker.is_open {
        return map_picker_key(ui, app, key);
    }
    if ui.focus == Focus::Form && ui.form_visible(app) {
        return map_form_key(ui, key);
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) if !ui.submitting => Some(UiAction::Quit),
        (KeyCode::Char('u'), KeyModifiers::NONE) => Some(UiAction::TogglePicker),
        (KeyCode::Char('m'), KeyModifiers::NONE) => Some(UiAction::ToggleMouse),
        (KeyCode::Tab, _) => Some(UiAction::CycleFocus),
        (KeyCode::Up, _) => Some(UiAction::CursorUp),
        (KeyCode::Down, _) => Some(UiAction::CursorDown(focused_len(ui, app))),
        (KeyCode::Enter, _) if ui.focus == Focus::Posts => app
            .posts
            .get(ui.post_cursor)
            .map(|post| UiAction::TogglePost(post.id)),
        (KeyCode::Char('w'), KeyModifiers::NONE) => {
            let detail = PostDetail::from_state(app, ui.form_open_for)?;
            if detail.show_write_button {
                app.selected_post_id.map(UiAction::OpenForm)
            } else {
                None
            }
        }
        (KeyCode::Char('d'), KeyModifiers::NONE)
            if ui.focus == Focus::Comments && !app.is_loading =>
        {
            app.comments
                .get(ui.comment_cursor)
                .map(|comment| UiAction::DeleteComment(comment.id))
        }
        _ => None,
    }
}

fn map_picker_key(ui: &UiState, app: &AppState, key: KeyEvent) -> Option<UiAction> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('u') => Some(UiAction::ClosePicker),
        KeyCode::Up => Some(UiAction::PickerUp),
        KeyCode::Down => Some(UiAction::PickerDown(app.users.len())),
        KeyCode::Enter => Some(choose_user(ui, app, ui.picker.highlighted)),
        _ => None,
    }
}

fn map_form_key(ui: &UiState, key: KeyEvent) -> Option<UiAction> {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => Some(UiAction::CloseForm),
        (KeyCode::Tab, _) => Some(UiAction::NextField),
        (KeyCode::Char('s'), KeyModifiers::CONTROL) if !ui.submitting => {
            Some(UiAction::SubmitComment)
        }
        (KeyCode::Char('r'), KeyModifiers::CONTROL) if !ui.submitting => Some(UiAction::ClearForm),
        _ => None,
    }
}

/// Pick the user on a dropdown row. Picking the current user only closes
/// the dropdown.
fn choose_user(ui: &UiState, app: &AppState, row: usize) -> UiAction {
    let mut picker = ui.picker;
    app.users
        .get(row)
        .and_then(|user| picker.choose(user, app.selected_user_id))
        .map_or(UiAction::ClosePicker, UiAction::ChooseUser)
}

fn focused_len(ui: &UiState, app: &AppState) -> usize {
    match ui.focus {
        Focus::Posts => app.posts.len(),
        Focus::Comments => app.comments.len(),
        Focus::Form => 0,
    }
}

/// Map a mouse event to an action
///
/// Only left clicks are handled: on the picker they toggle it, on a
/// dropdown row they choose that user, anywhere else they close an open
/// dropdown.
pub fn map_mouse(ui: &UiState, app: &AppState, mouse: MouseEvent, area: Rect) -> Option<UiAction> {
    if !ui.mouse_enabled || mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }

    let layout = AppLayout::new(area, app.selected_post_id.is_some());
    let position = Position::new(mouse.column, mouse.row);

    if layout.picker.contains(position) {
        return Some(UiAction::TogglePicker);
    }
    if !ui.picker.is_open {
        return None;
    }

    let dropdown = layout.dropdown(app.users.len());
    if dropdown.contains(position) && position.y > dropdown.y {
        let row = usize::from(position.y - dropdown.y - 1);
        if row < app.users.len() {
            return Some(choose_user(ui, app, row));
        }
    }
    Some(UiAction::ClosePicker)
}
