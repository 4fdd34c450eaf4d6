//! Integration tests for the comment form text areas
//!
//! Verifies that keystrokes in the text areas reach the `CommentForm`
//! through `UiAction::FormInput`, and that form resets reach the text
//! areas through `FormEditor::sync`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use libpostboard::view::Field;
use postboard_tui::app::{reduce_ui, UiAction, UiState};
use postboard_tui::ui::form::FormEditor;

fn type_text(editor: &mut FormEditor, state: UiState, field: Field, text: &str) -> UiState {
    text.chars().fold(state, |state, c| {
        let value = editor.input(field, KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        reduce_ui(state, UiAction::FormInput(field, value))
    })
}

#[test]
fn test_typing_updates_form() {
    let mut editor = FormEditor::new();
    let state = reduce_ui(UiState::new(), UiAction::OpenForm(1));

    let state = type_text(&mut editor, state, Field::Name, "Ann");

    assert_eq!(state.form.name, "Ann");
    assert_eq!(editor.content(Field::Name), "Ann");
    assert_eq!(editor.content(Field::Email), "");
}

#[test]
fn test_enter_ignored_in_single_line_fields() {
    let mut editor = FormEditor::new();
    let state = type_text(&mut editor, UiState::new(), Field::Email, "a@b.c");

    let value = editor.input(Field::Email, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

    assert_eq!(value, "a@b.c");
    assert_eq!(state.form.email, "a@b.c");
}

#[test]
fn test_body_accepts_newlines() {
    let mut editor = FormEditor::new();
    let state = type_text(&mut editor, UiState::new(), Field::Body, "hi");
    let value = editor.input(Field::Body, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    let state = reduce_ui(state, UiAction::FormInput(Field::Body, value));
    let state = type_text(&mut editor, state, Field::Body, "there");

    assert_eq!(state.form.body, "hi\nthere");
}

#[test]
fn test_backspace_removes_character() {
    let mut editor = FormEditor::new();
    let state = type_text(&mut editor, UiState::new(), Field::Name, "Bob");

    let value = editor.input(Field::Name, KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
    let state = reduce_ui(state, UiAction::FormInput(Field::Name, value));

    assert_eq!(state.form.name, "Bo");
}

#[test]
fn test_clear_form_empties_text_areas_after_sync() {
    let mut editor = FormEditor::new();
    let state = type_text(&mut editor, UiState::new(), Field::Name, "Ann");
    let state = type_text(&mut editor, state, Field::Body, "text");

    let state = reduce_ui(state, UiAction::ClearForm);
    editor.sync(&state.form);

    assert_eq!(editor.content(Field::Name), "");
    assert_eq!(editor.content(Field::Body), "");
    assert_eq!(state.form_field, Field::Name);
}

#[test]
fn test_sync_keeps_matching_content() {
    let mut editor = FormEditor::new();
    let state = type_text(&mut editor, UiState::new(), Field::Name, "Ann");

    editor.sync(&state.form);
    let value = editor.input(Field::Name, KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));

    // Cursor stayed at the end of the text
    assert_eq!(value, "Anna");
}

#[test]
fn test_input_after_blank_blur_clears_error() {
    let mut editor = FormEditor::new();
    let state = reduce_ui(UiState::new(), UiAction::OpenForm(1));

    let state = reduce_ui(state, UiAction::NextField);
    assert!(state.form.errors.name);

    let state = type_text(&mut editor, state, Field::Name, "A");
    assert!(!state.form.errors.name);
}
