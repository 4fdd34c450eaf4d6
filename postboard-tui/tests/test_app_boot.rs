//! Test TUI state at startup
//!
//! Verifies the initial UI state and how configuration feeds into it.

use libpostboard::config::UiConfig as LibUiConfig;
use libpostboard::view::Field;
use libpostboard::AppState;
use postboard_tui::app::{Focus, UiState};

#[test]
fn test_app_initializes() {
    let state = UiState::new();

    assert!(!state.should_quit);
    assert!(!state.help_visible);
    assert!(!state.mouse_enabled);
    assert!(!state.submitting);
    assert!(!state.picker.is_open);
    assert_eq!(state.focus, Focus::Posts);
    assert_eq!(state.form_field, Field::Name);
    assert_eq!(state.form_open_for, None);
    assert_eq!(state.status.message, None);
}

#[test]
fn test_with_config_applies_mouse_and_tick_rate() {
    let config = LibUiConfig {
        tick_rate_ms: 250,
        mouse: true,
    };

    let state = UiState::with_config(&config);

    assert!(state.mouse_enabled);
    assert_eq!(state.config.tick_rate_ms, 250);
}

#[test]
fn test_form_hidden_on_empty_store() {
    let state = UiState::new();
    assert!(!state.form_visible(&AppState::new()));
}

#[test]
fn test_fit_to_empty_store_resets_cursors() {
    let state = UiState {
        post_cursor: 5,
        comment_cursor: 3,
        focus: Focus::Comments,
        ..UiState::new()
    };

    let state = state.fit_to(&AppState::new());

    assert_eq!(state.post_cursor, 0);
    assert_eq!(state.comment_cursor, 0);
    assert_eq!(state.focus, Focus::Posts);
}
