//! Application module
//!
//! Contains the view-local half of the application:
//! - Actions: What can happen on screen
//! - State: Focus, cursors, picker, form, overlays
//! - Reducer: Pure function (UiState, UiAction) -> UiState
//! - Keymap: Pure mapping from input events to actions
//!
//! Shared data (users, posts, comments, selection) lives in the
//! `libpostboard` store and is only read here.

pub mod actions;
pub mod event;
pub mod keymap;
pub mod reducer;
pub mod state;

// Re-export commonly used types
pub use actions::UiAction;
pub use keymap::{map_key, map_mouse};
pub use reducer::reduce_ui;
pub use state::{Focus, StatusBarState, UiConfig, UiState};
