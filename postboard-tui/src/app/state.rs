//! UI state
//!
//! Ephemeral, view-local state: which pane has focus, list cursors, the
//! user picker, the comment form and overlays. Everything shared between
//! views lives in the `libpostboard` store instead.

use libpostboard::view::{CommentForm, Field, UserPicker};
use libpostboard::AppState;

/// Which pane receives navigation keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Posts,
    Comments,
    Form,
}

/// Root UI state
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// Should the application quit?
    pub should_quit: bool,

    /// Mouse capture enabled?
    pub mouse_enabled: bool,

    /// Help overlay visible?
    pub help_visible: bool,

    pub focus: Focus,

    pub picker: UserPicker,

    /// Highlighted post row
    pub post_cursor: usize,

    /// Highlighted comment in the sidebar
    pub comment_cursor: usize,

    pub form: CommentForm,

    /// Field being edited
    pub form_field: Field,

    /// Post the form was opened on; the form shows only while that post is open
    pub form_open_for: Option<u64>,

    /// A submission is in flight
    pub submitting: bool,

    pub status: StatusBarState,

    pub config: UiConfig,
}

/// Status bar state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBarState {
    /// Current status message
    pub message: Option<String>,
}

/// UI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 100 }
    }
}

impl From<&libpostboard::config::UiConfig> for UiConfig {
    fn from(config: &libpostboard::config::UiConfig) -> Self {
        Self {
            tick_rate_ms: config.tick_rate_ms,
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            should_quit: false,
            mouse_enabled: false,
            help_visible: false,
            focus: Focus::Posts,
            picker: UserPicker::new(),
            post_cursor: 0,
            comment_cursor: 0,
            form: CommentForm::new(),
            form_field: Field::Name,
            form_open_for: None,
            submitting: false,
            status: StatusBarState::default(),
            config: UiConfig::default(),
        }
    }
}

impl UiState {
    /// Create new UI state with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &libpostboard::config::UiConfig) -> Self {
        Self {
            mouse_enabled: config.mouse,
            config: config.into(),
            ..Self::default()
        }
    }

    /// Is the comment form shown for the currently open post?
    pub fn form_visible(&self, app: &AppState) -> bool {
        self.form_open_for.is_some() && self.form_open_for == app.selected_post_id
    }

    /// Bring cursors and focus back in line with the store
    ///
    /// Lists shrink and posts close underneath the UI; cursors are clamped
    /// and focus leaves panes that are no longer shown.
    pub fn fit_to(self, app: &AppState) -> Self {
        // The form belongs to the post it was opened on; once that post is
        // no longer the open one the form is gone, even if it reopens later
        let form_open_for = self.form_open_for.filter(|id| app.selected_post_id == Some(*id));
        let form_visible = form_open_for.is_some();
        let focus = match self.focus {
            Focus::Form if !form_visible => Focus::Posts,
            Focus::Comments if app.selected_post_id.is_none() => Focus::Posts,
            focus => focus,
        };

        Self {
            focus,
            form_open_for,
            post_cursor: clamp(self.post_cursor, app.posts.len()),
            comment_cursor: clamp(self.comment_cursor, app.comments.len()),
            picker: UserPicker {
                highlighted: clamp(self.picker.highlighted, app.users.len()),
                ..self.picker
            },
            ..self
        }
    }
}

fn clamp(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use libpostboard::{Action, Post};

    fn app_with_post(open: Option<u64>) -> AppState {
        let post = Post {
            id: 1,
            user_id: 1,
            title: "t".to_string(),
            body: "b".to_string(),
        };
        let state = libpostboard::store::reduce(AppState::new(), Action::SetPosts(vec![post]));
        libpostboard::store::reduce(state, Action::SetSelectedPostId(open))
    }

    #[test]
    fn test_form_visible_only_for_its_post() {
        let ui = UiState {
            form_open_for: Some(1),
            ..UiState::new()
        };
        assert!(ui.form_visible(&app_with_post(Some(1))));
        assert!(!ui.form_visible(&app_with_post(Some(2))));
        assert!(!ui.form_visible(&app_with_post(None)));
    }

    #[test]
    fn test_fit_to_leaves_hidden_form() {
        let ui = UiState {
            focus: Focus::Form,
            form_open_for: Some(1),
            ..UiState::new()
        };
        let ui = ui.fit_to(&app_with_post(Some(2)));
        assert_eq!(ui.focus, Focus::Posts);
        assert_eq!(ui.form_open_for, None);

        // Coming back to post 1 does not bring the form back
        assert!(!ui.form_visible(&app_with_post(Some(1))));
    }

    #[test]
    fn test_fit_to_clamps_cursors() {
        let ui = UiState {
            post_cursor: 5,
            comment_cursor: 3,
            ..UiState::new()
        };
        let ui = ui.fit_to(&app_with_post(None));
        assert_eq!(ui.post_cursor, 0);
        assert_eq!(ui.comment_cursor, 0);
    }

    #[test]
    fn test_with_config() {
        let config = libpostboard::config::UiConfig {
            tick_rate_ms: 250,
            mouse: true,
        };
        let ui = UiState::with_config(&config);
        assert!(ui.mouse_enabled);
        assert_eq!(ui.config.tick_rate_ms, 250);
    }
}
