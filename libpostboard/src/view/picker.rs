//! User picker dropdown

use crate::types::User;

pub const PLACEHOLDER: &str = "Choose a user";

/// Dropdown state, local to the picker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserPicker {
    pub is_open: bool,
    /// Highlighted row while open
    pub highlighted: usize,
}

impl UserPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Outside click or Esc
    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn highlight_next(&mut self, user_count: usize) {
        if user_count > 0 {
            self.highlighted = (self.highlighted + 1).min(user_count - 1);
        }
    }

    pub fn highlight_prev(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    /// Pick a user. The dropdown closes either way; the user id is returned
    /// only when it differs from the current selection.
    pub fn choose(&mut self, user: &User, current: Option<u64>) -> Option<u64> {
        self.close();
        (current != Some(user.id)).then_some(user.id)
    }

    pub fn label(selected: Option<&User>) -> &str {
        selected.map_or(PLACEHOLDER, |user| user.name.as_str())
    }
}
