//! Application state
//!
//! All state transitions happen through the reducer (see `reducer.rs`).

use crate::types::{Comment, CommentDraft, Post, User};

/// Generic message for any failed remote call
pub const GENERIC_ERROR: &str = "Something went wrong";

/// Message for a failed initial user list
pub const USERS_ERROR: &str = "Unable to load users";

/// Root application state
///
/// This is the single source of truth shared by every view. Ephemeral,
/// view-local state (dropdown open, form fields, cursors) is not kept here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// Users, loaded once at startup
    pub users: Vec<User>,

    /// Posts of the selected user
    pub posts: Vec<Post>,

    /// Comments of the selected post
    pub comments: Vec<Comment>,

    pub selected_user_id: Option<u64>,

    pub selected_post_id: Option<u64>,

    /// Snapshot of the post shown in the detail view
    pub post: Option<Post>,

    /// Comment being submitted, shown until the server answers
    pub pending_comment: Option<CommentDraft>,

    /// Shared by every kind of request
    pub is_loading: bool,

    /// Empty means no error. The last operation to write it wins.
    pub error_message: String,
}

impl AppState {
    /// Create new application state with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_user(&self) -> Option<&User> {
        let id = self.selected_user_id?;
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_post(&self, post_id: u64) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == post_id)
    }

    pub fn has_error(&self) -> bool {
        !self.error_message.is_empty()
    }
}
