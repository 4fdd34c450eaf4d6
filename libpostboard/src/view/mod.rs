//! View models
//!
//! Pure projections of [`AppState`] (plus a little view-local state) that
//! decide what each part of the screen shows. Front ends render these and
//! nothing else, so the display rules are tested once, here.

pub mod form;
pub mod picker;

pub use form::{CommentForm, Field, FieldErrors};
pub use picker::UserPicker;

use crate::store::AppState;
use crate::types::{Comment, CommentDraft};

/// Left pane: posts of the selected user and the status messages around them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainPanel {
    pub no_user_selected: bool,
    pub show_loader: bool,
    pub error_banner: Option<String>,
    pub no_posts_yet: bool,
    pub show_posts: bool,
}

impl MainPanel {
    pub fn from_state(state: &AppState) -> Self {
        let has_user = state.selected_user_id.is_some();
        let detail_open = state.selected_post_id.is_some();

        Self {
            no_user_selected: !has_user && !state.is_loading,
            show_loader: !detail_open && state.is_loading && has_user,
            error_banner: state.has_error().then(|| state.error_message.clone()),
            no_posts_yet: state.posts.is_empty()
                && has_user
                && !state.is_loading
                && !state.has_error(),
            show_posts: has_user && !state.posts.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRow {
    pub id: u64,
    pub title: String,
    pub is_open: bool,
}

impl PostRow {
    pub fn rows(state: &AppState) -> Vec<PostRow> {
        state
            .posts
            .iter()
            .map(|post| PostRow {
                id: post.id,
                title: post.title.clone(),
                is_open: state.selected_post_id == Some(post.id),
            })
            .collect()
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_open {
            "Close"
        } else {
            "Open"
        }
    }
}

/// Right sidebar for the open post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetail {
    pub title: String,
    pub body: String,
    pub show_loader: bool,
    pub error_banner: Option<String>,
    pub no_comments_yet: bool,
    /// Empty while loading
    pub comments: Vec<Comment>,
    pub pending: Option<CommentDraft>,
    pub show_write_button: bool,
    pub show_form: bool,
}

impl PostDetail {
    /// Build the sidebar, or `None` when no post is open
    ///
    /// `form_open_for` is the post the comment form was opened on. The form
    /// only shows while that post is still the open one, so switching posts
    /// hides it.
    pub fn from_state(state: &AppState, form_open_for: Option<u64>) -> Option<Self> {
        let post = state.post.as_ref()?;
        let show_form = form_open_for.is_some() && form_open_for == state.selected_post_id;
        let has_error = state.has_error();

        Some(Self {
            title: format!("#{}: {}", post.id, post.title),
            body: post.body.clone(),
            show_loader: state.is_loading,
            error_banner: has_error.then(|| state.error_message.clone()),
            no_comments_yet: state.comments.is_empty() && !state.is_loading && !has_error,
            comments: if state.is_loading {
                Vec::new()
            } else {
                state.comments.clone()
            },
            pending: state.pending_comment.clone(),
            show_write_button: !show_form && !state.is_loading && !has_error,
            show_form,
        })
    }
}
