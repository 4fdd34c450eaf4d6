//! Actions for the reducer pattern
//!
//! All state transitions are triggered by actions. This module defines
//! every action that can modify application state.

use crate::types::{Comment, CommentDraft, Post, User};

/// Actions that trigger state transitions
///
/// Actions are plain data describing what should happen. The reducer
/// (see `reducer.rs`) is responsible for applying them to state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetUsers(Vec<User>),

    /// Replace the posts collection
    SetPosts(Vec<Post>),

    /// Replace the comments collection
    SetComments(Vec<Comment>),

    SetSelectedUserId(Option<u64>),

    SetSelectedPostId(Option<u64>),

    SetIsLoading(bool),

    /// Set the global error banner; an empty string clears it
    SetErrorMessage(String),

    /// Set the displayed post snapshot
    SetPost(Option<Post>),

    /// Set the pending comment placeholder
    SetComment(Option<CommentDraft>),

    /// Append a comment the server has accepted
    AddCommentCommitted(Comment),

    /// Drop a comment the server has deleted
    RemoveComment(u64),

    /// Select another user and start loading their posts in one step:
    /// closes the detail view, clears posts and comments, sets loading and
    /// clears the error banner
    BeginUserSwitch(u64),

    /// Open a post and start loading its comments in one step
    BeginPostOpen(Post),
}
