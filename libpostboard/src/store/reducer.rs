//! Pure reducer function for state transitions
//!
//! `(State, Action) -> State`
//!
//! The reducer has no side effects - it only computes new state values.
//! All I/O happens in the orchestrator and the gateway.

use super::actions::Action;
use super::state::AppState;

/// Pure reducer function
///
/// Takes current state and an action, returns new state.
///
/// # Purity Guarantees
///
/// - No network requests
/// - No file I/O
/// - Deterministic (same inputs -> same output)
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        Action::SetUsers(users) => AppState { users, ..state },

        Action::SetPosts(posts) => AppState { posts, ..state },

        Action::SetComments(comments) => AppState { comments, ..state },

        Action::SetSelectedUserId(selected_user_id) => AppState {
            selected_user_id,
            ..state
        },

        Action::SetSelectedPostId(selected_post_id) => AppState {
            selected_post_id,
            ..state
        },

        Action::SetIsLoading(is_loading) => AppState { is_loading, ..state },

        Action::SetErrorMessage(error_message) => AppState {
            error_message,
            ..state
        },

        Action::SetPost(post) => AppState { post, ..state },

        Action::SetComment(pending_comment) => AppState {
            pending_comment,
            ..state
        },

        Action::AddCommentCommitted(comment) => {
            let mut comments = state.comments;
            comments.push(comment);
            AppState { comments, ..state }
        }

        Action::RemoveComment(comment_id) => {
            let mut comments = state.comments;
            comments.retain(|c| c.id != comment_id);
            AppState { comments, ..state }
        }

        Action::BeginUserSwitch(user_id) => AppState {
            selected_user_id: Some(user_id),
            selected_post_id: None,
            post: None,
            posts: Vec::new(),
            comments: Vec::new(),
            is_loading: true,
            error_message: String::new(),
            ..state
        },

        Action::BeginPostOpen(post) => AppState {
            selected_post_id: Some(post.id),
            post: Some(post),
            comments: Vec::new(),
            is_loading: true,
            error_message: String::new(),
            ..state
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Comment, CommentDraft, Post};
    use crate::view::{MainPanel, PostDetail};

    fn post(id: u64) -> Post {
        Post {
            id,
            user_id: 1,
            title: format!("title {id}"),
            body: "b".to_string(),
        }
    }

    fn comment(id: u64, post_id: u64) -> Comment {
        Comment {
            id,
            post_id,
            name: format!("name {id}"),
            email: "e@x.com".to_string(),
            body: format!("body {id}"),
        }
    }

    #[test]
    fn test_reducer_is_pure() {
        let state = AppState::new();
        let state_clone = state.clone();

        let new_state = reduce(state_clone.clone(), Action::SetErrorMessage("Oops".to_string()));

        // Original state unchanged
        assert!(state_clone.error_message.is_empty());
        // New state has the change
        assert_eq!(new_state.error_message, "Oops");
    }

    #[test]
    fn test_same_action_same_result() {
        let action = Action::SetSelectedUserId(Some(3));
        let a = reduce(AppState::new(), action.clone());
        let b = reduce(AppState::new(), action);
        assert_eq!(a, b);
    }

    #[test]
    fn test_setters_touch_only_their_field() {
        let post = Post {
            id: 1,
            user_id: 1,
            title: "t".to_string(),
            body: "b".to_string(),
        };
        let state = reduce(AppState::new(), Action::SetPosts(vec![post.clone()]));
        let state = reduce(state, Action::SetIsLoading(true));
        let state = reduce(state, Action::SetPost(Some(post.clone())));

        assert_eq!(state.posts, vec![post.clone()]);
        assert!(state.is_loading);
        assert_eq!(state.post, Some(post));
        assert!(state.comments.is_empty());
        assert_eq!(state.selected_user_id, None);
    }

    #[test]
    fn test_add_comment_appends() {
        let state = reduce(AppState::new(), Action::SetComments(vec![comment(1, 5)]));
        let state = reduce(state, Action::AddCommentCommitted(comment(2, 5)));

        let ids: Vec<u64> = state.comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_remove_comment_removes_exactly_one() {
        let state = reduce(
            AppState::new(),
            Action::SetComments(vec![comment(6, 5), comment(7, 5), comment(8, 5)]),
        );
        let state = reduce(state, Action::RemoveComment(7));

        let ids: Vec<u64> = state.comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![6, 8]);
    }

    #[test]
    fn test_remove_missing_comment_is_noop() {
        let state = reduce(AppState::new(), Action::SetComments(vec![comment(6, 5)]));
        let state = reduce(state, Action::RemoveComment(99));
        assert_eq!(state.comments.len(), 1);
    }

    #[test]
    fn test_pending_comment_set_and_cleared() {
        let draft = CommentDraft {
            post_id: 5,
            name: "A".to_string(),
            email: "a@a.com".to_string(),
            body: "hi".to_string(),
        };

        let state = reduce(AppState::new(), Action::SetComment(Some(draft.clone())));
        assert_eq!(state.pending_comment, Some(draft));

        let state = reduce(state, Action::SetComment(None));
        assert!(state.pending_comment.is_none());
    }

    #[test]
    fn test_user_switch_never_shows_no_posts_yet() {
        let state = [
            Action::SetSelectedUserId(Some(1)),
            Action::SetPosts(vec![post(1)]),
            Action::SetPost(Some(post(1))),
            Action::SetSelectedPostId(Some(1)),
            Action::SetComments(vec![comment(3, 1)]),
            Action::SetErrorMessage("Something went wrong".to_string()),
        ]
        .into_iter()
        .fold(AppState::new(), reduce);

        let state = reduce(state, Action::BeginUserSwitch(2));

        assert_eq!(state.selected_user_id, Some(2));
        assert_eq!(state.selected_post_id, None);
        assert!(state.post.is_none());
        assert!(state.posts.is_empty());
        assert!(state.comments.is_empty());
        assert!(state.is_loading);
        assert!(!state.has_error());

        let panel = MainPanel::from_state(&state);
        assert!(panel.show_loader);
        assert!(!panel.no_posts_yet);
    }

    #[test]
    fn test_post_open_never_shows_no_comments_yet() {
        let state = [
            Action::SetSelectedUserId(Some(1)),
            Action::SetPosts(vec![post(1), post(2)]),
            Action::SetPost(Some(post(1))),
            Action::SetSelectedPostId(Some(1)),
            Action::SetComments(vec![comment(3, 1)]),
        ]
        .into_iter()
        .fold(AppState::new(), reduce);

        let state = reduce(state, Action::BeginPostOpen(post(2)));

        assert_eq!(state.selected_post_id, Some(2));
        assert_eq!(state.post, Some(post(2)));
        assert!(state.comments.is_empty());
        assert!(state.is_loading);
        assert_eq!(state.posts.len(), 2);

        let detail = PostDetail::from_state(&state, None).unwrap();
        assert!(detail.show_loader);
        assert!(!detail.no_comments_yet);
    }
}
