//! Selection orchestrator
//!
//! Sequences the remote calls that follow a user action and dispatches the
//! resulting state changes to the [`Store`]. Every operation follows the
//! same lifecycle: mark loading, clear the error banner, call the gateway,
//! then either apply the data or set the error message, and finally clear
//! the loading flag.
//!
//! The orchestrator never returns gateway failures as hard errors for loads;
//! they surface through the store's `error_message` and the [`EventBus`].
//! Mutations additionally return their result so the caller can update
//! view-local state (the comment form).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::RacePolicy;
use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::store::{Action, AppState, Store, GENERIC_ERROR, USERS_ERROR};
use crate::types::{Comment, CommentDraft};
use crate::view::CommentForm;

use super::events::{Event, EventBus, RequestKind};

/// Result of submitting the comment form
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A field was blank or no post is open; nothing was sent
    Invalid,
    /// The server accepted the comment
    Created(Comment),
    /// The server call failed; the form keeps its values
    Failed(GatewayError),
}

/// Drives store transitions around gateway calls
#[derive(Clone)]
pub struct Orchestrator {
    gateway: Arc<dyn Gateway>,
    store: Store,
    events: EventBus,
    race_policy: RacePolicy,
    /// Ticket of the most recent request that set the loading flag
    latest_request: Arc<AtomicU64>,
}

impl Orchestrator {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        store: Store,
        events: EventBus,
        race_policy: RacePolicy,
    ) -> Self {
        Self {
            gateway,
            store,
            events,
            race_policy,
            latest_request: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn race_policy(&self) -> RacePolicy {
        self.race_policy
    }

    /// Fetch every user once, at startup
    pub async fn load_users(&self) {
        let request = RequestKind::LoadUsers;
        self.issue();
        self.store.dispatch(Action::SetIsLoading(true));
        self.started(request);

        match self.gateway.list_users().await {
            Ok(users) => {
                tracing::info!(count = users.len(), "users loaded");
                self.store.dispatch(Action::SetUsers(users));
                self.succeeded(request);
            }
            Err(e) => self.failed(request, &e, USERS_ERROR),
        }

        self.store.dispatch(Action::SetIsLoading(false));
    }

    /// Switch to another user and fetch their posts
    ///
    /// Selecting the user that is already selected does nothing. Otherwise
    /// any open post is closed and the previous user's posts and comments
    /// are cleared before the fetch starts.
    ///
    /// Returns whether a fetch was issued.
    pub async fn select_user(&self, user_id: u64) -> bool {
        if self.store.select(|s| s.selected_user_id) == Some(user_id) {
            return false;
        }

        let request = RequestKind::LoadPosts { user_id };
        let ticket = self.issue();
        self.store.dispatch(Action::BeginUserSwitch(user_id));
        self.started(request);

        let result = self.gateway.list_posts(user_id).await;
        if self.is_stale(request, |s| s.selected_user_id == Some(user_id)) {
            self.settle_stale(ticket);
            return true;
        }

        match result {
            Ok(posts) => {
                tracing::debug!(user_id, count = posts.len(), "posts loaded");
                self.store.dispatch(Action::SetPosts(posts));
                self.succeeded(request);
            }
            Err(e) => self.failed(request, &e, GENERIC_ERROR),
        }

        self.store.dispatch(Action::SetIsLoading(false));
        true
    }

    /// Open a post's detail view and fetch its comments
    ///
    /// Does nothing if the post is already open or is not among the loaded
    /// posts. Returns whether a fetch was issued.
    pub async fn open_post(&self, post_id: u64) -> bool {
        let (current, post) = self
            .store
            .select(|s| (s.selected_post_id, s.find_post(post_id).cloned()));

        if current == Some(post_id) {
            return false;
        }
        let Some(post) = post else {
            tracing::warn!(post_id, "ignoring open of a post that is not loaded");
            return false;
        };

        let request = RequestKind::LoadComments { post_id };
        let ticket = self.issue();
        self.store.dispatch(Action::BeginPostOpen(post));
        self.started(request);

        let result = self.gateway.list_comments(post_id).await;
        if self.is_stale(request, |s| s.selected_post_id == Some(post_id)) {
            self.settle_stale(ticket);
            return true;
        }

        match result {
            Ok(comments) => {
                tracing::debug!(post_id, count = comments.len(), "comments loaded");
                self.store.dispatch(Action::SetComments(comments));
                self.succeeded(request);
            }
            Err(e) => self.failed(request, &e, GENERIC_ERROR),
        }

        self.store.dispatch(Action::SetIsLoading(false));
        true
    }

    /// Close the detail view
    pub fn close_post(&self) {
        self.store.dispatch(Action::SetSelectedPostId(None));
        self.store.dispatch(Action::SetPost(None));
        self.store.dispatch(Action::SetComments(Vec::new()));
    }

    /// Open/Close button of a post row
    pub async fn toggle_post(&self, post_id: u64) {
        if self.store.select(|s| s.selected_post_id) == Some(post_id) {
            self.close_post();
        } else {
            self.open_post(post_id).await;
        }
    }

    /// Validate the form and, if it holds a complete comment, send it
    ///
    /// On success only the body field is cleared. On failure the form keeps
    /// every value so the author can retry.
    pub async fn submit_comment(&self, form: &mut CommentForm) -> SubmitOutcome {
        let post_id = self.store.select(|s| s.selected_post_id);
        let Some(draft) = form.validate(post_id) else {
            return SubmitOutcome::Invalid;
        };

        match self.add_comment(draft).await {
            Ok(comment) => {
                form.commit_succeeded();
                SubmitOutcome::Created(comment)
            }
            Err(e) => SubmitOutcome::Failed(e),
        }
    }

    /// Send a new comment and append the server's copy to the list
    ///
    /// The draft is shown as the pending comment until the server answers.
    pub async fn add_comment(&self, draft: CommentDraft) -> Result<Comment, GatewayError> {
        let post_id = draft.post_id;
        let request = RequestKind::CreateComment { post_id };

        self.store.dispatch(Action::SetComment(Some(draft.clone())));
        let ticket = self.begin(request);

        let result = self.gateway.create_comment(&draft).await;
        let mut stale = false;
        match &result {
            Ok(comment) => {
                stale = self.is_stale(request, |s| s.selected_post_id == Some(post_id));
                if stale {
                    tracing::debug!(comment_id = comment.id, "comment created for a closed post");
                } else {
                    tracing::info!(post_id, comment_id = comment.id, "comment added");
                    self.store.dispatch(Action::AddCommentCommitted(comment.clone()));
                    self.succeeded(request);
                }
            }
            Err(e) => self.failed(request, e, GENERIC_ERROR),
        }

        self.store.dispatch(Action::SetComment(None));
        if stale {
            self.settle_stale(ticket);
        } else {
            self.store.dispatch(Action::SetIsLoading(false));
        }
        result
    }

    /// Delete a comment on the server, then drop it from the list
    ///
    /// The list is only changed after the server confirms.
    pub async fn delete_comment(&self, comment_id: u64) -> Result<(), GatewayError> {
        let request = RequestKind::DeleteComment { comment_id };
        self.store.dispatch(Action::SetErrorMessage(String::new()));
        self.started(request);

        let result = self.gateway.delete_comment(comment_id).await;
        match &result {
            Ok(()) => {
                tracing::info!(comment_id, "comment deleted");
                self.store.dispatch(Action::RemoveComment(comment_id));
                self.succeeded(request);
            }
            Err(e) => self.failed(request, e, GENERIC_ERROR),
        }

        self.store.dispatch(Action::SetIsLoading(false));
        result
    }

    fn begin(&self, request: RequestKind) -> u64 {
        let ticket = self.issue();
        self.store.dispatch(Action::SetIsLoading(true));
        self.store.dispatch(Action::SetErrorMessage(String::new()));
        self.started(request);
        ticket
    }

    /// Take a ticket for a request that sets the loading flag
    fn issue(&self) -> u64 {
        self.latest_request.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// A discarded response still clears the loading flag unless a newer
    /// request has taken it over.
    fn settle_stale(&self, ticket: u64) {
        if self.latest_request.load(Ordering::SeqCst) == ticket {
            self.store.dispatch(Action::SetIsLoading(false));
        }
    }

    fn started(&self, request: RequestKind) {
        tracing::debug!(%request, "request started");
        self.events.emit(Event::RequestStarted { request });
    }

    fn succeeded(&self, request: RequestKind) {
        self.events.emit(Event::RequestSucceeded { request });
    }

    fn failed(&self, request: RequestKind, error: &GatewayError, message: &str) {
        tracing::warn!(%request, error = %error, "request failed");
        self.store
            .dispatch(Action::SetErrorMessage(message.to_string()));
        self.events.emit(Event::RequestFailed {
            request,
            error: error.to_string(),
        });
    }

    /// Under [`RacePolicy::DiscardStale`], a response whose selection is no
    /// longer current is dropped without applying its data.
    fn is_stale(&self, request: RequestKind, still_current: impl FnOnce(&AppState) -> bool) -> bool {
        if self.race_policy != RacePolicy::DiscardStale || self.store.select(still_current) {
            return false;
        }
        tracing::debug!(%request, "discarding stale response");
        self.events.emit(Event::StaleResponseDiscarded { request });
        true
    }
}
