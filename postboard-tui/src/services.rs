//! Service layer adapter for TUI
//!
//! This module provides an adapter between the async `PostboardService`
//! and the synchronous TUI event loop.
//!
//! # Architecture
//!
//! - `ServiceHandle`: Wraps PostboardService and owns a tokio runtime
//! - Commands: each user action spawns an orchestrator call and returns
//!   immediately; results land in the shared store
//! - Replies: request events and submission results are bridged to a
//!   crossbeam channel the event loop drains every frame
//! - Redraws: a selector on the store reports when anything on screen
//!   changed, so idle ticks skip drawing
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use libpostboard::gateway::mock::MockGateway;
//! use libpostboard::{PostboardService, RacePolicy};
//! use postboard_tui::services::ServiceHandle;
//!
//! # fn example() -> postboard_tui::error::Result<()> {
//! let service = PostboardService::with_gateway(Arc::new(MockGateway::seeded()), RacePolicy::default());
//! let services = ServiceHandle::new(service)?;
//!
//! services.load_users();
//!
//! // In event loop, check for replies
//! for reply in services.drain() {
//!     println!("{reply:?}");
//! }
//! # Ok(())
//! # }
//! ```

use crossbeam_channel::{unbounded, Receiver, Sender};
use libpostboard::service::{Event, Orchestrator, PostboardService, SubmitOutcome};
use libpostboard::view::{CommentForm, MainPanel, PostDetail, PostRow};
use libpostboard::{AppState, User};
use tokio::sync::broadcast::error::RecvError;

use crate::error::{Result, TuiError};

/// Message from the service side to the event loop
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceReply {
    /// Request lifecycle event
    Event(Event),

    /// A comment submission finished; the form comes back with its
    /// validation flags set and, on success, its body cleared
    Submitted {
        form: CommentForm,
        outcome: SubmitOutcome,
    },

    /// Something the screen shows has changed in the store
    StoreChanged,
}

/// Everything rendered from the store
///
/// The form part of the detail view is local UI state, so it is left out.
type Visible = (MainPanel, Vec<PostRow>, Option<PostDetail>, Vec<User>);

fn visible(state: &AppState) -> Visible {
    (
        MainPanel::from_state(state),
        PostRow::rows(state),
        PostDetail::from_state(state, None),
        state.users.clone(),
    )
}

/// Service handle for TUI operations
///
/// Wraps PostboardService and provides sync/async bridges for the TUI
/// event loop. Uses a tokio runtime to run remote calls without blocking
/// the UI.
pub struct ServiceHandle {
    service: PostboardService,
    runtime: tokio::runtime::Runtime,
    reply_tx: Sender<ServiceReply>,
    reply_rx: Receiver<ServiceReply>,
}

impl ServiceHandle {
    /// Create a new service handle
    ///
    /// Starts a tokio runtime and the task that forwards request events.
    ///
    /// # Errors
    ///
    /// Returns an error if the tokio runtime cannot be created.
    pub fn new(service: PostboardService) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("postboard-service")
            .enable_all()
            .build()
            .map_err(|e| TuiError::Runtime(e.to_string()))?;

        let (reply_tx, reply_rx) = unbounded();

        // Bridge tokio broadcast -> crossbeam channel
        let mut event_rx = service.subscribe();
        let tx = reply_tx.clone();
        runtime.spawn(async move {
            loop {
                match event_rx.recv().await {
                    Ok(event) => {
                        if tx.send(ServiceReply::Event(event)).is_err() {
                            // Receiver dropped, stop forwarding
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Event receiver lagged, skipped {} events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        // Redraw signal: only wakes when the visible projection changes
        let mut screen = service.store().watch(visible);
        let tx = reply_tx.clone();
        runtime.spawn(async move {
            while screen.changed().await.is_some() {
                if tx.send(ServiceReply::StoreChanged).is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            service,
            runtime,
            reply_tx,
            reply_rx,
        })
    }

    /// Snapshot of the shared store
    pub fn state(&self) -> AppState {
        self.service.store().state()
    }

    /// Receiver for replies, for callers that want to block on it
    pub fn replies(&self) -> &Receiver<ServiceReply> {
        &self.reply_rx
    }

    /// Take every reply received so far without blocking
    pub fn drain(&self) -> Vec<ServiceReply> {
        self.reply_rx.try_iter().collect()
    }

    fn orchestrator(&self) -> Orchestrator {
        self.service.orchestrator().clone()
    }

    pub fn load_users(&self) {
        let orchestrator = self.orchestrator();
        self.runtime.spawn(async move { orchestrator.load_users().await });
    }

    pub fn select_user(&self, user_id: u64) {
        let orchestrator = self.orchestrator();
        self.runtime.spawn(async move {
            orchestrator.select_user(user_id).await;
        });
    }

    pub fn toggle_post(&self, post_id: u64) {
        let orchestrator = self.orchestrator();
        self.runtime.spawn(async move { orchestrator.toggle_post(post_id).await });
    }

    /// Submit a copy of the form; the result arrives as
    /// [`ServiceReply::Submitted`]
    pub fn submit_comment(&self, form: CommentForm) {
        let orchestrator = self.orchestrator();
        let tx = self.reply_tx.clone();
        self.runtime.spawn(async move {
            let mut form = form;
            let outcome = orchestrator.submit_comment(&mut form).await;
            let _ = tx.send(ServiceReply::Submitted { form, outcome });
        });
    }

    pub fn delete_comment(&self, comment_id: u64) {
        let orchestrator = self.orchestrator();
        self.runtime.spawn(async move {
            // Failures already reach the store and the event stream
            if let Err(e) = orchestrator.delete_comment(comment_id).await {
                tracing::debug!(comment_id, error = %e, "delete failed");
            }
        });
    }
}
