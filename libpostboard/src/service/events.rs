//! Event system for request tracking
//!
//! An in-process event bus that tells front ends when remote requests start
//! and settle, without them having to diff the store.
//!
//! # Architecture
//!
//! The event bus uses `tokio::sync::broadcast` for multi-subscriber support.
//! If no subscribers exist, events are dropped immediately. Subscribers can
//! lag without blocking emitters.
//!
//! # Example
//!
//! ```no_run
//! use libpostboard::service::events::{EventBus, Event, RequestKind};
//!
//! # async fn example() {
//! let event_bus = EventBus::new(100);
//! let mut receiver = event_bus.subscribe();
//!
//! event_bus.emit(Event::RequestStarted {
//!     request: RequestKind::LoadPosts { user_id: 1 },
//! });
//!
//! if let Ok(event) = receiver.recv().await {
//!     println!("Received: {:?}", event);
//! }
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Event receiver type alias
pub type EventReceiver = broadcast::Receiver<Event>;

/// Event bus for distributing request events
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus with the specified capacity
    ///
    /// The capacity determines how many events can be buffered per subscriber
    /// before older events are dropped (if the subscriber is lagging).
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events emitted after this call
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Non-blocking. If nobody is listening the event is dropped.
    pub fn emit(&self, event: Event) {
        let _ = self.sender.send(event);
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Which remote request an event is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestKind {
    LoadUsers,
    LoadPosts { user_id: u64 },
    LoadComments { post_id: u64 },
    CreateComment { post_id: u64 },
    DeleteComment { comment_id: u64 },
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestKind::LoadUsers => write!(f, "loading users"),
            RequestKind::LoadPosts { user_id } => write!(f, "loading posts of user {user_id}"),
            RequestKind::LoadComments { post_id } => write!(f, "loading comments of post #{post_id}"),
            RequestKind::CreateComment { post_id } => write!(f, "adding a comment to post #{post_id}"),
            RequestKind::DeleteComment { comment_id } => write!(f, "deleting comment {comment_id}"),
        }
    }
}

/// Events emitted by the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    RequestStarted { request: RequestKind },

    RequestSucceeded { request: RequestKind },

    RequestFailed {
        request: RequestKind,
        /// Underlying error, for logs and status lines
        error: String,
    },

    /// A response arrived for a selection that is no longer current and was dropped
    StaleResponseDiscarded { request: RequestKind },
}

impl Event {
    pub fn request(&self) -> RequestKind {
        match self {
            Event::RequestStarted { request }
            | Event::RequestSucceeded { request }
            | Event::RequestFailed { request, .. }
            | Event::StaleResponseDiscarded { request } => *request,
        }
    }
}
