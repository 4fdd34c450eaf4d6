//! Application store
//!
//! Contains the core state architecture:
//! - Actions: What can happen
//! - State: What is true right now
//! - Reducer: Pure function (State, Action) -> State
//!
//! [`Store`] wraps the reducer in an observable container. Dispatch is
//! serialized through a `tokio::sync::watch` channel, so reducers never run
//! concurrently and every subscriber sees the latest state.

pub mod actions;
pub mod reducer;
pub mod state;

pub use actions::Action;
pub use reducer::reduce;
pub use state::{AppState, GENERIC_ERROR, USERS_ERROR};

use std::sync::Arc;
use tokio::sync::watch;

/// Observable state container
///
/// Cheap to clone; all clones share the same state.
#[derive(Clone)]
pub struct Store {
    sender: Arc<watch::Sender<AppState>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    pub fn with_state(state: AppState) -> Self {
        let (sender, _) = watch::channel(state);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Apply an action and notify subscribers
    pub fn dispatch(&self, action: Action) {
        tracing::trace!(?action, "dispatch");
        self.sender.send_modify(|state| {
            let current = std::mem::take(state);
            *state = reduce(current, action);
        });
    }

    /// Snapshot of the current state
    pub fn state(&self) -> AppState {
        self.sender.borrow().clone()
    }

    /// Read one projection of the current state without cloning the rest
    pub fn select<T>(&self, selector: impl FnOnce(&AppState) -> T) -> T {
        selector(&self.sender.borrow())
    }

    /// Receiver notified on every dispatch
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.sender.subscribe()
    }

    /// Subscribe to one slice of the state
    ///
    /// The returned [`Selection`] only wakes up when the selected value
    /// actually changes.
    pub fn watch<T, F>(&self, selector: F) -> Selection<T, F>
    where
        T: PartialEq + Clone,
        F: Fn(&AppState) -> T,
    {
        let receiver = self.sender.subscribe();
        let last = selector(&receiver.borrow());
        Selection {
            receiver,
            selector,
            last,
        }
    }
}

/// Selector-based subscription created by [`Store::watch`]
pub struct Selection<T, F> {
    receiver: watch::Receiver<AppState>,
    selector: F,
    last: T,
}

impl<T, F> Selection<T, F>
where
    T: PartialEq + Clone,
    F: Fn(&AppState) -> T,
{
    /// Last value seen
    pub fn get(&self) -> &T {
        &self.last
    }

    /// Wait until the selected value differs from the last one seen
    ///
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<T> {
        loop {
            self.receiver.changed().await.ok()?;
            let next = {
                let state = self.receiver.borrow_and_update();
                (self.selector)(&state)
            };
            if next != self.last {
                self.last = next.clone();
                return Some(next);
            }
        }
    }
}
