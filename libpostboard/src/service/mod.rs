//! Service layer for Postboard
//!
//! This module provides a clean, testable API for the application logic that
//! can be consumed by any front end without code duplication.
//!
//! # Architecture
//!
//! The service layer follows a facade pattern with `PostboardService` as the
//! main entry point, wiring together:
//!
//! - `Store`: the shared application state
//! - `Orchestrator`: the remote-call sequences behind every user action
//! - `EventBus`: request lifecycle event distribution
//!
//! # Example
//!
//! ```no_run
//! use libpostboard::service::PostboardService;
//!
//! # async fn example() -> libpostboard::Result<()> {
//! let service = PostboardService::new()?;
//!
//! service.orchestrator().load_users().await;
//! if let Some(user) = service.store().state().users.first() {
//!     service.orchestrator().select_user(user.id).await;
//! }
//! println!("{} posts", service.store().state().posts.len());
//! # Ok(())
//! # }
//! ```

pub mod events;
pub mod orchestrator;

pub use events::{Event, EventBus, EventReceiver, RequestKind};
pub use orchestrator::{Orchestrator, SubmitOutcome};

use std::sync::Arc;

use crate::config::RacePolicy;
use crate::gateway::http::HttpGateway;
use crate::gateway::Gateway;
use crate::store::Store;
use crate::{Config, Result};

/// Main service facade
///
/// The store and the event bus are shared with the orchestrator, so state
/// changes made by any operation are visible to every subscriber.
pub struct PostboardService {
    store: Store,
    orchestrator: Orchestrator,
    event_bus: EventBus,
}

impl PostboardService {
    /// Create a new service with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration cannot be loaded
    /// - The HTTP client cannot be built
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::from_config(&config)
    }

    /// Create a service talking to the REST backend named in `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let gateway = HttpGateway::new(&config.api)?;
        tracing::debug!(base_url = gateway.base_url(), "using HTTP gateway");
        Ok(Self::with_gateway(
            Arc::new(gateway),
            config.behavior.race_policy,
        ))
    }

    /// Create a service over any gateway, useful for tests and offline mode
    pub fn with_gateway(gateway: Arc<dyn Gateway>, race_policy: RacePolicy) -> Self {
        let store = Store::new();
        let event_bus = EventBus::new(100);
        let orchestrator =
            Orchestrator::new(gateway, store.clone(), event_bus.clone(), race_policy);

        Self {
            store,
            orchestrator,
            event_bus,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Subscribe to request events
    ///
    /// Returns a receiver that will receive lifecycle events for every
    /// remote request. Multiple subscribers are supported.
    pub fn subscribe(&self) -> EventReceiver {
        self.event_bus.subscribe()
    }
}
