//! Postboard - browse users, their posts and the comments on them
//!
//! This library provides the core of the client: a reducer-driven store, the
//! orchestrator that sequences remote calls around user selections, the
//! REST gateway, and the view models front ends render.

pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod service;
pub mod store;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use config::{Config, RacePolicy};
pub use error::{GatewayError, PostboardError, Result};
pub use gateway::Gateway;
pub use service::PostboardService;
pub use store::{Action, AppState, Store};
pub use types::{Comment, CommentDraft, Post, User};
