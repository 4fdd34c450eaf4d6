//! Remote data gateway
//!
//! One trait over the REST backend, with an HTTP implementation and a
//! scriptable in-memory one.
//!
//! # Examples
//!
//! ```no_run
//! use libpostboard::gateway::{Gateway, http::HttpGateway};
//! use libpostboard::config::ApiConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = HttpGateway::new(&ApiConfig::default())?;
//!
//! let users = gateway.list_users().await?;
//! if let Some(user) = users.first() {
//!     let posts = gateway.list_posts(user.id).await?;
//!     println!("{} has {} posts", user.name, posts.len());
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::types::{Comment, CommentDraft, Post, User};

pub mod http;

// Mock gateway is available for all builds (not just tests) to support integration tests
// and the offline mode of the TUI
pub mod mock;

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Remote operations the application needs.
///
/// Every call may suspend. Failures are reported as a single error kind and
/// are never retried here.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn list_users(&self) -> GatewayResult<Vec<User>>;

    async fn list_posts(&self, user_id: u64) -> GatewayResult<Vec<Post>>;

    async fn list_comments(&self, post_id: u64) -> GatewayResult<Vec<Comment>>;

    /// Create a comment; the server assigns the id.
    async fn create_comment(&self, draft: &CommentDraft) -> GatewayResult<Comment>;

    async fn delete_comment(&self, comment_id: u64) -> GatewayResult<()>;
}
