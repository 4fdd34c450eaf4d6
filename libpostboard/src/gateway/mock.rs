//! Mock gateway implementation for testing
//!
//! An in-memory backend that can simulate failures and latency per operation.
//! It's designed for integration tests of the orchestrator and for running the
//! TUI without network access.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use super::{Gateway, GatewayResult};
use crate::error::GatewayError;
use crate::types::{Comment, CommentDraft, Post, User};

/// Gateway operations, used to script failures and read call counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOp {
    ListUsers,
    ListPosts,
    ListComments,
    CreateComment,
    DeleteComment,
}

impl MockOp {
    fn path(self) -> &'static str {
        match self {
            MockOp::ListUsers => "/users",
            MockOp::ListPosts => "/posts",
            MockOp::ListComments | MockOp::CreateComment => "/comments",
            MockOp::DeleteComment => "/comments/{id}",
        }
    }
}

#[derive(Debug, Default)]
struct MockData {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
}

#[derive(Debug, Default)]
struct MockBehavior {
    failing: Vec<MockOp>,
    delay: Duration,
    posts_delay_by_user: HashMap<u64, Duration>,
    comments_delay_by_post: HashMap<u64, Duration>,
    calls: HashMap<MockOp, usize>,
}

/// Mock gateway for testing
#[derive(Debug, Default)]
pub struct MockGateway {
    data: Mutex<MockData>,
    behavior: Mutex<MockBehavior>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockGateway {
    /// Create an empty mock backend where every call succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// A small fixed data set for offline runs
    pub fn seeded() -> Self {
        let users = vec![
            user(1, "Leanne Graham"),
            user(2, "Ervin Howell"),
            user(3, "Clementine Bauch"),
        ];
        let posts = vec![
            post(1, 1, "sunt aut facere repellat", "quia et suscipit suscipit recusandae"),
            post(2, 1, "qui est esse", "est rerum tempore vitae sequi sint nihil"),
            post(3, 2, "ea molestias quasi exercitationem", "et iusto sed quo iure"),
        ];
        let comments = vec![
            comment(1, 1, "id labore ex et quam laborum", "Eliseo@gardner.biz", "laudantium enim quasi"),
            comment(2, 1, "quo vero reiciendis velit", "Jayne_Kuhic@sydney.com", "est natus enim nihil"),
            comment(3, 3, "odio adipisci rerum aut", "Nikita@garfield.biz", "quia molestiae reprehenderit"),
        ];

        Self::new().with_users(users).with_posts(posts).with_comments(comments)
    }

    pub fn with_users(self, users: Vec<User>) -> Self {
        lock(&self.data).users = users;
        self
    }

    pub fn with_posts(self, posts: Vec<Post>) -> Self {
        lock(&self.data).posts = posts;
        self
    }

    pub fn with_comments(self, comments: Vec<Comment>) -> Self {
        lock(&self.data).comments = comments;
        self
    }

    /// Delay every operation (simulates network latency)
    pub fn with_delay(self, delay: Duration) -> Self {
        self.set_delay(delay);
        self
    }

    pub fn set_delay(&self, delay: Duration) {
        lock(&self.behavior).delay = delay;
    }

    /// Make an operation fail until [`MockGateway::set_failing`] clears it
    pub fn failing(self, op: MockOp) -> Self {
        self.set_failing(op, true);
        self
    }

    pub fn set_failing(&self, op: MockOp, failing: bool) {
        let mut behavior = lock(&self.behavior);
        behavior.failing.retain(|o| *o != op);
        if failing {
            behavior.failing.push(op);
        }
    }

    /// Extra latency for `list_posts` of one user
    pub fn delay_posts_for(&self, user_id: u64, delay: Duration) {
        lock(&self.behavior).posts_delay_by_user.insert(user_id, delay);
    }

    /// Extra latency for `list_comments` of one post
    pub fn delay_comments_for(&self, post_id: u64, delay: Duration) {
        lock(&self.behavior).comments_delay_by_post.insert(post_id, delay);
    }

    /// Number of times an operation has been called
    pub fn call_count(&self, op: MockOp) -> usize {
        lock(&self.behavior).calls.get(&op).copied().unwrap_or(0)
    }

    /// Total number of calls across all operations
    pub fn total_calls(&self) -> usize {
        lock(&self.behavior).calls.values().sum()
    }

    /// Comments currently stored by the backend
    pub fn stored_comments(&self) -> Vec<Comment> {
        lock(&self.data).comments.clone()
    }

    /// Record the call, wait out the simulated latency, then report the
    /// scripted outcome.
    async fn begin(&self, op: MockOp, extra: Option<Duration>) -> GatewayResult<()> {
        let (delay, failing) = {
            let mut behavior = lock(&self.behavior);
            *behavior.calls.entry(op).or_insert(0) += 1;
            (
                behavior.delay + extra.unwrap_or_default(),
                behavior.failing.contains(&op),
            )
        };

        if !delay.is_zero() {
            sleep(delay).await;
        }

        if failing {
            return Err(GatewayError::Status {
                status: 500,
                path: op.path().to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn list_users(&self) -> GatewayResult<Vec<User>> {
        self.begin(MockOp::ListUsers, None).await?;

        Ok(lock(&self.data).users.clone())
    }

    async fn list_posts(&self, user_id: u64) -> GatewayResult<Vec<Post>> {
        let extra = lock(&self.behavior).posts_delay_by_user.get(&user_id).copied();
        self.begin(MockOp::ListPosts, extra).await?;

        Ok(lock(&self.data)
            .posts
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_comments(&self, post_id: u64) -> GatewayResult<Vec<Comment>> {
        let extra = lock(&self.behavior).comments_delay_by_post.get(&post_id).copied();
        self.begin(MockOp::ListComments, extra).await?;

        Ok(lock(&self.data)
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn create_comment(&self, draft: &CommentDraft) -> GatewayResult<Comment> {
        self.begin(MockOp::CreateComment, None).await?;

        let mut data = lock(&self.data);
        let next_id = data.comments.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let created = draft.clone().into_comment(next_id);
        data.comments.push(created.clone());
        Ok(created)
    }

    async fn delete_comment(&self, comment_id: u64) -> GatewayResult<()> {
        self.begin(MockOp::DeleteComment, None).await?;

        let mut data = lock(&self.data);
        let before = data.comments.len();
        data.comments.retain(|c| c.id != comment_id);
        if data.comments.len() == before {
            return Err(GatewayError::Status {
                status: 404,
                path: format!("/comments/{comment_id}"),
            });
        }
        Ok(())
    }
}

fn user(id: u64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
    }
}

fn post(id: u64, user_id: u64, title: &str, body: &str) -> Post {
    Post {
        id,
        user_id,
        title: title.to_string(),
        body: body.to_string(),
    }
}

fn comment(id: u64, post_id: u64, name: &str, email: &str, body: &str) -> Comment {
    Comment {
        id,
        post_id,
        name: name.to_string(),
        email: email.to_string(),
        body: body.to_string(),
    }
}
