//! Core types for Postboard
//!
//! Plain records exchanged with the REST backend. Field names are snake_case in
//! Rust and camelCase on the wire.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

/// A comment as stored by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// A comment that has not been assigned an id by the server yet.
///
/// This is the request body of `POST /comments` and the shape of the
/// placeholder shown while a submission is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDraft {
    pub post_id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

impl CommentDraft {
    /// Attach a server-assigned id.
    pub fn into_comment(self, id: u64) -> Comment {
        Comment {
            id,
            post_id: self.post_id,
            name: self.name,
            email: self.email,
            body: self.body,
        }
    }
}
