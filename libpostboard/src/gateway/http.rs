//! HTTP gateway over the REST backend
//!
//! Unified request flow: send, log, check status, read body, decode JSON.
//! Every failure becomes a [`GatewayError`]; nothing is retried.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::{Gateway, GatewayResult};
use crate::config::ApiConfig;
use crate::error::GatewayError;
use crate::types::{Comment, CommentDraft, Post, User};

const LOG_BODY_LIMIT: usize = 512;

pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Build a gateway from API configuration
    ///
    /// The request timeout is enforced by the HTTP client.
    pub fn new(config: &ApiConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| GatewayError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the body of a 2xx response.
    async fn execute(&self, request: RequestBuilder, method: &str, path: &str) -> GatewayResult<String> {
        tracing::debug!("{method} {path}");

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!("{method} {path} -> {}", status.as_u16());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                "{method} {path} failed with HTTP {}: {}",
                status.as_u16(),
                truncate_for_log(&body)
            );
            return Err(GatewayError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(format!("Failed to read response body: {e}")))?;

        tracing::trace!("{method} {path} body: {}", truncate_for_log(&body));

        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        let body = self.execute(self.client.get(self.url(path)), "GET", path).await?;
        parse_json(&body, path)
    }
}

fn parse_json<T: DeserializeOwned>(body: &str, path: &str) -> GatewayResult<T> {
    serde_json::from_str(body).map_err(|e| {
        tracing::error!("JSON decode failed for {path}: {e}; raw: {}", truncate_for_log(body));
        GatewayError::Decode {
            path: path.to_string(),
            detail: e.to_string(),
        }
    })
}

fn truncate_for_log(text: &str) -> String {
    if text.chars().count() <= LOG_BODY_LIMIT {
        return text.to_string();
    }
    let head: String = text.chars().take(LOG_BODY_LIMIT).collect();
    format!("{head}... ({} bytes)", text.len())
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn list_users(&self) -> GatewayResult<Vec<User>> {
        self.get_json("/users").await
    }

    async fn list_posts(&self, user_id: u64) -> GatewayResult<Vec<Post>> {
        self.get_json(&format!("/posts?userId={user_id}")).await
    }

    async fn list_comments(&self, post_id: u64) -> GatewayResult<Vec<Comment>> {
        self.get_json(&format!("/comments?postId={post_id}")).await
    }

    async fn create_comment(&self, draft: &CommentDraft) -> GatewayResult<Comment> {
        let path = "/comments";
        let request = self.client.post(self.url(path)).json(draft);
        let body = self.execute(request, "POST", path).await?;
        parse_json(&body, path)
    }

    async fn delete_comment(&self, comment_id: u64) -> GatewayResult<()> {
        let path = format!("/comments/{comment_id}");
        let request = self.client.delete(self.url(&path));
        self.execute(request, "DELETE", &path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ApiConfig {
            base_url: "http://localhost:3000/".to_string(),
            timeout_secs: 1,
        };
        let gateway = HttpGateway::new(&config).unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:3000");
        assert_eq!(gateway.url("/users"), "http://localhost:3000/users");
    }

    #[test]
    fn test_parse_json_reports_path() {
        let result: GatewayResult<Vec<User>> = parse_json("not json", "/users");
        match result {
            Err(GatewayError::Decode { path, .. }) => assert_eq!(path, "/users"),
            other => panic!("Expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("short"), "short");

        let long = "x".repeat(LOG_BODY_LIMIT + 10);
        let truncated = truncate_for_log(&long);
        assert!(truncated.ends_with(&format!("... ({} bytes)", long.len())));
    }
}
