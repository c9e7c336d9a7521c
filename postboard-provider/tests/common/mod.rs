//! Shared test helpers

#![allow(dead_code, clippy::panic)]

use std::sync::Arc;

use postboard_provider::{ApiConfig, PostsApi, create_api};
use serde_json::{Value, json};
use wiremock::MockServer;

/// Assert a `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got Err({:?})", res.as_ref().err());
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Test context: a mock server plus a client pointed at it.
pub struct TestContext {
    pub server: MockServer,
    pub api: Arc<dyn PostsApi>,
}

impl TestContext {
    pub async fn start() -> Self {
        Self::start_with(|config| config).await
    }

    pub async fn start_with(configure: impl FnOnce(ApiConfig) -> ApiConfig) -> Self {
        let server = MockServer::start().await;
        let config = configure(ApiConfig::with_base_url(server.uri()));
        let api = match create_api(&config) {
            Ok(api) => api,
            Err(e) => panic!("failed to create client: {e}"),
        };
        Self { server, api }
    }
}

pub fn user_json(id: u64, name: &str, catch_phrase: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "username": format!("user{id}"),
        "email": format!("user{id}@example.com"),
        "company": {
            "name": format!("{name} Inc"),
            "catchPhrase": catch_phrase,
            "bs": "synergize"
        }
    })
}

pub fn post_json(id: u64, user_id: u64, title: &str) -> Value {
    json!({ "userId": user_id, "id": id, "title": title, "body": format!("body of {id}") })
}

pub fn comment_json(id: u64, post_id: u64, name: &str) -> Value {
    json!({
        "postId": post_id,
        "id": id,
        "name": name,
        "email": format!("{id}@example.com"),
        "body": format!("comment {id}")
    })
}
