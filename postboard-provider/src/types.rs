use serde::{Deserialize, Serialize};

/// Remote user identifier.
pub type UserId = u64;

/// Remote post identifier.
pub type PostId = u64;

/// Default public API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

// ============ Domain records ============

/// A user's employer, as returned inside [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    #[serde(default)]
    pub catch_phrase: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bs: Option<String>,
}

/// A user record (`GET /users`, `GET /users/{id}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub company: Company,
}

/// A post record (`GET /posts?userId={id}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub title: String,
    pub body: String,
}

/// A comment record (`GET /comments?postId={id}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub post_id: PostId,
    pub name: String,
    pub email: String,
    pub body: String,
}

// ============ Client configuration ============

/// Connection settings for the remote API.
///
/// Every field has a default, so a partial JSON object is enough:
///
/// ```json
/// { "baseUrl": "http://localhost:3000", "requestTimeoutSecs": 15 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiConfig {
    /// Root URL, without trailing slash.
    pub base_url: String,
    /// Whole-request timeout. `None` means the request may wait indefinitely.
    pub request_timeout_secs: Option<u64>,
    /// Connection establishment timeout.
    pub connect_timeout_secs: Option<u64>,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            connect_timeout_secs: None,
            user_agent: concat!("postboard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ApiConfig {
    /// Config pointing at a custom endpoint, all other settings defaulted.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Base URL with any trailing slashes removed.
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
