use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Comment, Post, PostId, User, UserId};

/// Read-only posts API.
///
/// Mirrors the four endpoints the page needs. Implementations issue exactly
/// one request per call and never retry.
#[async_trait]
pub trait PostsApi: Send + Sync {
    /// Client identifier, used as the `[provider]` prefix in logs and errors.
    fn id(&self) -> &'static str;

    /// `GET /users`
    async fn list_users(&self) -> Result<Vec<User>>;

    /// `GET /users/{id}`
    async fn get_user(&self, user_id: UserId) -> Result<User>;

    /// `GET /posts?userId={id}`
    async fn list_posts(&self, user_id: UserId) -> Result<Vec<Post>>;

    /// `GET /comments?postId={id}`
    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>>;
}
