//! Guarded data fetching

use std::sync::Arc;

use postboard_provider::{Comment, Post, PostId, ProviderError, User, UserId};

use crate::services::ServiceContext;
use crate::types::FetchOutcome;

/// Fetch Client
///
/// Wraps the API port so that a missing id never reaches the network and a
/// failure never escapes as an error: every call ends in a [`FetchOutcome`].
/// Each call issues at most one request.
pub struct FetchService {
    ctx: Arc<ServiceContext>,
}

impl FetchService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// `GET /users`
    pub async fn get_users(&self) -> FetchOutcome<Vec<User>> {
        settle(self.ctx.api.list_users().await, "users")
    }

    /// `GET /users/{id}`
    pub async fn get_user(&self, user_id: Option<UserId>) -> FetchOutcome<User> {
        let Some(user_id) = present(user_id) else {
            return FetchOutcome::Skipped;
        };
        settle(self.ctx.api.get_user(user_id).await, "user")
    }

    /// `GET /posts?userId={id}`
    pub async fn get_user_posts(&self, user_id: Option<UserId>) -> FetchOutcome<Vec<Post>> {
        let Some(user_id) = present(user_id) else {
            return FetchOutcome::Skipped;
        };
        settle(self.ctx.api.list_posts(user_id).await, "posts")
    }

    /// `GET /comments?postId={id}`
    pub async fn get_post_comments(&self, post_id: Option<PostId>) -> FetchOutcome<Vec<Comment>> {
        let Some(post_id) = present(post_id) else {
            return FetchOutcome::Skipped;
        };
        settle(self.ctx.api.list_comments(post_id).await, "comments")
    }
}

/// Zero counts as missing.
fn present(id: Option<u64>) -> Option<u64> {
    id.filter(|id| *id != 0)
}

fn settle<T>(result: Result<T, ProviderError>, what: &str) -> FetchOutcome<T> {
    match result {
        Ok(data) => FetchOutcome::Data(data),
        Err(e) => {
            if e.is_expected() {
                log::warn!("Fetching {what} failed: {e}");
            } else {
                log::error!("Fetching {what} failed: {e}");
            }
            FetchOutcome::Failed(e)
        }
    }
}
