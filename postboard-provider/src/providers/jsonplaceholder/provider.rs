//! JSONPlaceholder `PostsApi` trait implementation

use async_trait::async_trait;

use crate::error::Result;
use crate::providers::common::require_id;
use crate::traits::PostsApi;
use crate::types::{Comment, Post, PostId, User, UserId};

use super::{JsonPlaceholderProvider, PROVIDER_NAME};

#[async_trait]
impl PostsApi for JsonPlaceholderProvider {
    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.get("/users", &[]).await
    }

    async fn get_user(&self, user_id: UserId) -> Result<User> {
        let user_id = require_id(user_id, "user_id", PROVIDER_NAME)?;
        self.get(&format!("/users/{user_id}"), &[]).await
    }

    async fn list_posts(&self, user_id: UserId) -> Result<Vec<Post>> {
        let user_id = require_id(user_id, "user_id", PROVIDER_NAME)?;
        self.get("/posts", &[("userId", user_id.to_string())]).await
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>> {
        let post_id = require_id(post_id, "post_id", PROVIDER_NAME)?;
        self.get("/comments", &[("postId", post_id.to_string())])
            .await
    }
}
