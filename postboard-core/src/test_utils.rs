//! Test helper module
//!
//! Provides a trait-level mock of the posts API and page fixtures.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use postboard_provider::{
    Comment, Company, Post, PostId, PostsApi, ProviderError, Result, User, UserId,
};
use tokio::sync::RwLock;

use crate::dom::{Document, LabeledElement, build_labeled_element};
use crate::services::ServiceContext;
use crate::types::{DEFAULT_TEXT_CLASS, PageLayout, SELECT_MENU_ID};

const MOCK: &str = "mock";

// ===== MockPostsApi =====

pub struct MockPostsApi {
    users: RwLock<Vec<User>>,
    posts: RwLock<Vec<Post>>,
    comments: RwLock<Vec<Comment>>,
    fail_users: RwLock<bool>,
    fail_posts: RwLock<bool>,
    fail_comments: RwLock<bool>,
    /// `get_user` fails with HTTP 500 for these ids
    failing_user_ids: RwLock<HashSet<UserId>>,
    /// Every request received, in order, as `"GET /path?query"`
    requests: RwLock<Vec<String>>,
}

impl MockPostsApi {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            posts: RwLock::new(Vec::new()),
            comments: RwLock::new(Vec::new()),
            fail_users: RwLock::new(false),
            fail_posts: RwLock::new(false),
            fail_comments: RwLock::new(false),
            failing_user_ids: RwLock::new(HashSet::new()),
            requests: RwLock::new(Vec::new()),
        }
    }

    /// Two users; user 1 has posts 1 and 2, user 2 has post 3.
    /// Post 1 has two comments, post 2 one, post 3 none.
    pub fn with_fixture() -> Self {
        Self {
            users: RwLock::new(vec![
                user(1, "Leanne Graham", "Romaguera-Crona", "Multi-layered client-server neural-net"),
                user(2, "Ervin Howell", "Deckow-Crist", "Proactive didactic contingency"),
            ]),
            posts: RwLock::new(vec![
                post(1, 1, "sunt aut facere"),
                post(2, 1, "qui est esse"),
                post(3, 2, "ea molestias quasi"),
            ]),
            comments: RwLock::new(vec![
                comment(1, 1, "id labore ex et quam laborum"),
                comment(2, 1, "quo vero reiciendis"),
                comment(3, 2, "odio adipisci rerum"),
            ]),
            ..Self::new()
        }
    }

    pub async fn set_posts(&self, posts: Vec<Post>) {
        *self.posts.write().await = posts;
    }

    pub async fn fail_users(&self, fail: bool) {
        *self.fail_users.write().await = fail;
    }

    pub async fn fail_posts(&self, fail: bool) {
        *self.fail_posts.write().await = fail;
    }

    pub async fn fail_comments(&self, fail: bool) {
        *self.fail_comments.write().await = fail;
    }

    pub async fn fail_user(&self, user_id: UserId) {
        self.failing_user_ids.write().await.insert(user_id);
    }

    pub async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }

    async fn record(&self, request: String) {
        self.requests.write().await.push(request);
    }
}

fn server_error() -> ProviderError {
    ProviderError::HttpStatus {
        provider: MOCK.to_string(),
        status: 500,
        raw_message: Some("mock failure".to_string()),
    }
}

#[async_trait]
impl PostsApi for MockPostsApi {
    fn id(&self) -> &'static str {
        MOCK
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.record("GET /users".to_string()).await;
        if *self.fail_users.read().await {
            return Err(server_error());
        }
        Ok(self.users.read().await.clone())
    }

    async fn get_user(&self, user_id: UserId) -> Result<User> {
        self.record(format!("GET /users/{user_id}")).await;
        if self.failing_user_ids.read().await.contains(&user_id) {
            return Err(server_error());
        }
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound {
                provider: MOCK.to_string(),
                resource: format!("/users/{user_id}"),
            })
    }

    async fn list_posts(&self, user_id: UserId) -> Result<Vec<Post>> {
        self.record(format!("GET /posts?userId={user_id}")).await;
        if *self.fail_posts.read().await {
            return Err(server_error());
        }
        Ok(self
            .posts
            .read()
            .await
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>> {
        self.record(format!("GET /comments?postId={post_id}")).await;
        if *self.fail_comments.read().await {
            return Err(server_error());
        }
        Ok(self
            .comments
            .read()
            .await
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }
}

// ===== Fixtures =====

pub fn user(id: UserId, name: &str, company: &str, catch_phrase: &str) -> User {
    User {
        id,
        name: name.to_string(),
        username: None,
        email: None,
        company: Company {
            name: company.to_string(),
            catch_phrase: catch_phrase.to_string(),
            bs: None,
        },
    }
}

pub fn post(id: PostId, user_id: UserId, title: &str) -> Post {
    Post {
        id,
        user_id,
        title: title.to_string(),
        body: format!("body of post {id}"),
    }
}

pub fn comment(id: u64, post_id: PostId, name: &str) -> Comment {
    Comment {
        id: Some(id),
        post_id,
        name: name.to_string(),
        email: format!("commenter{id}@example.com"),
        body: format!("comment body {id}"),
    }
}

pub fn create_test_context(mock: &Arc<MockPostsApi>) -> Arc<ServiceContext> {
    let api: Arc<dyn PostsApi> = Arc::clone(mock) as Arc<dyn PostsApi>;
    Arc::new(ServiceContext::new(api))
}

/// `<select id="selectMenu"></select><main><p class="default-text">…</p></main>`
pub fn mount_test_page(doc: &mut Document) -> PageLayout {
    let root = doc.root();
    let select_menu = doc.create_element("select");
    doc.set_attr(select_menu, "id", SELECT_MENU_ID).unwrap();
    let main = doc.create_element("main");
    let default_text = build_labeled_element(
        doc,
        &LabeledElement::paragraph("Select an Employee to display their posts.")
            .with_class(DEFAULT_TEXT_CLASS),
    );
    doc.append_child(root, select_menu).unwrap();
    doc.append_child(root, main).unwrap();
    doc.append_child(main, default_text).unwrap();
    PageLayout {
        select_menu,
        main,
        default_text,
    }
}
