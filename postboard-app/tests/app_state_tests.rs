#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `AppStateBuilder` and the page flows driven through `AppState`.

use std::sync::Arc;

use async_trait::async_trait;
use postboard_app::{AppConfig, AppState, AppStateBuilder};
use postboard_core::dom::{Document, EventType};
use postboard_core::error::CoreError;
use postboard_core::types::SelectionChange;
use postboard_provider::{
    Comment, Company, Post, PostId, PostsApi, ProviderError, Result, User, UserId,
};
use tokio::sync::RwLock;

// ===== Mock Implementation =====

struct MockPostsApi {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    fail_users: RwLock<bool>,
    requests: RwLock<Vec<String>>,
}

impl MockPostsApi {
    /// User 1 has two posts, user 2 one, user 3 none.
    fn new() -> Self {
        let user = |id: UserId, name: &str, company: &str| User {
            id,
            name: name.to_string(),
            username: None,
            email: None,
            company: Company {
                name: company.to_string(),
                catch_phrase: format!("{company} catch phrase"),
                bs: None,
            },
        };
        let post = |id: PostId, user_id: UserId| Post {
            id,
            user_id,
            title: format!("title {id}"),
            body: format!("body {id}"),
        };
        let comment = |id: u64, post_id: PostId| Comment {
            id: Some(id),
            post_id,
            name: format!("comment {id}"),
            email: format!("c{id}@example.com"),
            body: format!("comment body {id}"),
        };
        Self {
            users: vec![
                user(1, "Leanne Graham", "Romaguera-Crona"),
                user(2, "Ervin Howell", "Deckow-Crist"),
                user(3, "Clementine Bauch", "Romaguera-Jacobson"),
            ],
            posts: vec![post(1, 1), post(2, 1), post(11, 2)],
            comments: vec![comment(1, 1), comment(2, 1), comment(3, 2), comment(4, 11)],
            fail_users: RwLock::new(false),
            requests: RwLock::new(Vec::new()),
        }
    }

    async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl PostsApi for MockPostsApi {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.requests.write().await.push("GET /users".to_string());
        if *self.fail_users.read().await {
            return Err(ProviderError::NetworkError {
                provider: "mock".to_string(),
                detail: "connection refused".to_string(),
            });
        }
        Ok(self.users.clone())
    }

    async fn get_user(&self, user_id: UserId) -> Result<User> {
        self.requests
            .write()
            .await
            .push(format!("GET /users/{user_id}"));
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound {
                provider: "mock".to_string(),
                resource: format!("/users/{user_id}"),
            })
    }

    async fn list_posts(&self, user_id: UserId) -> Result<Vec<Post>> {
        self.requests
            .write()
            .await
            .push(format!("GET /posts?userId={user_id}"));
        Ok(self
            .posts
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_comments(&self, post_id: PostId) -> Result<Vec<Comment>> {
        self.requests
            .write()
            .await
            .push(format!("GET /comments?postId={post_id}"));
        Ok(self
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }
}

fn build_app(mock: &Arc<MockPostsApi>) -> AppState {
    AppStateBuilder::new()
        .api(Arc::clone(mock) as Arc<dyn PostsApi>)
        .build()
        .expect("failed to build AppState")
}

fn count(app: &AppState, selector: &str) -> usize {
    app.document()
        .query_selector_all(app.layout().main, selector)
        .unwrap()
        .len()
}

// ===== Builder =====

#[test]
fn build_with_default_http_client() {
    let app = AppStateBuilder::new().build().unwrap();
    assert_eq!(app.ctx.api.id(), "jsonplaceholder");
    assert_eq!(app.config(), &AppConfig::default());
}

#[test]
fn build_rejects_zero_fallback_user() {
    let result = AppStateBuilder::new()
        .api(Arc::new(MockPostsApi::new()))
        .config(AppConfig {
            fallback_user_id: 0,
            ..AppConfig::default()
        })
        .build();
    assert!(matches!(result, Err(CoreError::ValidationError(_))));
}

#[test]
fn build_rejects_empty_base_url() {
    let mut config = AppConfig::default();
    config.api.base_url = "  ".to_string();
    let result = AppStateBuilder::new().config(config).build();
    assert!(matches!(result, Err(CoreError::ValidationError(_))));
}

#[test]
fn build_rejects_document_without_page_elements() {
    let result = AppStateBuilder::new()
        .api(Arc::new(MockPostsApi::new()))
        .document(Document::new())
        .build();
    assert!(matches!(result, Err(CoreError::ElementNotFound(_))));
}

#[test]
fn fresh_page_shows_placeholder() {
    let mock = Arc::new(MockPostsApi::new());
    let app = build_app(&mock);
    let html = app.render_html();
    assert!(html.contains("<select id=\"selectMenu\"><option value=\"\">Select an Employee</option></select>"));
    assert!(html.contains("<main><p class=\"default-text\">Select an Employee to display their posts.</p></main>"));
}

// ===== Init =====

#[tokio::test]
async fn init_page_populates_select_menu() {
    let mock = Arc::new(MockPostsApi::new());
    let mut app = build_app(&mock);

    let (users, select) = app.init_page().await;
    assert_eq!(users.as_data().map(Vec::len), Some(3));
    assert_eq!(select, Some(app.layout().select_menu));

    let options = app.document().children(app.layout().select_menu).to_vec();
    assert_eq!(options.len(), 4);
    assert_eq!(app.document().value(options[2]), Some("2"));
    assert_eq!(app.document().text_content(options[2]), "Ervin Howell");
    assert_eq!(mock.requests().await, vec!["GET /users"]);
}

#[tokio::test]
async fn init_page_without_users_keeps_prompt_only() {
    let mock = Arc::new(MockPostsApi::new());
    *mock.fail_users.write().await = true;
    let mut app = build_app(&mock);

    let (users, select) = app.init_page().await;
    assert!(users.is_failed());
    assert_eq!(select, None);
    assert_eq!(app.document().children(app.layout().select_menu).len(), 1);
}

// ===== Selection =====

#[tokio::test]
async fn selecting_user_renders_posts() {
    let mock = Arc::new(MockPostsApi::new());
    let mut app = build_app(&mock);
    app.init_page().await;

    let outcome = app.select_user("1").await.unwrap();
    assert_eq!(outcome.user_id, 1);
    assert_eq!(outcome.posts.as_data().map(Vec::len), Some(2));

    assert_eq!(count(&app, "article > h2"), 2);
    assert_eq!(count(&app, "article > button"), 2);
    assert_eq!(count(&app, "section.comments.hide"), 2);
    assert_eq!(count(&app, ".default-text"), 0);
    for button in app
        .document()
        .query_selector_all(app.layout().main, "button")
        .unwrap()
    {
        assert_eq!(app.document().text_content(button), "Show Comments");
        assert_eq!(app.document().listener_count(button, EventType::Click), 1);
    }
    assert!(!app.document().is_disabled(app.layout().select_menu));
}

#[tokio::test]
async fn switching_users_replaces_posts() {
    let mock = Arc::new(MockPostsApi::new());
    let mut app = build_app(&mock);

    app.select_user("1").await;
    app.select_user("2").await;
    app.select_user("1").await;

    assert_eq!(count(&app, "article > h2"), 2);
    for id in [1, 2] {
        assert_eq!(count(&app, &format!("button[data-post-id='{id}']")), 1);
        assert_eq!(count(&app, &format!("section[data-post-id='{id}']")), 1);
    }
    assert_eq!(count(&app, "button[data-post-id='11']"), 0);
    assert_eq!(app.document().total_listener_count(), 2);
    assert_eq!(app.refresh_service().bindings().len(), 2);
}

#[tokio::test]
async fn user_without_posts_shows_placeholder() {
    let mock = Arc::new(MockPostsApi::new());
    let mut app = build_app(&mock);

    app.select_user("2").await;
    let outcome = app.select_user("3").await.unwrap();
    assert_eq!(outcome.refresh.map(|r| r.placeholder_shown), Some(true));
    assert_eq!(count(&app, "article"), 0);
    assert_eq!(count(&app, "p.default-text"), 1);
}

#[tokio::test]
async fn prompt_option_falls_back_to_first_user() {
    let mock = Arc::new(MockPostsApi::new());
    let mut app = build_app(&mock);

    let outcome = app.select_user("").await.unwrap();
    assert_eq!(outcome.user_id, 1);
}

#[tokio::test]
async fn missing_event_does_nothing() {
    let mock = Arc::new(MockPostsApi::new());
    let mut app = build_app(&mock);

    assert!(app.handle_select_change(None).await.is_none());
    assert!(mock.requests().await.is_empty());
}

#[tokio::test]
async fn changes_while_disabled_are_dropped() {
    let mock = Arc::new(MockPostsApi::new());
    let mut document = Document::new();
    let layout = postboard_app::mount_page(&mut document, "placeholder").unwrap();
    document.set_disabled(layout.select_menu, true).unwrap();
    let mut app = AppStateBuilder::new()
        .api(Arc::clone(&mock) as Arc<dyn PostsApi>)
        .document(document)
        .build()
        .unwrap();

    let outcome = app
        .handle_select_change(Some(SelectionChange::new("1")))
        .await;
    assert!(outcome.is_none());
    assert!(mock.requests().await.is_empty());
}

#[tokio::test]
async fn supplied_page_with_nested_placeholder_keeps_it() {
    let mock = Arc::new(MockPostsApi::new());
    let mut document = Document::new();
    let layout = postboard_app::mount_page(&mut document, "Pick someone").unwrap();
    let wrapper = document.create_element("div");
    document.append_child(layout.main, wrapper).unwrap();
    document.append_child(wrapper, layout.default_text).unwrap();
    let mut app = AppStateBuilder::new()
        .api(Arc::clone(&mock) as Arc<dyn PostsApi>)
        .document(document)
        .build()
        .unwrap();
    assert_eq!(app.layout().default_text, layout.default_text);

    app.select_user("1").await;
    assert_eq!(count(&app, "article"), 2);
    assert!(app.document().is_live(layout.default_text));

    let outcome = app.select_user("3").await.unwrap();
    assert_eq!(outcome.refresh.map(|r| r.placeholder_shown), Some(true));
    assert_eq!(
        app.document().children(app.layout().main),
        &[layout.default_text]
    );
    assert_eq!(app.document().text_content(app.layout().main), "Pick someone");
}

// ===== Toggle =====

#[tokio::test]
async fn clicking_toggles_only_its_own_pair() {
    let mock = Arc::new(MockPostsApi::new());
    let mut app = build_app(&mock);
    app.select_user("1").await;

    let doc = app.document();
    let main = app.layout().main;
    let button = doc
        .query_selector(main, "button[data-post-id='2']")
        .unwrap()
        .unwrap();
    let section = doc
        .query_selector(main, "section[data-post-id='2']")
        .unwrap()
        .unwrap();
    let other = doc
        .query_selector(main, "section[data-post-id='1']")
        .unwrap()
        .unwrap();

    assert_eq!(app.click(button).unwrap(), 1);
    assert!(!app.document().class_contains(section, "hide"));
    assert_eq!(app.document().text_content(button), "Hide Comments");
    assert!(app.document().class_contains(other, "hide"));

    app.click(button).unwrap();
    assert!(app.document().class_contains(section, "hide"));
    assert_eq!(app.document().text_content(button), "Show Comments");
}

#[tokio::test]
async fn comments_render_inside_their_section() {
    let mock = Arc::new(MockPostsApi::new());
    let mut app = build_app(&mock);
    app.select_user("1").await;

    let html = app.render_html();
    assert!(html.contains(
        "<section class=\"comments hide\" data-post-id=\"1\"><article><h3>comment 1</h3>\
         <p>comment body 1</p><p>From: c1@example.com</p></article>"
    ));
    assert!(html.contains("<p>Author: Leanne Graham with Romaguera-Crona</p>"));
}
