//! # postboard-provider
//!
//! Typed async client for a JSONPlaceholder-shaped REST API: users, their
//! posts, and the comments on each post.
//!
//! ## Endpoints
//!
//! | Method | Path | Trait method |
//! |--------|------|--------------|
//! | GET | `/users` | [`PostsApi::list_users`] |
//! | GET | `/users/{id}` | [`PostsApi::get_user`] |
//! | GET | `/posts?userId={id}` | [`PostsApi::list_posts`] |
//! | GET | `/comments?postId={id}` | [`PostsApi::list_comments`] |
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation and Android targets.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use postboard_provider::{create_api, ApiConfig, PostsApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = create_api(&ApiConfig::default())?;
//!
//!     let posts = api.list_posts(1).await?;
//!     for post in &posts {
//!         let comments = api.list_comments(post.id).await?;
//!         println!("{} ({} comments)", post.title, comments.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError):
//!
//! - [`ProviderError::NotFound`]: HTTP 404
//! - [`ProviderError::HttpStatus`]: any other non-2xx status
//! - [`ProviderError::NetworkError`] / [`ProviderError::Timeout`]: transport failure
//! - [`ProviderError::ParseError`]: body is not the expected JSON
//!
//! Nothing is retried.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};

pub use factory::create_api;

pub use traits::PostsApi;

pub use types::{ApiConfig, Comment, Company, DEFAULT_BASE_URL, Post, PostId, User, UserId};

pub use providers::JsonPlaceholderProvider;
