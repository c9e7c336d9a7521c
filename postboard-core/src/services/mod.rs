//! Render/refresh pipeline services

mod comment_service;
mod fetch_service;
mod post_list_service;
mod refresh_service;
mod selection_service;
pub mod toggle;

pub use comment_service::CommentSectionService;
pub use fetch_service::FetchService;
pub use post_list_service::PostListService;
pub use refresh_service::{PageRefreshService, ToggleBindings};
pub use selection_service::{DEFAULT_FALLBACK_USER_ID, SelectionService};

use std::sync::Arc;

use postboard_provider::PostsApi;

/// Service context - holds all dependencies
///
/// The host creates this once and injects the API client.
pub struct ServiceContext {
    /// Remote posts API
    pub api: Arc<dyn PostsApi>,
}

impl ServiceContext {
    /// Create a service context
    #[must_use]
    pub fn new(api: Arc<dyn PostsApi>) -> Self {
        Self { api }
    }
}
