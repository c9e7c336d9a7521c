//! Posts API factory.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::JsonPlaceholderProvider;
use crate::traits::PostsApi;
use crate::types::ApiConfig;

/// Creates a [`PostsApi`] client from the given connection settings.
///
/// The returned client is wrapped in `Arc<dyn PostsApi>` for easy sharing
/// across async tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use postboard_provider::{create_api, ApiConfig, PostsApi};
///
/// let api = create_api(&ApiConfig::with_base_url("http://localhost:3000")).unwrap();
/// assert_eq!(api.id(), "jsonplaceholder");
/// ```
pub fn create_api(config: &ApiConfig) -> Result<Arc<dyn PostsApi>> {
    log::debug!("Creating posts API client for {}", config.normalized_base_url());
    Ok(Arc::new(JsonPlaceholderProvider::new(config)?))
}
