//! JSONPlaceholder-compatible REST provider

mod http;
mod provider;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::create_http_client;
use crate::types::ApiConfig;

pub(crate) const PROVIDER_NAME: &str = "jsonplaceholder";

/// Client for a JSONPlaceholder-shaped REST API.
///
/// # Construction
///
/// ```rust,no_run
/// use postboard_provider::{ApiConfig, JsonPlaceholderProvider};
///
/// let provider = JsonPlaceholderProvider::new(&ApiConfig::default()).unwrap();
/// ```
pub struct JsonPlaceholderProvider {
    pub(crate) client: Client,
    pub(crate) base_url: String,
}

impl JsonPlaceholderProvider {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: create_http_client(config, PROVIDER_NAME)?,
            base_url: config.normalized_base_url().to_string(),
        })
    }
}
