//! Provider shared utility functions

use std::time::Duration;

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::types::ApiConfig;

// ============ HTTP Client ============

/// Create an HTTP client from the connection settings.
///
/// Timeouts are only applied when configured; by default a request may wait
/// for as long as the server takes.
pub fn create_http_client(config: &ApiConfig, provider: &str) -> Result<Client> {
    let mut builder = Client::builder().user_agent(config.user_agent.clone());

    if let Some(secs) = config.connect_timeout_secs {
        builder = builder.connect_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build().map_err(|e| ProviderError::NetworkError {
        provider: provider.to_string(),
        detail: format!("Failed to create HTTP client: {e}"),
    })
}

// ============ Identifier validation ============

/// Reject the zero id before a request is built.
///
/// The API has no resource `0`; sending it would only produce an empty list or a 404.
pub fn require_id(id: u64, param: &str, provider: &str) -> Result<u64> {
    if id == 0 {
        return Err(ProviderError::InvalidParameter {
            provider: provider.to_string(),
            param: param.to_string(),
            detail: "must be a positive integer".to_string(),
        });
    }
    Ok(id)
}
