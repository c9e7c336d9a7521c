//! JSONPlaceholder HTTP request methods

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;

use super::{JsonPlaceholderProvider, PROVIDER_NAME};

impl JsonPlaceholderProvider {
    /// Execute a GET request and decode the JSON body.
    ///
    /// `path` is relative to the base URL; `query` pairs are URL-encoded by reqwest.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let request = self.client.get(&url).query(query);

        let (status, response_text) =
            HttpUtils::execute_request(request, PROVIDER_NAME, "GET", &url).await?;

        HttpUtils::ensure_success(status, &response_text, PROVIDER_NAME, path)?;
        HttpUtils::parse_json(&response_text, PROVIDER_NAME)
    }
}
