//! Generic HTTP helpers
//!
//! Shared request/response handling for API clients: sending, logging,
//! status mapping and JSON parsing. Clients build their own `RequestBuilder`
//! (URL, query, headers) and hand it over.
//!
//! Requests are sent exactly once; failures go back to the caller unretried.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the status code and response text.
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, query, headers)
    /// * `provider_name` - client name (for logging and errors)
    /// * `method_name` - request method name, e.g. "GET" (for logging)
    /// * `url_or_path` - URL or resource path (for logging)
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` for any response that was fully read,
    ///   except HTTP 429 which becomes `RateLimited`
    /// * `Err(ProviderError::NetworkError | Timeout)` on transport failure
    pub async fn execute_request(
        request_builder: RequestBuilder,
        provider_name: &str,
        method_name: &str,
        url_or_path: &str,
    ) -> Result<(u16, String), ProviderError> {
        log::debug!("[{provider_name}] {method_name} {url_or_path}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{provider_name}] Response Status: {status_code}");

        // Read before consuming the body
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{provider_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(ProviderError::RateLimited {
                provider: provider_name.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        let response_text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    provider: provider_name.to_string(),
                    detail: format!("Timed out reading response body: {e}"),
                }
            } else {
                ProviderError::NetworkError {
                    provider: provider_name.to_string(),
                    detail: format!("Failed to read response body: {e}"),
                }
            }
        })?;

        log::debug!(
            "[{provider_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Map a non-success status code to an error.
    ///
    /// 2xx passes through; 404 becomes `NotFound` for `resource`; anything
    /// else becomes `HttpStatus` carrying a truncated body.
    pub fn ensure_success(
        status_code: u16,
        response_text: &str,
        provider_name: &str,
        resource: &str,
    ) -> Result<(), ProviderError> {
        match status_code {
            200..=299 => Ok(()),
            404 => Err(ProviderError::NotFound {
                provider: provider_name.to_string(),
                resource: resource.to_string(),
            }),
            _ => {
                log::warn!("[{provider_name}] {resource} answered HTTP {status_code}");
                Err(ProviderError::HttpStatus {
                    provider: provider_name.to_string(),
                    status: status_code,
                    raw_message: (!response_text.is_empty())
                        .then(|| truncate_for_log(response_text)),
                })
            }
        }
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(ProviderError::ParseError)` - parsing failed
    pub fn parse_json<T>(response_text: &str, provider_name: &str) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{provider_name}] JSON parse failed: {e}");
            log::error!(
                "[{provider_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ProviderError::ParseError {
                provider: provider_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}
