use serde::{Deserialize, Serialize};

/// Unified error type for all posts API operations.
///
/// Each variant includes a `provider` field identifying which API client produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// Requests are never retried automatically; callers decide what a failure means
/// for them (the page renderer treats every failure as "no data").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    ///
    /// Only possible when a timeout was configured on the client.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The requested resource does not exist (HTTP 404).
    NotFound {
        /// Provider that produced the error.
        provider: String,
        /// Path of the resource that was not found.
        resource: String,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds, if provided by the API.
        retry_after: Option<u64>,
        /// Original response body, if available.
        raw_message: Option<String>,
    },

    /// The API answered with a non-success status not covered by a more specific variant.
    HttpStatus {
        /// Provider that produced the error.
        provider: String,
        /// HTTP status code.
        status: u16,
        /// Original response body, if available.
        raw_message: Option<String>,
    },

    /// A request parameter is invalid (e.g. an id of zero).
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// Failed to parse the API response.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },
}

impl ProviderError {
    /// Whether the failure is an expected outcome (missing resource, bad input), used for log levels.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    /// **Keep this in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::InvalidParameter { .. } | Self::RateLimited { .. }
        )
    }

    /// Provider identifier carried by every variant.
    #[must_use]
    pub fn provider(&self) -> &str {
        match self {
            Self::NetworkError { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::NotFound { provider, .. }
            | Self::RateLimited { provider, .. }
            | Self::HttpStatus { provider, .. }
            | Self::InvalidParameter { provider, .. }
            | Self::ParseError { provider, .. } => provider,
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::NotFound { provider, resource } => {
                write!(f, "[{provider}] Resource '{resource}' not found")
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::HttpStatus {
                provider,
                status,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] HTTP {status}: {msg}")
                } else {
                    write!(f, "[{provider}] HTTP {status}")
                }
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
