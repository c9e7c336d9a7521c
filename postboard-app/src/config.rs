//! Application configuration

use serde::{Deserialize, Serialize};

use postboard_core::services::DEFAULT_FALLBACK_USER_ID;
use postboard_provider::{ApiConfig, UserId};

/// Text of the placeholder shown while no posts are displayed.
pub const DEFAULT_PLACEHOLDER_TEXT: &str = "Select an Employee to display their posts.";

/// Settings for one page instance.
///
/// Supplied programmatically through [`AppStateBuilder`](crate::AppStateBuilder);
/// deserializable so a host can keep it next to its own settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Remote API connection
    pub api: ApiConfig,
    /// User loaded when a selection carries no usable id
    pub fallback_user_id: UserId,
    /// Placeholder paragraph text
    pub placeholder_text: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            fallback_user_id: DEFAULT_FALLBACK_USER_ID,
            placeholder_text: DEFAULT_PLACEHOLDER_TEXT.to_string(),
        }
    }
}
