//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

use crate::dom::NodeId;

// Re-export library error type
pub use postboard_provider::ProviderError;

/// In-memory DOM error
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum DomError {
    /// The node was never created or has already been released
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// An element-only operation was applied to a text, fragment or document node
    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),

    /// The tree operation would produce an invalid tree (cycle, root move, text parent)
    #[error("Hierarchy request error: {0}")]
    HierarchyRequest(String),

    /// `remove_child` was called with a node that is not a direct child
    #[error("Node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// Selector syntax outside the supported subset
    #[error("Unsupported selector: {0}")]
    UnsupportedSelector(String),
}

/// DOM Result type alias
pub type DomResult<T> = std::result::Result<T, DomError>;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// A required page element is missing from the document
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// DOM error
    #[error("{0}")]
    Dom(#[from] DomError),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (bad input, missing resource), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ElementNotFound(_) | Self::ValidationError(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::Dom(_) => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
