//! Posts API implementations

/// Shared utilities used by provider implementations.
pub mod common;

mod jsonplaceholder;

pub use jsonplaceholder::JsonPlaceholderProvider;
