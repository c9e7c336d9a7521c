//! Postboard Core Library
//!
//! The render/refresh pipeline of the postboard page:
//! - an in-memory DOM ([`dom`]) the page is built in
//! - guarded fetching over the [`postboard_provider::PostsApi`] port
//! - builders for post articles and comment sections
//! - comment toggles and the refresh controller that keeps listeners and
//!   rendered posts in step
//!
//! All services share an [`Arc<ServiceContext>`](ServiceContext); the host
//! supplies the API client.

pub mod dom;
pub mod error;
pub mod services;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use dom::{Document, NodeId};
pub use error::{CoreError, CoreResult, DomError, DomResult};
pub use services::ServiceContext;
