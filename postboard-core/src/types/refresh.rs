use postboard_provider::{Post, UserId};

use super::FetchOutcome;

/// What one page refresh did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Toggle listeners detached from the previous buttons.
    pub listeners_removed: usize,
    /// Top-level children removed from `main`, placeholder excluded.
    pub nodes_cleared: usize,
    /// Articles appended to `main`.
    pub articles_inserted: usize,
    /// Toggle listeners attached to the new buttons.
    pub listeners_added: usize,
    /// Whether the placeholder is displayed afterwards.
    pub placeholder_shown: bool,
}

/// Result of handling one selection change.
#[derive(Debug, Clone)]
pub struct SelectionOutcome {
    /// The user whose posts were requested.
    pub user_id: UserId,
    /// The posts fetch result.
    pub posts: FetchOutcome<Vec<Post>>,
    /// `None` when the fetch yielded no data, in which case the page was left untouched.
    pub refresh: Option<RefreshReport>,
}
