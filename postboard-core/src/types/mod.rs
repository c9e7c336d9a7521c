//! Type definitions

mod fetch;
mod page;
mod refresh;

pub use fetch::FetchOutcome;
pub use page::{
    DEFAULT_TEXT_CLASS, HIDE_CLASS, HIDE_COMMENTS_LABEL, POST_ID_KEY, PageLayout,
    SELECT_MENU_ID, SHOW_COMMENTS_LABEL, SectionVisibility, SelectionChange, TogglePair,
};
pub use refresh::{RefreshReport, SelectionOutcome};

// Re-export provider library types
pub use postboard_provider::{Comment, Company, Post, PostId, User, UserId};
