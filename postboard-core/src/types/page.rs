use serde::{Deserialize, Serialize};

use crate::dom::{Document, NodeId};
use crate::error::{CoreError, CoreResult};
use postboard_provider::PostId;

/// `id` of the user select control.
pub const SELECT_MENU_ID: &str = "selectMenu";
/// Class of the placeholder shown when no posts are rendered.
pub const DEFAULT_TEXT_CLASS: &str = "default-text";
/// Class that hides a comment section.
pub const HIDE_CLASS: &str = "hide";
/// `dataset` key correlating a toggle button with its comment section.
pub const POST_ID_KEY: &str = "postId";
pub const SHOW_COMMENTS_LABEL: &str = "Show Comments";
pub const HIDE_COMMENTS_LABEL: &str = "Hide Comments";

/// The three page elements the pipeline works against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    /// User select control.
    pub select_menu: NodeId,
    /// Posts container.
    pub main: NodeId,
    /// Placeholder paragraph, re-attached when a user has no posts.
    pub default_text: NodeId,
}

impl PageLayout {
    /// Find the page elements in an existing document.
    ///
    /// The placeholder is looked up inside `main`, so this only succeeds
    /// while it is displayed.
    pub fn locate(doc: &Document) -> CoreResult<Self> {
        let root = doc.root();
        let select_menu = doc
            .get_element_by_id(SELECT_MENU_ID)
            .ok_or_else(|| CoreError::ElementNotFound(format!("#{SELECT_MENU_ID}")))?;
        let main = doc
            .query_selector(root, "main")?
            .ok_or_else(|| CoreError::ElementNotFound("main".to_string()))?;
        let default_text = doc
            .query_selector(main, &format!("p.{DEFAULT_TEXT_CLASS}"))?
            .ok_or_else(|| CoreError::ElementNotFound(format!("main p.{DEFAULT_TEXT_CLASS}")))?;
        Ok(Self {
            select_menu,
            main,
            default_text,
        })
    }
}

/// A change event from the select control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionChange {
    /// The control's value at the time of the change.
    pub value: Option<String>,
}

impl SelectionChange {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionVisibility {
    Hidden,
    Shown,
}

impl SectionVisibility {
    /// Button label matching this visibility.
    pub fn button_label(self) -> &'static str {
        match self {
            Self::Hidden => SHOW_COMMENTS_LABEL,
            Self::Shown => HIDE_COMMENTS_LABEL,
        }
    }
}

/// State of a button/section pair after a toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TogglePair {
    pub post_id: PostId,
    pub section: NodeId,
    pub button: NodeId,
    pub visibility: SectionVisibility,
    pub button_label: String,
}
