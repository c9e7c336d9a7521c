//! Comment toggle behaviour
//!
//! A button and a comment section sharing a post id form a toggle pair.
//! Clicking the button flips the section's `hide` class and the button label.

use std::sync::Arc;

use postboard_provider::PostId;

use crate::dom::{Document, Event, Listener, NodeId};
use crate::types::{
    HIDE_CLASS, HIDE_COMMENTS_LABEL, POST_ID_KEY, SHOW_COMMENTS_LABEL, SectionVisibility,
    TogglePair,
};

fn find_keyed(doc: &Document, tag: &str, post_id: PostId) -> Option<NodeId> {
    let selector = format!("{tag}[data-post-id='{post_id}']");
    doc.query_selector(doc.root(), &selector).ok().flatten()
}

/// Flip the `hide` class of the section for `post_id`.
pub fn toggle_comment_section(doc: &mut Document, post_id: Option<PostId>) -> Option<NodeId> {
    let post_id = post_id.filter(|id| *id != 0)?;
    let section = find_keyed(doc, "section", post_id)?;
    doc.class_toggle(section, HIDE_CLASS).ok()?;
    Some(section)
}

/// Flip the label of the button for `post_id` between "Show Comments" and "Hide Comments".
pub fn toggle_comment_button(doc: &mut Document, post_id: Option<PostId>) -> Option<NodeId> {
    let post_id = post_id.filter(|id| *id != 0)?;
    let button = find_keyed(doc, "button", post_id)?;
    let label = if doc.text_content(button) == SHOW_COMMENTS_LABEL {
        HIDE_COMMENTS_LABEL
    } else {
        SHOW_COMMENTS_LABEL
    };
    doc.set_text_content(button, label).ok()?;
    Some(button)
}

/// Flip both halves of the pair for `post_id`.
///
/// Nothing changes unless both the section and the button exist. The label
/// is set from the section's new state, so the two always agree afterwards.
pub fn toggle_comments(doc: &mut Document, post_id: Option<PostId>) -> Option<TogglePair> {
    let post_id = post_id.filter(|id| *id != 0)?;
    let button = find_keyed(doc, "button", post_id)?;
    let section = toggle_comment_section(doc, Some(post_id))?;

    let visibility = if doc.class_contains(section, HIDE_CLASS) {
        SectionVisibility::Hidden
    } else {
        SectionVisibility::Shown
    };
    let button_label = visibility.button_label();
    doc.set_text_content(button, button_label).ok()?;

    Some(TogglePair {
        post_id,
        section,
        button,
        visibility,
        button_label: button_label.to_string(),
    })
}

/// Click listener for toggle buttons.
///
/// The post id is read from the clicked button's `data-post-id` when the
/// click happens, so one listener can serve every button.
pub fn toggle_listener() -> Listener {
    Arc::new(|doc: &mut Document, event: &Event| {
        let post_id = doc
            .dataset_get(event.current_target, POST_ID_KEY)
            .and_then(|value| value.parse::<PostId>().ok());
        match toggle_comments(doc, post_id) {
            Some(pair) => log::debug!(
                "Comments for post {} are now {:?}",
                pair.post_id,
                pair.visibility
            ),
            None => log::debug!("Click on {} toggled nothing", event.current_target),
        }
    })
}
