//! Comment section construction

use std::sync::Arc;

use postboard_provider::{Comment, PostId};

use crate::dom::{Document, LabeledElement, NodeId, build_labeled_element};
use crate::error::DomResult;
use crate::services::{FetchService, ServiceContext};
use crate::types::{HIDE_CLASS, POST_ID_KEY};

/// Comment Section Builder
pub struct CommentSectionService {
    fetch: FetchService,
}

impl CommentSectionService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            fetch: FetchService::new(ctx),
        }
    }

    /// Build the hidden comment section for `post_id`.
    ///
    /// Returns `None` for a missing id. A failed comments fetch still yields
    /// the (empty) section so the toggle pair stays complete.
    pub async fn display_comments(
        &self,
        doc: &mut Document,
        post_id: Option<PostId>,
    ) -> Option<NodeId> {
        let post_id = post_id.filter(|id| *id != 0)?;

        let comments = self.fetch.get_post_comments(Some(post_id)).await;
        let comments = comments.as_data().map(Vec::as_slice);

        match build_section(doc, post_id, comments) {
            Ok(section) => Some(section),
            Err(e) => {
                log::error!("Failed to build comment section for post {post_id}: {e}");
                None
            }
        }
    }

    /// One `<article>` per comment, collected in a fragment.
    ///
    /// `None` when no list was given; an empty list gives an empty fragment.
    pub fn create_comments(doc: &mut Document, comments: Option<&[Comment]>) -> Option<NodeId> {
        let comments = comments?;
        let fragment = doc.create_fragment();
        for comment in comments {
            if let Err(e) = build_comment_article(doc, comment)
                .and_then(|article| doc.append_child(fragment, article))
            {
                log::error!("Failed to build comment article: {e}");
            }
        }
        Some(fragment)
    }
}

/// `<section data-post-id="{id}" class="comments hide">` with its articles.
fn build_section(
    doc: &mut Document,
    post_id: PostId,
    comments: Option<&[Comment]>,
) -> DomResult<NodeId> {
    let section = doc.create_element("section");
    doc.dataset_set(section, POST_ID_KEY, &post_id.to_string())?;
    doc.class_add(section, "comments")?;
    doc.class_add(section, HIDE_CLASS)?;

    if let Some(fragment) = CommentSectionService::create_comments(doc, comments) {
        doc.append_child(section, fragment)?;
        doc.release(fragment)?;
    }
    Ok(section)
}

fn build_comment_article(doc: &mut Document, comment: &Comment) -> DomResult<NodeId> {
    let article = doc.create_element("article");
    let name = build_labeled_element(doc, &LabeledElement::new("h3").with_text(&comment.name));
    let body = build_labeled_element(doc, &LabeledElement::paragraph(&comment.body));
    let from = format!("From: {}", comment.email);
    let email = build_labeled_element(doc, &LabeledElement::paragraph(&from));
    doc.append(article, &[name, body, email])?;
    Ok(article)
}
