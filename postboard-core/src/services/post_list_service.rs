//! Post article construction

use std::sync::Arc;

use postboard_provider::{Post, User};

use crate::dom::{Document, LabeledElement, NodeId, build_labeled_element};
use crate::error::DomResult;
use crate::services::{CommentSectionService, FetchService, ServiceContext};
use crate::types::{POST_ID_KEY, SHOW_COMMENTS_LABEL};

/// Post List Builder
pub struct PostListService {
    fetch: FetchService,
    comments: CommentSectionService,
}

impl PostListService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            fetch: FetchService::new(Arc::clone(&ctx)),
            comments: CommentSectionService::new(ctx),
        }
    }

    /// Build one `<article>` per post into a fragment, in input order.
    ///
    /// Posts are processed strictly one after another: the author fetch, then
    /// the comments fetch, then the next post. Returns `None` for an absent
    /// or empty list.
    pub async fn create_posts(&self, doc: &mut Document, posts: Option<&[Post]>) -> Option<NodeId> {
        let posts = posts.filter(|posts| !posts.is_empty())?;
        let fragment = doc.create_fragment();

        for post in posts {
            let author = self.fetch.get_user(Some(post.user_id)).await.into_data();
            if author.is_none() {
                log::debug!("Author of post {} unavailable, byline omitted", post.id);
            }
            let section = self.comments.display_comments(doc, Some(post.id)).await;

            if let Err(e) = build_article(doc, post, author.as_ref(), section)
                .and_then(|article| doc.append_child(fragment, article))
            {
                log::error!("Failed to build article for post {}: {e}", post.id);
            }
        }

        log::debug!(
            "Built {} article(s) for {} post(s)",
            doc.children(fragment).len(),
            posts.len()
        );
        Some(fragment)
    }
}

fn build_article(
    doc: &mut Document,
    post: &Post,
    author: Option<&User>,
    section: Option<NodeId>,
) -> DomResult<NodeId> {
    let article = doc.create_element("article");

    let title = build_labeled_element(doc, &LabeledElement::new("h2").with_text(&post.title));
    let body = build_labeled_element(doc, &LabeledElement::paragraph(&post.body));
    let id_line = format!("Post ID: {}", post.id);
    let id = build_labeled_element(doc, &LabeledElement::paragraph(&id_line));
    doc.append(article, &[title, body, id])?;

    if let Some(author) = author {
        let byline_text = format!("Author: {} with {}", author.name, author.company.name);
        let byline = build_labeled_element(doc, &LabeledElement::paragraph(&byline_text));
        let catch_phrase = build_labeled_element(
            doc,
            &LabeledElement::paragraph(&author.company.catch_phrase),
        );
        doc.append(article, &[byline, catch_phrase])?;
    }

    let button = build_labeled_element(
        doc,
        &LabeledElement::new("button").with_text(SHOW_COMMENTS_LABEL),
    );
    doc.dataset_set(button, POST_ID_KEY, &post.id.to_string())?;
    doc.append_child(article, button)?;

    if let Some(section) = section {
        doc.append_child(article, section)?;
    }
    Ok(article)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::{MockPostsApi, create_test_context, post};

    #[tokio::test]
    async fn absent_or_empty_list_builds_nothing() {
        let mock = Arc::new(MockPostsApi::with_fixture());
        let service = PostListService::new(create_test_context(&mock));
        let mut doc = Document::new();

        assert_eq!(service.create_posts(&mut doc, None).await, None);
        assert_eq!(service.create_posts(&mut doc, Some(&[])).await, None);
        assert!(mock.requests().await.is_empty());
    }

    #[tokio::test]
    async fn articles_follow_input_order() {
        let mock = Arc::new(MockPostsApi::with_fixture());
        let service = PostListService::new(create_test_context(&mock));
        let mut doc = Document::new();
        let posts = vec![post(2, 1, "second"), post(1, 1, "first")];

        let fragment = service.create_posts(&mut doc, Some(&posts)).await.unwrap();
        let titles: Vec<String> = doc
            .query_selector_all(fragment, "article > h2")
            .unwrap()
            .into_iter()
            .map(|h2| doc.text_content(h2))
            .collect();
        assert_eq!(titles, vec!["second", "first"]);

        // author then comments, one post at a time
        assert_eq!(
            mock.requests().await,
            vec![
                "GET /users/1",
                "GET /comments?postId=2",
                "GET /users/1",
                "GET /comments?postId=1",
            ]
        );
    }

    #[tokio::test]
    async fn article_layout() {
        let mock = Arc::new(MockPostsApi::with_fixture());
        let service = PostListService::new(create_test_context(&mock));
        let mut doc = Document::new();
        let posts = vec![post(3, 2, "ea molestias quasi")];

        let fragment = service.create_posts(&mut doc, Some(&posts)).await.unwrap();
        assert_eq!(
            doc.inner_html(fragment),
            "<article><h2>ea molestias quasi</h2><p>body of post 3</p><p>Post ID: 3</p>\
             <p>Author: Ervin Howell with Deckow-Crist</p><p>Proactive didactic contingency</p>\
             <button data-post-id=\"3\">Show Comments</button>\
             <section class=\"comments hide\" data-post-id=\"3\"></section></article>"
        );
    }

    #[tokio::test]
    async fn failed_author_omits_byline_for_that_post_only() {
        let mock = Arc::new(MockPostsApi::with_fixture());
        mock.fail_user(2).await;
        let service = PostListService::new(create_test_context(&mock));
        let mut doc = Document::new();
        let posts = vec![post(1, 1, "kept"), post(3, 2, "orphaned")];

        let fragment = service.create_posts(&mut doc, Some(&posts)).await.unwrap();
        let articles = doc.children(fragment).to_vec();
        assert_eq!(articles.len(), 2);

        assert!(doc.text_content(articles[0]).contains("Author: Leanne Graham"));
        let orphan = doc.text_content(articles[1]);
        assert!(!orphan.contains("Author:"));
        assert!(orphan.contains("Post ID: 3"));
        assert_eq!(
            doc.query_selector_all(articles[1], "button[data-post-id='3']")
                .unwrap()
                .len(),
            1
        );
        assert_eq!(
            doc.query_selector_all(articles[1], "section[data-post-id='3']")
                .unwrap()
                .len(),
            1
        );
    }
}
