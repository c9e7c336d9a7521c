//! Page refresh controller
//!
//! Replaces the rendered posts in `main` with a new set:
//! unbind old toggle listeners, clear, insert, bind new listeners.

use std::collections::HashMap;
use std::sync::Arc;

use postboard_provider::{Post, PostId};

use crate::dom::{Document, EventType, Listener, ListenerId, NodeId};
use crate::error::CoreResult;
use crate::services::toggle::toggle_listener;
use crate::services::{PostListService, ServiceContext};
use crate::types::{POST_ID_KEY, PageLayout, RefreshReport};

/// Toggle listener handles per post id.
///
/// A post id normally maps to one button, but a list may repeat an id, so
/// each id holds every button bound for it. Removal uses exactly the handle
/// recorded at attach time.
#[derive(Debug, Default)]
pub struct ToggleBindings {
    by_post: HashMap<PostId, Vec<(NodeId, ListenerId)>>,
}

impl ToggleBindings {
    /// Number of bound buttons.
    pub fn len(&self) -> usize {
        self.by_post.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_post.is_empty()
    }

    /// Buttons and listener handles bound for `post_id`.
    pub fn get(&self, post_id: PostId) -> &[(NodeId, ListenerId)] {
        self.by_post.get(&post_id).map_or(&[], Vec::as_slice)
    }

    /// Record `id` for `button`, returning the handle it replaces on that same button.
    fn insert(&mut self, post_id: PostId, button: NodeId, id: ListenerId) -> Option<ListenerId> {
        let bound = self.by_post.entry(post_id).or_default();
        if let Some(slot) = bound.iter_mut().find(|(node, _)| *node == button) {
            return Some(std::mem::replace(&mut slot.1, id));
        }
        bound.push((button, id));
        None
    }

    fn remove(&mut self, post_id: PostId) -> Vec<(NodeId, ListenerId)> {
        self.by_post.remove(&post_id).unwrap_or_default()
    }

    fn drain(&mut self) -> impl Iterator<Item = (PostId, (NodeId, ListenerId))> + '_ {
        self.by_post
            .drain()
            .flat_map(|(post_id, bound)| bound.into_iter().map(move |entry| (post_id, entry)))
    }
}

/// Page Refresh Controller
///
/// Refreshing borrows both the controller and the document mutably, so two
/// refreshes of one page cannot interleave.
pub struct PageRefreshService {
    posts: PostListService,
    bindings: ToggleBindings,
    listener: Listener,
}

impl PageRefreshService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            posts: PostListService::new(ctx),
            bindings: ToggleBindings::default(),
            listener: toggle_listener(),
        }
    }

    pub fn bindings(&self) -> &ToggleBindings {
        &self.bindings
    }

    /// Swap the rendered posts for `posts`.
    ///
    /// `None` leaves the page untouched and returns `None`. An empty list
    /// shows the placeholder.
    pub async fn refresh_posts(
        &mut self,
        doc: &mut Document,
        layout: &PageLayout,
        posts: Option<&[Post]>,
    ) -> Option<RefreshReport> {
        let Some(posts) = posts else {
            log::debug!("No posts to display, page left unchanged");
            return None;
        };

        let listeners_removed = self.remove_button_listeners(doc, layout);
        let nodes_cleared = match clear_posts(doc, layout) {
            Ok(cleared) => cleared,
            Err(e) => {
                log::error!("Failed to clear posts container: {e}");
                return None;
            }
        };
        let (articles_inserted, placeholder_shown) =
            match self.display_posts(doc, layout, posts).await {
                Ok(result) => result,
                Err(e) => {
                    log::error!("Failed to insert posts: {e}");
                    restore_placeholder(doc, layout);
                    return None;
                }
            };
        let listeners_added = self.add_button_listeners(doc, layout);

        let report = RefreshReport {
            listeners_removed,
            nodes_cleared,
            articles_inserted,
            listeners_added,
            placeholder_shown,
        };
        log::info!(
            "Refreshed posts: {articles_inserted} article(s), {listeners_removed} listener(s) removed, {listeners_added} added"
        );
        Some(report)
    }

    /// Detach the recorded toggle listener from every button under `main`.
    ///
    /// Bindings whose button is no longer under `main` are dropped too.
    /// Returns how many listeners were actually detached.
    pub fn remove_button_listeners(&mut self, doc: &mut Document, layout: &PageLayout) -> usize {
        let mut removed = 0;
        for button in buttons_under(doc, layout.main) {
            let Some(post_id) = button_post_id(doc, button) else {
                continue;
            };
            for (bound, id) in self.bindings.remove(post_id) {
                if doc.remove_event_listener(bound, EventType::Click, id) {
                    removed += 1;
                }
            }
        }
        for (post_id, (bound, id)) in self.bindings.drain() {
            if doc.remove_event_listener(bound, EventType::Click, id) {
                log::debug!("Detached stale toggle listener for post {post_id}");
                removed += 1;
            }
        }
        removed
    }

    /// Attach one toggle listener to every button under `main` and record its handle.
    pub fn add_button_listeners(&mut self, doc: &mut Document, layout: &PageLayout) -> usize {
        let mut added = 0;
        for button in buttons_under(doc, layout.main) {
            let Some(post_id) = button_post_id(doc, button) else {
                continue;
            };
            match doc.add_event_listener(button, EventType::Click, Arc::clone(&self.listener)) {
                Ok(id) => {
                    if let Some(old_id) = self.bindings.insert(post_id, button, id) {
                        doc.remove_event_listener(button, EventType::Click, old_id);
                    }
                    added += 1;
                }
                Err(e) => log::error!("Failed to bind toggle for post {post_id}: {e}"),
            }
        }
        added
    }

    /// Insert the new articles, or the placeholder when there are none.
    async fn display_posts(
        &self,
        doc: &mut Document,
        layout: &PageLayout,
        posts: &[Post],
    ) -> CoreResult<(usize, bool)> {
        let Some(fragment) = self.posts.create_posts(doc, Some(posts)).await else {
            doc.append_child(layout.main, layout.default_text)?;
            return Ok((0, true));
        };
        let inserted = doc.children(fragment).len();
        doc.append_child(layout.main, fragment)?;
        doc.release(fragment)?;
        Ok((inserted, false))
    }
}

/// Empty `main`, keeping the placeholder alive (detached) for reuse.
///
/// The placeholder is detached from wherever it sits, which may be deeper
/// than a direct child of `main` in a host-supplied page.
fn clear_posts(doc: &mut Document, layout: &PageLayout) -> CoreResult<usize> {
    if let Some(parent) = doc.parent(layout.default_text) {
        doc.remove_child(parent, layout.default_text)?;
    }
    let cleared = doc.children(layout.main).len();
    doc.delete_child_elements(layout.main)?;
    Ok(cleared)
}

/// Leave `main` holding only the placeholder after a failed insert.
fn restore_placeholder(doc: &mut Document, layout: &PageLayout) {
    if let Some(parent) = doc.parent(layout.default_text)
        && let Err(e) = doc.remove_child(parent, layout.default_text)
    {
        log::error!("Failed to detach placeholder: {e}");
    }
    if let Err(e) = doc
        .delete_child_elements(layout.main)
        .and_then(|main| doc.append_child(main, layout.default_text))
    {
        log::error!("Failed to restore placeholder: {e}");
    }
}

fn buttons_under(doc: &Document, main: NodeId) -> Vec<NodeId> {
    doc.query_selector_all(main, "button").unwrap_or_default()
}

fn button_post_id(doc: &Document, button: NodeId) -> Option<PostId> {
    doc.dataset_get(button, POST_ID_KEY)?.parse().ok()
}
