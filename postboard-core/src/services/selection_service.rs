//! Select-change handling

use std::sync::Arc;

use postboard_provider::UserId;

use crate::dom::Document;
use crate::services::{FetchService, PageRefreshService, ServiceContext};
use crate::types::{PageLayout, SelectionChange, SelectionOutcome};

/// User shown when the selection carries no usable id.
pub const DEFAULT_FALLBACK_USER_ID: UserId = 1;

/// Selection Handler
pub struct SelectionService {
    fetch: FetchService,
    refresh: PageRefreshService,
    fallback_user_id: UserId,
}

impl SelectionService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self::with_fallback_user_id(ctx, DEFAULT_FALLBACK_USER_ID)
    }

    #[must_use]
    pub fn with_fallback_user_id(ctx: Arc<ServiceContext>, fallback_user_id: UserId) -> Self {
        Self {
            fetch: FetchService::new(Arc::clone(&ctx)),
            refresh: PageRefreshService::new(ctx),
            fallback_user_id,
        }
    }

    pub fn refresh_service(&self) -> &PageRefreshService {
        &self.refresh
    }

    /// The selected user id, or the fallback when the value is empty or not a positive integer.
    pub fn resolve_user_id(&self, change: &SelectionChange) -> UserId {
        let value = change.value.as_deref().map_or("", str::trim);
        if value.is_empty() {
            return self.fallback_user_id;
        }
        match value.parse::<UserId>() {
            Ok(user_id) if user_id != 0 => user_id,
            _ => {
                log::warn!(
                    "Selection value {value:?} is not a user id, using {}",
                    self.fallback_user_id
                );
                self.fallback_user_id
            }
        }
    }

    /// Load and render the posts of the selected user.
    ///
    /// The select control stays disabled from before the fetch until the
    /// refresh has finished. Returns `None` when there is no event.
    pub async fn handle_change(
        &mut self,
        doc: &mut Document,
        layout: &PageLayout,
        change: Option<&SelectionChange>,
    ) -> Option<SelectionOutcome> {
        let change = change?;
        let user_id = self.resolve_user_id(change);
        log::info!("Loading posts for user {user_id}");

        if let Err(e) = doc.set_disabled(layout.select_menu, true) {
            log::warn!("Could not disable the select control: {e}");
        }
        let posts = self.fetch.get_user_posts(Some(user_id)).await;
        let refresh = self
            .refresh
            .refresh_posts(doc, layout, posts.as_data().map(Vec::as_slice))
            .await;
        if let Err(e) = doc.set_disabled(layout.select_menu, false) {
            log::warn!("Could not re-enable the select control: {e}");
        }

        Some(SelectionOutcome {
            user_id,
            posts,
            refresh,
        })
    }
}
