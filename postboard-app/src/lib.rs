//! Application bootstrap for postboard.
//!
//! Provides `AppState` (the page plus its services), `AppStateBuilder`
//! (API client and configuration injection) and the page skeleton helpers.

mod config;
mod page;

pub use config::{AppConfig, DEFAULT_PLACEHOLDER_TEXT};
pub use page::{SELECT_PROMPT, create_select_options, mount_page, populate_select_menu};

use std::sync::Arc;

use postboard_core::dom::{Document, EventType, NodeId};
use postboard_core::error::{CoreError, CoreResult};
use postboard_core::services::{FetchService, PageRefreshService, SelectionService, ServiceContext};
use postboard_core::types::{FetchOutcome, PageLayout, SelectionChange, SelectionOutcome, User};
use postboard_provider::{PostsApi, create_api};

/// One mounted page and the services driving it.
///
/// Every operation takes `&mut self`, so at most one refresh runs at a time.
pub struct AppState {
    /// Service context (holds the API client)
    pub ctx: Arc<ServiceContext>,
    /// Fetch client used for the user list
    pub fetch_service: FetchService,
    selection_service: SelectionService,
    document: Document,
    layout: PageLayout,
    config: AppConfig,
}

impl AppState {
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn refresh_service(&self) -> &PageRefreshService {
        self.selection_service.refresh_service()
    }

    /// Fetch the users and add one select option per user.
    ///
    /// Returns the fetch result and the populated control (`None` when no
    /// users could be loaded).
    pub async fn init_page(&mut self) -> (FetchOutcome<Vec<User>>, Option<NodeId>) {
        let users = self.fetch_service.get_users().await;
        let select = populate_select_menu(
            &mut self.document,
            &self.layout,
            users.as_data().map(Vec::as_slice),
        );
        match users.as_data() {
            Some(list) => log::info!("Page initialized with {} user(s)", list.len()),
            None => log::warn!("Page initialized without users"),
        }
        (users, select)
    }

    /// Change handler of the select control.
    ///
    /// Changes arriving while the control is disabled are dropped, not queued.
    pub async fn handle_select_change(
        &mut self,
        change: Option<SelectionChange>,
    ) -> Option<SelectionOutcome> {
        if self.document.is_disabled(self.layout.select_menu) {
            log::debug!("Select control disabled, change ignored");
            return None;
        }
        self.selection_service
            .handle_change(&mut self.document, &self.layout, change.as_ref())
            .await
    }

    /// Set the control's value to `value` and handle the resulting change.
    pub async fn select_user(&mut self, value: &str) -> Option<SelectionOutcome> {
        if let Err(e) = self.document.set_value(self.layout.select_menu, value) {
            log::warn!("Could not set the select value: {e}");
        }
        let current = self
            .document
            .value(self.layout.select_menu)
            .map(ToOwned::to_owned);
        self.handle_select_change(Some(SelectionChange { value: current }))
            .await
    }

    /// Dispatch a click at `node`. Returns how many listeners ran.
    pub fn click(&mut self, node: NodeId) -> CoreResult<usize> {
        Ok(self.document.dispatch_event(node, EventType::Click)?)
    }

    /// Serialize the whole document.
    pub fn render_html(&self) -> String {
        self.document.outer_html(self.document.root())
    }
}

/// Builder for constructing `AppState`.
///
/// # Optional
/// - `api`: defaults to the HTTP client built from `config.api`
/// - `config`: defaults to `AppConfig::default()`
/// - `document`: an already mounted page; defaults to a fresh one
pub struct AppStateBuilder {
    api: Option<Arc<dyn PostsApi>>,
    config: AppConfig,
    document: Option<Document>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            api: None,
            config: AppConfig::default(),
            document: None,
        }
    }

    #[must_use]
    pub fn api(mut self, api: Arc<dyn PostsApi>) -> Self {
        self.api = Some(api);
        self
    }

    #[must_use]
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn document(mut self, document: Document) -> Self {
        self.document = Some(document);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` for unusable configuration,
    /// `CoreError::ElementNotFound` if a supplied document lacks the page
    /// elements, and `CoreError::Provider` if the HTTP client cannot be created.
    pub fn build(self) -> CoreResult<AppState> {
        let config = self.config;
        if config.fallback_user_id == 0 {
            return Err(CoreError::ValidationError(
                "fallback_user_id must be a positive integer".to_string(),
            ));
        }

        let api = match self.api {
            Some(api) => api,
            None => {
                if config.api.normalized_base_url().trim().is_empty() {
                    return Err(CoreError::ValidationError(
                        "api.base_url is required".to_string(),
                    ));
                }
                create_api(&config.api)?
            }
        };

        let (document, layout) = match self.document {
            Some(document) => {
                let layout = PageLayout::locate(&document)?;
                (document, layout)
            }
            None => {
                let mut document = Document::new();
                let layout = mount_page(&mut document, &config.placeholder_text)?;
                (document, layout)
            }
        };

        let ctx = Arc::new(ServiceContext::new(api));
        let fetch_service = FetchService::new(Arc::clone(&ctx));
        let selection_service =
            SelectionService::with_fallback_user_id(Arc::clone(&ctx), config.fallback_user_id);

        log::debug!("AppState built against {}", ctx.api.id());
        Ok(AppState {
            ctx,
            fetch_service,
            selection_service,
            document,
            layout,
            config,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
