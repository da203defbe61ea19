//! # Remote Collection
//!
//! One generic client-side container per resource: the current page of items, the
//! selected item, pagination, statistics, loading flags and the last error.
//!
//! ## Overlapping loads
//!
//! Every list load takes a new sequence number and cancels the token of the load
//! it replaces. A response is applied only when its number is still the latest and
//! the collection is open, so a slow page-1 response can never overwrite the page-2
//! result the user asked for afterwards. Item and statistics loads are sequenced the
//! same way, independently of the list.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle ──load──> Loading ──ok──> Loaded
//!                   │
//!                   └──err──> Error ──clear_error──> Idle
//! ```
//!
//! [`RemoteCollection::close`] cancels everything in flight plus the pending search
//! timer; nothing that completes afterwards touches the state.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use shared::{PageRequest, PaginatedResponse, DEFAULT_PAGE_SIZE};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::debounce::Debouncer;
use crate::config::{Config, DEFAULT_SEARCH_DEBOUNCE_MS};
use crate::core::error::{AppError, ErrorKind, Result};
use crate::core::service::{RemoteResource, SearchQuery};

/// Knobs shared by every collection of a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionSettings {
    pub page_size: u32,
    pub debounce: Duration,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
        }
    }
}

impl From<&Config> for CollectionSettings {
    fn from(config: &Config) -> Self {
        Self {
            page_size: config.page_size,
            debounce: config.search_debounce,
        }
    }
}

/// List lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

/// What happened to a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The response is now the collection's state.
    Applied,
    /// A newer request or [`RemoteCollection::close`] made the response irrelevant.
    Superseded,
}

/// Render-ready state of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState<I, Q, S> {
    pub items: Vec<I>,
    pub current_item: Option<I>,
    /// Zero-based.
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub is_loading: bool,
    pub is_item_loading: bool,
    pub is_stats_loading: bool,
    pub stats: Option<S>,
    pub error: Option<String>,
    pub error_kind: Option<ErrorKind>,
    pub phase: Phase,
    /// Filter of the last list load; empty means plain listing.
    pub query: Q,
}

impl<I, Q: Default, S> CollectionState<I, Q, S> {
    fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            current_item: None,
            current_page: 0,
            page_size,
            total_pages: 0,
            total_items: 0,
            is_loading: false,
            is_item_loading: false,
            is_stats_loading: false,
            stats: None,
            error: None,
            error_kind: None,
            phase: Phase::Idle,
            query: Q::default(),
        }
    }

    fn record_error(&mut self, err: &AppError) {
        let text = err.to_string();
        let message = if text.trim().is_empty() {
            "Request failed".to_string()
        } else {
            text
        };
        self.error = Some(message.clone());
        self.error_kind = Some(err.kind());
        self.phase = Phase::Error(message);
    }

    /// Error from the item or statistics stream; the list phase stays as it is.
    fn record_side_error(&mut self, err: &AppError) {
        let text = err.to_string();
        self.error = Some(if text.trim().is_empty() {
            "Request failed".to_string()
        } else {
            text
        });
        self.error_kind = Some(err.kind());
    }

    fn clear_error(&mut self) {
        self.error = None;
        self.error_kind = None;
    }
}

/// State type of a collection over `R`.
pub type StateOf<R> = CollectionState<
    <R as RemoteResource>::Item,
    <R as RemoteResource>::Query,
    <R as RemoteResource>::Stats,
>;

/// Cancellation slot of one request stream (list, item or statistics).
#[derive(Debug, Default)]
struct Stream {
    seq: AtomicU64,
    token: Mutex<Option<CancellationToken>>,
}

impl Stream {
    /// Stamp a new request and cancel the one it replaces. Call with the state
    /// write lock held so stamping and applying never interleave.
    fn begin(&self, root: &CancellationToken) -> (u64, CancellationToken) {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let token = root.child_token();
        if let Some(previous) = self.token.lock().replace(token.clone()) {
            previous.cancel();
        }
        (seq, token)
    }

    /// Invalidate whatever is in flight without starting anything new.
    fn abandon(&self) {
        self.seq.fetch_add(1, Ordering::SeqCst);
        if let Some(previous) = self.token.lock().take() {
            previous.cancel();
        }
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.seq.load(Ordering::SeqCst) == seq
    }
}

struct Inner<R: RemoteResource> {
    resource: R,
    state: RwLock<StateOf<R>>,
    root: CancellationToken,
    list: Stream,
    item: Stream,
    stats: Stream,
    debouncer: Debouncer,
}

/// Generic remote collection, cheap to clone (clones share state).
pub struct RemoteCollection<R: RemoteResource> {
    inner: Arc<Inner<R>>,
}

impl<R: RemoteResource> Clone for RemoteCollection<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: RemoteResource> RemoteCollection<R> {
    pub fn new(resource: R, settings: CollectionSettings) -> Self {
        Self {
            inner: Arc::new(Inner {
                resource,
                state: RwLock::new(CollectionState::new(settings.page_size.max(1))),
                root: CancellationToken::new(),
                list: Stream::default(),
                item: Stream::default(),
                stats: Stream::default(),
                debouncer: Debouncer::new(settings.debounce),
            }),
        }
    }

    pub fn resource(&self) -> &R {
        &self.inner.resource
    }

    /// Cloned state for rendering.
    pub fn snapshot(&self) -> StateOf<R> {
        self.inner.state.read().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.root.is_cancelled()
    }

    /// Load `page` with the current filter.
    pub async fn load(&self, page: u32) -> Result<Outcome> {
        let query = self.inner.state.read().query.clone();
        self.fetch(query, page).await
    }

    /// Reload the current page.
    pub async fn refresh(&self) -> Result<Outcome> {
        let page = self.inner.state.read().current_page;
        self.load(page).await
    }

    /// Debounced search: restarts the timer on every call; only the last query is
    /// loaded, from page 0, once the timer runs out. Results land in the state.
    pub fn search(&self, query: R::Query) {
        if self.is_closed() {
            return;
        }
        let this = self.clone();
        self.inner.debouncer.schedule(async move {
            if let Err(e) = this.search_now(query).await {
                debug!(resource = this.inner.resource.name(), error = %e, "Debounced search failed");
            }
        });
    }

    /// Search immediately, skipping the debounce timer.
    pub async fn search_now(&self, query: R::Query) -> Result<Outcome> {
        self.inner.debouncer.cancel();
        self.fetch(query, 0).await
    }

    /// Go to page `page`, clamped into the known page range.
    pub async fn set_current_page(&self, page: i64) -> Result<Outcome> {
        let total_pages = self.inner.state.read().total_pages;
        let clamped = shared::clamp_page(page, total_pages);
        if i64::from(clamped) != page {
            debug!(
                resource = self.inner.resource.name(),
                requested = page,
                clamped,
                total_pages,
                "Clamped page index"
            );
        }
        self.load(clamped).await
    }

    /// Change the page size and go back to the first page.
    pub async fn set_page_size(&self, size: u32) -> Result<Outcome> {
        if size == 0 {
            return Err(AppError::Validation("page size must be positive".into()));
        }
        self.inner.state.write().page_size = size;
        self.load(0).await
    }

    /// Load `page`, never leaving the collection on a page past the end.
    ///
    /// The index is clamped against the last known page count. When the count was
    /// unknown and the server reports fewer pages, the last page is loaded instead.
    async fn fetch(&self, query: R::Query, page: u32) -> Result<Outcome> {
        let outcome = self.fetch_once(query.clone(), page).await?;
        if outcome != Outcome::Applied {
            return Ok(outcome);
        }

        let overflow = {
            let state = self.inner.state.read();
            (state.total_pages > 0 && state.current_page >= state.total_pages)
                .then(|| (state.current_page, state.total_pages - 1))
        };
        match overflow {
            Some((requested, last)) => {
                debug!(
                    resource = self.inner.resource.name(),
                    requested,
                    last,
                    "Page past the end, loading the last page"
                );
                self.fetch_once(query, last).await
            }
            None => Ok(outcome),
        }
    }

    async fn fetch_once(&self, query: R::Query, page: u32) -> Result<Outcome> {
        if self.is_closed() {
            return Ok(Outcome::Superseded);
        }

        let name = self.inner.resource.name();
        let (seq, token, request) = {
            let mut state = self.inner.state.write();
            let page = if state.total_pages > 0 {
                page.min(state.total_pages - 1)
            } else {
                page
            };
            let request = PageRequest::new(page, state.page_size).map_err(AppError::Validation)?;
            let (seq, token) = self.inner.list.begin(&self.inner.root);
            state.is_loading = true;
            state.phase = Phase::Loading;
            state.query = query.clone();
            (seq, token, request)
        };
        debug!(resource = name, seq, page = request.page, searching = !query.is_empty(), "Loading page");

        let result = self
            .inner
            .resource
            .fetch_page(&query, request, token)
            .await
            .and_then(|response| {
                response.validate().map_err(AppError::MalformedResponse)?;
                Ok(response)
            });

        self.apply_page(seq, result)
    }

    fn apply_page(&self, seq: u64, result: Result<PaginatedResponse<R::Item>>) -> Result<Outcome> {
        let name = self.inner.resource.name();
        let mut state = self.inner.state.write();

        if self.is_closed() || !self.inner.list.is_latest(seq) {
            debug!(resource = name, seq, "Discarding superseded page");
            return Ok(Outcome::Superseded);
        }

        state.is_loading = false;
        match result {
            Ok(page) => {
                state.current_page = page.page;
                state.total_pages = page.total_pages;
                state.total_items = page.total_items;
                state.items = page.items;
                state.clear_error();
                state.phase = Phase::Loaded;
                debug!(
                    resource = name,
                    seq,
                    page = state.current_page,
                    items = state.items.len(),
                    total_items = state.total_items,
                    "Page loaded"
                );
                Ok(Outcome::Applied)
            }
            Err(AppError::Cancelled) => {
                state.phase = Phase::Idle;
                Err(AppError::Cancelled)
            }
            Err(e) => {
                warn!(resource = name, seq, error = %e, "Failed to load page");
                state.record_error(&e);
                Err(e)
            }
        }
    }

    /// Fetch one item into `current_item`. A missing item yields `None` and is not
    /// an error.
    pub async fn load_item(&self, uid: &str) -> Result<Option<R::Item>> {
        if self.is_closed() {
            return Err(AppError::Cancelled);
        }

        let (seq, token) = {
            let mut state = self.inner.state.write();
            state.is_item_loading = true;
            self.inner.item.begin(&self.inner.root)
        };

        let result = self.inner.resource.fetch_item(uid, token).await;

        let mut state = self.inner.state.write();
        if self.is_closed() || !self.inner.item.is_latest(seq) {
            debug!(resource = self.inner.resource.name(), uid, "Discarding superseded item");
            return result;
        }

        state.is_item_loading = false;
        match &result {
            Ok(item) => {
                if item.is_none() {
                    debug!(resource = self.inner.resource.name(), uid, "Item not found");
                }
                state.current_item = item.clone();
                state.clear_error();
            }
            Err(AppError::Cancelled) => {}
            Err(e) => {
                warn!(resource = self.inner.resource.name(), uid, error = %e, "Failed to load item");
                state.record_side_error(e);
            }
        }
        result
    }

    /// Fetch the resource's statistics into `stats`.
    pub async fn load_statistics(&self) -> Result<R::Stats> {
        if self.is_closed() {
            return Err(AppError::Cancelled);
        }

        let (seq, token) = {
            let mut state = self.inner.state.write();
            state.is_stats_loading = true;
            self.inner.stats.begin(&self.inner.root)
        };

        let result = self.inner.resource.fetch_stats(token).await;

        let mut state = self.inner.state.write();
        if self.is_closed() || !self.inner.stats.is_latest(seq) {
            return result;
        }

        state.is_stats_loading = false;
        match &result {
            Ok(stats) => state.stats = Some(stats.clone()),
            Err(AppError::Cancelled) => {}
            Err(e) => {
                warn!(resource = self.inner.resource.name(), error = %e, "Failed to load statistics");
                state.record_side_error(e);
            }
        }
        result
    }

    /// Run a create/update/delete call. On success the current page is reloaded;
    /// on failure the error is recorded. Either way the call's result is returned.
    pub async fn mutate<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match operation().await {
            Ok(value) => {
                if let Err(e) = self.refresh().await {
                    debug!(resource = self.inner.resource.name(), error = %e, "Refresh after mutation failed");
                }
                Ok(value)
            }
            Err(e) => {
                if !self.is_closed() && e != AppError::Cancelled {
                    warn!(resource = self.inner.resource.name(), error = %e, "Mutation failed");
                    self.inner.state.write().record_error(&e);
                }
                Err(e)
            }
        }
    }

    /// Dismiss the error; cached data stays.
    pub fn clear_error(&self) {
        let mut state = self.inner.state.write();
        state.clear_error();
        if matches!(state.phase, Phase::Error(_)) {
            state.phase = Phase::Idle;
        }
    }

    /// Drop the selected item, abandoning any item load still in flight.
    pub fn clear_current(&self) {
        let mut state = self.inner.state.write();
        self.inner.item.abandon();
        state.current_item = None;
        state.is_item_loading = false;
    }

    /// Cancel every in-flight request and the pending search. Idempotent.
    pub fn close(&self) {
        let mut state = self.inner.state.write();
        if self.inner.root.is_cancelled() {
            return;
        }
        self.inner.root.cancel();
        self.inner.debouncer.cancel();
        state.is_loading = false;
        state.is_item_loading = false;
        state.is_stats_loading = false;
        if state.phase == Phase::Loading {
            state.phase = Phase::Idle;
        }
        debug!(resource = self.inner.resource.name(), "Collection closed");
    }
}

impl<R: RemoteResource> std::fmt::Debug for RemoteCollection<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteCollection")
            .field("resource", &self.inner.resource.name())
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
