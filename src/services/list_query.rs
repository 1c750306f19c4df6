//! Server-paginated list views (users, orders, books).
//!
//! [`ListQueryCoordinator`] owns the query of one list view: search box, sort
//! column, status filter, page and page size. Every change that needs new
//! data bumps a generation counter and spawns a fetch tagged with it; a fetch
//! only writes its outcome back if its generation is still the current one
//! when it settles. Superseded fetch tasks are also aborted, but the
//! generation check is what keeps late responses out.
//!
//! State is published on a [`tokio::sync::watch`] channel so the rendering
//! layer can redraw on change instead of polling.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::AbortHandle;

use crate::domain::types::SortKey;
use crate::dto::list_view::{ErrorInfo, FetchResult, ListSnapshot};
use crate::models::config::{AdminConfig, DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_DEBOUNCE_MS};
use crate::repository::collections::Collection;
use crate::repository::errors::RepositoryResult;
use crate::repository::filters::ListFilter;
use crate::repository::page::CollectionPage;
use crate::repository::{CollectionReader, PageRequest};
use crate::services::debounce::Debouncer;

/// Tuning knobs for a list view.
#[derive(Clone, Debug)]
pub struct ListOptions {
    pub page_size: usize,
    pub search_debounce: Duration,
    /// Re-request the last existing page when the backend reports that the
    /// requested one is past the end (e.g. after deletes).
    pub correct_out_of_range: bool,
    /// Abort the task of a superseded fetch. Stale responses are discarded
    /// either way; this only saves the work.
    pub abort_superseded: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            correct_out_of_range: true,
            abort_superseded: true,
        }
    }
}

impl From<&AdminConfig> for ListOptions {
    fn from(config: &AdminConfig) -> Self {
        Self {
            page_size: config.page_size.max(1),
            search_debounce: config.search_debounce(),
            ..Self::default()
        }
    }
}

/// Query of a list view. Only the coordinator mutates it.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryState<F> {
    pub search_text: String,
    pub debounced_search_text: String,
    pub sort_key: SortKey,
    pub status_filter: F,
    /// Zero-indexed.
    pub page: usize,
    pub page_size: usize,
}

impl<F: ListFilter> QueryState<F> {
    pub fn new(sort_key: SortKey, page_size: usize) -> Self {
        Self {
            search_text: String::new(),
            debounced_search_text: String::new(),
            sort_key,
            status_filter: F::default(),
            page: 0,
            page_size: page_size.max(1),
        }
    }

    /// Request parameters for the current state. The raw search text is not
    /// used; only the debounced value reaches the backend.
    pub fn to_request(&self) -> PageRequest {
        self.status_filter.query_pairs().into_iter().fold(
            PageRequest::new(self.page, self.page_size)
                .sort(self.sort_key.as_str())
                .search(self.debounced_search_text.as_str()),
            |request, (key, value)| request.filter(key, value),
        )
    }
}

struct ListInner<C: Collection> {
    query: QueryState<C::Filter>,
    result: FetchResult<C::Item>,
    generation: u64,
    fetch_task: Option<AbortHandle>,
    debouncer: Debouncer,
}

impl<C: Collection> ListInner<C> {
    fn snapshot(&self) -> ListSnapshot<C::Item> {
        ListSnapshot {
            result: self.result.clone(),
            search_text: self.query.search_text.clone(),
            search_pending: self.debouncer.is_pending(),
            page: self.query.page,
            page_size: self.query.page_size,
        }
    }

    fn abort_fetch(&mut self) {
        if let Some(handle) = self.fetch_task.take() {
            handle.abort();
        }
    }

    /// Applies the outcome of fetch `generation` issued for `request`.
    ///
    /// Returns the page to re-request when the backend reported `request.page`
    /// as past the end and correction is enabled.
    fn apply(
        &mut self,
        generation: u64,
        request: &PageRequest,
        outcome: RepositoryResult<CollectionPage<C::Item>>,
        correct_out_of_range: bool,
    ) -> Applied {
        if generation != self.generation {
            log::debug!(
                "{}: discarding stale response for generation {generation} (current {})",
                C::NAME,
                self.generation
            );
            return Applied::Stale;
        }
        self.fetch_task = None;

        match outcome {
            Ok(page) => {
                if correct_out_of_range
                    && page.items.is_empty()
                    && request.page > 0
                    && request.page >= page.total_pages
                {
                    let last = page.total_pages.saturating_sub(1);
                    log::info!(
                        "{}: page {} is past the last page, requesting page {last}",
                        C::NAME,
                        request.page
                    );
                    return Applied::Refetch(last);
                }
                self.result = FetchResult {
                    items: page.items,
                    total_items: page.total_items,
                    total_pages: page.total_pages,
                    is_loading: false,
                    error: None,
                };
                Applied::Updated
            }
            Err(err) if err.is_cancelled() => {
                log::debug!("{}: fetch {generation} cancelled", C::NAME);
                self.result.is_loading = false;
                Applied::Updated
            }
            Err(err) => {
                log::error!("{}: failed to fetch page {}: {err}", C::NAME, request.page);
                self.result.items.clear();
                self.result.error = Some(ErrorInfo::from(&err));
                self.result.is_loading = false;
                Applied::Updated
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Applied {
    Stale,
    Updated,
    Refetch(usize),
}

struct Shared<C: Collection> {
    reader: Arc<dyn CollectionReader>,
    correct_out_of_range: bool,
    abort_superseded: bool,
    inner: Mutex<ListInner<C>>,
    snapshots: watch::Sender<ListSnapshot<C::Item>>,
}

impl<C: Collection> Shared<C> {
    fn lock(&self) -> MutexGuard<'_, ListInner<C>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, inner: &ListInner<C>) {
        self.snapshots.send_replace(inner.snapshot());
    }

    /// Supersedes any in-flight fetch and issues one for the current query.
    fn issue_fetch(self: &Arc<Self>, inner: &mut ListInner<C>) {
        if self.abort_superseded {
            inner.abort_fetch();
        }
        inner.generation += 1;
        let generation = inner.generation;
        let request = inner.query.to_request();
        inner.result.is_loading = true;

        log::debug!(
            "{}: issuing fetch {generation} {:?}",
            C::NAME,
            request.query_pairs()
        );

        let shared = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let outcome = shared
                .reader
                .fetch_page(C::PATH, &request)
                .await
                .and_then(|value| CollectionPage::from_value(value, &request));
            shared.complete(generation, &request, outcome);
        });
        inner.fetch_task = Some(handle.abort_handle());
    }

    fn complete(
        self: &Arc<Self>,
        generation: u64,
        request: &PageRequest,
        outcome: RepositoryResult<CollectionPage<C::Item>>,
    ) {
        let mut inner = self.lock();
        match inner.apply(generation, request, outcome, self.correct_out_of_range) {
            Applied::Stale => {}
            Applied::Updated => self.publish(&inner),
            Applied::Refetch(page) => {
                inner.query.page = page;
                self.issue_fetch(&mut inner);
                self.publish(&inner);
            }
        }
    }

    fn settle_search(self: &Arc<Self>, ticket: u64) {
        let mut inner = self.lock();
        if !inner.debouncer.finish(ticket) {
            return;
        }

        let latest = inner.query.search_text.clone();
        let changed = latest.trim() != inner.query.debounced_search_text.trim();
        inner.query.debounced_search_text = latest;
        if changed {
            inner.query.page = 0;
            self.issue_fetch(&mut inner);
        }
        self.publish(&inner);
    }
}

/// Query and fetch state of one server-paginated list view.
///
/// Operations never fail and never block on the network; outcomes show up in
/// [`snapshot`](Self::snapshot) and on [`subscribe`](Self::subscribe)d
/// receivers. Every operation that triggers a fetch or arms the search timer
/// must run inside a Tokio runtime. Dropping the coordinator aborts its
/// pending work.
pub struct ListQueryCoordinator<C: Collection> {
    shared: Arc<Shared<C>>,
}

impl<C: Collection> ListQueryCoordinator<C> {
    /// Creates an idle coordinator. Nothing is fetched until the first
    /// triggering operation; see [`mount`](Self::mount).
    pub fn new(reader: Arc<dyn CollectionReader>, options: ListOptions) -> Self {
        let query = QueryState::new(default_sort::<C>(), options.page_size);
        let inner = ListInner {
            query,
            result: FetchResult::default(),
            generation: 0,
            fetch_task: None,
            debouncer: Debouncer::new(options.search_debounce),
        };
        let (snapshots, _) = watch::channel(inner.snapshot());

        Self {
            shared: Arc::new(Shared {
                reader,
                correct_out_of_range: options.correct_out_of_range,
                abort_superseded: options.abort_superseded,
                inner: Mutex::new(inner),
                snapshots,
            }),
        }
    }

    /// Creates the coordinator and issues the initial fetch, as a list view
    /// does when it is first shown.
    pub fn mount(reader: Arc<dyn CollectionReader>, options: ListOptions) -> Self {
        let coordinator = Self::new(reader, options);
        coordinator.refresh();
        coordinator
    }

    /// Echoes `text` immediately and (re)arms the search debounce timer.
    pub fn set_search_text(&self, text: impl Into<String>) {
        let mut inner = self.shared.lock();
        inner.query.search_text = text.into();
        let shared = Arc::downgrade(&self.shared);
        inner.debouncer.trigger(move |ticket| {
            if let Some(shared) = shared.upgrade() {
                shared.settle_search(ticket);
            }
        });
        self.shared.publish(&inner);
    }

    pub fn set_sort_key(&self, sort_key: SortKey) {
        self.update(|query| {
            query.sort_key = sort_key;
            query.page = 0;
        });
    }

    pub fn set_status_filter(&self, filter: C::Filter) {
        self.update(|query| {
            query.status_filter = filter;
            query.page = 0;
        });
    }

    /// Moves to the zero-indexed `page`. Out-of-range pages are not rejected.
    pub fn set_page(&self, page: usize) {
        self.update(|query| query.page = page);
    }

    /// Changes the page size (at least one) and goes back to the first page.
    pub fn set_page_size(&self, page_size: usize) {
        self.update(|query| {
            query.page_size = page_size.max(1);
            query.page = 0;
        });
    }

    /// Re-issues the fetch for the unchanged query, e.g. as a retry action.
    pub fn refresh(&self) {
        self.update(|_| {});
    }

    pub fn snapshot(&self) -> ListSnapshot<C::Item> {
        self.shared.snapshots.borrow().clone()
    }

    pub fn query(&self) -> QueryState<C::Filter> {
        self.shared.lock().query.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot<C::Item>> {
        self.shared.snapshots.subscribe()
    }

    /// Waits until no fetch is in flight and no search edit is pending, then
    /// returns the resulting snapshot.
    pub async fn settled(&self) -> ListSnapshot<C::Item> {
        let mut receiver = self.subscribe();
        match receiver.wait_for(|snapshot| snapshot.is_settled()).await {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        }
    }

    fn update<F: FnOnce(&mut QueryState<C::Filter>)>(&self, change: F) {
        let mut inner = self.shared.lock();
        change(&mut inner.query);
        self.shared.issue_fetch(&mut inner);
        self.shared.publish(&inner);
    }
}

impl<C: Collection> Drop for ListQueryCoordinator<C> {
    fn drop(&mut self) {
        let mut inner = self.shared.lock();
        inner.abort_fetch();
        inner.debouncer.reset();
    }
}

fn default_sort<C: Collection>() -> SortKey {
    SortKey::raw(C::DEFAULT_SORT).unwrap_or_else(|_| {
        log::warn!("{}: empty default sort, falling back to `id,asc`", C::NAME);
        SortKey::default()
    })
}
