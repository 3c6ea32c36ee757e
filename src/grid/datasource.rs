//! Pull-based row source backing the browse table.
//!
//! The table asks for a row range; the source answers from the query
//! cache, going to the network on a miss. Results are stamped with the
//! generation current when the request started, and a result whose
//! generation has been superseded (filter change, teardown) is
//! discarded instead of clobbering newer state.

use crate::api::{ApiClient, ApiError};
use crate::cache::QueryCache;
use crate::grid::resolver;
use crate::types::{ItemKind, ItemPage, LibraryItem, ListQuery, QueryFilter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Half-open row range `[start_row, end_row)` requested by the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub start_row: usize,
    pub end_row: usize,
}

impl RowRange {
    pub fn new(start_row: usize, end_row: usize) -> Self {
        Self { start_row, end_row }
    }

    /// Number of rows requested
    pub fn limit(&self) -> usize {
        self.end_row.saturating_sub(self.start_row)
    }

    pub fn contains(&self, row: usize) -> bool {
        row >= self.start_row && row < self.end_row
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RowsState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Most recent window of fetched rows plus the listing total
#[derive(Debug, Clone, Default)]
pub struct RowWindow {
    pub start_index: usize,
    pub items: Vec<LibraryItem>,
    pub total: u64,
    pub state: RowsState,
}

impl RowWindow {
    /// Item at an absolute row index, if the window covers it
    pub fn item_at(&self, row: usize) -> Option<&LibraryItem> {
        row.checked_sub(self.start_index)
            .and_then(|offset| self.items.get(offset))
    }

    pub fn covers(&self, range: RowRange) -> bool {
        let end = self.start_index + self.items.len();
        range.start_row >= self.start_index && (range.end_row <= end || end >= self.total as usize)
    }
}

pub struct ItemGridSource {
    api: Arc<ApiClient>,
    cache: Arc<QueryCache>,
    kind: ItemKind,
    filter: QueryFilter,
    window: Arc<Mutex<RowWindow>>,
    generation: Arc<AtomicU64>,
    cancel: CancellationToken,
    runtime: tokio::runtime::Handle,
}

impl ItemGridSource {
    pub fn new(
        api: Arc<ApiClient>,
        cache: Arc<QueryCache>,
        kind: ItemKind,
        filter: QueryFilter,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        Self {
            api,
            cache,
            kind,
            filter,
            window: Arc::new(Mutex::new(RowWindow::default())),
            generation: Arc::new(AtomicU64::new(0)),
            cancel: CancellationToken::new(),
            runtime,
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn filter(&self) -> &QueryFilter {
        &self.filter
    }

    pub fn window(&self) -> RowWindow {
        self.window.lock().unwrap().clone()
    }

    /// Replace the filter: cancels outstanding fetches, clears the
    /// window, and invalidates every result from the old generation.
    pub fn set_filter(&mut self, filter: QueryFilter) {
        self.filter = filter;
        self.supersede();
    }

    /// Cancel outstanding fetches and stamp their results stale; the
    /// source stays usable and keeps its window (view hidden, not gone)
    pub fn suspend(&mut self) {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Cancel outstanding fetches for good (shutdown)
    pub fn teardown(&self) {
        self.cancel.cancel();
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn supersede(&mut self) {
        self.suspend();
        *self.window.lock().unwrap() = RowWindow::default();
    }

    /// The table's pull contract: fetch `range` and update the shared
    /// row window, then run `on_done` (normally a repaint request).
    pub fn get_rows(&self, range: RowRange, on_done: impl FnOnce() + Send + 'static) {
        let Some(cap) = resolver::capability(self.kind) else {
            // No listing capability for this kind: an empty page, not an error
            let mut win = self.window.lock().unwrap();
            *win = RowWindow {
                state: RowsState::Loaded,
                ..Default::default()
            };
            drop(win);
            on_done();
            return;
        };

        let limit = range.limit();
        let start_index = range.start_row;
        if limit == 0 {
            return;
        }

        let key = (cap.query_key)(self.api.server_id(), &self.filter, limit, start_index);
        let query = ListQuery {
            limit,
            start_index,
            filter: self.filter.clone(),
        };
        debug!(kind = ?self.kind, start_index, limit, "Row fetch requested");

        self.window.lock().unwrap().state = RowsState::Loading;

        let generation = self.generation.load(Ordering::SeqCst);
        let generations = self.generation.clone();
        let window = self.window.clone();
        let api = self.api.clone();
        let cache = self.cache.clone();
        let token = self.cancel.clone();
        let fetch = cap.fetch;

        self.runtime.spawn(async move {
            let result = cache
                .fetch_query(key, move || async move {
                    tokio::select! {
                        _ = token.cancelled() => Err(ApiError::Cancelled),
                        res = fetch(api, query) => res,
                    }
                })
                .await;

            if generations.load(Ordering::SeqCst) != generation {
                debug!(start_index, "Dropping superseded row fetch");
                return;
            }

            apply_fetch_result(&mut window.lock().unwrap(), start_index, result);
            on_done();
        });
    }
}

/// Fold a fetch result into the row window. An absent listing is an
/// empty success; a failure keeps zero rows and records the error so
/// the table can show it instead of loading forever.
fn apply_fetch_result(
    win: &mut RowWindow,
    start_index: usize,
    result: Result<Option<ItemPage>, ApiError>,
) {
    match result {
        Ok(page) => {
            let page = page.unwrap_or_default();
            win.start_index = start_index;
            win.total = page.total_record_count;
            win.items = page.items;
            win.state = RowsState::Loaded;
        }
        Err(ApiError::Cancelled) => {
            // Superseded request; newer state owns the window
        }
        Err(e) => {
            warn!(error = %e, start_index, "Row fetch failed");
            win.start_index = start_index;
            win.items.clear();
            win.state = RowsState::Failed(e.to_string());
        }
    }
}
