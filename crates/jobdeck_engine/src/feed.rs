use std::sync::{Arc, Mutex, PoisonError};

use jobdeck_core::{update, Effect, FeedError, FeedState, FeedView, Msg, RequestId};
use jobdeck_logging::{jobdeck_debug, jobdeck_warn};

use crate::JobApi;

/// Paginated, de-duplicated job list backed by a [`JobApi`].
///
/// The feed runs the core reducer and executes the fetches it asks for. A
/// load gate covers the whole check-fetch-merge sequence, so at most one
/// page request is outstanding per feed.
pub struct PagedJobFeed {
    api: Arc<dyn JobApi>,
    state: Mutex<FeedState>,
    gate: tokio::sync::Mutex<()>,
}

impl PagedJobFeed {
    pub fn new(api: Arc<dyn JobApi>) -> Self {
        Self::with_state(api, FeedState::new())
    }

    pub fn with_page_size(api: Arc<dyn JobApi>, page_size: usize) -> Self {
        Self::with_state(api, FeedState::with_page_size(page_size))
    }

    fn with_state(api: Arc<dyn JobApi>, state: FeedState) -> Self {
        Self {
            api,
            state: Mutex::new(state),
            gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Current snapshot, without any I/O.
    pub fn view(&self) -> FeedView {
        self.lock_state().view()
    }

    /// Fetches the next page and merges it.
    ///
    /// Returns the unchanged snapshot when the feed is exhausted or disposed.
    /// If another load is running, waits for it and returns its outcome
    /// instead of fetching again.
    pub async fn load_more(&self) -> FeedView {
        let _gate = match self.gate.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                jobdeck_debug!("Load already in flight, joining it");
                let _joined = self.gate.lock().await;
                return self.view();
            }
        };
        self.run(Msg::LoadMoreRequested).await
    }

    /// Drops everything accumulated and loads the first page again.
    pub async fn refresh(&self) -> FeedView {
        let _gate = self.gate.lock().await;
        self.run(Msg::RefreshRequested).await
    }

    /// Detaches the feed from its owner. Later loads are no-ops and late
    /// results are discarded.
    pub fn dispose(&self) {
        self.apply(Msg::Disposed);
    }

    async fn run(&self, msg: Msg) -> FeedView {
        for effect in self.apply(msg) {
            match effect {
                Effect::FetchPage { request, page } => self.fetch(request, page).await,
            }
        }
        self.view()
    }

    async fn fetch(&self, request: RequestId, page: u32) {
        let mut pending = PendingFetch {
            feed: self,
            request,
            settled: false,
        };

        let result = self.api.fetch_page(page).await.map_err(|err| {
            jobdeck_warn!("Job page {} failed: {}", page, err);
            FeedError::new(page, err.to_string())
        });
        if let Ok(loaded) = &result {
            jobdeck_debug!(
                "Job page {} returned {} records ({} raw)",
                page,
                loaded.records.len(),
                loaded.raw_len
            );
        }

        pending.settled = true;
        self.apply(Msg::PageLoaded { request, result });
    }

    fn apply(&self, msg: Msg) -> Vec<Effect> {
        let mut guard = self.lock_state();
        let state = std::mem::take(&mut *guard);
        let (state, effects) = update(state, msg);
        *guard = state;
        effects
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Frees the in-flight slot if the fetch future is dropped before it settles.
struct PendingFetch<'a> {
    feed: &'a PagedJobFeed,
    request: RequestId,
    settled: bool,
}

impl Drop for PendingFetch<'_> {
    fn drop(&mut self) {
        if !self.settled {
            jobdeck_debug!("Fetch for request {} abandoned", self.request);
            self.feed.apply(Msg::FetchAbandoned {
                request: self.request,
            });
        }
    }
}
