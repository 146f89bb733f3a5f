use std::collections::HashSet;
use std::fmt;

use crate::view_model::FeedView;
use crate::{JobId, JobPage, JobRecord};

/// Page length the job API uses by convention.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Handle of one fetch issued by the feed. Only the newest handle is live.
pub type RequestId = u64;

/// Why the last load failed, in a form the presentation layer can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedError {
    pub page: u32,
    pub message: String,
}

impl FeedError {
    pub fn new(page: u32, message: impl Into<String>) -> Self {
        Self {
            page,
            message: message.into(),
        }
    }
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {}: {}", self.page, self.message)
    }
}

/// Accumulated, de-duplicated job list plus pagination bookkeeping.
///
/// Owned by a single feed and changed only through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedState {
    jobs: Vec<JobRecord>,
    seen: HashSet<JobId>,
    cursor: u32,
    has_more: bool,
    in_flight: Option<InFlight>,
    error: Option<FeedError>,
    page_size: usize,
    next_request: RequestId,
    disposed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    request: RequestId,
    page: u32,
    refresh: bool,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page shorter than `page_size` is taken as the last one.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            jobs: Vec::new(),
            seen: HashSet::new(),
            cursor: 1,
            has_more: true,
            in_flight: None,
            error: None,
            page_size: page_size.max(1),
            next_request: 1,
            disposed: false,
        }
    }

    pub fn view(&self) -> FeedView {
        FeedView {
            jobs: self.jobs.clone(),
            cursor: self.cursor,
            has_more: self.has_more,
            loading: self.is_loading(),
            refreshing: self.in_flight.is_some_and(|slot| slot.refresh),
            error: self.error.clone(),
        }
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error(&self) -> Option<&FeedError> {
        self.error.as_ref()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Request currently in flight, if any.
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight.map(|slot| slot.request)
    }

    pub(crate) fn begin_request(&mut self, refresh: bool) -> (RequestId, u32) {
        let request = self.next_request;
        self.next_request += 1;
        self.error = None;
        self.in_flight = Some(InFlight {
            request,
            page: self.cursor,
            refresh,
        });
        (request, self.cursor)
    }

    pub(crate) fn reset(&mut self) {
        self.jobs.clear();
        self.seen.clear();
        self.cursor = 1;
        self.has_more = true;
        self.error = None;
    }

    /// Takes the in-flight slot if it belongs to `request`.
    pub(crate) fn settle(&mut self, request: RequestId) -> Option<u32> {
        match self.in_flight {
            Some(slot) if slot.request == request => {
                self.in_flight = None;
                Some(slot.page)
            }
            _ => None,
        }
    }

    /// Appends the unseen records of `page`, first occurrence wins.
    pub(crate) fn merge_page(&mut self, page: JobPage) {
        if page.is_empty() {
            self.has_more = false;
            return;
        }
        self.has_more = page.raw_len >= self.page_size;
        self.cursor += 1;
        for record in page.records {
            if self.seen.insert(record.id.clone()) {
                self.jobs.push(record);
            }
        }
    }

    pub(crate) fn fail(&mut self, error: FeedError) {
        self.error = Some(error);
    }

    pub(crate) fn dispose(&mut self) {
        self.disposed = true;
        self.in_flight = None;
    }
}
