use crate::{FeedError, JobPage, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User scrolled to the end of the list.
    LoadMoreRequested,
    /// User pulled to refresh, or tapped retry.
    RefreshRequested,
    /// Result of a `FetchPage` effect.
    PageLoaded {
        request: RequestId,
        result: Result<JobPage, FeedError>,
    },
    /// The executor dropped the fetch before it completed.
    FetchAbandoned { request: RequestId },
    /// The owner of the feed went away; nothing may change it afterwards.
    Disposed,
}
