use crate::{FeedError, JobRecord};

/// Immutable snapshot of a feed, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedView {
    pub jobs: Vec<JobRecord>,
    /// Next page number that will be requested.
    pub cursor: u32,
    pub has_more: bool,
    pub loading: bool,
    pub refreshing: bool,
    pub error: Option<FeedError>,
}

/// What a list screen should show as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    /// Nothing to show yet and a fetch is running.
    Loading,
    /// Nothing to show and the last fetch failed.
    Failed,
    /// Nothing to show, nothing running.
    Empty,
    /// At least one job to show.
    Ready,
}

impl FeedView {
    pub fn status(&self) -> FeedStatus {
        if !self.jobs.is_empty() {
            FeedStatus::Ready
        } else if self.loading {
            FeedStatus::Loading
        } else if self.error.is_some() {
            FeedStatus::Failed
        } else {
            FeedStatus::Empty
        }
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
