use crate::RequestId;

/// Work the feed asks its executor to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch page `page` from the job API and answer with `Msg::PageLoaded`.
    FetchPage { request: RequestId, page: u32 },
}
