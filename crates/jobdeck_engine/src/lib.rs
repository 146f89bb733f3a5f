//! Jobdeck engine: job API client, storage and the async drivers around the core.
mod api;
mod bookmarks;
mod feed;
mod filename;
mod storage;
mod types;

pub use api::{decode_page, ApiSettings, JobApi, ReqwestJobApi};
pub use bookmarks::{BookmarkStore, BOOKMARKS_KEY};
pub use feed::PagedJobFeed;
pub use filename::key_filename;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use types::{FailureKind, FetchError};
