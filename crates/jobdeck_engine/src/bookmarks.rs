use jobdeck_core::{BookmarkSet, JobId, JobRecord};
use jobdeck_logging::{jobdeck_error, jobdeck_info, jobdeck_warn};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{KeyValueStore, StorageError};

/// Storage key of the bookmark blob.
pub const BOOKMARKS_KEY: &str = "job_bookmarks.json";

/// Durable set of bookmarked jobs, kept as one JSON array under a fixed key.
///
/// Storage failures never reach the caller: reads degrade to "no bookmarks"
/// and failed updates report `false`. An update whose read fails writes
/// nothing, so an unreadable store is never replaced by a near-empty list.
/// All read-modify-write cycles go through
/// one writer lock, so concurrent toggles on the same store instance cannot
/// overwrite each other. Share the instance (e.g. behind an `Arc`) rather than
/// opening a second one over the same storage.
pub struct BookmarkStore<S> {
    storage: S,
    key: String,
    writer: Mutex<()>,
}

impl<S: KeyValueStore> BookmarkStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, BOOKMARKS_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            writer: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// All bookmarks in insertion order; empty if storage is missing or unreadable.
    pub async fn list_bookmarks(&self) -> Vec<JobRecord> {
        self.load().await.into_records()
    }

    pub async fn is_bookmarked(&self, id: &JobId) -> bool {
        self.load().await.contains(id)
    }

    /// Adds `job` if absent, removes the entry with `job.id` otherwise.
    ///
    /// Returns whether the job is bookmarked afterwards, or `false` if the
    /// change could not be persisted.
    pub async fn toggle_bookmark(&self, job: JobRecord) -> bool {
        let _writer = self.writer.lock().await;
        let id = job.id.clone();
        let mut set = match self.read().await {
            Ok(set) => set,
            Err(err) => {
                jobdeck_error!("Bookmark toggle for job {} aborted, read failed: {}", id, err);
                return false;
            }
        };
        let bookmarked = set.toggle(job);

        match self.save(&set).await {
            Ok(()) => {
                jobdeck_info!(
                    "Job {} {} bookmarks ({} saved)",
                    id,
                    if bookmarked { "added to" } else { "removed from" },
                    set.len()
                );
                bookmarked
            }
            Err(err) => {
                jobdeck_error!("Failed to persist bookmark toggle for job {}: {}", id, err);
                false
            }
        }
    }

    /// Removes the bookmark with `id`. Returns whether a bookmark was removed
    /// and the result persisted.
    pub async fn remove_bookmark(&self, id: &JobId) -> bool {
        let _writer = self.writer.lock().await;
        let mut set = match self.read().await {
            Ok(set) => set,
            Err(err) => {
                jobdeck_error!("Bookmark removal for job {} aborted, read failed: {}", id, err);
                return false;
            }
        };
        if !set.remove(id) {
            return false;
        }

        match self.save(&set).await {
            Ok(()) => {
                jobdeck_info!("Job {} removed from bookmarks ({} saved)", id, set.len());
                true
            }
            Err(err) => {
                jobdeck_error!("Failed to persist bookmark removal for job {}: {}", id, err);
                false
            }
        }
    }

    async fn load(&self) -> BookmarkSet {
        match self.read().await {
            Ok(set) => set,
            Err(err) => {
                jobdeck_error!("Failed to read bookmarks from {}: {}", self.key, err);
                BookmarkSet::new()
            }
        }
    }

    /// Storage errors propagate; a blob that does not parse reads as empty.
    async fn read(&self) -> Result<BookmarkSet, StorageError> {
        match self.storage.get(&self.key).await? {
            Some(text) => Ok(self.parse(&text)),
            None => Ok(BookmarkSet::new()),
        }
    }

    fn parse(&self, text: &str) -> BookmarkSet {
        let entries: Vec<Value> = match serde_json::from_str(text) {
            Ok(entries) => entries,
            Err(err) => {
                jobdeck_warn!("Failed to parse bookmarks from {}: {}", self.key, err);
                return BookmarkSet::new();
            }
        };

        let total = entries.len();
        let set = BookmarkSet::from_records(entries.into_iter().filter_map(JobRecord::from_value));
        if set.len() != total {
            jobdeck_warn!(
                "Dropped {} malformed or duplicate bookmark entries from {}",
                total - set.len(),
                self.key
            );
        }
        set
    }

    async fn save(&self, set: &BookmarkSet) -> Result<(), StorageError> {
        let text = serde_json::to_string(set.records())?;
        self.storage.set(&self.key, &text).await
    }
}
