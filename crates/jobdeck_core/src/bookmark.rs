use crate::{JobId, JobRecord};

/// Ordered set of bookmarked jobs, unique by [`JobId`].
///
/// Order is insertion order and only matters for display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookmarkSet {
    records: Vec<JobRecord>,
}

impl BookmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from raw records, keeping the first record for each id.
    pub fn from_records(records: impl IntoIterator<Item = JobRecord>) -> Self {
        let mut set = Self::new();
        for record in records {
            if !set.contains(&record.id) {
                set.records.push(record);
            }
        }
        set
    }

    pub fn contains(&self, id: &JobId) -> bool {
        self.records.iter().any(|record| &record.id == id)
    }

    /// Removes the record with `job.id` if present, otherwise appends `job`.
    ///
    /// Returns whether the job is bookmarked afterwards. When an entry with
    /// the same id exists, the fields of `job` are discarded.
    pub fn toggle(&mut self, job: JobRecord) -> bool {
        if self.remove(&job.id) {
            false
        } else {
            self.records.push(job);
            true
        }
    }

    /// Removes the record with `id`; returns whether anything was removed.
    pub fn remove(&mut self, id: &JobId) -> bool {
        let before = self.records.len();
        self.records.retain(|record| &record.id != id);
        self.records.len() != before
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<JobRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
