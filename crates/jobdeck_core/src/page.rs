use crate::JobRecord;

/// One page of the listing as delivered by the job API.
///
/// `raw_len` counts every element the API sent, including entries that were
/// dropped while decoding. End-of-list detection uses it, not `records.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPage {
    pub records: Vec<JobRecord>,
    pub raw_len: usize,
}

impl JobPage {
    pub fn new(records: Vec<JobRecord>, raw_len: usize) -> Self {
        let raw_len = raw_len.max(records.len());
        Self { records, raw_len }
    }

    /// True when the API sent no elements at all.
    pub fn is_empty(&self) -> bool {
        self.raw_len == 0
    }
}

impl From<Vec<JobRecord>> for JobPage {
    fn from(records: Vec<JobRecord>) -> Self {
        let raw_len = records.len();
        Self { records, raw_len }
    }
}
