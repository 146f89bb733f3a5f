//! Jobdeck core: job records, bookmark sets and the pure feed state machine.
mod bookmark;
mod effect;
mod job;
mod msg;
mod page;
mod state;
mod update;
mod view_model;

pub use bookmark::BookmarkSet;
pub use effect::Effect;
pub use job::{JobId, JobRecord, JobStats};
pub use msg::Msg;
pub use page::JobPage;
pub use state::{FeedError, FeedState, RequestId, DEFAULT_PAGE_SIZE};
pub use update::update;
pub use view_model::{FeedStatus, FeedView};
