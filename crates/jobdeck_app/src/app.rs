use std::collections::HashSet;
use std::io::Write;

use jobdeck_core::{JobId, JobRecord};
use jobdeck_engine::{BookmarkStore, KeyValueStore, PagedJobFeed};
use jobdeck_logging::{jobdeck_debug, jobdeck_info};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::command::{parse_command, Command};
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Jobs,
    Bookmarks,
}

/// Screen state of the terminal UI on top of the feed and the bookmark store.
pub struct App<S> {
    feed: PagedJobFeed,
    bookmarks: BookmarkStore<S>,
    screen: Screen,
    /// Bookmark list as last shown; item numbers on that screen index into it.
    saved: Vec<JobRecord>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(feed: PagedJobFeed, bookmarks: BookmarkStore<S>) -> Self {
        Self {
            feed,
            bookmarks,
            screen: Screen::Jobs,
            saved: Vec::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Runs one command and returns the text to show.
    pub async fn execute(&mut self, command: Command) -> String {
        jobdeck_debug!("Executing {:?} on {:?}", command, self.screen);
        match command {
            Command::More => {
                self.screen = Screen::Jobs;
                self.feed.load_more().await;
                self.show_jobs().await
            }
            Command::Refresh => {
                self.screen = Screen::Jobs;
                self.feed.refresh().await;
                self.show_jobs().await
            }
            Command::Jobs => {
                self.screen = Screen::Jobs;
                self.show_jobs().await
            }
            Command::Saved => {
                self.screen = Screen::Bookmarks;
                self.show_saved().await
            }
            Command::Open(index) => match self.item(index) {
                Some(job) => {
                    let bookmarked = self.bookmarks.is_bookmarked(&job.id).await;
                    render::render_detail(&job, bookmarked)
                }
                None => self.no_such_item(index),
            },
            Command::Mark(index) => match self.item(index) {
                Some(job) => self.toggle(job).await,
                None => self.no_such_item(index),
            },
            Command::Help => render::HELP.to_string(),
            Command::Quit => String::new(),
        }
    }

    /// Loads `pages` pages (stopping early at the end of the list or on an
    /// error) and renders the job list.
    pub async fn load_pages(&mut self, pages: u32) -> String {
        self.screen = Screen::Jobs;
        for _ in 0..pages {
            let view = self.feed.load_more().await;
            if !view.has_more || view.error.is_some() {
                break;
            }
        }
        self.show_jobs().await
    }

    pub fn shutdown(&self) {
        self.feed.dispose();
    }

    async fn show_jobs(&self) -> String {
        let view = self.feed.view();
        let bookmarked = self.bookmarked_ids().await;
        render::render_feed(&view, &bookmarked)
    }

    async fn show_saved(&mut self) -> String {
        self.saved = self.bookmarks.list_bookmarks().await;
        render::render_bookmarks(&self.saved)
    }

    async fn toggle(&mut self, job: JobRecord) -> String {
        let title = job.title().unwrap_or_else(|| format!("job {}", job.id));
        let now_bookmarked = self.bookmarks.toggle_bookmark(job).await;
        jobdeck_info!("Bookmark toggled for {:?}: {}", title, now_bookmarked);

        let status = if now_bookmarked {
            format!("Bookmarked: {title}")
        } else {
            format!("Not bookmarked: {title}")
        };
        let listing = match self.screen {
            Screen::Jobs => self.show_jobs().await,
            Screen::Bookmarks => self.show_saved().await,
        };
        format!("{status}\n\n{listing}")
    }

    async fn bookmarked_ids(&self) -> HashSet<JobId> {
        self.bookmarks
            .list_bookmarks()
            .await
            .into_iter()
            .map(|job| job.id)
            .collect()
    }

    fn item(&self, index: usize) -> Option<JobRecord> {
        let position = index.checked_sub(1)?;
        match self.screen {
            Screen::Jobs => self.feed.view().jobs.get(position).cloned(),
            Screen::Bookmarks => self.saved.get(position).cloned(),
        }
    }

    fn no_such_item(&self, index: usize) -> String {
        let screen = match self.screen {
            Screen::Jobs => "job list",
            Screen::Bookmarks => "bookmark list",
        };
        format!("There is no item {index} on the {screen}.")
    }
}

/// Interactive loop over stdin until `quit` or end of input.
pub async fn run_interactive<S: KeyValueStore>(app: &mut App<S>) -> anyhow::Result<()> {
    println!("{}", app.execute(Command::More).await);
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let prompt = match app.screen() {
            Screen::Jobs => "jobs",
            Screen::Bookmarks => "saved",
        };
        print!("{prompt}> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => println!("{}", app.execute(command).await),
            Err(crate::command::CommandError::Empty) => {}
            Err(err) => println!("{err}. Type `help` for commands."),
        }
    }

    app.shutdown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use jobdeck_core::JobPage;
    use jobdeck_engine::{FailureKind, FetchError, JobApi, MemoryStore};

    use super::*;

    struct PagesApi {
        pages: Mutex<Vec<Result<Vec<JobRecord>, FetchError>>>,
    }

    #[async_trait::async_trait]
    impl JobApi for PagesApi {
        async fn fetch_page(&self, _page: u32) -> Result<JobPage, FetchError> {
            let mut pages = self.pages.lock().unwrap();
            if pages.is_empty() {
                Ok(JobPage::default())
            } else {
                pages.remove(0).map(JobPage::from)
            }
        }
    }

    fn job(id: i64, title: &str) -> JobRecord {
        JobRecord::new(id).with_field("title", title)
    }

    fn app(pages: Vec<Result<Vec<JobRecord>, FetchError>>) -> App<MemoryStore> {
        jobdeck_logging::initialize_for_tests();
        let api = Arc::new(PagesApi {
            pages: Mutex::new(pages),
        });
        App::new(
            PagedJobFeed::with_page_size(api, 2),
            BookmarkStore::new(MemoryStore::new()),
        )
    }

    #[tokio::test]
    async fn browse_and_bookmark_flow() {
        let mut app = app(vec![Ok(vec![job(1, "Baker"), job(2, "Driver")])]);

        let listing = app.execute(Command::More).await;
        assert!(listing.contains("[ ] Baker"));

        let marked = app.execute(Command::Mark(2)).await;
        assert!(marked.starts_with("Bookmarked: Driver"));
        assert!(marked.contains("[*] Driver"));

        let saved = app.execute(Command::Saved).await;
        assert_eq!(app.screen(), Screen::Bookmarks);
        assert!(saved.contains("1. [*] Driver"));

        let detail = app.execute(Command::Open(1)).await;
        assert!(detail.starts_with("Driver\nBookmarked"));

        let unmarked = app.execute(Command::Mark(1)).await;
        assert!(unmarked.starts_with("Not bookmarked: Driver"));
        assert!(unmarked.ends_with(render::NO_BOOKMARKS));
    }

    #[tokio::test]
    async fn failed_first_load_offers_retry() {
        let mut app = app(vec![
            Err(FetchError::new(FailureKind::Network, "offline")),
            Ok(vec![job(1, "Baker")]),
        ]);

        let failed = app.execute(Command::More).await;
        assert!(failed.contains(render::RETRY_HINT));

        let retried = app.execute(Command::Refresh).await;
        assert!(retried.contains("Baker"));
        assert!(retried.ends_with("No more jobs."));
    }

    #[tokio::test]
    async fn load_pages_stops_at_end_of_list() {
        let mut app = app(vec![
            Ok(vec![job(1, "A"), job(2, "B")]),
            Ok(vec![job(3, "C")]),
            Ok(vec![job(4, "D"), job(5, "E")]),
        ]);

        let text = app.load_pages(5).await;
        assert!(text.contains("C"));
        assert!(!text.contains("D"));
    }

    #[tokio::test]
    async fn out_of_range_items_are_reported() {
        let mut app = app(Vec::new());
        assert_eq!(
            app.execute(Command::Open(3)).await,
            "There is no item 3 on the job list."
        );
    }
}
