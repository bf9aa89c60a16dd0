use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::info;

use crate::controller::{self, Content, FetchOutcome, MovieState};
use crate::films::{HttpTransport, Movie, Transport};

pub const LIST_OVERHEAD: u16 = 6;

/// Main application state.
pub struct App<T: Transport = HttpTransport> {
    pub should_quit: bool,
    pub show_help: bool,

    pub state: MovieState,

    // List view state
    pub list_selected: usize,
    pub page_size: usize,

    // Opening crawl pane, reset whenever the selection changes
    pub crawl_scroll: u16,

    // Status message
    pub status_msg: String,

    transport: Arc<T>,
    outcome_tx: UnboundedSender<FetchOutcome>,
    outcome_rx: UnboundedReceiver<FetchOutcome>,
}

impl<T: Transport> App<T> {
    pub fn new(transport: T) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            should_quit: false,
            show_help: false,

            state: MovieState::new(),

            list_selected: 0,
            page_size: 10, // Updated on first resize

            crawl_scroll: 0,

            status_msg: "Press f to fetch movies".to_string(),

            transport: Arc::new(transport),
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    /// Start a fetch cycle. Earlier in-flight requests keep running but can no longer write.
    pub fn fetch_movies(&mut self) {
        let generation = self.state.begin_fetch();
        info!(generation, endpoint = self.transport.endpoint(), "fetching movies");
        self.status_msg = format!("Fetching from {}", self.transport.endpoint());
        controller::spawn_fetch(Arc::clone(&self.transport), generation, self.outcome_tx.clone());
    }

    /// Apply every completed fetch without blocking. Returns true if state changed.
    pub fn drain_outcomes(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            changed |= self.apply_outcome(outcome);
        }
        changed
    }

    /// Wait until the current fetch cycle has finished.
    pub async fn wait_for_fetch(&mut self) {
        while self.state.is_loading() {
            match self.outcome_rx.recv().await {
                Some(outcome) => {
                    self.apply_outcome(outcome);
                }
                None => break,
            }
        }
    }

    fn apply_outcome(&mut self, outcome: FetchOutcome) -> bool {
        let applied = self.state.apply(outcome.into());
        if applied {
            self.list_selected = 0;
            self.crawl_scroll = 0;
            let generation = self.state.generation();
            self.status_msg = match self.state.content() {
                Content::Movies(movies) => format!("{} movies loaded", movies.len()),
                Content::Empty => "No results".to_string(),
                Content::Error(_) => format!("Fetch #{} failed", generation),
                Content::Loading => String::new(),
            };
        }
        applied
    }

    /// Update page size based on terminal height. Each movie takes two rows.
    pub fn update_page_size(&mut self, terminal_height: u16) {
        let rows = terminal_height.saturating_sub(LIST_OVERHEAD) as usize;
        self.page_size = (rows / 2).max(1);
    }

    fn visible_len(&self) -> usize {
        match self.state.content() {
            Content::Movies(movies) => movies.len(),
            _ => 0,
        }
    }

    /// The highlighted movie, if the list is what's on screen.
    pub fn selected_movie(&self) -> Option<&Movie> {
        match self.state.content() {
            Content::Movies(movies) => movies.get(self.list_selected),
            _ => None,
        }
    }

    fn select(&mut self, index: usize) {
        if index != self.list_selected {
            self.crawl_scroll = 0;
        }
        self.list_selected = index;
    }

    /// Move selection down in the list.
    pub fn list_next(&mut self) {
        if self.list_selected + 1 < self.visible_len() {
            self.select(self.list_selected + 1);
        }
    }

    /// Move selection up in the list.
    pub fn list_prev(&mut self) {
        self.select(self.list_selected.saturating_sub(1));
    }

    pub fn list_page_down(&mut self) {
        let last = self.visible_len().saturating_sub(1);
        self.select((self.list_selected + self.page_size).min(last));
    }

    pub fn list_page_up(&mut self) {
        self.select(self.list_selected.saturating_sub(self.page_size));
    }

    pub fn list_first(&mut self) {
        self.select(0);
    }

    pub fn list_last(&mut self) {
        self.select(self.visible_len().saturating_sub(1));
    }

    pub fn crawl_scroll_down(&mut self) {
        self.crawl_scroll = self.crawl_scroll.saturating_add(1);
    }

    pub fn crawl_scroll_up(&mut self) {
        self.crawl_scroll = self.crawl_scroll.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::films::REQUEST_FAILED_MESSAGE;
    use crate::films::testing::{StaticTransport, TWO_FILMS};

    #[tokio::test]
    async fn test_fetch_populates_movies() {
        let mut app = App::new(StaticTransport::ok(TWO_FILMS));
        app.fetch_movies();
        assert!(app.state.is_loading());
        assert_eq!(app.state.content(), Content::Loading);

        app.wait_for_fetch().await;
        assert!(!app.state.is_loading());
        assert_eq!(app.state.movies().len(), 2);
        assert_eq!(app.status_msg, "2 movies loaded");
    }

    #[tokio::test]
    async fn test_failed_fetch_sets_fixed_error() {
        let mut app = App::new(StaticTransport::status(404));
        app.fetch_movies();
        app.wait_for_fetch().await;

        assert!(!app.state.is_loading());
        assert_eq!(app.state.content(), Content::Error(REQUEST_FAILED_MESSAGE));
        assert!(app.state.movies().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_trigger_only_latest_generation_writes() {
        let mut app = App::new(StaticTransport::ok(TWO_FILMS));
        app.fetch_movies();
        app.fetch_movies();
        assert_eq!(app.state.generation(), 2);

        app.wait_for_fetch().await;
        assert!(!app.state.is_loading());
        assert_eq!(app.state.movies().len(), 2);
    }

    #[tokio::test]
    async fn test_drain_outcomes_is_non_blocking() {
        let mut app = App::new(StaticTransport::ok(TWO_FILMS));
        assert!(!app.drain_outcomes());
        assert_eq!(app.state.content(), Content::Empty);
    }

    #[tokio::test]
    async fn test_list_navigation_is_clamped() {
        let mut app = App::new(StaticTransport::ok(TWO_FILMS));
        app.fetch_movies();
        app.wait_for_fetch().await;

        app.list_prev();
        assert_eq!(app.list_selected, 0);
        app.list_next();
        app.list_next();
        assert_eq!(app.list_selected, 1);
        app.list_page_up();
        assert_eq!(app.list_selected, 0);
        app.list_page_down();
        assert_eq!(app.list_selected, 1);
        app.list_first();
        assert_eq!(app.list_selected, 0);
        app.list_last();
        assert_eq!(app.list_selected, 1);
    }

    #[tokio::test]
    async fn test_crawl_scroll_resets_on_selection_change() {
        let mut app = App::new(StaticTransport::ok(TWO_FILMS));
        app.fetch_movies();
        app.wait_for_fetch().await;
        assert_eq!(app.selected_movie().map(|m| m.id), Some(4));

        app.crawl_scroll_down();
        app.crawl_scroll_down();
        app.crawl_scroll_up();
        assert_eq!(app.crawl_scroll, 1);

        // Clamped move keeps the same movie and its scroll
        app.list_prev();
        assert_eq!(app.crawl_scroll, 1);

        app.list_next();
        assert_eq!(app.selected_movie().map(|m| m.id), Some(5));
        assert_eq!(app.crawl_scroll, 0);
    }

    #[tokio::test]
    async fn test_transport_error_surfaces_its_own_message() {
        // Nothing listens on port 1, so the connection is refused.
        let url = "http://127.0.0.1:1/api/films/";
        let expected = crate::films::fetch_movies(&HttpTransport::new(url, None).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(expected, crate::films::FetchError::Transport(_)));
        let expected = expected.user_message();

        let mut app = App::new(HttpTransport::new(url, None).unwrap());
        app.fetch_movies();
        app.wait_for_fetch().await;

        assert!(!app.state.is_loading());
        assert_eq!(app.state.error(), Some(expected.as_str()));
        assert_ne!(app.state.error(), Some(REQUEST_FAILED_MESSAGE));
        assert!(expected.contains("127.0.0.1:1"));
        assert_eq!(app.status_msg, "Fetch #1 failed");
    }

    #[test]
    fn test_page_size_never_zero() {
        let mut app = App::new(StaticTransport::ok(TWO_FILMS));
        app.update_page_size(3);
        assert_eq!(app.page_size, 1);
        app.update_page_size(26);
        assert_eq!(app.page_size, 10);
    }
}
