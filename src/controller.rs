use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::films::{self, FetchError, Movie, Transport};

pub const LOADING_MESSAGE: &str = "Loading...";
pub const EMPTY_MESSAGE: &str = "Found no movies.";

/// Token identifying one fetch cycle. Only the latest one may write results.
pub type Generation = u64;

/// State transitions of the movie controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    FetchStarted { generation: Generation },
    FetchSucceeded { generation: Generation, movies: Vec<Movie> },
    FetchFailed { generation: Generation, message: String },
}

/// What the content area shows, by fixed priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content<'a> {
    Error(&'a str),
    Loading,
    Movies(&'a [Movie]),
    Empty,
}

/// Controller state. Written only through [`MovieState::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieState {
    movies: Vec<Movie>,
    is_loading: bool,
    error: Option<String>,
    generation: Generation,
}

impl MovieState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Start a new fetch cycle and return its token.
    pub fn begin_fetch(&mut self) -> Generation {
        let generation = self.generation + 1;
        self.apply(Action::FetchStarted { generation });
        generation
    }

    /// Apply one transition. Returns false when the action was stale and ignored.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::FetchStarted { generation } => {
                if generation <= self.generation {
                    debug!(generation, current = self.generation, "ignoring stale fetch start");
                    return false;
                }
                self.generation = generation;
                self.is_loading = true;
                self.error = None;
            }
            Action::FetchSucceeded { generation, movies } => {
                if generation != self.generation {
                    debug!(generation, current = self.generation, "dropping superseded result");
                    return false;
                }
                info!(generation, count = movies.len(), "movies committed");
                self.movies = movies;
                self.is_loading = false;
            }
            Action::FetchFailed { generation, message } => {
                if generation != self.generation {
                    debug!(generation, current = self.generation, "dropping superseded failure");
                    return false;
                }
                self.error = Some(message);
                self.is_loading = false;
            }
        }
        true
    }

    pub fn content(&self) -> Content<'_> {
        if let Some(message) = &self.error {
            Content::Error(message)
        } else if self.is_loading {
            Content::Loading
        } else if !self.movies.is_empty() {
            Content::Movies(&self.movies)
        } else {
            Content::Empty
        }
    }
}

/// Completion of one spawned fetch.
#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: Generation,
    pub result: Result<Vec<Movie>, FetchError>,
}

impl From<FetchOutcome> for Action {
    fn from(outcome: FetchOutcome) -> Self {
        let generation = outcome.generation;
        match outcome.result {
            Ok(movies) => Action::FetchSucceeded { generation, movies },
            Err(e) => {
                warn!(generation, timeout = e.is_timeout(), error = %e, "fetch failed");
                Action::FetchFailed {
                    generation,
                    message: e.user_message(),
                }
            }
        }
    }
}

/// Run the fetch pipeline on the runtime and report back over `tx`.
pub fn spawn_fetch<T: Transport>(
    transport: Arc<T>,
    generation: Generation,
    tx: UnboundedSender<FetchOutcome>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = films::fetch_movies(transport.as_ref()).await;
        if tx.send(FetchOutcome { generation, result }).is_err() {
            debug!(generation, "receiver gone, discarding fetch outcome");
        }
    })
}
