//! Detail screen state management.

use cinedeck_api::tmdb::{TmdbMovieDetails, TmdbVideo, find_trailer, poster_url, youtube_watch_url};

/// Placeholder shown when the release year is unknown.
pub const UNKNOWN_YEAR: &str = "----";

/// What the detail screen can render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailPhase<'a> {
    /// Metadata not yet received.
    Loading,
    /// Metadata fetch failed; retry is possible.
    Failed(&'a str),
    /// Metadata available.
    Ready(&'a TmdbMovieDetails),
}

/// Trailer lookup status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrailerState {
    /// Video list not yet received.
    Loading,
    /// First YouTube trailer in API order.
    Found(TmdbVideo),
    /// Video list had no eligible entry.
    Missing,
    /// Video list fetch failed.
    Failed(String),
}

/// Fields rendered for a loaded movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    /// Resolved poster image URL.
    pub poster_url: Option<String>,
    /// Movie title.
    pub title: String,
    /// Release year, or `----`.
    pub year: String,
    /// Tagline, if any.
    pub tagline: Option<String>,
    /// Runtime and genres line.
    pub facts: String,
    /// Synopsis text.
    pub synopsis: String,
}

/// State for one activation of the detail screen.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct DetailState {
    movie_id: String,
    generation: u64,
    movie: Option<TmdbMovieDetails>,
    error: Option<String>,
    trailer: TrailerState,
    /// Synopsis scroll offset.
    pub scroll: u16,
}

impl DetailState {
    /// Creates the state for a fresh activation.
    #[must_use]
    pub const fn new(movie_id: String, generation: u64) -> Self {
        Self {
            movie_id,
            generation,
            movie: None,
            error: None,
            trailer: TrailerState::Loading,
            scroll: 0,
        }
    }

    /// Movie identifier this screen was opened for.
    #[must_use]
    pub fn movie_id(&self) -> &str {
        &self.movie_id
    }

    /// Generation of the current activation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Resets for a retry under a new generation.
    pub fn restart(&mut self, generation: u64) {
        self.generation = generation;
        self.movie = None;
        self.error = None;
        self.trailer = TrailerState::Loading;
        self.scroll = 0;
    }

    /// Applies a metadata result. Returns `false` if it was stale.
    pub fn apply_details(
        &mut self,
        generation: u64,
        result: Result<TmdbMovieDetails, String>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        match result {
            Ok(movie) => {
                self.movie = Some(movie);
                self.error = None;
            }
            Err(error) => {
                tracing::warn!(movie_id = %self.movie_id, %error, "failed to fetch movie details");
                self.error = Some(error);
            }
        }
        true
    }

    /// Applies a video list result. Returns `false` if it was stale.
    pub fn apply_videos(&mut self, generation: u64, result: Result<Vec<TmdbVideo>, String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.trailer = match result {
            Ok(videos) => find_trailer(&videos)
                .cloned()
                .map_or(TrailerState::Missing, TrailerState::Found),
            Err(error) => {
                tracing::warn!(movie_id = %self.movie_id, %error, "failed to fetch movie videos");
                TrailerState::Failed(error)
            }
        };
        true
    }

    /// Current render phase.
    #[must_use]
    pub fn phase(&self) -> DetailPhase<'_> {
        if let Some(movie) = &self.movie {
            DetailPhase::Ready(movie)
        } else if let Some(error) = &self.error {
            DetailPhase::Failed(error)
        } else {
            DetailPhase::Loading
        }
    }

    /// Trailer lookup status.
    #[must_use]
    pub const fn trailer(&self) -> &TrailerState {
        &self.trailer
    }

    /// Watch URL of the selected trailer.
    #[must_use]
    pub fn trailer_url(&self) -> Option<String> {
        match &self.trailer {
            TrailerState::Found(video) => Some(youtube_watch_url(&video.key)),
            _ => None,
        }
    }

    /// Render fields, present only once metadata has arrived.
    #[must_use]
    pub fn view(&self, image_size: &str) -> Option<DetailView> {
        let movie = self.movie.as_ref()?;
        let runtime = movie
            .runtime
            .filter(|m| *m > 0)
            .map(|m| format!("{m} min"));
        let genres = movie
            .genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let facts = [runtime.unwrap_or_default(), genres]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("  |  ");

        Some(DetailView {
            poster_url: poster_url(movie.poster_path.as_deref(), image_size),
            title: movie.title.clone(),
            year: year_label(movie.release_year()),
            tagline: movie.tagline.clone().filter(|t| !t.trim().is_empty()),
            facts,
            synopsis: movie.overview.clone().unwrap_or_default(),
        })
    }

    /// Scrolls the synopsis up one line.
    pub const fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Scrolls the synopsis down one line.
    pub const fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }
}

/// Formats a release year for display.
#[must_use]
pub fn year_label(year: Option<i32>) -> String {
    year.map_or_else(|| String::from(UNKNOWN_YEAR), |y| y.to_string())
}
