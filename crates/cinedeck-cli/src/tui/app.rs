//! Screen switching and background request dispatch for the browser.

use std::future::Future;
use std::sync::Arc;

use cinedeck_api::tmdb::{DEFAULT_IMAGE_SIZE, TmdbApi};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use super::detail::state::DetailState;
use super::fetch::{FetchOutcome, fetch_category, fetch_details, fetch_search, fetch_videos};
use super::listing::state::{ListingState, NavigationRequest, Slot};
use super::player;

/// Settings the browser needs from the configuration.
#[derive(Debug, Clone)]
pub struct BrowseOptions {
    /// Poster width descriptor.
    pub image_size: String,
    /// External player command line.
    pub player_command: Option<String>,
}

impl Default for BrowseOptions {
    fn default() -> Self {
        Self {
            image_size: String::from(DEFAULT_IMAGE_SIZE),
            player_command: None,
        }
    }
}

/// Application state shared by both screens.
pub struct App<A> {
    api: Arc<A>,
    runtime: Handle,
    tx: UnboundedSender<FetchOutcome>,
    rx: UnboundedReceiver<FetchOutcome>,
    /// Listing screen state, kept while the detail screen is open.
    pub listing: ListingState,
    /// Detail screen state; `None` while the listing is shown.
    pub detail: Option<DetailState>,
    detail_generation: u64,
    /// Browse settings.
    pub options: BrowseOptions,
    /// One-line status shown in the footer.
    pub message: Option<String>,
    /// Redraw counter driving the spinner.
    pub tick: usize,
}

impl<A: TmdbApi + Send + Sync + 'static> App<A> {
    /// Creates the app. Requests run on `runtime`.
    pub fn new(api: Arc<A>, runtime: Handle, options: BrowseOptions) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            api,
            runtime,
            tx,
            rx,
            listing: ListingState::new(),
            detail: None,
            detail_generation: 0,
            options,
            message: None,
            tick: 0,
        }
    }

    fn spawn(&self, fetch: impl Future<Output = FetchOutcome> + Send + 'static) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            // The receiver is gone only after the UI has exited.
            let _ = tx.send(fetch.await);
        });
    }

    /// Starts (or restarts) the five category fetches concurrently.
    pub fn start_load(&mut self) {
        let generation = self.listing.begin_load();
        tracing::info!(generation, "loading movie listings");
        for slot in Slot::CATEGORIES {
            let api = Arc::clone(&self.api);
            self.spawn(async move { fetch_category(&*api, generation, slot).await });
        }
    }

    /// Issues a search for the current query. Returns `false` for a blank
    /// query, in which case no request is made.
    pub fn start_search(&mut self) -> bool {
        let Some((seq, query)) = self.listing.begin_search() else {
            return false;
        };
        tracing::info!(seq, %query, "searching movies");
        let api = Arc::clone(&self.api);
        self.spawn(async move { fetch_search(&*api, seq, query).await });
        true
    }

    /// Opens the detail screen and fetches metadata and videos.
    pub fn open_detail(&mut self, request: NavigationRequest) {
        self.detail_generation = self.detail_generation.wrapping_add(1);
        self.detail = Some(DetailState::new(request.movie_id, self.detail_generation));
        self.message = None;
        self.start_detail_fetches();
    }

    /// Re-issues both detail fetches under a new generation.
    pub fn retry_detail(&mut self) {
        self.detail_generation = self.detail_generation.wrapping_add(1);
        if let Some(detail) = self.detail.as_mut() {
            detail.restart(self.detail_generation);
        }
        self.start_detail_fetches();
    }

    fn start_detail_fetches(&self) {
        let Some(detail) = self.detail.as_ref() else {
            return;
        };
        let generation = detail.generation();
        let movie_id = String::from(detail.movie_id());
        tracing::info!(generation, %movie_id, "loading movie details");

        let api = Arc::clone(&self.api);
        let id = movie_id.clone();
        self.spawn(async move { fetch_details(&*api, generation, &id).await });

        let api = Arc::clone(&self.api);
        self.spawn(async move { fetch_videos(&*api, generation, &movie_id).await });
    }

    /// Tears down the detail screen. Its pending responses are dropped.
    pub fn close_detail(&mut self) {
        self.detail = None;
        self.message = None;
    }

    /// Plays the detail screen's trailer, if one was found.
    pub fn play_trailer(&mut self) {
        let Some(url) = self.detail.as_ref().and_then(DetailState::trailer_url) else {
            self.message = Some(String::from("No trailer available"));
            return;
        };
        self.message = match player::play(&url, self.options.player_command.as_deref()) {
            Ok(()) => Some(format!("Playing {url}")),
            Err(e) => {
                tracing::warn!("failed to start player: {e:#}");
                Some(format!("Player failed: {e:#}"))
            }
        };
    }

    /// Applies every outcome received so far.
    pub fn drain(&mut self) {
        while let Ok(outcome) = self.rx.try_recv() {
            self.apply(outcome);
        }
    }

    /// Routes one outcome to the screen state it belongs to.
    pub fn apply(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Category {
                generation,
                slot,
                result,
            } => {
                if let Err(error) = &result {
                    tracing::warn!(?slot, %error, "category fetch failed");
                }
                if !self.listing.apply_category_result(generation, slot, result) {
                    tracing::debug!(generation, ?slot, "dropped stale category result");
                }
                if let Some(summary) = self.listing.take_settled_summary() {
                    tracing::info!(
                        loaded = summary.loaded,
                        failed = summary.failed,
                        "movie listings settled"
                    );
                }
            }
            FetchOutcome::Search { seq, result } => {
                if let Err(error) = &result {
                    tracing::warn!(seq, %error, "search failed");
                }
                if !self.listing.apply_search_result(seq, result) {
                    tracing::debug!(seq, "dropped stale search result");
                }
            }
            FetchOutcome::Details { generation, result } => {
                let applied = self
                    .detail
                    .as_mut()
                    .is_some_and(|d| d.apply_details(generation, result));
                if !applied {
                    tracing::debug!(generation, "dropped details for a closed screen");
                }
            }
            FetchOutcome::Videos { generation, result } => {
                let applied = self
                    .detail
                    .as_mut()
                    .is_some_and(|d| d.apply_videos(generation, result));
                if !applied {
                    tracing::debug!(generation, "dropped videos for a closed screen");
                }
            }
        }
    }
}
