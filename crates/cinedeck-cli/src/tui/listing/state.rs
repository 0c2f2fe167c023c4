//! Listing screen state management.

use std::collections::BTreeMap;

use cinedeck_api::tmdb::{MovieCategory, TmdbMovieSummary};

/// One row of the listing screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    /// Results of the last search.
    Search,
    /// `now_playing` list.
    NowPlaying,
    /// `upcoming` list.
    Upcoming,
    /// `popular` list.
    Popular,
    /// `top_rated` list.
    TopRated,
    /// Second copy of the `now_playing` list.
    New,
}

impl Slot {
    /// Slots filled by the initial load, in load order.
    pub const CATEGORIES: [Self; 5] = [
        Self::NowPlaying,
        Self::Upcoming,
        Self::Popular,
        Self::TopRated,
        Self::New,
    ];

    /// All slots in display order.
    pub const DISPLAY_ORDER: [Self; 6] = [
        Self::Search,
        Self::NowPlaying,
        Self::Upcoming,
        Self::Popular,
        Self::TopRated,
        Self::New,
    ];

    /// The list endpoint backing this slot. `None` for search.
    #[must_use]
    pub const fn category(self) -> Option<MovieCategory> {
        match self {
            Self::Search => None,
            Self::NowPlaying | Self::New => Some(MovieCategory::NowPlaying),
            Self::Upcoming => Some(MovieCategory::Upcoming),
            Self::Popular => Some(MovieCategory::Popular),
            Self::TopRated => Some(MovieCategory::TopRated),
        }
    }

    /// Row heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Search => "Search Results",
            Self::NowPlaying => "Now Playing",
            Self::Upcoming => "Upcoming Movies",
            Self::Popular => "All Time Hits",
            Self::TopRated => "Best Movies",
            Self::New => "New Movies",
        }
    }
}

/// Per-slot request status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Never requested.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request succeeded.
    Loaded,
    /// The last request failed with this message.
    Failed(String),
}

impl LoadStatus {
    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Movies and status of one slot.
#[derive(Debug, Clone, Default)]
pub struct SlotState {
    /// Movies from the last successful fetch, in API order.
    pub movies: Vec<TmdbMovieSummary>,
    /// Status of the most recent request.
    pub status: LoadStatus,
    /// Card cursor within the row.
    pub cursor: usize,
}

/// A user-visible failure notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Slot whose request failed.
    pub slot: Slot,
    /// Message shown to the user.
    pub message: String,
}

/// Request to open the detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    /// Movie identifier, as text.
    pub movie_id: String,
}

/// Input mode for the listing screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Search text input mode.
    Search,
}

/// Counts reported once every category request has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettledSummary {
    /// Categories that loaded.
    pub loaded: usize,
    /// Categories that failed.
    pub failed: usize,
}

/// State for the listing screen.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct ListingState {
    /// Slot contents keyed by slot.
    slots: BTreeMap<Slot, SlotState>,
    /// Pending failure notifications, oldest first.
    pub notices: Vec<Notice>,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Search query text.
    pub query: String,
    /// Focused row.
    active_slot: Slot,
    /// Generation of the current initial load.
    load_generation: u64,
    /// Sequence number of the latest issued search.
    search_seq: u64,
    /// Whether the current load's settle summary was handed out.
    settled_reported: bool,
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingState {
    /// Creates an empty state with every slot idle.
    #[must_use]
    pub fn new() -> Self {
        let slots = Slot::DISPLAY_ORDER
            .into_iter()
            .map(|slot| (slot, SlotState::default()))
            .collect();
        Self {
            slots,
            notices: Vec::new(),
            input_mode: InputMode::Normal,
            query: String::new(),
            active_slot: Slot::NowPlaying,
            load_generation: 0,
            search_seq: 0,
            settled_reported: true,
        }
    }

    /// Returns the state of one slot.
    #[must_use]
    pub fn slot(&self, slot: Slot) -> &SlotState {
        static EMPTY: SlotState = SlotState {
            movies: Vec::new(),
            status: LoadStatus::Idle,
            cursor: 0,
        };
        self.slots.get(&slot).unwrap_or(&EMPTY)
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut SlotState {
        self.slots.entry(slot).or_default()
    }

    /// Movies currently held by a slot.
    #[must_use]
    pub fn movies(&self, slot: Slot) -> &[TmdbMovieSummary] {
        &self.slot(slot).movies
    }

    /// Status of a slot.
    #[must_use]
    pub fn status(&self, slot: Slot) -> &LoadStatus {
        &self.slot(slot).status
    }

    /// Starts a new initial load and returns its generation.
    ///
    /// Every category slot is marked loading; results tagged with an
    /// older generation are ignored from now on.
    pub fn begin_load(&mut self) -> u64 {
        self.load_generation = self.load_generation.wrapping_add(1);
        self.settled_reported = false;
        for slot in Slot::CATEGORIES {
            self.slot_mut(slot).status = LoadStatus::Loading;
        }
        self.load_generation
    }

    /// Applies a category fetch result. Returns `false` if it was stale.
    ///
    /// Success replaces the slot's movies wholesale. Failure keeps the
    /// previous movies and raises a notice naming the category.
    pub fn apply_category_result(
        &mut self,
        generation: u64,
        slot: Slot,
        result: Result<Vec<TmdbMovieSummary>, String>,
    ) -> bool {
        if generation != self.load_generation || slot == Slot::Search {
            return false;
        }
        match result {
            Ok(movies) => self.store(slot, movies),
            Err(error) => self.fail(
                slot,
                format!("Failed to fetch {}: {error}", slot.title()),
                error,
            ),
        }
        true
    }

    /// Whether no category request of the current load is in flight.
    #[must_use]
    pub fn all_settled(&self) -> bool {
        Slot::CATEGORIES
            .iter()
            .all(|slot| !self.status(*slot).is_loading())
    }

    /// Returns the summary of the current load once, after it settles.
    pub fn take_settled_summary(&mut self) -> Option<SettledSummary> {
        if self.settled_reported || !self.all_settled() {
            return None;
        }
        self.settled_reported = true;
        let failed = Slot::CATEGORIES
            .iter()
            .filter(|slot| matches!(self.status(**slot), LoadStatus::Failed(_)))
            .count();
        Some(SettledSummary {
            loaded: Slot::CATEGORIES.len().saturating_sub(failed),
            failed,
        })
    }

    /// Starts a search for the current query.
    ///
    /// Returns the sequence number and trimmed query, or `None` when the
    /// query is blank, in which case nothing changes.
    pub fn begin_search(&mut self) -> Option<(u64, String)> {
        let query = self.query.trim();
        if query.is_empty() {
            return None;
        }
        let query = String::from(query);
        self.search_seq = self.search_seq.wrapping_add(1);
        self.slot_mut(Slot::Search).status = LoadStatus::Loading;
        Some((self.search_seq, query))
    }

    /// Applies a search result. Returns `false` if a newer search was
    /// issued after this one.
    pub fn apply_search_result(
        &mut self,
        seq: u64,
        result: Result<Vec<TmdbMovieSummary>, String>,
    ) -> bool {
        if seq != self.search_seq {
            return false;
        }
        match result {
            Ok(movies) => {
                self.store(Slot::Search, movies);
                if self.movies(Slot::Search).is_empty() {
                    if self.active_slot == Slot::Search {
                        self.active_slot = Slot::NowPlaying;
                    }
                } else {
                    self.active_slot = Slot::Search;
                }
            }
            Err(error) => self.fail(
                Slot::Search,
                format!("Failed to search movies: {error}"),
                error,
            ),
        }
        true
    }

    fn store(&mut self, slot: Slot, movies: Vec<TmdbMovieSummary>) {
        let state = self.slot_mut(slot);
        state.cursor = state.cursor.min(movies.len().saturating_sub(1));
        state.movies = movies;
        state.status = LoadStatus::Loaded;
    }

    /// Marks a slot failed. A pending notice for the same slot is
    /// replaced in place instead of queued again.
    fn fail(&mut self, slot: Slot, message: String, error: String) {
        self.slot_mut(slot).status = LoadStatus::Failed(error);
        if let Some(pending) = self.notices.iter_mut().find(|n| n.slot == slot) {
            pending.message = message;
        } else {
            self.notices.push(Notice { slot, message });
        }
    }

    /// Drops the oldest notice.
    pub fn dismiss_notice(&mut self) {
        if !self.notices.is_empty() {
            self.notices.remove(0);
        }
    }

    /// Rows shown on screen, in display order.
    ///
    /// Category rows are always shown. The search row appears once a
    /// search has been issued and hides again when it loads no movies.
    #[must_use]
    pub fn visible_slots(&self) -> Vec<Slot> {
        Slot::DISPLAY_ORDER
            .into_iter()
            .filter(|slot| *slot != Slot::Search || self.search_row_visible())
            .collect()
    }

    fn search_row_visible(&self) -> bool {
        match self.status(Slot::Search) {
            LoadStatus::Idle => false,
            LoadStatus::Loaded => !self.movies(Slot::Search).is_empty(),
            LoadStatus::Loading | LoadStatus::Failed(_) => true,
        }
    }

    /// Focused row.
    #[must_use]
    pub const fn active_slot(&self) -> Slot {
        self.active_slot
    }

    /// Moves focus to the previous visible row.
    pub fn move_up(&mut self) {
        let visible = self.visible_slots();
        if let Some(pos) = visible.iter().position(|s| *s == self.active_slot)
            && let Some(prev) = pos.checked_sub(1).and_then(|p| visible.get(p))
        {
            self.active_slot = *prev;
        }
    }

    /// Moves focus to the next visible row.
    pub fn move_down(&mut self) {
        let visible = self.visible_slots();
        if let Some(pos) = visible.iter().position(|s| *s == self.active_slot)
            && let Some(next) = visible.get(pos.saturating_add(1))
        {
            self.active_slot = *next;
        }
    }

    /// Moves the card cursor left in the focused row.
    pub fn move_left(&mut self) {
        let state = self.slot_mut(self.active_slot);
        state.cursor = state.cursor.saturating_sub(1);
    }

    /// Moves the card cursor right in the focused row.
    pub fn move_right(&mut self) {
        let state = self.slot_mut(self.active_slot);
        if state.cursor.saturating_add(1) < state.movies.len() {
            state.cursor = state.cursor.saturating_add(1);
        }
    }

    /// Movie under the cursor in the focused row.
    #[must_use]
    pub fn selected_movie(&self) -> Option<&TmdbMovieSummary> {
        let state = self.slot(self.active_slot);
        state.movies.get(state.cursor)
    }

    /// Requests navigation to the detail screen for the selected card.
    #[must_use]
    pub fn activate_selected(&self) -> Option<NavigationRequest> {
        self.selected_movie().map(|movie| NavigationRequest {
            movie_id: movie.id.to_string(),
        })
    }

    /// Appends a character to the search query.
    pub fn query_push(&mut self, ch: char) {
        self.query.push(ch);
    }

    /// Removes the last character from the search query.
    pub fn query_pop(&mut self) {
        self.query.pop();
    }
}
