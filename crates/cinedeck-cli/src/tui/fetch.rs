//! Background fetches and the outcome messages they send back to the UI.

use cinedeck_api::tmdb::{
    SearchMovieParams, TmdbApi, TmdbMovieDetails, TmdbMovieSummary, TmdbVideo,
};

use super::listing::state::Slot;

/// Result of one background request, tagged with the work it belongs to.
#[derive(Debug)]
pub enum FetchOutcome {
    /// A category list for one slot of a listing load.
    Category {
        /// Load generation the request was issued under.
        generation: u64,
        /// Slot to fill.
        slot: Slot,
        /// Movies or the error text.
        result: Result<Vec<TmdbMovieSummary>, String>,
    },
    /// A search response.
    Search {
        /// Sequence number of the search.
        seq: u64,
        /// Movies or the error text.
        result: Result<Vec<TmdbMovieSummary>, String>,
    },
    /// Movie metadata for the detail screen.
    Details {
        /// Detail generation the request was issued under.
        generation: u64,
        /// Metadata or the error text.
        result: Result<TmdbMovieDetails, String>,
    },
    /// Video list for the detail screen.
    Videos {
        /// Detail generation the request was issued under.
        generation: u64,
        /// Videos or the error text.
        result: Result<Vec<TmdbVideo>, String>,
    },
}

fn describe(err: &anyhow::Error) -> String {
    format!("{err:#}")
}

/// Fetches the list backing a category slot.
pub async fn fetch_category<A: TmdbApi>(api: &A, generation: u64, slot: Slot) -> FetchOutcome {
    let result = match slot.category() {
        Some(category) => api
            .movie_list(category)
            .await
            .map(|response| response.results)
            .map_err(|e| describe(&e)),
        None => Err(String::from("search results have no category endpoint")),
    };
    FetchOutcome::Category {
        generation,
        slot,
        result,
    }
}

/// Runs one search.
pub async fn fetch_search<A: TmdbApi>(api: &A, seq: u64, query: String) -> FetchOutcome {
    let params = SearchMovieParams::new(query);
    let result = api
        .search_movie(&params)
        .await
        .map(|response| response.results)
        .map_err(|e| describe(&e));
    FetchOutcome::Search { seq, result }
}

/// Fetches detail-screen metadata.
pub async fn fetch_details<A: TmdbApi>(api: &A, generation: u64, movie_id: &str) -> FetchOutcome {
    let result = api.movie_details(movie_id).await.map_err(|e| describe(&e));
    FetchOutcome::Details { generation, result }
}

/// Fetches the detail-screen video list.
pub async fn fetch_videos<A: TmdbApi>(api: &A, generation: u64, movie_id: &str) -> FetchOutcome {
    let result = api
        .movie_videos(movie_id)
        .await
        .map(|response| response.results)
        .map_err(|e| describe(&e));
    FetchOutcome::Videos { generation, result }
}
