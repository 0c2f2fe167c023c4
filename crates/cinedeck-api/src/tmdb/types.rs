//! TMDB API response types, list categories and search parameters.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

// --- Categories ---

/// Fixed movie list endpoints under `movie/{category}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MovieCategory {
    /// `movie/now_playing`.
    NowPlaying,
    /// `movie/upcoming`.
    Upcoming,
    /// `movie/popular`.
    Popular,
    /// `movie/top_rated`.
    TopRated,
}

impl MovieCategory {
    /// Path token used in the endpoint URL.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::NowPlaying => "now_playing",
            Self::Upcoming => "upcoming",
            Self::Popular => "popular",
            Self::TopRated => "top_rated",
        }
    }
}

impl fmt::Display for MovieCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// --- Movie lists ---

/// Response from `movie/{category}` and `search/movie` endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieListResponse {
    /// Current page number.
    #[serde(default)]
    pub page: u32,
    /// Movies on this page, in API order.
    pub results: Vec<TmdbMovieSummary>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

/// A single movie entry in a list or search result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbMovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: Option<String>,
    /// Release date (YYYY-MM-DD, may be empty).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    #[serde(default)]
    pub adult: bool,
    /// Poster image path fragment (e.g. `/abc.jpg`).
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path fragment.
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

impl TmdbMovieSummary {
    /// Calendar year of the release date.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        release_year(self.release_date.as_deref())
    }
}

// --- Movie details ---

/// Response from `movie/{movie_id}` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbMovieDetails {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Tagline.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Release date (YYYY-MM-DD, may be empty).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Release status (e.g. "Released").
    #[serde(default)]
    pub status: Option<String>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// Vote count.
    #[serde(default)]
    pub vote_count: u32,
    /// Poster image path fragment.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path fragment.
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

impl TmdbMovieDetails {
    /// Calendar year of the release date.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        release_year(self.release_date.as_deref())
    }
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Parses the year out of an ISO `YYYY-MM-DD` date.
///
/// Returns `None` for missing, empty, or malformed dates.
#[must_use]
pub fn release_year(date: Option<&str>) -> Option<i32> {
    let date = date?.trim();
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

// --- Videos ---

/// Response from `movie/{movie_id}/videos` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideoListResponse {
    /// TMDB movie ID.
    #[serde(default)]
    pub id: u64,
    /// Video entries in API order.
    pub results: Vec<TmdbVideo>,
}

/// A single video metadata entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TmdbVideo {
    /// TMDB video ID.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Hosting-site specific key.
    pub key: String,
    /// Hosting site (e.g. "YouTube").
    pub site: String,
    /// Video type (e.g. "Trailer", "Teaser").
    #[serde(rename = "type")]
    pub video_type: String,
    /// Whether the video is official.
    #[serde(default)]
    pub official: bool,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[allow(dead_code)]
    #[serde(default)]
    pub success: bool,
}

// --- Search Parameters ---

/// Parameters for `search/movie` endpoint.
#[derive(Debug, Clone)]
pub struct SearchMovieParams {
    /// Search query (required).
    pub query: String,
    /// Result page (1-500, default: 1).
    pub page: u32,
    /// Filter by primary release year.
    pub primary_release_year: Option<u32>,
    /// Include adult content.
    pub include_adult: bool,
}

impl SearchMovieParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            primary_release_year: None,
            include_adult: false,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the primary release year filter.
    #[must_use]
    pub const fn primary_release_year(mut self, year: u32) -> Self {
        self.primary_release_year = Some(year);
        self
    }
}
