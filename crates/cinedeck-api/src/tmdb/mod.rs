//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie endpoints and
//! resolves the image and video URLs derived from their responses.

mod api;
mod client;
mod image;
mod trailer;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{Credential, TmdbClient, TmdbClientBuilder};
pub use image::{DEFAULT_IMAGE_SIZE, IMAGE_BASE_URL, poster_url};
pub use trailer::{TRAILER_SITE, TRAILER_TYPE, find_trailer, youtube_watch_url};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    MovieCategory, SearchMovieParams, TmdbGenre, TmdbMovieDetails, TmdbMovieListResponse,
    TmdbMovieSummary, TmdbVideo, TmdbVideoListResponse, release_year,
};
