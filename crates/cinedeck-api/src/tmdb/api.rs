//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{
    MovieCategory, SearchMovieParams, TmdbMovieDetails, TmdbMovieListResponse,
    TmdbVideoListResponse,
};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches one page of a fixed movie list (`movie/{category}`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not a
    /// success, or JSON parsing fails.
    async fn movie_list(&self, category: MovieCategory) -> Result<TmdbMovieListResponse>;

    /// Searches for movies by title.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbMovieListResponse>;

    /// Fetches full metadata for one movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_details(&self, movie_id: &str) -> Result<TmdbMovieDetails>;

    /// Fetches the video list for one movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_videos(&self, movie_id: &str) -> Result<TmdbVideoListResponse>;
}
