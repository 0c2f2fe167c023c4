//! Hand-written `TmdbApi` stand-in for view-state tests.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use cinedeck_api::tmdb::{
    MovieCategory, SearchMovieParams, TmdbApi, TmdbMovieDetails, TmdbMovieListResponse,
    TmdbMovieSummary, TmdbVideo, TmdbVideoListResponse,
};

/// Canned responses plus a log of the request paths seen.
#[derive(Debug, Default)]
pub struct MockTmdbApi {
    /// Per-category list results; unset categories return an empty page.
    pub lists: HashMap<MovieCategory, Result<Vec<TmdbMovieSummary>, String>>,
    /// Search result.
    pub search: Option<Result<Vec<TmdbMovieSummary>, String>>,
    /// Details result.
    pub details: Option<Result<TmdbMovieDetails, String>>,
    /// Video list result.
    pub videos: Option<Result<Vec<TmdbVideo>, String>>,
    /// Request paths in call order.
    pub calls: Mutex<Vec<String>>,
}

impl MockTmdbApi {
    fn record(&self, path: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(path);
        }
    }

    /// Snapshot of the recorded request paths.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

fn list_response(results: Vec<TmdbMovieSummary>) -> TmdbMovieListResponse {
    TmdbMovieListResponse {
        page: 1,
        total_pages: 1,
        total_results: u32::try_from(results.len()).unwrap_or(u32::MAX),
        results,
    }
}

impl TmdbApi for MockTmdbApi {
    async fn movie_list(&self, category: MovieCategory) -> Result<TmdbMovieListResponse> {
        self.record(format!("movie/{}", category.token()));
        match self.lists.get(&category) {
            Some(Ok(movies)) => Ok(list_response(movies.clone())),
            Some(Err(message)) => Err(anyhow!(message.clone())),
            None => Ok(list_response(Vec::new())),
        }
    }

    async fn search_movie(&self, params: &SearchMovieParams) -> Result<TmdbMovieListResponse> {
        self.record(format!("search/movie?query={}", params.query));
        match &self.search {
            Some(Ok(movies)) => Ok(list_response(movies.clone())),
            Some(Err(message)) => Err(anyhow!(message.clone())),
            None => Ok(list_response(Vec::new())),
        }
    }

    async fn movie_details(&self, movie_id: &str) -> Result<TmdbMovieDetails> {
        self.record(format!("movie/{movie_id}"));
        match &self.details {
            Some(Ok(details)) => Ok(details.clone()),
            Some(Err(message)) => Err(anyhow!(message.clone())),
            None => Err(anyhow!("no details configured")),
        }
    }

    async fn movie_videos(&self, movie_id: &str) -> Result<TmdbVideoListResponse> {
        self.record(format!("movie/{movie_id}/videos"));
        match &self.videos {
            Some(Ok(videos)) => Ok(TmdbVideoListResponse {
                id: 0,
                results: videos.clone(),
            }),
            Some(Err(message)) => Err(anyhow!(message.clone())),
            None => Ok(TmdbVideoListResponse {
                id: 0,
                results: Vec::new(),
            }),
        }
    }
}

/// Minimal summary for tests.
pub fn movie(id: u64, title: &str) -> TmdbMovieSummary {
    TmdbMovieSummary {
        id,
        title: String::from(title),
        original_title: None,
        original_language: None,
        release_date: None,
        overview: None,
        popularity: 0.0,
        vote_average: 0.0,
        vote_count: 0,
        genre_ids: Vec::new(),
        adult: false,
        poster_path: None,
        backdrop_path: None,
    }
}

/// Minimal details record for tests.
pub fn details(id: u64, title: &str, release_date: Option<&str>) -> TmdbMovieDetails {
    TmdbMovieDetails {
        id,
        title: String::from(title),
        original_title: None,
        tagline: None,
        release_date: release_date.map(String::from),
        overview: Some(String::from("A synopsis.")),
        runtime: Some(120),
        status: None,
        genres: Vec::new(),
        vote_average: 0.0,
        vote_count: 0,
        poster_path: Some(String::from("/poster.jpg")),
        backdrop_path: None,
    }
}

/// Video entry for tests.
pub fn video(video_type: &str, site: &str, key: &str) -> TmdbVideo {
    TmdbVideo {
        id: None,
        name: None,
        key: String::from(key),
        site: String::from(site),
        video_type: String::from(video_type),
        official: true,
    }
}
