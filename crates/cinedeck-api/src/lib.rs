//! API client library for cinedeck.
//!
//! Provides a client for the TMDB v3 movie catalog API together with
//! helpers for resolving poster images and picking trailers.

/// TMDB API client.
pub mod tmdb;
