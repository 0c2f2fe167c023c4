//! Poster image URL resolution.

/// Base URL of the TMDB image host.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Default poster width descriptor.
pub const DEFAULT_IMAGE_SIZE: &str = "w500";

/// Resolves a poster path fragment against the image host.
///
/// Returns `None` when the movie has no poster.
#[must_use]
pub fn poster_url(poster_path: Option<&str>, size: &str) -> Option<String> {
    let path = poster_path?.trim();
    if path.is_empty() {
        return None;
    }
    let path = path.strip_prefix('/').unwrap_or(path);
    Some(format!("{IMAGE_BASE_URL}{size}/{path}"))
}
