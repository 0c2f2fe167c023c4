//! Trailer selection from a movie's video list.

use super::types::TmdbVideo;

/// Video type tag that marks a trailer.
pub const TRAILER_TYPE: &str = "Trailer";

/// The only hosting site whose trailers can be played.
pub const TRAILER_SITE: &str = "YouTube";

/// Returns the first trailer hosted on the supported site.
///
/// Entries are considered in API order; there is no ranking beyond that.
#[must_use]
pub fn find_trailer(videos: &[TmdbVideo]) -> Option<&TmdbVideo> {
    videos
        .iter()
        .find(|v| v.video_type == TRAILER_TYPE && v.site == TRAILER_SITE)
}

/// Builds the watch URL for a YouTube video key.
#[must_use]
pub fn youtube_watch_url(key: &str) -> String {
    format!("https://www.youtube.com/watch?v={key}")
}
