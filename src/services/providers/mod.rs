//! Movie metadata provider abstraction
//!
//! A provider turns an opaque movie id into presentation extras (poster image, trailer
//! link). Lookups are best effort: every failure is logged by the provider and reported
//! to the caller as an absent value, so callers never branch on provider errors.

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Absolute poster image URL for the movie, if one can be found
    async fn fetch_poster(&self, movie_id: u64) -> Option<String>;

    /// Watch URL of the first YouTube trailer listed for the movie, if any
    async fn fetch_trailer(&self, movie_id: u64) -> Option<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
