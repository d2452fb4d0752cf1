use serde::{Deserialize, Serialize};

mod catalog;
mod similarity;

pub use catalog::{Catalog, CatalogEntry};
pub use similarity::SimilarityMatrix;

/// One recommended movie as shown to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendationCard {
    pub title: String,
    pub poster_url: Option<String>,
    pub trailer_url: Option<String>,
}

impl RecommendationCard {
    /// Card for a movie whose metadata could not be fetched
    pub fn bare(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            poster_url: None,
            trailer_url: None,
        }
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Subset of the response from GET /movie/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Response from GET /movie/{id}/videos
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideoList {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

impl TmdbVideoList {
    /// Key of the first YouTube trailer in listing order
    ///
    /// Only that first trailer is considered: if its key is missing or empty the result is
    /// `None`, even when a later trailer has one.
    pub fn first_trailer_key(&self) -> Option<&str> {
        self.results
            .iter()
            .find(|video| video.is_youtube_trailer())
            .and_then(|video| video.key.as_deref())
            .filter(|key| !key.is_empty())
    }
}

/// A single video descriptor
///
/// Fields are optional so non-trailer entries with unusual shapes still deserialize.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    #[serde(rename = "type", default)]
    pub video_type: Option<String>,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
}

impl TmdbVideo {
    pub fn is_youtube_trailer(&self) -> bool {
        self.video_type.as_deref() == Some("Trailer") && self.site.as_deref() == Some("YouTube")
    }
}
