use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key, sent as the `api_key` query parameter
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL that relative poster paths are appended to
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Language requested from TMDB
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Upper bound on each outbound TMDB request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// CSV catalog of `movie_id,title` rows
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// JSON similarity matrix matching the catalog row order
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_tmdb_language() -> String {
    "en-US".to_string()
}

fn default_request_timeout_secs() -> u64 {
    5
}

fn default_catalog_path() -> String {
    "data/movies.csv".to_string()
}

fn default_similarity_path() -> String {
    "data/similarity.json".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
