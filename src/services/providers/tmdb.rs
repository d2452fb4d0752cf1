//! TMDB (The Movie Database) metadata provider
//!
//! API Flow:
//! 1. Poster: /movie/{id} → `poster_path`, joined onto the image host
//! 2. Trailer: /movie/{id}/videos → first YouTube "Trailer" entry
//!
//! Both calls are bounded by the client timeout. Nothing is cached and nothing is retried.

use std::time::Duration;

use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{TmdbMovieDetails, TmdbVideoList},
    services::providers::MetadataProvider,
};

const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_url: String,
    language: String,
}

impl TmdbProvider {
    /// Creates a provider whose requests give up after `timeout`
    pub fn new(
        api_key: String,
        api_url: String,
        image_url: String,
        language: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_url: image_url.trim_end_matches('/').to_string(),
            language,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_image_url.clone(),
            config.tmdb_language.clone(),
            config.request_timeout(),
        )
    }

    /// Joins a relative poster path onto the image host with exactly one slash
    fn poster_url(&self, poster_path: &str) -> String {
        format!("{}/{}", self.image_url, poster_path.trim_start_matches('/'))
    }

    fn trailer_url(key: &str) -> String {
        format!("{}{}", YOUTUBE_WATCH_URL, key)
    }

    /// GETs `path` under the API root. A 404 is `Ok(None)`; any other non-200 is an error.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, movie_id: u64) -> AppResult<Option<T>> {
        let url = format!("{}{}", self.api_url, path);

        // Strip the URL from transport errors, it carries the API key.
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::HttpClient(e.without_url()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::warn!(movie_id, path, "Movie not found on TMDB");
            return Ok(None);
        }
        if status != StatusCode::OK {
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {} for {}",
                status, path
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::HttpClient(e.without_url()))?;

        serde_json::from_str(&body).map(Some).map_err(|e| {
            tracing::debug!(movie_id, response = %body, "Unparseable TMDB response");
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })
    }

    async fn try_fetch_poster(&self, movie_id: u64) -> AppResult<Option<String>> {
        let details: Option<TmdbMovieDetails> =
            self.get_json(&format!("/movie/{}", movie_id), movie_id).await?;

        let poster = details
            .and_then(|d| d.poster_path)
            .filter(|path| !path.is_empty())
            .map(|path| self.poster_url(&path));

        Ok(poster)
    }

    async fn try_fetch_trailer(&self, movie_id: u64) -> AppResult<Option<String>> {
        let videos: Option<TmdbVideoList> = self
            .get_json(&format!("/movie/{}/videos", movie_id), movie_id)
            .await?;

        let trailer = videos.and_then(|list| list.first_trailer_key().map(Self::trailer_url));

        Ok(trailer)
    }
}

/// Logs a failed lookup; the caller then treats the field as absent
fn log_failure(what: &'static str, movie_id: u64, error: &AppError) {
    match error {
        AppError::HttpClient(e) if e.is_timeout() => {
            tracing::warn!(movie_id, what, "Timed out fetching from TMDB");
        }
        _ => {
            tracing::warn!(movie_id, what, error = %error, "Failed to fetch from TMDB");
        }
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch_poster(&self, movie_id: u64) -> Option<String> {
        match self.try_fetch_poster(movie_id).await {
            Ok(Some(url)) => {
                tracing::debug!(movie_id, poster = %url, "Poster fetched");
                Some(url)
            }
            Ok(None) => {
                tracing::info!(movie_id, "No poster available");
                None
            }
            Err(e) => {
                log_failure("poster", movie_id, &e);
                None
            }
        }
    }

    async fn fetch_trailer(&self, movie_id: u64) -> Option<String> {
        match self.try_fetch_trailer(movie_id).await {
            Ok(Some(url)) => {
                tracing::debug!(movie_id, trailer = %url, "Trailer fetched");
                Some(url)
            }
            Ok(None) => {
                tracing::info!(movie_id, "No trailer found");
                None
            }
            Err(e) => {
                log_failure("trailer", movie_id, &e);
                None
            }
        }
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
