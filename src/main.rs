use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use movie_recommender_api::{
    api::{create_router, AppState},
    config::Config,
    data,
    services::{RecommendationEngine, TmdbProvider},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_recommender_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Artifacts are loaded once; a bad file aborts startup.
    let (catalog, similarity) = data::load_artifacts(&config.catalog_path, &config.similarity_path)
        .context("Failed to load recommendation artifacts")?;
    let engine = RecommendationEngine::new(Arc::new(catalog), Arc::new(similarity))?;

    let provider = TmdbProvider::from_config(&config).context("Failed to build TMDB client")?;

    let state = AppState::new(engine, Arc::new(provider));
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
