use std::sync::Arc;

use crate::services::{MetadataProvider, RecommendationEngine};

/// Shared application state
///
/// Everything in here is read-only after startup, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
    pub metadata_provider: Arc<dyn MetadataProvider>,
}

impl AppState {
    pub fn new(engine: RecommendationEngine, metadata_provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            engine: Arc::new(engine),
            metadata_provider,
        }
    }
}
