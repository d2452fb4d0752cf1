use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Catalog, CatalogEntry, SimilarityMatrix},
};

/// Number of similar movies returned per query
pub const RECOMMENDATION_COUNT: usize = 5;

/// Similarity-based recommendation lookup
///
/// Holds the catalog and its similarity matrix, both immutable after startup. Ranking is
/// a stable descending sort of the query's matrix row; the top-ranked position is skipped
/// on the assumption that it is the query itself.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    catalog: Arc<Catalog>,
    similarity: Arc<SimilarityMatrix>,
}

impl RecommendationEngine {
    /// Creates an engine, rejecting a matrix that does not match the catalog
    pub fn new(catalog: Arc<Catalog>, similarity: Arc<SimilarityMatrix>) -> AppResult<Self> {
        if catalog.len() != similarity.dimension() {
            return Err(AppError::Artifact(format!(
                "catalog has {} movies but similarity matrix dimension is {}",
                catalog.len(),
                similarity.dimension()
            )));
        }

        Ok(Self {
            catalog,
            similarity,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns up to [`RECOMMENDATION_COUNT`] movies most similar to `title`
    ///
    /// `title` must match a catalog title exactly; the first match wins.
    /// Position 0 of the ranking is always dropped, without checking that it is the
    /// queried movie. A catalog of `n` movies yields `min(5, n - 1)` results.
    pub fn recommend(&self, title: &str) -> AppResult<Vec<CatalogEntry>> {
        let query = self
            .catalog
            .find_by_title(title)
            .ok_or_else(|| AppError::NotFound(format!("Movie '{}' is not in the catalog", title)))?;

        let row = self.similarity.row(query.index).ok_or_else(|| {
            AppError::Internal(format!("no similarity row for index {}", query.index))
        })?;

        let mut ranked: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
        // Stable: equal scores keep their column order.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let recommendations: Vec<CatalogEntry> = ranked
            .into_iter()
            .skip(1)
            .take(RECOMMENDATION_COUNT)
            .filter_map(|(index, _)| self.catalog.get(index).cloned())
            .collect();

        tracing::debug!(
            title = %title,
            index = query.index,
            results = recommendations.len(),
            "Ranked similar movies"
        );

        Ok(recommendations)
    }
}
