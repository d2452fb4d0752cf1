use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{CatalogEntry, RecommendationCard},
    services::{providers::MetadataProvider, RecommendationEngine},
};

/// Recommends movies similar to `title` and decorates each with poster and trailer links
///
/// Each result is enriched in its own task, with the poster and trailer lookups running
/// concurrently. Cards come back in ranking order regardless of completion order.
/// Only a catalog miss is an error; missing metadata just leaves fields empty.
pub async fn recommend_with_metadata(
    engine: &RecommendationEngine,
    provider: Arc<dyn MetadataProvider>,
    title: &str,
) -> AppResult<Vec<RecommendationCard>> {
    let entries = engine.recommend(title)?;

    tracing::info!(
        title = %title,
        results = entries.len(),
        provider = provider.name(),
        "Enriching recommendations"
    );

    let mut tasks = Vec::with_capacity(entries.len());

    for entry in entries {
        let provider = provider.clone();
        let fallback = entry.title.clone();
        let task = tokio::spawn(async move { enrich_entry(provider.as_ref(), &entry).await });
        tasks.push((fallback, task));
    }

    let mut cards = Vec::with_capacity(tasks.len());

    for (fallback, task) in tasks {
        match task.await {
            Ok(card) => cards.push(card),
            Err(e) => {
                tracing::error!(error = %e, title = %fallback, "Enrichment task join error");
                cards.push(RecommendationCard::bare(fallback));
            }
        }
    }

    Ok(cards)
}

/// Fetches poster and trailer for one catalog entry
pub async fn enrich_entry(provider: &dyn MetadataProvider, entry: &CatalogEntry) -> RecommendationCard {
    tracing::debug!(title = %entry.title, movie_id = entry.movie_id, "Fetching metadata");

    let (poster_url, trailer_url) = tokio::join!(
        provider.fetch_poster(entry.movie_id),
        provider.fetch_trailer(entry.movie_id)
    );

    tracing::info!(
        title = %entry.title,
        movie_id = entry.movie_id,
        poster = poster_url.is_some(),
        trailer = trailer_url.is_some(),
        "Metadata fetched"
    );

    RecommendationCard {
        title: entry.title.clone(),
        poster_url,
        trailer_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        models::{Catalog, SimilarityMatrix},
        services::providers::MockMetadataProvider,
    };
    use mockall::predicate::eq;

    fn create_engine() -> RecommendationEngine {
        let catalog = Catalog::new([
            (1, "A"),
            (2, "B"),
            (3, "C"),
            (4, "D"),
            (5, "E"),
            (6, "F"),
        ]);
        let mut rows = vec![vec![0.0; 6]; 6];
        rows[0] = vec![1.0, 0.9, 0.8, 0.7, 0.6, 0.1];
        let similarity = SimilarityMatrix::from_rows(rows).unwrap();
        RecommendationEngine::new(Arc::new(catalog), Arc::new(similarity)).unwrap()
    }

    #[tokio::test]
    async fn test_cards_follow_ranking_and_carry_metadata() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_fetch_poster()
            .times(5)
            .returning(|id| (id % 2 == 0).then(|| format!("https://img.test/{}.jpg", id)));
        provider
            .expect_fetch_trailer()
            .times(5)
            .returning(|id| (id == 3).then(|| "https://www.youtube.com/watch?v=c".to_string()));

        let cards = recommend_with_metadata(&create_engine(), Arc::new(provider), "A")
            .await
            .unwrap();

        let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C", "D", "E", "F"]);

        assert_eq!(cards[0].poster_url.as_deref(), Some("https://img.test/2.jpg"));
        assert_eq!(cards[1].poster_url, None);
        assert_eq!(
            cards[1].trailer_url.as_deref(),
            Some("https://www.youtube.com/watch?v=c")
        );
        assert_eq!(cards[4].trailer_url, None);
    }

    /// Panics while fetching the poster of one movie id
    struct PanickingProvider {
        failing_id: u64,
    }

    #[async_trait::async_trait]
    impl MetadataProvider for PanickingProvider {
        async fn fetch_poster(&self, movie_id: u64) -> Option<String> {
            if movie_id == self.failing_id {
                panic!("poster lookup blew up for {}", movie_id);
            }
            Some(format!("https://img.test/{}.jpg", movie_id))
        }

        async fn fetch_trailer(&self, movie_id: u64) -> Option<String> {
            Some(format!("https://www.youtube.com/watch?v={}", movie_id))
        }

        fn name(&self) -> &'static str {
            "panicking"
        }
    }

    #[tokio::test]
    async fn test_failed_task_becomes_bare_card_in_place() {
        let provider = PanickingProvider { failing_id: 4 };

        let cards = recommend_with_metadata(&create_engine(), Arc::new(provider), "A")
            .await
            .unwrap();

        let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C", "D", "E", "F"]);

        assert_eq!(cards[2], RecommendationCard::bare("D"));
        assert_eq!(cards[1].poster_url.as_deref(), Some("https://img.test/3.jpg"));
        assert_eq!(
            cards[3].trailer_url.as_deref(),
            Some("https://www.youtube.com/watch?v=5")
        );
    }

    #[tokio::test]
    async fn test_unknown_title_skips_provider() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_fetch_poster().never();
        provider.expect_fetch_trailer().never();

        let result = recommend_with_metadata(&create_engine(), Arc::new(provider), "Z").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_enrich_entry_uses_movie_id() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_fetch_poster()
            .with(eq(42))
            .times(1)
            .returning(|_| None);
        provider
            .expect_fetch_trailer()
            .with(eq(42))
            .times(1)
            .returning(|_| None);

        let entry = CatalogEntry {
            index: 0,
            movie_id: 42,
            title: "Heat".to_string(),
        };

        let card = enrich_entry(&provider, &entry).await;
        assert_eq!(card, RecommendationCard::bare("Heat"));
    }
}
