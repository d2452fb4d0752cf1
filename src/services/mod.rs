pub mod enrichment;
pub mod providers;
pub mod recommendations;

pub use enrichment::recommend_with_metadata;
pub use providers::{MetadataProvider, TmdbProvider};
pub use recommendations::{RecommendationEngine, RECOMMENDATION_COUNT};
