//! Loading of the precomputed artifacts the recommender runs on
//!
//! Both files come from the offline pipeline that built the similarity matrix:
//! a CSV catalog (`movie_id,title`, extra columns ignored) and a JSON `n × n` array of scores.
//! They are read once at startup and never written.

use std::{fs::File, io::BufReader, path::Path};

use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{Catalog, SimilarityMatrix},
};

#[derive(Debug, Deserialize)]
struct CatalogRecord {
    movie_id: u64,
    title: String,
}

/// Reads the catalog CSV, keeping row order as the ordinal order
pub fn load_catalog(path: impl AsRef<Path>) -> AppResult<Catalog> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| AppError::Artifact(format!("cannot open catalog {}: {}", path.display(), e)))?;

    let mut rows = Vec::new();
    for (line, record) in reader.deserialize::<CatalogRecord>().enumerate() {
        let record = record.map_err(|e| {
            AppError::Artifact(format!(
                "bad catalog record {} in {}: {}",
                line + 1,
                path.display(),
                e
            ))
        })?;
        rows.push((record.movie_id, record.title));
    }

    tracing::info!(path = %path.display(), movies = rows.len(), "Loaded catalog");

    Ok(Catalog::new(rows))
}

/// Reads the similarity matrix JSON
pub fn load_similarity(path: impl AsRef<Path>) -> AppResult<SimilarityMatrix> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        AppError::Artifact(format!("cannot open similarity matrix {}: {}", path.display(), e))
    })?;

    let rows: Vec<Vec<f64>> = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        AppError::Artifact(format!("bad similarity matrix {}: {}", path.display(), e))
    })?;

    let matrix = SimilarityMatrix::from_rows(rows)?;

    tracing::info!(
        path = %path.display(),
        dimension = matrix.dimension(),
        "Loaded similarity matrix"
    );

    Ok(matrix)
}

/// Loads both artifacts and checks that they describe the same movies
pub fn load_artifacts(
    catalog_path: impl AsRef<Path>,
    similarity_path: impl AsRef<Path>,
) -> AppResult<(Catalog, SimilarityMatrix)> {
    let catalog = load_catalog(catalog_path)?;
    let matrix = load_similarity(similarity_path)?;

    if catalog.len() != matrix.dimension() {
        return Err(AppError::Artifact(format!(
            "catalog has {} movies but similarity matrix is {}x{}",
            catalog.len(),
            matrix.dimension(),
            matrix.dimension()
        )));
    }

    Ok((catalog, matrix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_catalog_ignores_extra_columns() {
        let file = write_temp(
            "movie_id,title,tags\n19995,Avatar,\"sci-fi, action\"\n285,\"Pirates of the Caribbean: At World's End\",adventure\n",
        );

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().movie_id, 19995);
        assert_eq!(
            catalog.get(1).unwrap().title,
            "Pirates of the Caribbean: At World's End"
        );
    }

    #[test]
    fn test_load_catalog_rejects_non_numeric_id() {
        let file = write_temp("movie_id,title\nabc,Avatar\n");
        assert!(matches!(load_catalog(file.path()), Err(AppError::Artifact(_))));
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let result = load_catalog("/nonexistent/movies.csv");
        assert!(matches!(result, Err(AppError::Artifact(_))));
    }

    #[test]
    fn test_load_similarity() {
        let file = write_temp("[[1.0, 0.25], [0.25, 1.0]]");
        let matrix = load_similarity(file.path()).unwrap();
        assert_eq!(matrix.dimension(), 2);
        assert_eq!(matrix.row(0).unwrap(), &[1.0, 0.25]);
    }

    #[test]
    fn test_load_similarity_keeps_near_tie_order() {
        let catalog = write_temp("movie_id,title\n1,A\n2,B\n3,C\n");
        let similarity = write_temp(
            "[[1.0, 0.30000001, 0.30000002], [0.30000001, 1.0, 0.5], [0.30000002, 0.5, 1.0]]",
        );

        let (catalog, matrix) = load_artifacts(catalog.path(), similarity.path()).unwrap();
        let engine = crate::services::RecommendationEngine::new(
            std::sync::Arc::new(catalog),
            std::sync::Arc::new(matrix),
        )
        .unwrap();

        let titles: Vec<String> = engine
            .recommend("A")
            .unwrap()
            .into_iter()
            .map(|entry| entry.title)
            .collect();
        assert_eq!(titles, vec!["C", "B"]);
    }

    #[test]
    fn test_load_similarity_malformed() {
        let file = write_temp("{\"not\": \"a matrix\"}");
        assert!(matches!(load_similarity(file.path()), Err(AppError::Artifact(_))));
    }

    #[test]
    fn test_load_artifacts_dimension_mismatch() {
        let catalog = write_temp("movie_id,title\n1,A\n2,B\n3,C\n");
        let similarity = write_temp("[[1.0, 0.5], [0.5, 1.0]]");

        let err = load_artifacts(catalog.path(), similarity.path()).unwrap_err();
        assert!(err.to_string().contains("catalog has 3 movies"));
    }

    #[test]
    fn test_load_artifacts_consistent() {
        let catalog = write_temp("movie_id,title\n1,A\n2,B\n");
        let similarity = write_temp("[[1.0, 0.5], [0.5, 1.0]]");

        let (catalog, matrix) = load_artifacts(catalog.path(), similarity.path()).unwrap();
        assert_eq!(catalog.len(), matrix.dimension());
    }
}
