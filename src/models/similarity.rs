use crate::error::{AppError, AppResult};

/// Precomputed square matrix of pairwise similarity scores
///
/// Row and column `i` refer to catalog entry `i`. Higher scores mean more similar.
/// Symmetry is expected from the offline pipeline but not checked.
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    dimension: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Builds the matrix from rows, rejecting anything that is not square
    pub fn from_rows(rows: Vec<Vec<f64>>) -> AppResult<Self> {
        let dimension = rows.len();
        let mut scores = Vec::with_capacity(dimension * dimension);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != dimension {
                return Err(AppError::Artifact(format!(
                    "similarity row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    dimension
                )));
            }
            scores.extend(row);
        }

        Ok(Self { dimension, scores })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns row `index`, or `None` when out of range
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.dimension {
            return None;
        }
        let start = index * self.dimension;
        Some(&self.scores[start..start + self.dimension])
    }
}
