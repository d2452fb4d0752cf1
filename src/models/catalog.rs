use serde::{Deserialize, Serialize};

/// A single movie known to the recommender
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Position in the catalog, shared with the similarity matrix rows and columns
    pub index: usize,
    /// TMDB movie id, opaque to everything but the metadata provider
    pub movie_id: u64,
    /// Display title
    pub title: String,
}

/// Fixed, ordered list of movies loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Builds a catalog from `(movie_id, title)` pairs in ordinal order
    pub fn new<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = (u64, S)>,
        S: Into<String>,
    {
        let entries = rows
            .into_iter()
            .enumerate()
            .map(|(index, (movie_id, title))| CatalogEntry {
                index,
                movie_id,
                title: title.into(),
            })
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    /// Finds an entry by exact title. Duplicate titles resolve to the lowest index.
    pub fn find_by_title(&self, title: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.title == title)
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.title.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }
}
