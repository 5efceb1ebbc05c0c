//! Local movie-to-books catalog backed by a CSV dataset.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::AppResult;
use crate::models::{Book, BookSource};

/// One row of the dataset file
///
/// The header row must carry exactly these five column names; rows missing
/// any of them are reported and skipped rather than trusted.
#[derive(Debug, Deserialize)]
struct CatalogRow {
    movie_title: String,
    book_title: String,
    book_author: String,
    book_genre: String,
    book_description: String,
}

/// Read-only index from lower-cased movie title to its associated books
///
/// Built once at startup; never mutated afterwards.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: HashMap<String, Vec<Book>>,
}

impl Catalog {
    /// Builds an empty catalog
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads the catalog from a CSV dataset
    ///
    /// A missing file is not fatal: it yields an empty catalog and a warning,
    /// leaving every lookup to the external provider. Malformed rows are
    /// logged per row and skipped.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(path = %path.display(), "Catalog dataset missing, starting with an empty catalog");
            return Ok(Self::empty());
        }

        let mut reader = csv::Reader::from_path(path)?;
        let mut entries: HashMap<String, Vec<Book>> = HashMap::new();
        let mut loaded = 0usize;
        let mut skipped = 0usize;

        for (idx, result) in reader.deserialize::<CatalogRow>().enumerate() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    // Header line is row 1, so data rows start at 2
                    tracing::warn!(row = idx + 2, error = %e, "Skipping malformed catalog row");
                    skipped += 1;
                    continue;
                }
            };

            let book = Book::new(
                row.book_title,
                row.book_author,
                row.book_genre,
                row.book_description,
                BookSource::Local,
            );
            entries
                .entry(row.movie_title.to_lowercase())
                .or_default()
                .push(book);
            loaded += 1;
        }

        tracing::info!(
            path = %path.display(),
            movies = entries.len(),
            books = loaded,
            skipped = skipped,
            "Catalog loaded"
        );

        Ok(Self { entries })
    }

    /// Case-insensitive exact-match lookup, capped at `limit` books
    ///
    /// Books come back in dataset order; an unmatched title yields an empty
    /// list, not an error.
    pub fn lookup(&self, movie_title: &str, limit: usize) -> Vec<Book> {
        self.entries
            .get(&movie_title.to_lowercase())
            .map(|books| books.iter().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    /// Number of distinct movie titles in the catalog
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn from_entries(entries: HashMap<String, Vec<Book>>) -> Self {
        Self { entries }
    }
}
