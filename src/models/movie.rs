use serde::{Deserialize, Serialize};

/// A movie as entered by the user, after input cleaning
///
/// Immutable; one instance is created per accepted query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    /// Normalized movie title
    pub title: String,
    /// User-supplied genre, "Unknown" when left blank
    pub genre: String,
}

impl Movie {
    /// Creates a movie with an explicit genre
    pub fn new(title: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
        }
    }

    /// Creates a movie with the default "Unknown" genre
    pub fn with_unknown_genre(title: impl Into<String>) -> Self {
        Self::new(title, "Unknown")
    }
}
