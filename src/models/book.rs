use serde::{Deserialize, Serialize};

/// Where a recommended book came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookSource {
    /// Matched from the local CSV catalog
    Local,
    /// Pulled from the external search endpoint
    External,
}

impl BookSource {
    /// String form used in the database and console output
    pub fn as_str(&self) -> &'static str {
        match self {
            BookSource::Local => "local",
            BookSource::External => "external",
        }
    }

    /// Parse the persisted string form, defaulting unrecognized values to local
    pub fn parse(s: &str) -> Self {
        match s {
            "external" => BookSource::External,
            _ => BookSource::Local,
        }
    }
}

impl std::fmt::Display for BookSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A book recommendation
///
/// Created either by the catalog or the external lookup client; immutable
/// once built and owned by the query's result list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub description: String,
    pub source: BookSource,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        description: impl Into<String>,
        source: BookSource,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            description: description.into(),
            source,
        }
    }

    /// Description trimmed to 120 characters for clean console display
    pub fn short(&self) -> String {
        if self.description.chars().count() > 120 {
            let truncated: String = self.description.chars().take(120).collect();
            format!("{}...", truncated)
        } else {
            self.description.clone()
        }
    }
}
