use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the CSV dataset mapping movies to books
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Path to the SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Base URL of the external book search endpoint
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Minimum local results before the external lookup kicks in
    #[serde(default = "default_local_minimum")]
    pub local_minimum: usize,

    /// How many external results to append on fallback
    #[serde(default = "default_external_count")]
    pub external_count: usize,

    /// Timeout for the external lookup request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_catalog_path() -> String {
    "books_movies.csv".to_string()
}

fn default_database_path() -> String {
    "reel_reads.db".to_string()
}

fn default_search_url() -> String {
    "https://www.goodreads.com/search".to_string()
}

fn default_local_minimum() -> usize {
    4
}

fn default_external_count() -> usize {
    2
}

fn default_request_timeout_secs() -> u64 {
    7
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            database_path: default_database_path(),
            search_url: default_search_url(),
            local_minimum: default_local_minimum(),
            external_count: default_external_count(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.catalog_path, "books_movies.csv");
        assert_eq!(config.local_minimum, 4);
        assert_eq!(config.external_count, 2);
        assert_eq!(config.request_timeout_secs, 7);
    }
}
