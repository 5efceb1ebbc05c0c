/// External book data provider abstraction
///
/// The aggregator only ever falls back to one provider at a time, but keeping
/// the trait boundary lets tests substitute a mock and leaves room for other
/// search backends.
use crate::{error::AppResult, models::Book};

pub mod goodreads;

pub use goodreads::GoodreadsProvider;

/// Trait for external book lookup sources
///
/// `fetch` reports transport and parse failures as `Err` so callers can tell
/// "the lookup failed" apart from "the lookup found nothing". The aggregator
/// is the one place where failures collapse to an empty result.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BookProvider: Send + Sync {
    /// Search for up to `limit` books related to a movie title
    ///
    /// Accepted books are tagged with the caller's genre.
    async fn fetch(&self, movie_title: &str, genre: &str, limit: usize) -> AppResult<Vec<Book>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
