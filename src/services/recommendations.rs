use std::sync::Arc;

use crate::{
    catalog::Catalog,
    models::{Book, Movie},
    services::providers::BookProvider,
};

/// Combines local catalog matches with external lookup results
///
/// Takes up to `local_minimum` books from the catalog. Only when the local
/// count comes back strictly below that minimum is the provider consulted,
/// for up to `external_count` more. Local books come first, external books
/// are appended; no de-duplication or re-sorting. An empty result is a valid
/// outcome, not an error.
///
/// A provider failure is logged and treated as zero external results; it is
/// never surfaced to the caller.
pub async fn recommend(
    movie: &Movie,
    catalog: &Catalog,
    provider: Arc<dyn BookProvider>,
    local_minimum: usize,
    external_count: usize,
) -> Vec<Book> {
    let mut books = catalog.lookup(&movie.title, local_minimum);
    let local_count = books.len();

    if local_count < local_minimum {
        match provider
            .fetch(&movie.title, &movie.genre, external_count)
            .await
        {
            Ok(external) => books.extend(external),
            Err(e) => {
                tracing::warn!(
                    movie = %movie.title,
                    provider = provider.name(),
                    error = %e,
                    "External lookup failed, continuing with local results only"
                );
            }
        }
    }

    tracing::info!(
        movie = %movie.title,
        local = local_count,
        external = books.len() - local_count,
        "Recommendation lookup completed"
    );

    books
}
