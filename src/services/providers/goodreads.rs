/// Goodreads search-page provider
///
/// Goodreads has no public search API, so this provider fetches the HTML
/// search page and extracts candidate books from the result markup: anchors
/// with class `bookTitle` carry titles, and the author sits in a nearby
/// `authorName` span inside the same table row.
use reqwest::Client as HttpClient;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookSource},
    services::providers::BookProvider,
};

/// How many title anchors to scan before filtering
const SCAN_LIMIT: usize = 8;

/// Title substrings (lower-case) marking non-narrative works
const DENYLIST: &[&str] = &["colour", "coloring", "diary", "activity", "guide"];

/// Description attached to every accepted result
const PLACEHOLDER_DESCRIPTION: &str = "Found via Goodreads lookup";

const USER_AGENT: &str = "Mozilla/5.0";

#[derive(Clone)]
pub struct GoodreadsProvider {
    http_client: HttpClient,
    search_url: String,
}

impl GoodreadsProvider {
    /// Creates a provider against the given search endpoint
    pub fn new(search_url: String, timeout_secs: u64) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            search_url,
        })
    }
}

fn selector(css: &str) -> AppResult<Selector> {
    Selector::parse(css)
        .map_err(|e| AppError::ExternalLookup(format!("Invalid selector '{}': {}", css, e)))
}

/// Walks up from a title anchor to the `<tr>` result row that contains it
fn enclosing_row(anchor: ElementRef<'_>) -> Option<ElementRef<'_>> {
    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "tr")
}

/// Extracts up to `limit` accepted books from a search results page
///
/// Candidates are taken in document order, capped at [`SCAN_LIMIT`] before
/// filtering. A candidate is dropped when its title matches the denylist or
/// when no author can be resolved from its row; extraction stops as soon as
/// `limit` candidates have been accepted.
fn extract_books(html: &str, genre: &str, limit: usize) -> AppResult<Vec<Book>> {
    let document = Html::parse_document(html);
    let title_selector = selector("a.bookTitle")?;
    let author_selector = selector("span.authorName span, a.authorName span")?;

    let mut collected = Vec::new();

    for anchor in document.select(&title_selector).take(SCAN_LIMIT) {
        if collected.len() >= limit {
            break;
        }

        let title = anchor.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            continue;
        }

        let title_lower = title.to_lowercase();
        if DENYLIST.iter().any(|bad| title_lower.contains(bad)) {
            continue;
        }

        let author = enclosing_row(anchor)
            .and_then(|row| row.select(&author_selector).next())
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|a| !a.is_empty());

        let Some(author) = author else {
            continue;
        };

        collected.push(Book::new(
            title,
            author,
            genre,
            PLACEHOLDER_DESCRIPTION,
            BookSource::External,
        ));
    }

    Ok(collected)
}

#[async_trait::async_trait]
impl BookProvider for GoodreadsProvider {
    async fn fetch(&self, movie_title: &str, genre: &str, limit: usize) -> AppResult<Vec<Book>> {
        if movie_title.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let url = format!("{}?q={}", self.search_url, movie_title.replace(' ', "+"));

        let response = self
            .http_client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::ExternalLookup(format!(
                "Search endpoint returned status {}",
                status
            )));
        }

        let body = response.text().await?;
        let books = extract_books(&body, genre, limit)?;

        tracing::info!(
            query = %movie_title,
            results = books.len(),
            provider = "goodreads",
            "External lookup completed"
        );

        Ok(books)
    }

    fn name(&self) -> &'static str {
        "goodreads"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_row(title: &str, author: Option<&str>) -> String {
        let author_cell = match author {
            Some(name) => format!(
                r##"<td><a class="authorName" href="#"><span>{}</span></a></td>"##,
                name
            ),
            None => "<td></td>".to_string(),
        };
        format!(
            r##"<tr><td><a class="bookTitle" href="#"><span>{}</span></a></td>{}</tr>"##,
            title, author_cell
        )
    }

    fn search_page(rows: &[String]) -> String {
        format!("<html><body><table>{}</table></body></html>", rows.join(""))
    }

    #[test]
    fn test_extracts_title_author_and_tags() {
        let page = search_page(&[result_row("Dark Matter", Some("Blake Crouch"))]);
        let books = extract_books(&page, "Sci-Fi", 2).unwrap();

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Dark Matter");
        assert_eq!(books[0].author, "Blake Crouch");
        assert_eq!(books[0].genre, "Sci-Fi");
        assert_eq!(books[0].description, PLACEHOLDER_DESCRIPTION);
        assert_eq!(books[0].source, BookSource::External);
    }

    #[test]
    fn test_denylisted_titles_are_dropped() {
        let page = search_page(&[
            result_row("Inception Coloring Book", Some("Someone")),
            result_row("The Inception Guide", Some("Someone Else")),
            result_row("Dark Matter", Some("Blake Crouch")),
        ]);
        let books = extract_books(&page, "Unknown", 3).unwrap();

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Dark Matter");
    }

    #[test]
    fn test_candidates_without_author_are_dropped() {
        let page = search_page(&[
            result_row("Ghost Written", None),
            result_row("Recursion", Some("Blake Crouch")),
        ]);
        let books = extract_books(&page, "Unknown", 3).unwrap();

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Recursion");
    }

    #[test]
    fn test_stops_once_limit_is_reached() {
        let page = search_page(&[
            result_row("Book One", Some("Author One")),
            result_row("Book Two", Some("Author Two")),
            result_row("Book Three", Some("Author Three")),
        ]);
        let books = extract_books(&page, "Unknown", 2).unwrap();

        let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Book One", "Book Two"]);
    }

    #[test]
    fn test_only_first_eight_anchors_are_scanned() {
        let mut rows: Vec<String> = (0..8)
            .map(|i| result_row(&format!("Diary Volume {}", i), Some("Someone")))
            .collect();
        rows.push(result_row("A Real Novel", Some("A Real Author")));
        let page = search_page(&rows);

        // The ninth anchor is valid but sits past the scan cap
        let books = extract_books(&page, "Unknown", 2).unwrap();
        assert!(books.is_empty());
    }

    #[test]
    fn test_author_from_span_variant() {
        let page = r##"<html><body><table><tr>
                <td><a class="bookTitle" href="#"><span>Annihilation</span></a></td>
                <td><span class="authorName"><span>Jeff VanderMeer</span></span></td>
            </tr></table></body></html>"##;
        let books = extract_books(page, "Unknown", 1).unwrap();
        assert_eq!(books[0].author, "Jeff VanderMeer");
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected() {
        let provider = GoodreadsProvider::new("http://test.local/search".to_string(), 7).unwrap();
        let result = provider.fetch("   ", "Unknown", 2).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
