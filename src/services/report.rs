use crate::models::{SessionLog, SessionReport};

const TOP_AUTHOR_COUNT: usize = 3;

/// Counts occurrences while preserving first-encounter order
fn count_in_order<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for key in keys {
        match counts.iter_mut().find(|(k, _)| k == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key.to_string(), 1)),
        }
    }
    counts
}

/// Aggregates the session log into frequency summaries
///
/// Returns `None` for an empty log so callers can report "nothing to show"
/// instead of printing empty tables. Genre counts are per query; author
/// counts are per recommended book across all queries. Top authors are
/// ordered by descending count, ties broken by first appearance.
pub fn summarize(log: &SessionLog) -> Option<SessionReport> {
    if log.is_empty() {
        return None;
    }

    let genre_counts = count_in_order(log.iter().map(|(movie, _)| movie.genre.as_str()));
    let author_counts = count_in_order(
        log.iter()
            .flat_map(|(_, books)| books.iter().map(|b| b.author.as_str())),
    );

    let mut top_authors = author_counts.clone();
    // Stable sort keeps first-encounter order among equal counts
    top_authors.sort_by(|a, b| b.1.cmp(&a.1));
    top_authors.truncate(TOP_AUTHOR_COUNT);

    tracing::info!(
        queries = log.len(),
        genres = genre_counts.len(),
        authors = author_counts.len(),
        "Session summarized"
    );

    Some(SessionReport {
        genre_counts,
        author_counts,
        top_authors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Book, BookSource, Movie};

    fn book_by(author: &str) -> Book {
        Book::new("Some Book", author, "Sci-Fi", "", BookSource::Local)
    }

    #[test]
    fn test_empty_log_has_nothing_to_report() {
        assert_eq!(summarize(&Vec::new()), None);
    }

    #[test]
    fn test_genre_counts_in_first_encounter_order() {
        let log = vec![
            (Movie::new("A", "Sci-Fi"), vec![]),
            (Movie::new("B", "Drama"), vec![]),
            (Movie::new("C", "Sci-Fi"), vec![]),
        ];

        let report = summarize(&log).unwrap();
        assert_eq!(
            report.genre_counts,
            vec![("Sci-Fi".to_string(), 2), ("Drama".to_string(), 1)]
        );
    }

    #[test]
    fn test_author_counts_span_all_queries() {
        let log = vec![
            (
                Movie::new("A", "Sci-Fi"),
                vec![book_by("Crouch"), book_by("Le Guin")],
            ),
            (Movie::new("B", "Drama"), vec![book_by("Crouch")]),
        ];

        let report = summarize(&log).unwrap();
        assert_eq!(
            report.author_counts,
            vec![("Crouch".to_string(), 2), ("Le Guin".to_string(), 1)]
        );
    }

    #[test]
    fn test_top_authors_ties_break_by_first_appearance() {
        let log = vec![(
            Movie::new("A", "Sci-Fi"),
            vec![
                book_by("First"),
                book_by("Second"),
                book_by("Third"),
                book_by("Fourth"),
                book_by("Second"),
            ],
        )];

        let report = summarize(&log).unwrap();
        let names: Vec<_> = report.top_authors.iter().map(|(a, _)| a.as_str()).collect();
        // Second leads on count; First and Third tie at one and keep order
        assert_eq!(names, vec!["Second", "First", "Third"]);
    }

    #[test]
    fn test_top_authors_capped_at_three() {
        let log = vec![(
            Movie::new("A", "Sci-Fi"),
            vec![book_by("W"), book_by("X"), book_by("Y"), book_by("Z")],
        )];

        let report = summarize(&log).unwrap();
        assert_eq!(report.top_authors.len(), 3);
        assert_eq!(report.author_counts.len(), 4);
    }
}
