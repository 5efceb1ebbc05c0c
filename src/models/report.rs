use serde::Serialize;

/// End-of-session frequency summary
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionReport {
    /// Queries per genre, in the order genres were first encountered
    pub genre_counts: Vec<(String, usize)>,
    /// Recommended books per author, in the order authors were first encountered
    pub author_counts: Vec<(String, usize)>,
    /// Up to three most-suggested authors, ties broken by first appearance
    pub top_authors: Vec<(String, usize)>,
}
