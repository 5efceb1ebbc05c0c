mod book;
mod movie;
mod report;

pub use book::{Book, BookSource};
pub use movie::Movie;
pub use report::SessionReport;

/// In-memory log of the current session's accepted queries and their results
///
/// Passed through the query loop as an explicit accumulator and consumed by
/// the reporter at shutdown.
pub type SessionLog = Vec<(Movie, Vec<Book>)>;
