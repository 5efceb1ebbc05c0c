//! Interactive console surface: menu loop, prompts and result printing.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::{
    catalog::Catalog,
    config::Config,
    db::SessionStore,
    error::AppResult,
    input,
    models::{Book, Movie, SessionLog, SessionReport},
    services::{providers::BookProvider, recommendations, report},
};

const QUIT_SENTINEL: &str = "q";
const DEFAULT_USER: &str = "Guest";

/// The interactive application, generic over its input source so tests can
/// drive it from a buffer
pub struct Console<R: BufRead> {
    input: R,
    catalog: Catalog,
    store: SessionStore,
    provider: Arc<dyn BookProvider>,
    config: Config,
}

impl Console<io::BufReader<io::Stdin>> {
    pub fn new(
        catalog: Catalog,
        store: SessionStore,
        provider: Arc<dyn BookProvider>,
        config: Config,
    ) -> Self {
        Console {
            input: io::BufReader::new(io::stdin()),
            catalog,
            store,
            provider,
            config,
        }
    }
}

impl<R: BufRead> Console<R> {
    pub fn with_input(
        input: R,
        catalog: Catalog,
        store: SessionStore,
        provider: Arc<dyn BookProvider>,
        config: Config,
    ) -> Self {
        Console {
            input,
            catalog,
            store,
            provider,
            config,
        }
    }

    /// Prints `prompt` and reads one trimmed line; `None` on end of input
    fn prompt(&mut self, prompt: &str) -> AppResult<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Runs the startup menu until the user exits
    pub async fn run(&mut self) -> AppResult<()> {
        println!("\n------ BOOK SUGGESTIONS BASED ON MOVIES ------");

        loop {
            println!("\n1) Recommend Books");
            println!("2) View Search History");
            println!("3) Exit\n");

            let choice = match self.prompt("Select an option: ")? {
                Some(choice) => choice,
                None => return Ok(()),
            };

            match choice.as_str() {
                "1" => {
                    self.recommendation_loop().await?;
                    return Ok(());
                }
                "2" => self.show_history().await?,
                "3" => {
                    println!("\nClosing program...\n");
                    return Ok(());
                }
                _ => println!("Invalid choice, try again."),
            }
        }
    }

    /// The query loop: prompt, validate, recommend, persist, log
    async fn recommendation_loop(&mut self) -> AppResult<()> {
        let user = match self.prompt("\nEnter your name: ")? {
            Some(name) if !name.is_empty() => name,
            Some(_) => DEFAULT_USER.to_string(),
            None => return Ok(()),
        };

        let mut session_log: SessionLog = Vec::new();

        loop {
            let raw = match self.prompt("\nMovie name (q to quit): ")? {
                Some(raw) => raw,
                None => break,
            };

            if raw.to_lowercase() == QUIT_SENTINEL {
                break;
            }

            let cleaned = input::normalize(&raw);
            if cleaned.is_empty() || !input::is_valid(&cleaned) {
                println!("Please avoid symbols and special characters except ,.!?'\"- and alphanumerics.");
                continue;
            }

            let genre = match self.prompt("Movie genre (optional): ")? {
                Some(genre) if !genre.is_empty() => genre,
                Some(_) => "Unknown".to_string(),
                None => break,
            };

            let movie = Movie::new(cleaned, genre);

            let books = recommendations::recommend(
                &movie,
                &self.catalog,
                self.provider.clone(),
                self.config.local_minimum,
                self.config.external_count,
            )
            .await;

            if books.is_empty() {
                println!("No suggestions found anywhere.\n");
                continue;
            }

            print_books(&books);

            self.store.record(&user, &movie, &books).await?;
            session_log.push((movie, books));
        }

        match report::summarize(&session_log) {
            Some(report) => print_report(&report),
            None => println!("\nNo session statistics to show.\n"),
        }

        println!("\nThank you for using the program!\n");
        Ok(())
    }

    /// Prints every persisted search with its books
    async fn show_history(&mut self) -> AppResult<()> {
        println!("\n========= Saved Search History =========\n");

        let records = self.store.history().await?;
        if records.is_empty() {
            println!("No past searches saved.\n");
            return Ok(());
        }

        for record in records {
            println!(
                "{}) {} searched '{}' ({}) on {}",
                record.id, record.user, record.movie, record.genre, record.time
            );
            for book in &record.books {
                println!("   -> {} - {} [{}]", book.title, book.author, book.source);
            }
            println!("---------------------------------------");
        }

        Ok(())
    }
}

fn print_books(books: &[Book]) {
    println!("\n--- Recommended Books ---\n");
    for (i, book) in books.iter().enumerate() {
        println!("{}. {}  | {}  [{}]", i + 1, book.title, book.author, book.source);
        println!("     {}", book.short());
    }
}

fn print_report(report: &SessionReport) {
    println!("\n========== SESSION ANALYSIS ==========");

    println!("\nGenres searched this session:");
    for (genre, count) in &report.genre_counts {
        println!(" {}: {} time(s)", genre, count);
    }

    println!("\nMost suggested authors:");
    for (author, count) in &report.top_authors {
        println!(" {}: {}", author, count);
    }
    println!("======================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookSource;
    use crate::services::providers::MockBookProvider;
    use std::collections::HashMap;
    use std::io::Cursor;

    fn test_catalog() -> Catalog {
        let mut entries = HashMap::new();
        entries.insert(
            "inception".to_string(),
            vec![
                Book::new("Dark Matter", "Blake Crouch", "Sci-Fi", "Parallel lives.", BookSource::Local),
                Book::new("Recursion", "Blake Crouch", "Sci-Fi", "Memory chairs.", BookSource::Local),
                Book::new("The Lathe of Heaven", "Ursula K. Le Guin", "Sci-Fi", "Dreams.", BookSource::Local),
                Book::new("Ubik", "Philip K. Dick", "Sci-Fi", "Reality decay.", BookSource::Local),
            ],
        );
        Catalog::from_entries(entries)
    }

    async fn run_script(script: &str, provider: MockBookProvider) -> SessionStore {
        let store = SessionStore::in_memory().await.unwrap();
        let mut console = Console::with_input(
            Cursor::new(script.to_string()),
            test_catalog(),
            store,
            Arc::new(provider),
            Config::default(),
        );
        console.run().await.unwrap();
        console.store
    }

    #[tokio::test]
    async fn test_exit_option_terminates_cleanly() {
        let mut provider = MockBookProvider::new();
        provider.expect_fetch().never();
        let store = run_script("3\n", provider).await;
        assert!(store.history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_full_query_persists_and_quits() {
        let mut provider = MockBookProvider::new();
        provider.expect_fetch().never();

        let store = run_script("1\nalice\nInception\nSci-Fi\nq\n", provider).await;

        let history = store.history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].user, "alice");
        assert_eq!(history[0].movie, "Inception");
        assert_eq!(history[0].books.len(), 4);
    }

    #[tokio::test]
    async fn test_blank_name_defaults_to_guest() {
        let mut provider = MockBookProvider::new();
        provider.expect_fetch().never();

        let store = run_script("1\n\nInception\n\nq\n", provider).await;

        let history = store.history().await.unwrap();
        assert_eq!(history[0].user, "Guest");
        assert_eq!(history[0].genre, "Unknown");
    }

    #[tokio::test]
    async fn test_invalid_title_is_rejected_and_not_persisted() {
        let mut provider = MockBookProvider::new();
        provider.expect_fetch().never();

        // "@#$%" normalizes to an empty string and is rejected; the loop
        // re-prompts and the user quits
        let store = run_script("1\nalice\n@#$%\nq\n", provider).await;

        assert!(store.history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_results_anywhere_is_not_persisted() {
        let mut provider = MockBookProvider::new();
        provider.expect_fetch().times(1).returning(|_, _, _| Ok(vec![]));
        provider.expect_name().return_const("mock");

        let store = run_script("1\nalice\nSome Absent Movie\n\nq\n", provider).await;

        assert!(store.history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_menu_choice_reprompts() {
        let mut provider = MockBookProvider::new();
        provider.expect_fetch().never();

        let store = run_script("9\n3\n", provider).await;
        assert!(store.history().await.unwrap().is_empty());
    }
}
