//! Durable record of every search and its recommended books.

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Row,
};

use crate::{
    error::AppResult,
    models::{Book, BookSource, Movie},
};

/// A persisted book row, as stored alongside its parent record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBook {
    pub title: String,
    pub author: String,
    pub source: BookSource,
}

/// One persisted search with its recommended books
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub id: i64,
    pub user: String,
    pub movie: String,
    pub genre: String,
    pub time: DateTime<Utc>,
    pub books: Vec<StoredBook>,
}

/// SQLite-backed store of search history
///
/// One local database file; no concurrent writers are assumed, so the pool
/// is capped at a single connection.
pub struct SessionStore {
    pool: SqlitePool,
}

impl SessionStore {
    /// Opens (creating if absent) the database file and ensures the schema
    pub async fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&format!(
            "sqlite://{}",
            path.as_ref().display()
        ))?
        .create_if_missing(true)
        .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// In-memory store for tests
    pub async fn in_memory() -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Idempotently creates the two relations; safe to call repeatedly
    async fn init_schema(&self) -> AppResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS history(
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user TEXT NOT NULL,
                movie TEXT NOT NULL,
                genre TEXT NOT NULL,
                time TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS books(
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                sid INTEGER NOT NULL,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                source TEXT NOT NULL,
                FOREIGN KEY (sid) REFERENCES history(id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Atomically appends one search record with its book rows
    ///
    /// The record is timestamped at write time. Either the record and all of
    /// its book rows become visible together, or none do.
    pub async fn record(&self, user: &str, movie: &Movie, books: &[Book]) -> AppResult<i64> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO history(user, movie, genre, time) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(user)
        .bind(&movie.title)
        .bind(&movie.genre)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        let sid = result.last_insert_rowid();

        for book in books {
            sqlx::query("INSERT INTO books(sid, title, author, source) VALUES (?1, ?2, ?3, ?4)")
                .bind(sid)
                .bind(&book.title)
                .bind(&book.author)
                .bind(book.source.as_str())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(record_id = sid, user = %user, movie = %movie.title, books = books.len(), "Search recorded");

        Ok(sid)
    }

    /// All persisted searches in insertion order, each with its books
    pub async fn history(&self) -> AppResult<Vec<SessionRecord>> {
        let rows = sqlx::query("SELECT id, user, movie, genre, time FROM history ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i64 = row.get("id");

            let book_rows =
                sqlx::query("SELECT title, author, source FROM books WHERE sid = ?1 ORDER BY id")
                    .bind(id)
                    .fetch_all(&self.pool)
                    .await?;

            let books = book_rows
                .iter()
                .map(|b| StoredBook {
                    title: b.get("title"),
                    author: b.get("author"),
                    source: BookSource::parse(b.get::<String, _>("source").as_str()),
                })
                .collect();

            records.push(SessionRecord {
                id,
                user: row.get("user"),
                movie: row.get("movie"),
                genre: row.get("genre"),
                time: row.get("time"),
                books,
            });
        }

        Ok(records)
    }
}
