//! reel-reads: book recommendations for movie lovers.
//!
//! Looks a movie title up in a local CSV catalog, supplements sparse results
//! from a Goodreads-style search page, records every search in SQLite and
//! summarizes the session at exit.

pub mod catalog;
pub mod config;
pub mod console;
pub mod db;
pub mod error;
pub mod input;
pub mod models;
pub mod services;

pub use catalog::Catalog;
pub use config::Config;
pub use db::SessionStore;
pub use error::{AppError, AppResult};
