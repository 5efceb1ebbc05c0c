pub mod store;

pub use store::{SessionRecord, SessionStore, StoredBook};
