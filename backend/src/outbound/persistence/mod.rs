//! SQLite persistence for the watchlist stores.

mod sqlite;

pub use sqlite::{open_db, open_db_in_memory, seed_example_data, SqliteStore, StoreError};
