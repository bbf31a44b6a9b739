//! Connection bootstrap and store implementations for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections with the pragmas the stores
//!   rely on, and apply the schema before returning a usable connection.
//! - Implement [`MovieStore`] and [`UserStore`] on a shared connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and the schema applied.
//! - Each store operation is a single statement, so it commits atomically.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{MovieStore, UserStore};
use crate::domain::{
    DisplayName, DomainError, DomainResult, Movie, MovieDraft, MovieId, PasswordDigest, User,
    UserDraft, UserId,
};

/// Failures raised while opening or bootstrapping the database.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite failure.
    #[error("sqlite failure: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        Self::internal(err.to_string())
    }
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS user (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    username TEXT NOT NULL DEFAULT '',
    password_hash TEXT
);
CREATE TABLE IF NOT EXISTS movie (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    year TEXT NOT NULL
);
";

const DROP_SCHEMA: &str = "
DROP TABLE IF EXISTS movie;
DROP TABLE IF EXISTS user;
";

/// Opens the SQLite database file and applies the schema.
pub fn open_db(path: impl AsRef<Path>) -> Result<Connection, StoreError> {
    let conn = Connection::open(&path)?;
    bootstrap_connection(&conn)?;
    info!(path = %path.as_ref().display(), "database opened");
    Ok(conn)
}

/// Opens an in-memory SQLite database and applies the schema.
pub fn open_db_in_memory() -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory()?;
    bootstrap_connection(&conn)?;
    Ok(conn)
}

fn bootstrap_connection(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Both watchlist stores backed by one SQLite connection.
///
/// The connection sits behind a mutex so a single `Arc<SqliteStore>` can
/// serve concurrent handlers; each operation holds the lock for exactly one
/// statement.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Wrap an opened connection.
    #[must_use]
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Drop and recreate the schema (the `initdb --drop` path).
    pub fn recreate_schema(&self) -> DomainResult<()> {
        let conn = self.conn()?;
        conn.execute_batch(DROP_SCHEMA)
            .map_err(StoreError::from)?;
        conn.execute_batch(SCHEMA).map_err(StoreError::from)?;
        Ok(())
    }

    fn conn(&self) -> DomainResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| DomainError::internal("database connection lock poisoned"))
    }
}

fn movie_from_row(row: &Row<'_>) -> rusqlite::Result<Movie> {
    Ok(Movie {
        id: MovieId(row.get(0)?),
        title: row.get(1)?,
        year: row.get(2)?,
    })
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let digest: Option<String> = row.get(3)?;
    Ok(User {
        id: UserId(row.get(0)?),
        display_name: row.get(1)?,
        username: row.get(2)?,
        password_hash: digest.map(PasswordDigest::from_phc_string),
    })
}

impl MovieStore for SqliteStore {
    fn list(&self) -> DomainResult<Vec<Movie>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT id, title, year FROM movie")
            .map_err(StoreError::from)?;
        let movies = stmt
            .query_map([], movie_from_row)
            .map_err(StoreError::from)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)?;
        Ok(movies)
    }

    fn get(&self, id: MovieId) -> DomainResult<Option<Movie>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, title, year FROM movie WHERE id = ?1",
            params![id.0],
            movie_from_row,
        )
        .optional()
        .map_err(StoreError::from)
        .map_err(DomainError::from)
    }

    fn add(&self, draft: &MovieDraft) -> DomainResult<Movie> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO movie (title, year) VALUES (?1, ?2)",
            params![draft.title(), draft.year()],
        )
        .map_err(StoreError::from)?;
        Ok(Movie {
            id: MovieId(conn.last_insert_rowid()),
            title: draft.title().to_owned(),
            year: draft.year().to_owned(),
        })
    }

    fn update(&self, id: MovieId, draft: &MovieDraft) -> DomainResult<bool> {
        let conn = self.conn()?;
        let changed = conn
            .execute(
                "UPDATE movie SET title = ?1, year = ?2 WHERE id = ?3",
                params![draft.title(), draft.year(), id.0],
            )
            .map_err(StoreError::from)?;
        Ok(changed > 0)
    }

    fn delete(&self, id: MovieId) -> DomainResult<bool> {
        let conn = self.conn()?;
        let changed = conn
            .execute("DELETE FROM movie WHERE id = ?1", params![id.0])
            .map_err(StoreError::from)?;
        Ok(changed > 0)
    }
}

impl UserStore for SqliteStore {
    fn admin(&self) -> DomainResult<Option<User>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, name, username, password_hash FROM user ORDER BY id LIMIT 1",
            [],
            user_from_row,
        )
        .optional()
        .map_err(StoreError::from)
        .map_err(DomainError::from)
    }

    fn get(&self, id: UserId) -> DomainResult<Option<User>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT id, name, username, password_hash FROM user WHERE id = ?1",
            params![id.0],
            user_from_row,
        )
        .optional()
        .map_err(StoreError::from)
        .map_err(DomainError::from)
    }

    fn create(&self, draft: &UserDraft) -> DomainResult<User> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO user (name, username, password_hash) VALUES (?1, ?2, ?3)",
            params![
                draft.display_name,
                draft.username,
                draft.password_hash.as_ref().map(PasswordDigest::as_str),
            ],
        )
        .map_err(StoreError::from)?;
        Ok(User {
            id: UserId(conn.last_insert_rowid()),
            display_name: draft.display_name.clone(),
            username: draft.username.clone(),
            password_hash: draft.password_hash.clone(),
        })
    }

    fn set_display_name(&self, id: UserId, name: &DisplayName) -> DomainResult<()> {
        let conn = self.conn()?;
        let changed = conn
            .execute(
                "UPDATE user SET name = ?1 WHERE id = ?2",
                params![name.as_str(), id.0],
            )
            .map_err(StoreError::from)?;
        if changed == 0 {
            return Err(DomainError::not_found(format!("no user with id {id}")));
        }
        Ok(())
    }

    fn set_credentials(
        &self,
        id: UserId,
        username: &str,
        digest: &PasswordDigest,
    ) -> DomainResult<()> {
        let conn = self.conn()?;
        let changed = conn
            .execute(
                "UPDATE user SET username = ?1, password_hash = ?2 WHERE id = ?3",
                params![username, digest.as_str(), id.0],
            )
            .map_err(StoreError::from)?;
        if changed == 0 {
            return Err(DomainError::not_found(format!("no user with id {id}")));
        }
        Ok(())
    }
}

/// Default display name and the ten canonical movies used by `forge`.
pub fn seed_example_data(store: &SqliteStore) -> DomainResult<()> {
    const SEED_MOVIES: [(&str, &str); 10] = [
        ("My Neighbor Totoro", "1988"),
        ("Dead Poets Society", "1989"),
        ("A Perfect World", "1993"),
        ("Leon", "1994"),
        ("Mahjong", "1996"),
        ("Swallowtail Butterfly", "1996"),
        ("King of Comedy", "1999"),
        ("Devils on the Doorstep", "1999"),
        ("WALL-E", "2008"),
        ("The Pork of Music", "2012"),
    ];

    if UserStore::admin(store)?.is_none() {
        UserStore::create(
            store,
            &UserDraft {
                display_name: "Grey Li".to_owned(),
                username: String::new(),
                password_hash: None,
            },
        )?;
    }

    for (title, year) in SEED_MOVIES {
        let draft = MovieDraft::try_from_parts(title, year)
            .map_err(|err| DomainError::internal(format!("seed data invalid: {err}")))?;
        store.add(&draft)?;
    }
    Ok(())
}
