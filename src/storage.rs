//! Local persistence for accounts and profiles.
//!
//! Everything lives in one `SQLite` file under the storage root:
//!
//! ```text
//! <root>/
//!   punchclock.sqlite   # account + profile tables
//! ```
//!
//! Timestamps and ids are stored as strings and parsed on the way out; a
//! row that fails to parse is reported as [`StorageError::Corrupt`].

mod account;
mod profile;

use std::{fs, io, path::PathBuf};

use rusqlite::Connection;
use uuid::Uuid;

const DB_FILE: &str = "punchclock.sqlite";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS account (
    id            TEXT PRIMARY KEY,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at    TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS profile (
    id             TEXT PRIMARY KEY,
    email          TEXT NOT NULL UNIQUE,
    name           TEXT NOT NULL,
    department     TEXT NOT NULL,
    role           TEXT NOT NULL,
    status         TEXT NOT NULL,
    is_first_login INTEGER NOT NULL,
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL
);
";

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("profile not found: {0}")]
    ProfileNotFound(Uuid),

    #[error("no account for {0}")]
    AccountNotFound(String),

    #[error("account already exists: {0}")]
    AccountExists(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("corrupt row: {0}")]
    Corrupt(String),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// Local `SQLite`-backed storage.
pub struct Storage {
    root: PathBuf,
    conn: Connection,
}

impl Storage {
    /// Opens storage rooted at the given directory.
    ///
    /// The directory and schema are created if they don't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let conn = Connection::open(root.join(DB_FILE))?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { root, conn })
    }

    /// Returns the default storage root: `~/.punchclock/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".punchclock"))
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

fn parse_uuid(s: &str) -> Result<Uuid> {
    s.parse()
        .map_err(|e| StorageError::Corrupt(format!("invalid id: {e}")))
}

fn parse_timestamp(s: &str, column: &str) -> Result<jiff::Timestamp> {
    s.parse()
        .map_err(|e| StorageError::Corrupt(format!("invalid {column}: {e}")))
}

/// Maps a unique-constraint failure onto [`StorageError::AccountExists`].
fn unique_violation(err: rusqlite::Error, email: &str) -> StorageError {
    match err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            StorageError::AccountExists(email.to_string())
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn creates_root_and_database() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("store");
        let storage = Storage::new(&root).unwrap();
        assert_eq!(storage.root(), root);
        assert!(root.join(DB_FILE).is_file());
    }

    #[test]
    fn reopening_keeps_the_schema() {
        let dir = TempDir::new().unwrap();
        Storage::new(dir.path()).unwrap();
        Storage::new(dir.path()).unwrap();
    }
}
