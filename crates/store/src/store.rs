//! Song metadata store implementation.

use pro_core::{Error, Result, Song};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Default database file name.
pub const DEFAULT_DB_PATH: &str = "songs.sqlite";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS songs (
        book TEXT NOT NULL,
        number INTEGER NOT NULL,
        title TEXT NOT NULL,
        info TEXT NOT NULL,
        PRIMARY KEY (book, number)
    )
";

fn store_error(context: &str, e: rusqlite::Error) -> Error {
    Error::StoreError(format!("{}: {}", context, e))
}

/// Song metadata keyed by book and number.
pub struct SongStore {
    conn: Connection,
}

impl SongStore {
    /// Open the store at `path`, creating the schema if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Opening song store at {}", path.display());
        let conn = Connection::open(path)
            .map_err(|e| store_error(&format!("Failed to open {}", path.display()), e))?;
        Self::with_connection(conn)
    }

    /// In-memory store, for tests and dry runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| store_error("Failed to create in-memory store", e))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| store_error("Failed to create schema", e))?;
        Ok(Self { conn })
    }

    /// Look up a songbook song. `None` when the store has no entry.
    pub fn load_song(&self, book: &str, number: u32) -> Result<Option<Song>> {
        let row = self
            .conn
            .query_row(
                "SELECT title, info FROM songs WHERE book = ?1 AND number = ?2",
                params![book, number],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()
            .map_err(|e| store_error(&format!("Failed to load {} {}", book, number), e))?;

        Ok(row.map(|(title, info)| {
            let info = if info.is_empty() {
                Vec::new()
            } else {
                info.split('\n').map(str::to_string).collect()
            };
            Song::new(book, number, title, info)
        }))
    }

    /// Insert or replace a songbook song.
    ///
    /// Songs without book and number cannot be keyed and are rejected.
    pub fn save_song(&self, song: &Song) -> Result<()> {
        let (book, number) = song.songbook_entry().ok_or_else(|| {
            Error::StoreError(format!("Song '{}' has no book and number", song.title))
        })?;

        self.conn
            .execute(
                "INSERT OR REPLACE INTO songs (book, number, title, info) VALUES (?1, ?2, ?3, ?4)",
                params![book, number, song.title, song.info.join("\n")],
            )
            .map_err(|e| store_error(&format!("Failed to save {} {}", book, number), e))?;

        log::debug!("Saved {} {} to song store", book, number);
        Ok(())
    }
}
