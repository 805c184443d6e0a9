// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! SQLite playlist store.
//!
//! This module persists playlists in an SQLite database so that shared
//! playlists and their comment threads survive restarts.
//!
//! # Tables
//!
//! * `songs` - Songs keyed by playlist and song id, ordered by `position`.
//! * `comments` - Comment threads, ordered by `position` within their song.
//!
//! # Performance
//!
//! Queries use [`rusqlite::Connection::prepare_cached`] to reduce SQL
//! parsing overhead, and every command runs in a single transaction.

use std::{collections::HashMap, sync::Mutex};

use log::debug;
use rusqlite::{Connection, Row, Transaction, params};

use crate::{
    error::StoreError,
    model::{Comment, Song, SongId},
    store::{Observer, Observers, PlaylistStore, StoreEvent, validate_new_song, validate_replacement},
};

pub(crate) struct SqliteStore {
    conn: Mutex<Connection>,
    observers: Observers,
}

impl SqliteStore {
    /// Opens the database at `path` and configures it for use as a store.
    ///
    /// This function performs the following setup:
    /// * **WAL Mode**: Enables Write-Ahead Logging.
    /// * **Constraints**: Enforces foreign key integrity so comments follow
    ///   their songs.
    /// * **Schema**: Executes [`create_schema`] to ensure all tables exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database file cannot be opened, or if the
    /// configuration or schema initialisation fails.
    pub(crate) fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;

        let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
        debug!("Opened playlist database {} in {} mode", path, journal_mode);

        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;

        Self::init(conn)
    }

    /// Opens a private in-memory database.
    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.set_prepared_statement_cache_capacity(32);

        create_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            observers: Observers::default(),
        })
    }

    fn changed(&self, playlist_id: &str) {
        self.observers.notify(StoreEvent::Changed {
            playlist_id: playlist_id.to_string(),
        });
    }
}

/// Creates the database schema if it does not already exist.
///
/// The schema is created in a single transaction.
fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS songs (
            playlist_id TEXT NOT NULL,
            id TEXT NOT NULL,
            position INTEGER NOT NULL,
            title TEXT NOT NULL,
            artist TEXT NOT NULL,
            artwork TEXT NOT NULL,
            link TEXT NOT NULL,
            PRIMARY KEY (playlist_id, id)
        );

        CREATE INDEX IF NOT EXISTS idx_songs_position ON songs (playlist_id, position);

        CREATE TABLE IF NOT EXISTS comments (
            playlist_id TEXT NOT NULL,
            song_id TEXT NOT NULL,
            id TEXT NOT NULL,
            position INTEGER NOT NULL,
            body TEXT NOT NULL,
            PRIMARY KEY (playlist_id, song_id, id),
            FOREIGN KEY (playlist_id, song_id) REFERENCES songs (playlist_id, id) ON DELETE CASCADE
        );

        COMMIT;",
    )
}

impl Song {
    /// Maps a `songs` row to a [`Song`] with an empty comment thread.
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: SongId::from(row.get::<_, String>(0)?),
            title: row.get(1)?,
            artist: row.get(2)?,
            artwork: row.get(3)?,
            link: row.get(4)?,
            comments: Vec::new(),
        })
    }
}

fn load_songs(conn: &Connection, playlist_id: &str) -> rusqlite::Result<Vec<Song>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, title, artist, artwork, link
         FROM songs
         WHERE playlist_id = ?
         ORDER BY position",
    )?;
    let mut songs = stmt
        .query_map([playlist_id], Song::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare_cached(
        "SELECT song_id, id, body
         FROM comments
         WHERE playlist_id = ?
         ORDER BY song_id, position",
    )?;
    let rows = stmt.query_map([playlist_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            Comment::with_id(row.get::<_, String>(1)?, row.get::<_, String>(2)?),
        ))
    })?;

    let mut threads: HashMap<String, Vec<Comment>> = HashMap::new();
    for row in rows {
        let (song_id, comment) = row?;
        threads.entry(song_id).or_default().push(comment);
    }

    for song in songs.iter_mut() {
        if let Some(comments) = threads.remove(song.id.as_str()) {
            song.comments = comments;
        }
    }

    Ok(songs)
}

fn load_song_ids(tx: &Transaction, playlist_id: &str) -> rusqlite::Result<Vec<SongId>> {
    let mut stmt =
        tx.prepare_cached("SELECT id FROM songs WHERE playlist_id = ? ORDER BY position")?;
    let ids = stmt
        .query_map([playlist_id], |row| row.get::<_, String>(0).map(SongId::from))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ids)
}

fn insert_song(tx: &Transaction, playlist_id: &str, position: i64, song: &Song) -> rusqlite::Result<()> {
    tx.prepare_cached(
        "INSERT INTO songs (playlist_id, id, position, title, artist, artwork, link)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )?
    .execute(params![
        playlist_id,
        song.id.as_str(),
        position,
        song.title,
        song.artist,
        song.artwork,
        song.link
    ])?;

    let mut stmt = tx.prepare_cached(
        "INSERT INTO comments (playlist_id, song_id, id, position, body)
         VALUES (?, ?, ?, ?, ?)",
    )?;
    for (position, comment) in song.comments.iter().enumerate() {
        stmt.execute(params![
            playlist_id,
            song.id.as_str(),
            comment.id.as_str(),
            position as i64,
            comment.body
        ])?;
    }

    Ok(())
}

impl PlaylistStore for SqliteStore {
    fn fetch_songs(&self, playlist_id: &str) -> Result<Vec<Song>, StoreError> {
        let songs = {
            let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
            load_songs(&conn, playlist_id)?
        };

        debug!("Fetched {} songs from playlist {}", songs.len(), playlist_id);

        self.observers.notify(StoreEvent::Refreshed {
            playlist_id: playlist_id.to_string(),
            songs: songs.clone(),
        });

        Ok(songs)
    }

    fn add_song(&self, playlist_id: &str, song: Song) -> Result<(), StoreError> {
        {
            let mut conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
            let tx = conn.transaction()?;

            let existing = load_song_ids(&tx, playlist_id)?;
            validate_new_song(playlist_id, existing.iter(), &song)?;

            let last: Option<i64> = tx.query_row(
                "SELECT MAX(position) FROM songs WHERE playlist_id = ?",
                [playlist_id],
                |row| row.get(0),
            )?;

            debug!("Adding song {} to playlist {}", song.id, playlist_id);
            insert_song(&tx, playlist_id, last.map_or(0, |p| p + 1), &song)?;

            tx.commit()?;
        }

        self.changed(playlist_id);
        Ok(())
    }

    fn replace_songs(&self, playlist_id: &str, songs: Vec<Song>) -> Result<(), StoreError> {
        {
            let mut conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
            let tx = conn.transaction()?;

            let current = load_song_ids(&tx, playlist_id)?;
            validate_replacement(playlist_id, &current, &songs)?;

            debug!("Replacing {} songs in playlist {}", songs.len(), playlist_id);
            tx.execute("DELETE FROM songs WHERE playlist_id = ?", [playlist_id])?;
            for (position, song) in songs.iter().enumerate() {
                insert_song(&tx, playlist_id, position as i64, song)?;
            }

            tx.commit()?;
        }

        self.changed(playlist_id);
        Ok(())
    }

    fn remove_song(&self, playlist_id: &str, song_id: &SongId) -> Result<usize, StoreError> {
        let removed = {
            let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
            conn.prepare_cached("DELETE FROM songs WHERE playlist_id = ? AND id = ?")?
                .execute(params![playlist_id, song_id.as_str()])?
        };

        debug!("Removed {} songs with id {} from playlist {}", removed, song_id, playlist_id);

        if removed > 0 {
            self.changed(playlist_id);
        }
        Ok(removed)
    }

    fn subscribe(&self, observer: Observer) -> u64 {
        self.observers.subscribe(observer)
    }

    fn unsubscribe(&self, token: u64) {
        self.observers.unsubscribe(token)
    }
}
