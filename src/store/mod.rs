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

//! Canonical playlist storage.
//!
//! A [`PlaylistStore`] is the single source of truth for the songs of every
//! playlist. Callers never mutate the data it hands out; they issue
//! commands, and the store validates each command before applying it.
//!
//! Two implementations are provided:
//!
//! * [`MemoryStore`]: process-lifetime storage, empty at start.
//! * [`SqliteStore`]: persistent storage in an SQLite database.
//!
//! Both notify registered observers with a [`StoreEvent`] whenever a
//! playlist is fetched or changed, which is how song lists re-synchronise
//! their working copies.

mod memory;
mod sqlite;

pub(crate) use memory::MemoryStore;
pub(crate) use sqlite::SqliteStore;

use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc, RwLock, RwLockWriteGuard,
        atomic::{AtomicU64, Ordering},
    },
};

use log::warn;

use crate::{
    error::{StoreError, ValidationError},
    model::{Song, SongId},
};

pub(crate) trait PlaylistStore: Send + Sync {
    /// Returns the songs of a playlist in display order.
    ///
    /// An unknown playlist is empty. Every fetch notifies observers with
    /// [`StoreEvent::Refreshed`].
    fn fetch_songs(&self, playlist_id: &str) -> Result<Vec<Song>, StoreError>;

    /// Appends a song to a playlist.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateSongId`] if the playlist already
    /// holds a song with the same id.
    fn add_song(&self, playlist_id: &str, song: Song) -> Result<(), StoreError>;

    /// Replaces the whole song collection of a playlist.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PartialReplacement`] unless `songs` holds
    /// exactly the songs currently in the playlist.
    fn replace_songs(&self, playlist_id: &str, songs: Vec<Song>) -> Result<(), StoreError>;

    /// Removes a song, returning how many songs were removed.
    ///
    /// Removing a song that is not in the playlist is a no-op.
    fn remove_song(&self, playlist_id: &str, song_id: &SongId) -> Result<usize, StoreError>;

    /// Registers an observer, returning a token to unregister it later.
    fn subscribe(&self, observer: Observer) -> u64;

    fn unsubscribe(&self, token: u64);
}

/// Notification sent by a store to its observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreEvent {
    /// The canonical songs of a playlist, as returned by a fetch.
    Refreshed {
        playlist_id: String,
        songs: Vec<Song>,
    },

    /// A playlist was modified by a store command.
    Changed { playlist_id: String },
}

impl StoreEvent {
    pub(crate) fn playlist_id(&self) -> &str {
        match self {
            StoreEvent::Refreshed { playlist_id, .. } => playlist_id,
            StoreEvent::Changed { playlist_id } => playlist_id,
        }
    }
}

pub(crate) type Observer = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

/// Registry of store observers keyed by subscription token.
#[derive(Default)]
pub(crate) struct Observers {
    observers: RwLock<HashMap<u64, Observer>>,
    counter: AtomicU64,
}

impl Observers {
    pub(crate) fn subscribe(&self, observer: Observer) -> u64 {
        let token = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        self.write().insert(token, observer);
        token
    }

    pub(crate) fn unsubscribe(&self, token: u64) {
        self.write().remove(&token);
    }

    pub(crate) fn notify(&self, event: StoreEvent) {
        // Observers are called without holding the registry lock so that they
        // may subscribe or unsubscribe themselves.
        let observers: Vec<Observer> = self
            .observers
            .read()
            .unwrap_or_else(|poisoned| {
                warn!("Store observer registry was poisoned, recovering");
                poisoned.into_inner()
            })
            .values()
            .cloned()
            .collect();

        for observer in observers {
            observer(&event);
        }
    }

    // A panicking observer cannot leave the map half-updated, so the
    // registry stays usable after poisoning.
    fn write(&self) -> RwLockWriteGuard<'_, HashMap<u64, Observer>> {
        self.observers.write().unwrap_or_else(|poisoned| {
            warn!("Store observer registry was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

/// Checks that `song` may be appended to a playlist holding `existing`.
pub(crate) fn validate_new_song<'a>(
    playlist_id: &str,
    mut existing: impl Iterator<Item = &'a SongId>,
    song: &Song,
) -> Result<(), ValidationError> {
    if existing.any(|id| id == &song.id) {
        return Err(ValidationError::DuplicateSongId {
            playlist_id: playlist_id.to_string(),
            song_id: song.id.clone(),
        });
    }

    validate_comments(song)
}

/// Checks that `songs` is a complete replacement for a playlist holding the
/// songs `current`.
pub(crate) fn validate_replacement(
    playlist_id: &str,
    current: &[SongId],
    songs: &[Song],
) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(songs.len());
    for song in songs {
        if !seen.insert(&song.id) {
            return Err(ValidationError::DuplicateSongId {
                playlist_id: playlist_id.to_string(),
                song_id: song.id.clone(),
            });
        }
        validate_comments(song)?;
    }

    let current_ids: HashSet<&SongId> = current.iter().collect();
    let missing: Vec<SongId> = current
        .iter()
        .filter(|id| !seen.contains(id))
        .cloned()
        .collect();
    let unexpected: Vec<SongId> = songs
        .iter()
        .filter(|song| !current_ids.contains(&song.id))
        .map(|song| song.id.clone())
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::PartialReplacement {
            playlist_id: playlist_id.to_string(),
            missing,
            unexpected,
        })
    }
}

fn validate_comments(song: &Song) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(song.comments.len());
    for comment in &song.comments {
        if !seen.insert(&comment.id) {
            return Err(ValidationError::DuplicateCommentId {
                song_id: song.id.clone(),
                comment_id: comment.id.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::model::Comment;

    fn song(id: &str) -> Song {
        Song::fixture(id)
    }

    #[test]
    fn replacement_must_hold_the_same_songs() {
        let current = [SongId::from("s1"), SongId::from("s2")];

        assert!(validate_replacement("p1", &current, &[song("s2"), song("s1")]).is_ok());

        let err = validate_replacement("p1", &current, &[song("s1"), song("s3")]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::PartialReplacement {
                playlist_id: "p1".to_string(),
                missing: vec![SongId::from("s2")],
                unexpected: vec![SongId::from("s3")],
            }
        );
    }

    #[test]
    fn replacement_rejects_duplicates() {
        let current = [SongId::from("s1")];

        let err = validate_replacement("p1", &current, &[song("s1"), song("s1")]).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateSongId { .. }));

        let mut twice = song("s1");
        twice.comments = vec![Comment::with_id("c1", "a"), Comment::with_id("c1", "b")];
        let err = validate_replacement("p1", &current, &[twice]).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateCommentId { .. }));
    }

    #[test]
    fn new_song_must_not_reuse_an_id() {
        let existing = [SongId::from("s1")];

        assert!(validate_new_song("p1", existing.iter(), &song("s2")).is_ok());
        assert!(validate_new_song("p1", existing.iter(), &song("s1")).is_err());
    }

    #[test]
    fn observers_are_notified_until_unsubscribed() {
        let observers = Observers::default();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let token = observers.subscribe(Arc::new(move |event: &StoreEvent| {
            sink.lock().unwrap().push(event.playlist_id().to_string());
        }));

        observers.notify(StoreEvent::Changed { playlist_id: "p1".into() });
        observers.unsubscribe(token);
        observers.notify(StoreEvent::Changed { playlist_id: "p2".into() });

        assert_eq!(*seen.lock().unwrap(), ["p1"]);
    }

    #[test]
    fn subscriptions_survive_a_poisoned_registry() {
        let observers = Observers::default();

        let poisoned = std::thread::scope(|scope| {
            scope
                .spawn(|| {
                    let _guard = observers.observers.write().unwrap();
                    panic!("observer registry poisoned");
                })
                .join()
        });
        assert!(poisoned.is_err());
        assert!(observers.observers.is_poisoned());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        observers.subscribe(Arc::new(move |event: &StoreEvent| {
            sink.lock().unwrap().push(event.playlist_id().to_string());
        }));
        observers.notify(StoreEvent::Changed { playlist_id: "p1".into() });

        assert_eq!(*seen.lock().unwrap(), ["p1"]);
    }
}
