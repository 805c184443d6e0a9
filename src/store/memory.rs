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

//! In-memory playlist store.
//!
//! Each playlist's songs sit behind their own mutex, so commands against one
//! playlist are serialised while other playlists stay available.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, RwLock},
};

use log::debug;

use crate::{
    error::StoreError,
    model::{Song, SongId},
    store::{Observer, Observers, PlaylistStore, StoreEvent, validate_new_song, validate_replacement},
};

#[derive(Default)]
pub(crate) struct MemoryStore {
    playlists: RwLock<HashMap<String, Arc<Mutex<Vec<Song>>>>>,
    observers: Observers,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn find(&self, playlist_id: &str) -> Result<Option<Arc<Mutex<Vec<Song>>>>, StoreError> {
        let playlists = self.playlists.read().map_err(|_| StoreError::Poisoned)?;
        Ok(playlists.get(playlist_id).cloned())
    }

    /// Returns the songs of a playlist, creating an empty playlist if needed.
    fn entry(&self, playlist_id: &str) -> Result<Arc<Mutex<Vec<Song>>>, StoreError> {
        if let Some(songs) = self.find(playlist_id)? {
            return Ok(songs);
        }

        let mut playlists = self.playlists.write().map_err(|_| StoreError::Poisoned)?;
        let songs = playlists
            .entry(playlist_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Vec::new())));

        Ok(Arc::clone(songs))
    }

    fn changed(&self, playlist_id: &str) {
        self.observers.notify(StoreEvent::Changed {
            playlist_id: playlist_id.to_string(),
        });
    }
}

impl PlaylistStore for MemoryStore {
    fn fetch_songs(&self, playlist_id: &str) -> Result<Vec<Song>, StoreError> {
        let songs = match self.find(playlist_id)? {
            Some(songs) => songs.lock().map_err(|_| StoreError::Poisoned)?.clone(),
            None => Vec::new(),
        };

        debug!("Fetched {} songs from playlist {}", songs.len(), playlist_id);

        self.observers.notify(StoreEvent::Refreshed {
            playlist_id: playlist_id.to_string(),
            songs: songs.clone(),
        });

        Ok(songs)
    }

    fn add_song(&self, playlist_id: &str, song: Song) -> Result<(), StoreError> {
        let playlist = self.entry(playlist_id)?;

        {
            let mut songs = playlist.lock().map_err(|_| StoreError::Poisoned)?;
            validate_new_song(playlist_id, songs.iter().map(|s| &s.id), &song)?;
            debug!("Adding song {} to playlist {}", song.id, playlist_id);
            songs.push(song);
        }

        self.changed(playlist_id);
        Ok(())
    }

    fn replace_songs(&self, playlist_id: &str, songs: Vec<Song>) -> Result<(), StoreError> {
        let playlist = self.entry(playlist_id)?;

        {
            let mut current = playlist.lock().map_err(|_| StoreError::Poisoned)?;
            let current_ids: Vec<SongId> = current.iter().map(|s| s.id.clone()).collect();
            validate_replacement(playlist_id, &current_ids, &songs)?;
            debug!("Replacing {} songs in playlist {}", songs.len(), playlist_id);
            *current = songs;
        }

        self.changed(playlist_id);
        Ok(())
    }

    fn remove_song(&self, playlist_id: &str, song_id: &SongId) -> Result<usize, StoreError> {
        let Some(playlist) = self.find(playlist_id)? else {
            return Ok(0);
        };

        let removed = {
            let mut songs = playlist.lock().map_err(|_| StoreError::Poisoned)?;
            let initial_len = songs.len();
            songs.retain(|song| &song.id != song_id);
            initial_len - songs.len()
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
