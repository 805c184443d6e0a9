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

//! Song list view state.
//!
//! The view renders a snapshot of the song list controller's working copy:
//! one row per song, and the comment thread of the selected song. It keeps
//! the selected song and comment, and nothing else; every change to the
//! songs goes through the controller.

mod event;
mod render;

use std::sync::Arc;

use ratatui::widgets::ListState;

use crate::model::{Comment, Song};

pub(crate) struct SongListView {
    songs: Arc<Vec<Song>>,
    pub(crate) song_state: ListState,
    pub(crate) comment_state: ListState,
}

impl SongListView {
    pub(crate) fn new() -> Self {
        Self {
            songs: Arc::new(Vec::new()),
            song_state: ListState::default(),
            comment_state: ListState::default(),
        }
    }

    /// Shows a new snapshot, keeping the selection on the same song where
    /// it still exists.
    pub(crate) fn set_songs(&mut self, songs: Arc<Vec<Song>>) {
        let selected_key = self.selected_song().map(Song::key);
        let previous_index = self.song_state.selected();

        self.songs = songs;

        let index = selected_key
            .and_then(|key| self.songs.iter().position(|song| song.key() == key))
            .or_else(|| previous_index.map(|i| i.min(self.songs.len().saturating_sub(1))))
            .or(Some(0))
            .filter(|_| !self.songs.is_empty());
        self.song_state.select(index);

        self.clamp_comment();
    }

    #[cfg(test)]
    pub(crate) fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub(crate) fn selected_song(&self) -> Option<&Song> {
        self.song_state.selected().and_then(|i| self.songs.get(i))
    }

    pub(crate) fn selected_comment(&self) -> Option<&Comment> {
        let song = self.selected_song()?;
        self.comment_state.selected().and_then(|i| song.comments.get(i))
    }

    fn next_song(&mut self) {
        self.song_state.select(step(self.song_state.selected(), self.songs.len(), true));
        self.comment_state.select(None);
        self.clamp_comment();
    }

    fn previous_song(&mut self) {
        self.song_state.select(step(self.song_state.selected(), self.songs.len(), false));
        self.comment_state.select(None);
        self.clamp_comment();
    }

    fn next_comment(&mut self) {
        let len = self.comment_count();
        self.comment_state.select(step(self.comment_state.selected(), len, true));
    }

    fn previous_comment(&mut self) {
        let len = self.comment_count();
        self.comment_state.select(step(self.comment_state.selected(), len, false));
    }

    fn comment_count(&self) -> usize {
        self.selected_song().map_or(0, |song| song.comments.len())
    }

    fn clamp_comment(&mut self) {
        let len = self.comment_count();
        let index = match self.comment_state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        self.comment_state.select(index);
    }
}

/// Moves a wrapping selection one step through a list of `len` items.
fn step(selected: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let next = match (selected, forward) {
        (Some(i), true) if i + 1 >= len => 0,
        (Some(i), true) => i + 1,
        (Some(0), false) => len - 1,
        (Some(i), false) => (i - 1).min(len - 1),
        (None, _) => 0,
    };

    Some(next)
}
