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

//! Modal input overlay.
//!
//! An overlay floats above the song list and collects one or more lines of
//! text, such as the link and first comment of a new song. While it is
//! shown it receives every key press.

mod event;
mod render;

use tui_input::Input;

use crate::model::SongId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OverlayKind {
    AddSong,
    AddComment(SongId),
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum OverlayAction {
    /// The field values, in field order.
    Submit(Vec<String>),
    Dismiss,
}

struct Field {
    label: &'static str,
    input: Input,
}

impl Field {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            input: Input::default(),
        }
    }
}

pub(crate) struct Overlay {
    kind: OverlayKind,
    title: String,
    fields: Vec<Field>,
    focus: usize,
}

impl Overlay {
    pub(crate) fn add_song() -> Self {
        Self {
            kind: OverlayKind::AddSong,
            title: "Add Song".to_string(),
            fields: vec![Field::new("Link"), Field::new("Comment")],
            focus: 0,
        }
    }

    pub(crate) fn add_comment(song_id: SongId, song_title: &str) -> Self {
        Self {
            kind: OverlayKind::AddComment(song_id),
            title: format!("Comment on {}", song_title),
            fields: vec![Field::new("Comment")],
            focus: 0,
        }
    }

    pub(crate) fn kind(&self) -> &OverlayKind {
        &self.kind
    }

    pub(crate) fn title(&self) -> &str {
        &self.title
    }

    fn values(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|field| field.input.value().to_string())
            .collect()
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    fn focus_previous(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }
}
