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

//! Error types for the playlist core.
//!
//! The store, lookup and controller layers report failures with the typed
//! errors defined here. The application boundary wraps them in
//! [`anyhow::Error`] where a message is all that is needed.

use thiserror::Error;

use crate::model::{CommentId, SongId};

/// A command that would break the store's identity or completeness rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ValidationError {
    #[error("playlist {playlist_id} already contains song {song_id}")]
    DuplicateSongId { playlist_id: String, song_id: SongId },

    #[error("song {song_id} contains comment {comment_id} more than once")]
    DuplicateCommentId { song_id: SongId, comment_id: CommentId },

    #[error(
        "replacement for playlist {playlist_id} is not complete ({} missing, {} unexpected)",
        .missing.len(),
        .unexpected.len()
    )]
    PartialReplacement {
        playlist_id: String,
        missing: Vec<SongId>,
        unexpected: Vec<SongId>,
    },
}

/// Failure of the song metadata lookup collaborator.
#[derive(Debug, Error)]
pub(crate) enum LookupError {
    #[error("no link was given")]
    BlankLink,

    #[error("unsupported link: {0}")]
    UnsupportedLink(String),

    #[error("could not read {link}")]
    Unreadable {
        link: String,
        #[source]
        source: lofty::error::LoftyError,
    },

    #[error("{0} has no tags")]
    MissingTags(String),

    #[error("{0} has no title")]
    MissingTitle(String),
}

/// Failure of a playlist store command.
#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("playlist store lock poisoned")]
    Poisoned,
}

/// Failure of a song list controller operation.
#[derive(Debug, Error)]
pub(crate) enum SyncError {
    #[error("song list is not synced with a playlist")]
    NotSynced,

    #[error("song lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("playlist store rejected the song: {0}")]
    Rejected(#[source] StoreError),

    #[error("changes to playlist {playlist_id} were reverted: {source}")]
    PartialSync {
        playlist_id: String,
        #[source]
        source: StoreError,
    },
}
