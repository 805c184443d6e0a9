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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application, songs and
//! the comment threads attached to them, together with the identifiers used
//! to address them from the store and the song list.

use std::fmt;

use xxhash_rust::xxh3::xxh3_64_with_seed;

/// Identifier of a song, unique within its playlist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct SongId(String);

impl SongId {
    /// Generates a fresh identifier for a song added from `link`.
    ///
    /// The link is hashed with a random seed, so adding the same link twice
    /// yields two distinct songs.
    pub(crate) fn generate(link: &str) -> Self {
        let hash = xxh3_64_with_seed(link.as_bytes(), rand::random());
        Self(format!("{:016x}", hash))
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SongId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SongId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a comment, unique within its song.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct CommentId(String);

impl CommentId {
    pub(crate) fn generate() -> Self {
        Self(format!("{:016x}", rand::random::<u64>()))
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CommentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CommentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Song details returned by a lookup of a source link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SongMetadata {
    pub(crate) title: String,
    pub(crate) artist: String,
    pub(crate) artwork: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Comment {
    pub(crate) id: CommentId,
    pub(crate) body: String,
}

impl Comment {
    pub(crate) fn new(body: impl Into<String>) -> Self {
        Self {
            id: CommentId::generate(),
            body: body.into(),
        }
    }

    pub(crate) fn with_id(id: impl Into<CommentId>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Song {
    pub(crate) id: SongId,
    pub(crate) title: String,
    pub(crate) artist: String,
    pub(crate) artwork: String,
    pub(crate) link: String,
    pub(crate) comments: Vec<Comment>,
}

impl Song {
    /// Builds a new song from a lookup result and the details the user gave
    /// when adding it.
    ///
    /// A blank `comment` does not start a comment thread.
    pub(crate) fn new(metadata: SongMetadata, link: &str, comment: Option<&str>) -> Self {
        let comments = comment
            .map(str::trim)
            .filter(|body| !body.is_empty())
            .map(|body| vec![Comment::new(body)])
            .unwrap_or_default();

        Self {
            id: SongId::generate(link),
            title: metadata.title,
            artist: metadata.artist,
            artwork: metadata.artwork,
            link: link.to_string(),
            comments,
        }
    }

    /// Key used to address this song's row in a rendered list.
    pub(crate) fn key(&self) -> String {
        self.id.to_string()
    }

    /// Returns a copy of this song carrying `comments` in place of its own.
    pub(crate) fn with_comments(&self, comments: Vec<Comment>) -> Self {
        Self {
            comments,
            ..self.clone()
        }
    }

    /// Returns a copy of this song without the comment `comment_id`, and the
    /// number of comments that were dropped.
    pub(crate) fn without_comment(&self, comment_id: &CommentId) -> (Self, usize) {
        let comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|comment| &comment.id != comment_id)
            .cloned()
            .collect();
        let removed = self.comments.len() - comments.len();

        (self.with_comments(comments), removed)
    }
}

#[cfg(test)]
impl Song {
    pub(crate) fn fixture(id: &str) -> Self {
        Self {
            id: SongId::from(id),
            title: format!("Title {id}"),
            artist: "Artist".to_string(),
            artwork: String::new(),
            link: format!("https://open.example/track/{id}"),
            comments: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> SongMetadata {
        SongMetadata {
            title: "Midnight City".to_string(),
            artist: "M83".to_string(),
            artwork: "https://img.example/m83.jpg".to_string(),
        }
    }

    #[test]
    fn new_song_keeps_link_and_seed_comment() {
        let song = Song::new(metadata(), "https://open.example/track/1", Some("  great intro "));

        assert_eq!(song.title, "Midnight City");
        assert_eq!(song.link, "https://open.example/track/1");
        assert_eq!(song.comments.len(), 1);
        assert_eq!(song.comments[0].body, "great intro");
        assert_eq!(song.key(), song.id.as_str());
    }

    #[test]
    fn blank_seed_comment_is_ignored() {
        assert!(Song::new(metadata(), "a", Some("   ")).comments.is_empty());
        assert!(Song::new(metadata(), "a", None).comments.is_empty());
    }

    #[test]
    fn same_link_generates_distinct_ids() {
        let first = Song::new(metadata(), "https://open.example/track/1", None);
        let second = Song::new(metadata(), "https://open.example/track/1", None);

        assert_ne!(first.id, second.id);
        assert_eq!(first.id.as_str().len(), 16);
    }

    #[test]
    fn without_comment_keeps_order_of_the_rest() {
        let song = Song::new(metadata(), "a", None).with_comments(vec![
            Comment::with_id("c1", "one"),
            Comment::with_id("c2", "two"),
            Comment::with_id("c3", "three"),
        ]);

        let (updated, removed) = song.without_comment(&CommentId::from("c2"));
        let ids: Vec<&str> = updated.comments.iter().map(|c| c.id.as_str()).collect();

        assert_eq!(removed, 1);
        assert_eq!(ids, ["c1", "c3"]);
        assert_eq!(song.comments.len(), 3);

        let (unchanged, removed) = updated.without_comment(&CommentId::from("nope"));
        assert_eq!(removed, 0);
        assert_eq!(unchanged, updated);
    }
}
