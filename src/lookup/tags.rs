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

//! Lookup of song metadata from local audio files.
//!
//! The link is a filesystem path, or a `file://` URL, to an audio file whose
//! tags are read with `Lofty`.

use std::path::Path;

use lofty::{prelude::*, probe::Probe};

use crate::{error::LookupError, lookup::SongLookup, model::SongMetadata};

const FILE_SCHEME: &str = "file://";

pub(crate) struct TagLookup;

impl SongLookup for TagLookup {
    fn lookup(&self, link: &str) -> Result<SongMetadata, LookupError> {
        let link = link.trim();
        if link.is_empty() {
            return Err(LookupError::BlankLink);
        }

        let path = Path::new(link.strip_prefix(FILE_SCHEME).unwrap_or(link));
        if link.contains("://") && !link.starts_with(FILE_SCHEME) {
            return Err(LookupError::UnsupportedLink(link.to_string()));
        }

        let tagged_file = Probe::open(path)
            .and_then(|p| p.read())
            .map_err(|source| LookupError::Unreadable {
                link: link.to_string(),
                source,
            })?;

        let tag = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
            .ok_or_else(|| LookupError::MissingTags(link.to_string()))?;

        let title = tag
            .title()
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty())
            .ok_or_else(|| LookupError::MissingTitle(link.to_string()))?;

        let artist = tag
            .artist()
            .map(|artist| artist.to_string())
            .unwrap_or_else(|| "Unknown Artist".to_string());

        // Embedded cover art is referenced through the file that carries it.
        let artwork = if tag.pictures().is_empty() {
            String::new()
        } else {
            path.display().to_string()
        };

        Ok(SongMetadata {
            title,
            artist,
            artwork,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_links_are_not_files() {
        let err = TagLookup.lookup("https://open.spotify.com/track/1").unwrap_err();
        assert!(matches!(err, LookupError::UnsupportedLink(_)));
    }

    #[test]
    fn missing_file_is_unreadable() {
        let err = TagLookup.lookup("file:///definitely/not/here.mp3").unwrap_err();
        assert!(matches!(err, LookupError::Unreadable { .. }));
    }

    #[test]
    fn blank_link_is_rejected() {
        assert!(matches!(TagLookup.lookup(""), Err(LookupError::BlankLink)));
    }
}
