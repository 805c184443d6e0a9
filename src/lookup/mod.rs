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

//! Song metadata lookup.
//!
//! A song is only ever built from a successful lookup of the link the user
//! supplied. Lookups are served either by a canned catalog response or by
//! reading the tags of a local audio file.

mod tags;

pub(crate) use tags::TagLookup;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{error::LookupError, model::SongMetadata};

pub(crate) trait SongLookup: Send + Sync {
    fn lookup(&self, link: &str) -> Result<SongMetadata, LookupError>;
}

/// Which lookup backs the add-song overlay.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum LookupSource {
    #[default]
    Fixture,
    Tags,
}

impl LookupSource {
    pub(crate) fn create(self) -> Arc<dyn SongLookup> {
        match self {
            LookupSource::Fixture => Arc::new(FixtureLookup::default()),
            LookupSource::Tags => Arc::new(TagLookup),
        }
    }
}

/// Answers every well-formed link with the same catalog entry.
///
/// Stands in for a music catalog search until the catalog can be queried.
pub(crate) struct FixtureLookup {
    response: SongMetadata,
}

impl FixtureLookup {
    pub(crate) fn new(response: SongMetadata) -> Self {
        Self { response }
    }
}

impl Default for FixtureLookup {
    fn default() -> Self {
        Self::new(SongMetadata {
            title: "Sunflower".to_string(),
            artist: "Post Malone, Swae Lee".to_string(),
            artwork: "https://i.scdn.co/image/e6b2b7a9e8f1d9e3c7a0f0d3a8c5d4b2a1f0e9d8".to_string(),
        })
    }
}

impl SongLookup for FixtureLookup {
    fn lookup(&self, link: &str) -> Result<SongMetadata, LookupError> {
        let link = link.trim();
        if link.is_empty() {
            return Err(LookupError::BlankLink);
        }
        if !has_scheme(link) {
            return Err(LookupError::UnsupportedLink(link.to_string()));
        }

        Ok(self.response.clone())
    }
}

/// Returns true for links of the form `scheme:rest`, such as
/// `https://...` or `spotify:track:...`.
fn has_scheme(link: &str) -> bool {
    match link.split_once(':') {
        Some((scheme, rest)) => {
            !rest.is_empty()
                && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_answers_links_with_a_scheme() {
        let lookup = FixtureLookup::default();

        assert_eq!(lookup.lookup("https://open.spotify.com/track/1").unwrap().title, "Sunflower");
        assert!(lookup.lookup("spotify:track:3KkXRkHbMCARz0aVfEt68P").is_ok());
    }

    #[test]
    fn fixture_rejects_blank_and_malformed_links() {
        let lookup = FixtureLookup::default();

        assert!(matches!(lookup.lookup("   "), Err(LookupError::BlankLink)));
        assert!(matches!(lookup.lookup("not a link"), Err(LookupError::UnsupportedLink(_))));
        assert!(matches!(lookup.lookup("https:"), Err(LookupError::UnsupportedLink(_))));
        assert!(matches!(lookup.lookup("1http://x"), Err(LookupError::UnsupportedLink(_))));
    }
}
