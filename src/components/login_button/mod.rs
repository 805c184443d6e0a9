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

//! Social login button.
//!
//! The button is cosmetic: it is drawn in the brand colours of a login
//! platform and only greets the user when pressed.

mod render;

use log::warn;
use ratatui::style::Color;

use crate::render::icons::{GLYPH_SOUNDCLOUD, GLYPH_SPOTIFY, GLYPH_YOUTUBE};

const GREETING: &str = "Hello.";

/// Display details of a login platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Platform {
    pub(crate) id: &'static str,
    pub(crate) friendly_name: &'static str,
    pub(crate) primary: Color,
    pub(crate) secondary: Color,
    pub(crate) glyph: &'static str,
}

impl Platform {
    pub(crate) const SPOTIFY: Platform = Platform {
        id: "spotify",
        friendly_name: "Spotify",
        primary: Color::Rgb(30, 215, 96),
        secondary: Color::Rgb(25, 20, 20),
        glyph: GLYPH_SPOTIFY,
    };

    pub(crate) const YOUTUBE: Platform = Platform {
        id: "youtube",
        friendly_name: "YouTube",
        primary: Color::Rgb(255, 0, 0),
        secondary: Color::Rgb(255, 255, 255),
        glyph: GLYPH_YOUTUBE,
    };

    pub(crate) const SOUNDCLOUD: Platform = Platform {
        id: "soundcloud",
        friendly_name: "SoundCloud",
        primary: Color::Rgb(255, 85, 0),
        secondary: Color::Rgb(255, 255, 255),
        glyph: GLYPH_SOUNDCLOUD,
    };

    const ALL: [Platform; 3] = [Platform::SPOTIFY, Platform::YOUTUBE, Platform::SOUNDCLOUD];

    /// Finds a platform by its id, ignoring case.
    pub(crate) fn from_id(id: &str) -> Option<Platform> {
        Self::ALL
            .into_iter()
            .find(|platform| platform.id.eq_ignore_ascii_case(id.trim()))
    }
}

pub(crate) struct LoginButton {
    platform: Platform,
}

impl LoginButton {
    pub(crate) fn new(platform: Platform) -> Self {
        Self { platform }
    }

    pub(crate) fn label(&self) -> String {
        format!("Log In With {}", self.platform.friendly_name)
    }

    /// Handles a press of the button, returning the message to show.
    pub(crate) fn press(&self) -> &'static str {
        warn!("{}", GREETING);
        GREETING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platforms_are_found_by_id() {
        assert_eq!(Platform::from_id("spotify"), Some(Platform::SPOTIFY));
        assert_eq!(Platform::from_id(" SoundCloud "), Some(Platform::SOUNDCLOUD));
        assert_eq!(Platform::from_id("napster"), None);
    }

    #[test]
    fn label_names_the_platform() {
        let button = LoginButton::new(Platform::YOUTUBE);

        assert_eq!(button.label(), "Log In With YouTube");
        assert_eq!(button.press(), "Hello.");
    }
}
