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

//! Unicode symbols for the TUI.
//!
//! These are selected for compatibility with most modern terminal emulators
//! and fonts.

pub(crate) const ICON_SONG: &str = "\u{266B}";
pub(crate) const ICON_COMMENT: &str = "\u{1F4AC}";
pub(crate) const ICON_ADD: &str = "\u{2795}";

// Login platform glyphs, text-style variants (using Variation Selector-15
// [\u{FE0E}]) so they respect the button's colours.
pub(crate) const GLYPH_SPOTIFY: &str = "\u{25CF}\u{FE0E}";
pub(crate) const GLYPH_YOUTUBE: &str = "\u{25B6}\u{FE0E}";
pub(crate) const GLYPH_SOUNDCLOUD: &str = "\u{2601}\u{FE0E}";
