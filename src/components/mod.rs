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

//! Interactive widgets of the playlist screen.
//!
//! Each component keeps its own view state, translates key presses into
//! [`AppEvent`](crate::events::AppEvent)s and knows how to draw itself.

mod login_button;
mod overlay;
mod song_list;

pub(crate) use login_button::{LoginButton, Platform};
pub(crate) use overlay::{Overlay, OverlayAction, OverlayKind};
pub(crate) use song_list::SongListView;
