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

//! Application events and the main event loop.
//!
//! Every input reaches the application as an [`AppEvent`] on a single
//! channel: key presses and ticks from background threads, store
//! notifications from the playlist store's observers, and the gestures the
//! views derive from key presses.
//!
//! # Organization
//!
//! * [`key_handlers`]: routes key presses to the overlay, the song list view,
//!   or the global key bindings.
//! * [`handlers`]: applies the remaining events to the application state.

mod handlers;
mod key_handlers;

use handlers::*;
use key_handlers::process_key_event;

use std::{io::Stdout, sync::mpsc::Sender};

use anyhow::Result;
use crossterm::event::{Event, KeyEvent};
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App,
    components::OverlayKind,
    model::{CommentId, SongId},
    render::draw,
    store::StoreEvent,
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Tick,

    Store(StoreEvent),
    Refresh,

    ShowOverlay(OverlayKind),
    DismissOverlay,
    SubmitOverlay(OverlayKind, Vec<String>),

    DeleteSong(SongId),
    DeleteComment(SongId, CommentId),

    LoginPressed,

    ExitApplication,
}

pub(crate) trait AppEventProcessor {
    fn process_event(&mut self, event: Event, event_tx: &Sender<AppEvent>) -> Result<()>;
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        process_event(app, event)?;

        terminal.draw(|f| draw(f, app))?;
    }
    Ok(())
}

/// Applies one event to the application state and refreshes the song list
/// view from the controller's working copy.
pub(crate) fn process_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => process_key_event(app, key)?,
        AppEvent::Store(store_event) => handle_store_event(app, store_event),
        AppEvent::Refresh => handle_refresh(app),
        AppEvent::ShowOverlay(kind) => handle_show_overlay(app, kind),
        AppEvent::DismissOverlay => handle_dismiss_overlay(app),
        AppEvent::SubmitOverlay(kind, values) => handle_submit_overlay(app, kind, values),
        AppEvent::DeleteSong(song_id) => handle_delete_song(app, song_id),
        AppEvent::DeleteComment(song_id, comment_id) => {
            handle_delete_comment(app, song_id, comment_id)
        }
        AppEvent::LoginPressed => handle_login_pressed(app),
        AppEvent::Tick | AppEvent::ExitApplication => {}
    }

    app.song_list_view.set_songs(app.controller.songs());

    Ok(())
}
