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

//! Keyboard routing.
//!
//! An open overlay takes every key press. Otherwise the song list view sees
//! the key first, followed by the global key bindings. Any key press clears
//! the status bar.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent};

use crate::{
    App,
    components::OverlayAction,
    events::{AppEvent, AppEventProcessor},
};

/// Maps keyboard input to application events.
///
/// # Errors
///
/// Returns an error if an event cannot be sent to the event loop.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let event = Event::Key(key);
    app.status = None;

    if let Some(overlay) = app.overlay.as_mut() {
        match overlay.process_event(&event) {
            Some(OverlayAction::Submit(values)) => {
                let kind = overlay.kind().clone();
                app.event_tx.send(AppEvent::SubmitOverlay(kind, values))?;
            }
            Some(OverlayAction::Dismiss) => app.event_tx.send(AppEvent::DismissOverlay)?,
            None => {}
        }
        return Ok(());
    }

    app.song_list_view.process_event(event, &app.event_tx)?;

    process_global_key_event(app, key)
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,
        KeyCode::Char('r') => app.event_tx.send(AppEvent::Refresh)?,
        KeyCode::Char('L') => app.event_tx.send(AppEvent::LoginPressed)?,
        _ => {}
    }

    Ok(())
}
