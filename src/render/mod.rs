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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every event to provide a reactive user interface.

pub(crate) mod icons;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::{App, controller::SyncState, render::status::draw_status};

/// Renders the user interface to the terminal frame.
///
/// The screen is split into a header with the playlist name and the login
/// button, the song list, and a one line status bar. An open overlay is
/// drawn last, over everything else.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(32)])
        .split(outer[0]);

    let playlist = match app.controller.state() {
        SyncState::Uninitialized => "No playlist".to_string(),
        SyncState::Loading { playlist_id } => format!("{} (loading)", playlist_id),
        SyncState::Synced { playlist_id } => playlist_id.clone(),
    };

    let title = Line::from(vec![
        Span::styled(
            format!("{} ", icons::ICON_SONG),
            Style::default().fg(app.theme.accent_colour),
        ),
        Span::styled(playlist, Style::default().add_modifier(Modifier::BOLD)),
    ]);

    f.render_widget(
        Paragraph::new(title).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(app.theme.border_colour))
                .padding(Padding::horizontal(1)),
        ),
        header[0],
    );

    let button_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1)])
        .margin(1)
        .split(header[1]);
    app.login_button.draw(f, button_area[0]);

    app.song_list_view.draw(f, outer[1], &app.theme);

    draw_status(f, outer[2], app);

    if let Some(overlay) = app.overlay.as_ref() {
        overlay.draw(f, area, &app.theme);
    }
}
