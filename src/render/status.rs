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

//! Render the status bar.
//!
//! The bar shows the outcome of the last gesture, or the key bindings when
//! there is nothing to report.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
};

use crate::{App, Status, render::icons::ICON_ADD};

const SONG_KEYS: &str = "a add  c comment  d delete  x delete comment  r refresh  L log in  q quit";
const OVERLAY_KEYS: &str = "Tab next field  Enter submit  Esc cancel";

pub(crate) fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let container = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1)])
        .horizontal_margin(1)
        .split(area);

    let (text, colour) = match &app.status {
        Some(Status::Info(message)) => (message.clone(), app.theme.status_fg),
        Some(Status::Error(message)) => (message.clone(), app.theme.error_fg),
        None if app.overlay.is_some() => (OVERLAY_KEYS.to_string(), app.theme.status_fg),
        None => (format!("{} {}", ICON_ADD, SONG_KEYS), app.theme.status_fg),
    };

    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(colour)),
        container[0],
    );
}
