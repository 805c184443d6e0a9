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

//! UI rendering logic for the login button.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::components::LoginButton;

impl LoginButton {
    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let style = Style::default()
            .fg(self.platform.secondary)
            .bg(self.platform.primary);

        let line = Line::from(vec![
            Span::raw(format!(" {} ", self.platform.glyph)),
            Span::styled(self.label(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" "),
        ]);

        f.render_widget(
            Paragraph::new(line).style(style).alignment(Alignment::Center),
            area,
        );
    }
}
