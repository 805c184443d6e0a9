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

//! UI rendering logic for the overlay.
//!
//! The overlay is drawn centred over the screen, one bordered text line per
//! field, with the cursor placed in the focused field.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};

use crate::{components::Overlay, theme::Theme};

const OVERLAY_WIDTH: u16 = 60;
const FIELD_HEIGHT: u16 = 3;

impl Overlay {
    pub(crate) fn draw(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let height = self.fields.len() as u16 * FIELD_HEIGHT + 2;
        let [area] = Layout::horizontal([Constraint::Length(OVERLAY_WIDTH)])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);

        let block = Block::default()
            .title(format!(" {} ", self.title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent_colour))
            .style(Style::default().bg(theme.overlay_bg))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);

        f.render_widget(Clear, area);
        f.render_widget(block, area);

        let rows = Layout::vertical(vec![Constraint::Length(FIELD_HEIGHT); self.fields.len()])
            .split(inner);

        for (index, (field, row)) in self.fields.iter().zip(rows.iter()).enumerate() {
            let focused = index == self.focus;
            let border = if focused {
                theme.accent_colour
            } else {
                theme.border_colour
            };

            let field_block = Block::default()
                .title(field.label)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border));
            let field_area = field_block.inner(*row);

            let width = field_area.width.max(1) as usize;
            let scroll = field.input.visual_scroll(width);
            f.render_widget(
                Paragraph::new(field.input.value())
                    .scroll((0, scroll as u16))
                    .block(field_block),
                *row,
            );

            if focused {
                let cursor = field.input.visual_cursor().saturating_sub(scroll) as u16;
                f.set_cursor_position((field_area.x + cursor, field_area.y));
            }
        }
    }
}
