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

//! UI rendering logic for the song list view.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
};

use crate::{
    components::SongListView,
    model::Song,
    render::icons::{ICON_COMMENT, ICON_SONG},
    theme::Theme,
};

impl SongListView {
    pub(crate) fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let border_style = Style::default().fg(theme.border_colour);
        let highlight_style = Style::default()
            .bg(theme.highlight_bg)
            .add_modifier(Modifier::BOLD);

        let songs_block = Block::default()
            .title(format!(" Songs ({}) ", self.songs.len()))
            .borders(Borders::ALL)
            .border_style(border_style)
            .padding(Padding::horizontal(1));

        if self.songs.is_empty() {
            f.render_widget(
                Paragraph::new("No songs yet, press 'a' to add one.")
                    .style(Style::default().fg(theme.status_fg))
                    .block(songs_block),
                chunks[0],
            );
        } else {
            let items: Vec<ListItem> = self
                .songs
                .iter()
                .map(|song| song_item(song, theme))
                .collect();

            let list = List::new(items)
                .block(songs_block)
                .highlight_style(highlight_style);

            f.render_stateful_widget(list, chunks[0], &mut self.song_state);
        }

        let comments_block = Block::default()
            .title(" Comments ")
            .borders(Borders::ALL)
            .border_style(border_style)
            .padding(Padding::horizontal(1));

        let comment_items: Vec<ListItem> = self
            .song_state
            .selected()
            .and_then(|i| self.songs.get(i))
            .map(|song| {
                song.comments
                    .iter()
                    .map(|comment| {
                        ListItem::new(Line::from(vec![
                            Span::raw(format!("{} ", ICON_COMMENT)),
                            Span::styled(comment.body.as_str(), Style::default().fg(theme.comment_fg)),
                        ]))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let comments = List::new(comment_items)
            .block(comments_block)
            .highlight_style(highlight_style);

        f.render_stateful_widget(comments, chunks[1], &mut self.comment_state);
    }
}

fn song_item<'a>(song: &'a Song, theme: &Theme) -> ListItem<'a> {
    let title = Line::from(vec![
        Span::styled(format!("{} ", ICON_SONG), Style::default().fg(theme.accent_colour)),
        Span::styled(
            song.title.as_str(),
            Style::default()
                .fg(theme.song_title_fg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} {}", ICON_COMMENT, song.comments.len()),
            Style::default().fg(theme.comment_count_fg),
        ),
    ]);

    let artist = Line::from(Span::styled(
        format!("  {}", song.artist),
        Style::default().fg(theme.song_artist_fg),
    ));

    let link = Line::from(Span::styled(
        format!("  {}", song.link),
        Style::default().fg(theme.song_link_fg),
    ));

    ListItem::new(vec![title, artist, link])
}
