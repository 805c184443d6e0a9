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

//! Event routing for the song list view.
//!
//! Navigation keys move the song and comment selection; gesture keys are
//! turned into application events that act on the selected song.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode};

use crate::{
    components::{OverlayKind, SongListView},
    events::{AppEvent, AppEventProcessor},
};

impl AppEventProcessor for SongListView {
    fn process_event(&mut self, event: Event, event_tx: &Sender<AppEvent>) -> Result<()> {
        let Event::Key(key_event) = event else {
            return Ok(());
        };

        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => self.next_song(),
            KeyCode::Char('k') | KeyCode::Up => self.previous_song(),
            KeyCode::Char('J') => self.next_comment(),
            KeyCode::Char('K') => self.previous_comment(),

            KeyCode::Char('a') => event_tx.send(AppEvent::ShowOverlay(OverlayKind::AddSong))?,

            KeyCode::Char('c') => {
                if let Some(song) = self.selected_song() {
                    let kind = OverlayKind::AddComment(song.id.clone());
                    event_tx.send(AppEvent::ShowOverlay(kind))?;
                }
            }

            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(song) = self.selected_song() {
                    event_tx.send(AppEvent::DeleteSong(song.id.clone()))?;
                }
            }

            KeyCode::Char('x') => {
                if let (Some(song), Some(comment)) = (self.selected_song(), self.selected_comment()) {
                    event_tx.send(AppEvent::DeleteComment(song.id.clone(), comment.id.clone()))?;
                }
            }

            _ => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, mpsc};

    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;
    use crate::model::{Comment, CommentId, Song, SongId};

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn view() -> SongListView {
        let mut view = SongListView::new();
        view.set_songs(Arc::new(vec![
            Song::fixture("s1"),
            Song::fixture("s2").with_comments(vec![Comment::with_id("c1", "nice")]),
        ]));
        view
    }

    #[test]
    fn gestures_act_on_the_selected_song() {
        let (tx, rx) = mpsc::channel();
        let mut view = view();

        view.process_event(key('j'), &tx).unwrap();
        view.process_event(key('x'), &tx).unwrap();
        view.process_event(key('c'), &tx).unwrap();
        view.process_event(key('d'), &tx).unwrap();

        let s2 = SongId::from("s2");
        assert!(matches!(
            rx.try_recv().unwrap(),
            AppEvent::DeleteComment(song, comment) if song == s2 && comment == CommentId::from("c1")
        ));
        assert!(matches!(
            rx.try_recv().unwrap(),
            AppEvent::ShowOverlay(OverlayKind::AddComment(song)) if song == s2
        ));
        assert!(matches!(rx.try_recv().unwrap(), AppEvent::DeleteSong(song) if song == s2));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn deleting_a_comment_needs_one_selected() {
        let (tx, rx) = mpsc::channel();
        let mut view = view();

        view.process_event(key('x'), &tx).unwrap();
        assert!(rx.try_recv().is_err());

        let mut empty = SongListView::new();
        empty.process_event(key('d'), &tx).unwrap();
        empty.process_event(key('c'), &tx).unwrap();
        assert!(rx.try_recv().is_err());

        empty.process_event(key('a'), &tx).unwrap();
        assert!(matches!(rx.try_recv().unwrap(), AppEvent::ShowOverlay(OverlayKind::AddSong)));
    }
}
