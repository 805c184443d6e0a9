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

//! Input handling for the overlay.
//!
//! `Tab` and `BackTab` move between fields, `Enter` submits, `Esc` dismisses,
//! and every other key is delegated to the focused text input.

use crossterm::event::{Event, KeyCode};
use tui_input::backend::crossterm::EventHandler;

use crate::components::{Overlay, OverlayAction};

impl Overlay {
    pub(crate) fn process_event(&mut self, event: &Event) -> Option<OverlayAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        match key_event.code {
            KeyCode::Esc => Some(OverlayAction::Dismiss),
            KeyCode::Enter => Some(OverlayAction::Submit(self.values())),
            KeyCode::Tab => {
                self.focus_next();
                None
            }
            KeyCode::BackTab => {
                self.focus_previous();
                None
            }
            _ => {
                if let Some(field) = self.fields.get_mut(self.focus) {
                    field.input.handle_event(event);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;
    use crate::{components::OverlayKind, model::SongId};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(overlay: &mut Overlay, text: &str) {
        for c in text.chars() {
            assert_eq!(overlay.process_event(&key(KeyCode::Char(c))), None);
        }
    }

    #[test]
    fn add_song_collects_link_and_comment() {
        let mut overlay = Overlay::add_song();

        type_text(&mut overlay, "https://x.test/1");
        overlay.process_event(&key(KeyCode::Tab));
        type_text(&mut overlay, "banger");

        assert_eq!(
            overlay.process_event(&key(KeyCode::Enter)),
            Some(OverlayAction::Submit(vec![
                "https://x.test/1".to_string(),
                "banger".to_string()
            ]))
        );
    }

    #[test]
    fn focus_wraps_around_fields() {
        let mut overlay = Overlay::add_song();

        overlay.process_event(&key(KeyCode::BackTab));
        type_text(&mut overlay, "c");
        overlay.process_event(&key(KeyCode::Tab));
        type_text(&mut overlay, "l");

        assert_eq!(
            overlay.process_event(&key(KeyCode::Enter)),
            Some(OverlayAction::Submit(vec!["l".to_string(), "c".to_string()]))
        );
    }

    #[test]
    fn escape_dismisses() {
        let mut overlay = Overlay::add_comment(SongId::from("s1"), "Sunflower");

        assert_eq!(overlay.title(), "Comment on Sunflower");
        assert_eq!(*overlay.kind(), OverlayKind::AddComment(SongId::from("s1")));
        assert_eq!(overlay.process_event(&key(KeyCode::Esc)), Some(OverlayAction::Dismiss));
    }
}
