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

use log::{error, info, warn};

use crate::{
    App, Status,
    components::{Overlay, OverlayKind},
    error::SyncError,
    model::{Comment, CommentId, SongId},
    store::StoreEvent,
};

pub(super) fn handle_store_event(app: &mut App, event: StoreEvent) {
    if let Err(e) = app.controller.handle_store_event(&event) {
        report_error(app, format!("Failed to sync playlist: {}", e));
    }
}

pub(super) fn handle_refresh(app: &mut App) {
    match app.controller.refresh() {
        Ok(()) => app.status = Some(Status::Info("Playlist refreshed".to_string())),
        Err(e) => report_error(app, format!("Failed to refresh playlist: {}", e)),
    }
}

pub(super) fn handle_show_overlay(app: &mut App, kind: OverlayKind) {
    app.overlay = match kind {
        OverlayKind::AddSong => Some(Overlay::add_song()),
        OverlayKind::AddComment(song_id) => app
            .controller
            .song(&song_id)
            .map(|song| song.title.clone())
            .map(|title| Overlay::add_comment(song_id, &title)),
    };
}

pub(super) fn handle_dismiss_overlay(app: &mut App) {
    app.overlay = None;
}

pub(super) fn handle_submit_overlay(app: &mut App, kind: OverlayKind, values: Vec<String>) {
    match kind {
        OverlayKind::AddSong => submit_song(app, values),
        OverlayKind::AddComment(song_id) => submit_comment(app, song_id, values),
    }
}

fn submit_song(app: &mut App, values: Vec<String>) {
    let link = values.first().map(String::as_str).unwrap_or_default();
    let comment = values.get(1).map(String::as_str);

    match app.controller.add_song(link, comment) {
        Ok(song_id) => {
            app.overlay = None;
            let title = app
                .controller
                .song(&song_id)
                .map(|song| song.title.clone())
                .unwrap_or_else(|| song_id.to_string());
            app.status = Some(Status::Info(format!("Added {}", title)));
        }
        // The link can be corrected without retyping the comment.
        Err(SyncError::Lookup(e)) => {
            warn!("Song lookup failed: {}", e);
            app.status = Some(Status::Error(format!("Couldn't find that song: {}", e)));
        }
        Err(e) => {
            app.overlay = None;
            report_error(app, format!("Failed to add song: {}", e));
        }
    }
}

fn submit_comment(app: &mut App, song_id: SongId, values: Vec<String>) {
    app.overlay = None;

    let body = values.first().map(|body| body.trim()).unwrap_or_default();
    if body.is_empty() {
        return;
    }

    let Some(song) = app.controller.song(&song_id) else {
        report_error(app, format!("Song {} is no longer in the playlist", song_id));
        return;
    };

    let mut comments = song.comments.clone();
    comments.push(Comment::new(body));

    if let Err(e) = app.controller.add_comment(&song_id, comments) {
        report_error(app, format!("Failed to add comment: {}", e));
    }
}

pub(super) fn handle_delete_song(app: &mut App, song_id: SongId) {
    match app.controller.delete_song(&song_id) {
        Ok(0) => info!("Song {} was already gone", song_id),
        Ok(_) => app.status = Some(Status::Info("Song deleted".to_string())),
        Err(e) => report_error(app, format!("Failed to delete song: {}", e)),
    }
}

pub(super) fn handle_delete_comment(app: &mut App, song_id: SongId, comment_id: CommentId) {
    match app.controller.delete_comment(&song_id, &comment_id) {
        Ok(0) => info!("Comment {} was already gone", comment_id),
        Ok(_) => app.status = Some(Status::Info("Comment deleted".to_string())),
        Err(e) => report_error(app, format!("Failed to delete comment: {}", e)),
    }
}

pub(super) fn handle_login_pressed(app: &mut App) {
    let greeting = app.login_button.press();
    app.status = Some(Status::Info(greeting.to_string()));
}

fn report_error(app: &mut App, message: String) {
    error!("{}", message);
    app.status = Some(Status::Error(message));
}
