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

//! Song list state and synchronisation with the playlist store.
//!
//! A [`SongListController`] keeps the working copy of one playlist's songs
//! that a screen displays. Every gesture is applied as a two-phase commit:
//!
//! 1. **Draft**: a new song collection is derived from the working copy.
//! 2. **Command**: the matching store command is issued.
//! 3. **Commit or revert**: on success the draft becomes both the working
//!    copy and the last confirmed snapshot; on failure the working copy is
//!    put back to the last confirmed snapshot.
//!
//! Drafts are always new collections, so a snapshot handed out by
//! [`SongListController::songs`] stays valid while a newer one is built.
//!
//! Adding a song does not append locally; the playlist is fetched again so
//! that the working copy matches the store exactly. Deleting a song sends a
//! single remove command, whereas comment edits push the whole collection
//! with [`PlaylistStore::replace_songs`].

use std::sync::Arc;

use log::{debug, info, warn};

use crate::{
    error::{StoreError, SyncError},
    lookup::SongLookup,
    model::{Comment, CommentId, Song, SongId},
    store::{PlaylistStore, StoreEvent},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SyncState {
    Uninitialized,
    Loading { playlist_id: String },
    Synced { playlist_id: String },
}

pub(crate) struct SongListController {
    store: Arc<dyn PlaylistStore>,
    lookup: Arc<dyn SongLookup>,
    state: SyncState,
    songs: Arc<Vec<Song>>,
    confirmed: Arc<Vec<Song>>,
}

impl SongListController {
    pub(crate) fn new(store: Arc<dyn PlaylistStore>, lookup: Arc<dyn SongLookup>) -> Self {
        Self {
            store,
            lookup,
            state: SyncState::Uninitialized,
            songs: Arc::new(Vec::new()),
            confirmed: Arc::new(Vec::new()),
        }
    }

    pub(crate) fn state(&self) -> &SyncState {
        &self.state
    }

    /// The playlist this controller is bound to, if any.
    pub(crate) fn playlist_id(&self) -> Option<&str> {
        match &self.state {
            SyncState::Uninitialized => None,
            SyncState::Loading { playlist_id } | SyncState::Synced { playlist_id } => {
                Some(playlist_id)
            }
        }
    }

    /// The current working copy.
    pub(crate) fn songs(&self) -> Arc<Vec<Song>> {
        Arc::clone(&self.songs)
    }

    pub(crate) fn song(&self, song_id: &SongId) -> Option<&Song> {
        self.songs.iter().find(|song| &song.id == song_id)
    }

    /// Binds the controller to a playlist and loads its songs.
    ///
    /// The controller is `Loading` until the store's snapshot arrives, which
    /// for the built-in stores happens before this returns.
    pub(crate) fn activate(&mut self, playlist_id: &str) -> Result<(), StoreError> {
        info!("Activating song list for playlist {}", playlist_id);

        self.songs = Arc::new(Vec::new());
        self.confirmed = Arc::new(Vec::new());
        self.state = SyncState::Loading {
            playlist_id: playlist_id.to_string(),
        };

        self.refresh()
    }

    /// Discards the working copy.
    pub(crate) fn deactivate(&mut self) {
        if let Some(playlist_id) = self.playlist_id() {
            info!("Deactivating song list for playlist {}", playlist_id);
        }

        self.state = SyncState::Uninitialized;
        self.songs = Arc::new(Vec::new());
        self.confirmed = Arc::new(Vec::new());
    }

    /// Fetches the playlist again and adopts the store's songs.
    pub(crate) fn refresh(&mut self) -> Result<(), StoreError> {
        let Some(playlist_id) = self.playlist_id().map(str::to_string) else {
            return Ok(());
        };

        let songs = self.store.fetch_songs(&playlist_id)?;
        self.adopt(playlist_id, songs);

        Ok(())
    }

    /// Reacts to a notification from the store.
    ///
    /// A change to this controller's playlist triggers a fetch. Events about
    /// other playlists are ignored.
    ///
    /// Delivered snapshots are never adopted: by the time a queued
    /// [`StoreEvent::Refreshed`] is handled, a newer commit may already be
    /// confirmed, and drafting from the older snapshot would overwrite it.
    /// Only the result of a fetch made here replaces the working copy.
    pub(crate) fn handle_store_event(&mut self, event: &StoreEvent) -> Result<(), StoreError> {
        if self.playlist_id() != Some(event.playlist_id()) {
            return Ok(());
        }

        match event {
            StoreEvent::Refreshed { .. } => Ok(()),
            StoreEvent::Changed { .. } => self.refresh(),
        }
    }

    /// Looks up `link`, adds the resulting song to the playlist and fetches
    /// the playlist again.
    ///
    /// # Errors
    ///
    /// * [`SyncError::Lookup`] if the lookup fails; no song is created.
    /// * [`SyncError::Rejected`] if the store refuses the song.
    pub(crate) fn add_song(&mut self, link: &str, comment: Option<&str>) -> Result<SongId, SyncError> {
        let playlist_id = self.synced_playlist()?;

        let metadata = self.lookup.lookup(link)?;
        let song = Song::new(metadata, link.trim(), comment);
        let song_id = song.id.clone();

        debug!("Adding song {} ({}) to playlist {}", song_id, song.title, playlist_id);

        self.store
            .add_song(&playlist_id, song)
            .map_err(SyncError::Rejected)?;

        // The song is in the store whether or not the fetch succeeds.
        if let Err(e) = self.refresh() {
            warn!("Failed to fetch playlist {} after adding a song: {}", playlist_id, e);
            return Err(SyncError::PartialSync {
                playlist_id,
                source: e,
            });
        }

        Ok(song_id)
    }

    /// Removes a song from the working copy and the playlist.
    ///
    /// Returns how many songs were removed from the working copy; deleting a
    /// song that is not there removes nothing and is not an error.
    pub(crate) fn delete_song(&mut self, song_id: &SongId) -> Result<usize, SyncError> {
        let playlist_id = self.synced_playlist()?;

        let draft: Vec<Song> = self
            .songs
            .iter()
            .filter(|song| &song.id != song_id)
            .cloned()
            .collect();
        let removed = self.songs.len() - draft.len();

        debug!("Deleting song {} from playlist {}", song_id, playlist_id);

        self.commit(&playlist_id, draft, |store, _| {
            store.remove_song(&playlist_id, song_id).map(|_| ())
        })?;

        Ok(removed)
    }

    /// Replaces the comment thread of a song with `comments`.
    ///
    /// Returns how many songs matched `song_id`.
    pub(crate) fn add_comment(&mut self, song_id: &SongId, comments: Vec<Comment>) -> Result<usize, SyncError> {
        let playlist_id = self.synced_playlist()?;

        let mut matched = 0;
        let draft: Vec<Song> = self
            .songs
            .iter()
            .map(|song| {
                if &song.id == song_id {
                    matched += 1;
                    song.with_comments(comments.clone())
                } else {
                    song.clone()
                }
            })
            .collect();

        debug!(
            "Setting {} comments on song {} in playlist {}",
            comments.len(),
            song_id,
            playlist_id
        );

        self.commit(&playlist_id, draft, |store, draft| {
            store.replace_songs(&playlist_id, draft)
        })?;

        Ok(matched)
    }

    /// Removes a comment from a song's thread.
    ///
    /// Returns how many comments were removed.
    pub(crate) fn delete_comment(&mut self, song_id: &SongId, comment_id: &CommentId) -> Result<usize, SyncError> {
        let playlist_id = self.synced_playlist()?;

        let mut removed = 0;
        let draft: Vec<Song> = self
            .songs
            .iter()
            .map(|song| {
                if &song.id == song_id {
                    let (song, count) = song.without_comment(comment_id);
                    removed += count;
                    song
                } else {
                    song.clone()
                }
            })
            .collect();

        debug!(
            "Deleting comment {} from song {} in playlist {}",
            comment_id, song_id, playlist_id
        );

        self.commit(&playlist_id, draft, |store, draft| {
            store.replace_songs(&playlist_id, draft)
        })?;

        Ok(removed)
    }

    fn synced_playlist(&self) -> Result<String, SyncError> {
        match &self.state {
            SyncState::Synced { playlist_id } => Ok(playlist_id.clone()),
            _ => Err(SyncError::NotSynced),
        }
    }

    fn adopt(&mut self, playlist_id: String, songs: Vec<Song>) {
        debug!("Synced {} songs for playlist {}", songs.len(), playlist_id);

        let songs = Arc::new(songs);
        self.confirmed = Arc::clone(&songs);
        self.songs = songs;
        self.state = SyncState::Synced { playlist_id };
    }

    /// Shows `draft` immediately, runs `command` against the store, and
    /// either confirms the draft or reverts to the last confirmed songs.
    fn commit<F>(&mut self, playlist_id: &str, draft: Vec<Song>, command: F) -> Result<(), SyncError>
    where
        F: FnOnce(&dyn PlaylistStore, Vec<Song>) -> Result<(), StoreError>,
    {
        let draft = Arc::new(draft);
        self.songs = Arc::clone(&draft);

        match command(self.store.as_ref(), draft.as_ref().clone()) {
            Ok(()) => {
                self.confirmed = draft;
                Ok(())
            }
            Err(e) => {
                warn!("Reverting song list for playlist {}: {}", playlist_id, e);
                self.songs = Arc::clone(&self.confirmed);
                Err(SyncError::PartialSync {
                    playlist_id: playlist_id.to_string(),
                    source: e,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::{
        error::LookupError,
        lookup::FixtureLookup,
        store::{MemoryStore, Observer},
    };

    /// Delegates to a [`MemoryStore`] until told to fail every command.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        failing: AtomicBool,
    }

    impl FlakyStore {
        fn fail(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        fn check(&self) -> Result<(), StoreError> {
            if self.failing.load(Ordering::SeqCst) {
                Err(StoreError::Database(rusqlite::Error::InvalidQuery))
            } else {
                Ok(())
            }
        }
    }

    impl PlaylistStore for FlakyStore {
        fn fetch_songs(&self, playlist_id: &str) -> Result<Vec<Song>, StoreError> {
            self.check()?;
            self.inner.fetch_songs(playlist_id)
        }

        fn add_song(&self, playlist_id: &str, song: Song) -> Result<(), StoreError> {
            self.check()?;
            self.inner.add_song(playlist_id, song)
        }

        fn replace_songs(&self, playlist_id: &str, songs: Vec<Song>) -> Result<(), StoreError> {
            self.check()?;
            self.inner.replace_songs(playlist_id, songs)
        }

        fn remove_song(&self, playlist_id: &str, song_id: &SongId) -> Result<usize, StoreError> {
            self.check()?;
            self.inner.remove_song(playlist_id, song_id)
        }

        fn subscribe(&self, observer: Observer) -> u64 {
            self.inner.subscribe(observer)
        }

        fn unsubscribe(&self, token: u64) {
            self.inner.unsubscribe(token)
        }
    }

    fn controller_for(store: Arc<dyn PlaylistStore>, playlist_id: &str) -> SongListController {
        let mut controller = SongListController::new(store, Arc::new(FixtureLookup::default()));
        controller.activate(playlist_id).unwrap();
        controller
    }

    fn seeded(ids: &[&str]) -> Arc<FlakyStore> {
        let store = Arc::new(FlakyStore::default());
        for id in ids {
            store.add_song("p1", Song::fixture(id)).unwrap();
        }
        store
    }

    fn comment_ids(song: &Song) -> Vec<&str> {
        song.comments.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn comment_and_song_lifecycle_stays_in_sync() {
        let store = seeded(&["s1"]);
        let mut controller = controller_for(store.clone(), "p1");
        let s1 = SongId::from("s1");
        let nice = Comment::with_id("c1", "nice");

        assert_eq!(controller.add_comment(&s1, vec![nice.clone()]).unwrap(), 1);
        assert_eq!(controller.song(&s1).unwrap().comments, [nice.clone()]);
        assert_eq!(store.fetch_songs("p1").unwrap()[0].comments, [nice]);

        assert_eq!(controller.delete_comment(&s1, &CommentId::from("c1")).unwrap(), 1);
        assert!(controller.song(&s1).unwrap().comments.is_empty());
        assert!(store.fetch_songs("p1").unwrap()[0].comments.is_empty());

        assert_eq!(controller.delete_song(&s1).unwrap(), 1);
        assert!(controller.songs().is_empty());
        assert!(store.fetch_songs("p1").unwrap().is_empty());
    }

    #[test]
    fn activation_loads_the_playlist() {
        let store = seeded(&["s1", "s2"]);
        let mut controller = SongListController::new(store, Arc::new(FixtureLookup::default()));

        assert_eq!(*controller.state(), SyncState::Uninitialized);
        assert!(matches!(
            controller.delete_song(&SongId::from("s1")),
            Err(SyncError::NotSynced)
        ));

        controller.activate("p1").unwrap();

        assert_eq!(
            *controller.state(),
            SyncState::Synced { playlist_id: "p1".to_string() }
        );
        let keys: Vec<String> = controller.songs().iter().map(Song::key).collect();
        assert_eq!(keys, ["s1", "s2"]);

        controller.deactivate();
        assert_eq!(*controller.state(), SyncState::Uninitialized);
        assert!(controller.songs().is_empty());
    }

    #[test]
    fn unknown_playlist_activates_empty() {
        let controller = controller_for(Arc::new(MemoryStore::new()), "nothing-here");

        assert!(controller.songs().is_empty());
        assert_eq!(controller.playlist_id(), Some("nothing-here"));
    }

    #[test]
    fn added_song_round_trips_through_the_store() {
        let store = seeded(&["s1"]);
        let mut controller = controller_for(store.clone(), "p1");

        let id = controller
            .add_song(" https://open.spotify.com/track/42 ", Some("on repeat"))
            .unwrap();

        let fetched = store.fetch_songs("p1").unwrap();
        let added = fetched.iter().find(|song| song.id == id).unwrap();
        assert_eq!(added.title, "Sunflower");
        assert_eq!(added.link, "https://open.spotify.com/track/42");
        assert_eq!(added.comments.len(), 1);
        assert_eq!(added.comments[0].body, "on repeat");

        // The working copy is the re-fetched playlist, with the new song last.
        assert_eq!(controller.songs().as_slice(), fetched.as_slice());
        assert_eq!(controller.songs().last().unwrap().id, id);
    }

    #[test]
    fn failed_lookup_creates_no_song() {
        let store = seeded(&["s1"]);
        let mut controller = controller_for(store.clone(), "p1");

        let err = controller.add_song("   ", None).unwrap_err();

        assert!(matches!(err, SyncError::Lookup(LookupError::BlankLink)));
        assert_eq!(store.fetch_songs("p1").unwrap().len(), 1);
        assert_eq!(controller.songs().len(), 1);
    }

    #[test]
    fn rejected_song_leaves_working_copy_alone() {
        let store = seeded(&["s1"]);
        let mut controller = controller_for(store.clone(), "p1");
        store.fail(true);

        let err = controller.add_song("https://open.spotify.com/track/1", None).unwrap_err();

        assert!(matches!(err, SyncError::Rejected(_)));
        assert_eq!(controller.songs().len(), 1);
    }

    #[test]
    fn deleting_a_missing_song_is_idempotent() {
        let store = seeded(&["s1", "s2"]);
        let mut controller = controller_for(store.clone(), "p1");
        let before = controller.songs();

        assert_eq!(controller.delete_song(&SongId::from("nope")).unwrap(), 0);
        assert_eq!(controller.songs(), before);

        assert_eq!(controller.delete_song(&SongId::from("s1")).unwrap(), 1);
        let once = controller.songs();
        assert_eq!(controller.delete_song(&SongId::from("s1")).unwrap(), 0);

        assert_eq!(controller.songs(), once);
        assert_eq!(store.fetch_songs("p1").unwrap().as_slice(), once.as_slice());
    }

    #[test]
    fn add_comment_replaces_the_whole_thread() {
        let store = seeded(&["s1", "s2"]);
        let mut controller = controller_for(store.clone(), "p1");
        let s1 = SongId::from("s1");
        let s2 = SongId::from("s2");

        controller
            .add_comment(&s2, vec![Comment::with_id("k1", "keep me")])
            .unwrap();
        controller
            .add_comment(&s1, vec![Comment::with_id("old", "stale")])
            .unwrap();
        let matched = controller
            .add_comment(
                &s1,
                vec![Comment::with_id("c1", "first"), Comment::with_id("c2", "second")],
            )
            .unwrap();

        assert_eq!(matched, 1);
        let fetched = store.fetch_songs("p1").unwrap();
        assert_eq!(comment_ids(&fetched[0]), ["c1", "c2"]);
        assert_eq!(comment_ids(&fetched[1]), ["k1"]);
        assert_eq!(controller.songs().as_slice(), fetched.as_slice());

        assert_eq!(controller.add_comment(&SongId::from("nope"), vec![]).unwrap(), 0);
    }

    #[test]
    fn delete_comment_preserves_remaining_order() {
        let store = seeded(&["s1"]);
        let mut controller = controller_for(store.clone(), "p1");
        let s1 = SongId::from("s1");
        let thread = ["c1", "c2", "c3", "c4"]
            .iter()
            .map(|id| Comment::with_id(*id, format!("comment {id}")))
            .collect();
        controller.add_comment(&s1, thread).unwrap();

        assert_eq!(controller.delete_comment(&s1, &CommentId::from("c2")).unwrap(), 1);
        assert_eq!(controller.delete_comment(&s1, &CommentId::from("c2")).unwrap(), 0);

        assert_eq!(comment_ids(controller.song(&s1).unwrap()), ["c1", "c3", "c4"]);
        assert_eq!(comment_ids(&store.fetch_songs("p1").unwrap()[0]), ["c1", "c3", "c4"]);
    }

    #[test]
    fn store_failure_reverts_each_mutation() {
        let store = seeded(&["s1", "s2"]);
        let mut controller = controller_for(store.clone(), "p1");
        let s1 = SongId::from("s1");
        controller
            .add_comment(&s1, vec![Comment::with_id("c1", "nice")])
            .unwrap();
        let confirmed = controller.songs();

        store.fail(true);

        assert!(matches!(
            controller.delete_song(&s1),
            Err(SyncError::PartialSync { .. })
        ));
        assert_eq!(controller.songs(), confirmed);

        assert!(matches!(
            controller.add_comment(&s1, vec![]),
            Err(SyncError::PartialSync { .. })
        ));
        assert_eq!(controller.songs(), confirmed);

        assert!(matches!(
            controller.delete_comment(&s1, &CommentId::from("c1")),
            Err(SyncError::PartialSync { .. })
        ));
        assert_eq!(controller.songs(), confirmed);

        store.fail(false);
        assert_eq!(store.fetch_songs("p1").unwrap().as_slice(), confirmed.as_slice());
    }

    #[test]
    fn earlier_snapshots_survive_mutations() {
        let store = seeded(&["s1", "s2"]);
        let mut controller = controller_for(store, "p1");

        let snapshot = controller.songs();
        controller.delete_song(&SongId::from("s1")).unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(controller.songs().len(), 1);
    }

    #[test]
    fn store_events_resync_other_screens() {
        let store: Arc<dyn PlaylistStore> = Arc::new(MemoryStore::new());
        store.add_song("p1", Song::fixture("s1")).unwrap();
        store.add_song("p2", Song::fixture("s9")).unwrap();

        let mut editor = controller_for(Arc::clone(&store), "p1");
        let mut viewer = controller_for(Arc::clone(&store), "p1");
        let mut other = controller_for(Arc::clone(&store), "p2");

        editor
            .add_comment(&SongId::from("s1"), vec![Comment::with_id("c1", "nice")])
            .unwrap();
        assert!(viewer.songs()[0].comments.is_empty());

        let changed = StoreEvent::Changed { playlist_id: "p1".to_string() };
        viewer.handle_store_event(&changed).unwrap();
        other.handle_store_event(&changed).unwrap();

        assert_eq!(viewer.songs(), editor.songs());
        assert_eq!(other.songs()[0].key(), "s9");

        let stale = StoreEvent::Refreshed {
            playlist_id: "p1".to_string(),
            songs: vec![],
        };
        other.handle_store_event(&stale).unwrap();
        viewer.handle_store_event(&stale).unwrap();

        assert_eq!(other.songs().len(), 1);
        assert_eq!(viewer.songs(), editor.songs());
    }

    #[test]
    fn queued_snapshot_does_not_undo_a_newer_comment() {
        let store = seeded(&["s1"]);
        let mut controller = controller_for(store.clone(), "p1");
        let s1 = SongId::from("s1");

        let first = Comment::with_id("c1", "first");
        controller.add_comment(&s1, vec![first.clone()]).unwrap();
        let before = StoreEvent::Refreshed {
            playlist_id: "p1".to_string(),
            songs: store.fetch_songs("p1").unwrap(),
        };

        let second = Comment::with_id("c2", "second");
        controller
            .add_comment(&s1, vec![first.clone(), second.clone()])
            .unwrap();
        controller.handle_store_event(&before).unwrap();

        let third = Comment::with_id("c3", "third");
        let mut thread = controller.song(&s1).unwrap().comments.clone();
        thread.push(third);
        controller.add_comment(&s1, thread).unwrap();

        assert_eq!(comment_ids(&store.fetch_songs("p1").unwrap()[0]), ["c1", "c2", "c3"]);
    }
}
