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

//! # Song Share TUI.
//!
//! A terminal screen for a shared playlist: the songs people have added,
//! each with its own comment thread.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, UI rendering, and
//!   the song list controller.
//! * The **Playlist Store** notifies observers of every fetch and change,
//!   which are forwarded to the main thread as events.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the store, the input threads and the UI is handled via
//! `std::sync::mpsc` channels.

mod components;
mod config;
mod controller;
mod error;
mod events;
mod lookup;
mod model;
mod render;
mod store;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    sync::{
        Arc,
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::Duration,
};

use crate::{
    components::{LoginButton, Overlay, Platform, SongListView},
    config::AppConfig,
    controller::SongListController,
    events::{AppEvent, process_events},
    lookup::SongLookup,
    store::{MemoryStore, PlaylistStore, SqliteStore, StoreEvent},
    theme::Theme,
};

/// Message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Status {
    Info(String),
    Error(String),
}

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub store: Arc<dyn PlaylistStore>,
    pub store_subscription: u64,

    pub controller: SongListController,
    pub song_list_view: SongListView,

    pub overlay: Option<Overlay>,
    pub login_button: LoginButton,
    pub status: Option<Status>,
}

impl App {
    /// Create a new instance of application state, showing the configured
    /// playlist.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn PlaylistStore>,
        lookup: Arc<dyn SongLookup>,
    ) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();

        // Forward store notifications to the event loop.
        let store_event_tx = event_tx.clone();
        let store_subscription = store.subscribe(Arc::new(move |event: &StoreEvent| {
            store_event_tx.send(AppEvent::Store(event.clone())).ok();
        }));

        let platform = Platform::from_id(&config.login_platform).unwrap_or_else(|| {
            warn!(
                "Unknown login platform {}, using {}",
                config.login_platform,
                Platform::SPOTIFY.friendly_name
            );
            Platform::SPOTIFY
        });

        let mut controller = SongListController::new(Arc::clone(&store), lookup);
        controller
            .activate(&config.playlist_id)
            .with_context(|| format!("Failed to load playlist {}", config.playlist_id))?;

        let mut song_list_view = SongListView::new();
        song_list_view.set_songs(controller.songs());

        Ok(Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            store,
            store_subscription,
            controller,
            song_list_view,
            overlay: None,
            login_button: LoginButton::new(platform),
            status: None,
        })
    }

    /// Leaves the playlist screen, discarding the working copy and stopping
    /// store notifications.
    pub fn close(&mut self) {
        self.store.unsubscribe(self.store_subscription);
        self.controller.deactivate();
        self.song_list_view.set_songs(self.controller.songs());
        self.overlay = None;
    }
}

/// The entry point of the application.
///
/// Loads the configuration, opens the playlist store, initializes the
/// application state, manages the terminal lifecycle, and returns an error if
/// any part of the execution fails.
fn main() -> Result<()> {
    let config = config::load_config();

    util::logging::init_logging(&config)?;

    let store = open_store(&config)?;
    let lookup = config.lookup.create();

    let mut app = App::new(config, store, lookup).context("Failed to initalise application")?;

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);
    app.close();

    res.context("Application error occurred")
}

/// Opens the configured database, or an in-memory store when none is set.
fn open_store(config: &AppConfig) -> Result<Arc<dyn PlaylistStore>> {
    match config.database_file.as_deref() {
        Some(path) => {
            info!("Opening playlist database {}", path);
            let store = SqliteStore::open(path)
                .with_context(|| format!("Failed to open playlist database {}", path))?;
            Ok(Arc::new(store))
        }
        None => {
            info!("No playlist database configured, playlists will not be kept");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    util::term::set_terminal_bg(&Theme::to_hex(app.theme.background_colour))
        .context("Failed to set terminal background")?;

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// This function is "best-effort" and does not return a result, as it is
/// called during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg().ok();
    terminal.show_cursor().ok();
}

/// Starts the input and tick threads and enters the main event loop.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                tx_keys.send(AppEvent::Key(key)).ok();
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let _ = tx_tick.send(AppEvent::Tick);
            thread::sleep(Duration::from_millis(250));
        }
    });

    info!(
        "Showing playlist {} with {} songs",
        app.config.playlist_id,
        app.controller.songs().len()
    );

    terminal.draw(|f| render::draw(f, app))?;

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
