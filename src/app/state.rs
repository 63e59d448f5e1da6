// src/app/state.rs
//! Application state: the glue between picker, player, and visualizer.

use std::{
    env,
    path::PathBuf,
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Margin, Rect},
    widgets::ListState,
    Frame,
};

use crate::{
    audio::{display_title, load_metadata, Player, TraceSurface, TrackMetadata, Visualizer},
    fs::{load_entries, tail_path, Entry},
    ui::{
        keybindings::{key_to_action, Action},
        layout::compute_layout,
        widgets::{render_file_list, render_player_panel, render_trace, PlayerPanelView},
    },
};

/// Main application state.
pub struct App {
    /// Directory being browsed
    current_dir: PathBuf,
    entries: Vec<Entry>,
    state: ListState,
    selected: usize,

    player: Player,
    visualizer: Visualizer<TraceSurface>,
    /// Container size last handed to the visualizer, in cells.
    trace_cells: (u16, u16),

    /// Elapsed playback time in seconds
    elapsed: u64,
    /// Total track duration in seconds
    duration: u64,
    /// File name of the track that was last opened
    current_track: Option<String>,
    metadata: Option<TrackMetadata>,
    /// Playback error shown in the panel
    status: Option<String>,

    /// Metadata channel (background loader -> UI)
    meta_tx: Sender<TrackMetadata>,
    meta_rx: Receiver<TrackMetadata>,
    last_second: Instant,
}

impl App {
    /// Build the app for a terminal of `initial` size.
    ///
    /// Fails when the audio output cannot be acquired.
    pub fn new(initial: Rect) -> Result<Self> {
        let cwd = env::current_dir()?;
        let mut state = ListState::default();
        state.select(Some(0));

        let player = Player::new()?;

        // Size the visualizer to the trace band it will be drawn in, and
        // wire the playback tap into its signal path once.
        let trace_inner = compute_layout(initial).trace.inner(Margin {
            horizontal: 1,
            vertical: 1,
        });
        let visualizer = Visualizer::new(
            TraceSurface::new(),
            trace_inner.width,
            trace_inner.height,
        );
        visualizer.attach_source(player.sample_tap());

        let (meta_tx, meta_rx) = mpsc::channel::<TrackMetadata>();

        Ok(Self {
            current_dir: cwd.clone(),
            entries: load_entries(&cwd),
            state,
            selected: 0,

            player,
            visualizer,
            trace_cells: (trace_inner.width, trace_inner.height),

            elapsed: 0,
            duration: 1,
            current_track: None,
            metadata: None,
            status: None,

            meta_tx,
            meta_rx,
            last_second: Instant::now(),
        })
    }

    /// Handle a key event. Returns true when the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        match key_to_action(&key) {
            Action::Down => {
                if self.selected + 1 < self.entries.len() {
                    self.selected += 1;
                }
            }
            Action::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            Action::Open => self.open_selected(),
            Action::Back => {
                if self.current_dir.pop() {
                    self.entries = load_entries(&self.current_dir);
                    self.selected = 0;
                }
            }
            Action::TogglePause => {
                if self.player.is_paused() {
                    self.player.resume();
                } else {
                    self.player.pause();
                }
            }
            Action::Stop => {
                self.player.stop();
                self.elapsed = 0;
            }
            Action::ToggleVisualizer => {
                if self.visualizer.is_enabled() {
                    self.visualizer.stop();
                } else {
                    self.visualizer.start();
                }
            }
            Action::Quit => {
                self.player.stop();
                return true;
            }
            Action::None => {}
        }

        self.state.select(Some(self.selected));
        false
    }

    /// Enter the selected directory or play the selected file.
    fn open_selected(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let entry = &self.entries[self.selected];
        let path = self.current_dir.join(&entry.name);

        if entry.is_dir {
            self.current_dir.push(&entry.name);
            self.entries = load_entries(&self.current_dir);
            self.selected = 0;
        } else if entry.is_playable() {
            let name = entry.name.clone();
            self.open_file(path, name);
        } else {
            self.status = Some("Can't play this file".to_owned());
        }
    }

    /// Start playback of `path` and reload its metadata in the background.
    fn open_file(&mut self, path: PathBuf, name: String) {
        self.player.play(&path);

        self.metadata = None;
        self.elapsed = 0;
        self.duration = 1;
        self.current_track = Some(name);
        self.status = None;
        self.last_second = Instant::now();

        // Opening a file while visualization is on re-asserts drawing.
        if self.visualizer.is_enabled() {
            self.visualizer.start();
        }

        let tx = self.meta_tx.clone();
        thread::spawn(move || {
            if let Ok(meta) = load_metadata(path) {
                let _ = tx.send(meta);
            }
        });
    }

    /// Periodic work: metadata arrival, playback errors, elapsed time.
    pub fn on_tick(&mut self) {
        if let Ok(meta) = self.meta_rx.try_recv() {
            self.duration = meta.duration_secs.max(1);
            self.metadata = Some(meta);
        }

        if let Some(error) = self.player.take_error() {
            self.status = Some(error);
        }

        if self.last_second.elapsed() >= Duration::from_secs(1) {
            self.last_second = Instant::now();
            if self.player.is_playing() && !self.player.is_paused() {
                self.elapsed = (self.elapsed + 1).min(self.duration);
            }
        }
    }

    /// Draw all panes.
    pub fn draw(&mut self, f: &mut Frame<'_>) {
        let layout = compute_layout(f.area());

        // The surface is only resized here, when the band's layout size
        // actually changed, never per render tick.
        let trace_inner = layout.trace.inner(Margin {
            horizontal: 1,
            vertical: 1,
        });
        if (trace_inner.width, trace_inner.height) != self.trace_cells {
            self.trace_cells = (trace_inner.width, trace_inner.height);
            self.visualizer.resize(trace_inner.width, trace_inner.height);
        }

        let picker_title = format!(" {}", tail_path(&self.current_dir, 3));
        render_file_list(
            f,
            layout.files,
            &picker_title,
            &self.entries,
            &mut self.state,
        );

        let title = self
            .current_track
            .as_deref()
            .map(|name| display_title(self.metadata.as_ref(), name));
        render_player_panel(
            f,
            layout.player,
            &PlayerPanelView {
                title: title.as_deref(),
                metadata: self.metadata.as_ref(),
                elapsed: self.elapsed,
                duration: self.duration,
                is_playing: self.player.is_playing(),
                is_paused: self.player.is_paused(),
                visualizer_on: self.visualizer.is_enabled(),
                status: self.status.as_deref(),
            },
        );

        render_trace(f, layout.trace, &self.visualizer.surface());
    }

    /// Stop playback and cancel the render loop.
    pub fn shutdown(&mut self) {
        self.player.stop();
        if let Some(handle) = self.visualizer.teardown() {
            handle.cancel();
        }
    }
}
