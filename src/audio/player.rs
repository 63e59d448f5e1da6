// src/audio/player.rs
//! Playback engine: a command-channel audio thread owning the rodio output.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use ringbuf::{traits::*, HeapRb};
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::config::TAP_CAPACITY;

use super::tap::TapSource;

/// Commands handled by the audio thread.
enum PlayerCommand {
    Play(PathBuf),
    Pause,
    Resume,
    Stop,
}

/// How often the audio thread wakes to look for a drained sink.
const ENDED_POLL: Duration = Duration::from_millis(200);

/// Audio file player. Owns the output stream on a dedicated thread and
/// exposes transport controls plus a sample tap for the visualizer.
pub struct Player {
    cmd_tx: Sender<PlayerCommand>,
    /// Flags mirrored from the audio thread for quick UI access.
    is_playing_flag: Arc<AtomicBool>,
    is_paused_flag: Arc<AtomicBool>,
    /// Most recent playback failure, drained by the app's status line.
    error: Arc<Mutex<Option<String>>>,
    /// Ring buffer of recent decoded samples.
    tap: Arc<Mutex<HeapRb<f32>>>,
}

impl Player {
    /// Spawn the audio thread and acquire the output stream.
    ///
    /// Fails when no audio output can be opened; there is no silent
    /// fallback mode.
    pub fn new() -> Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<PlayerCommand>();
        let (ready_tx, ready_rx) = mpsc::channel::<std::result::Result<(), String>>();

        let is_playing_flag = Arc::new(AtomicBool::new(false));
        let is_paused_flag = Arc::new(AtomicBool::new(false));
        let error = Arc::new(Mutex::new(None));
        let tap = Arc::new(Mutex::new(HeapRb::<f32>::new(TAP_CAPACITY)));

        let playing = is_playing_flag.clone();
        let paused = is_paused_flag.clone();
        let error_slot = error.clone();
        let tap_writer = tap.clone();

        // The OutputStream is not Send, so it lives on the audio thread;
        // a startup handshake reports whether it could be created at all.
        thread::spawn(move || {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => {
                    let _ = ready_tx.send(Ok(()));
                    pair
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e.to_string()));
                    return;
                }
            };

            let mut sink: Option<Sink> = None;

            loop {
                let cmd = match cmd_rx.recv_timeout(ENDED_POLL) {
                    Ok(cmd) => cmd,
                    Err(RecvTimeoutError::Timeout) => {
                        // A drained sink means the track played to its end.
                        if playing.load(Ordering::SeqCst)
                            && sink.as_ref().is_some_and(|s| s.empty())
                        {
                            sink = None;
                            playing.store(false, Ordering::SeqCst);
                            paused.store(false, Ordering::SeqCst);
                        }
                        continue;
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                };

                match cmd {
                    PlayerCommand::Play(path) => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }

                        // Stale samples from the previous track would leak
                        // into the first trace frames.
                        if let Ok(mut buf) = tap_writer.lock() {
                            buf.clear();
                        }

                        match open_source(path, tap_writer.clone()) {
                            Ok(source) => {
                                if let Ok(new_sink) = Sink::try_new(&handle) {
                                    new_sink.append(source);
                                    new_sink.play();
                                    playing.store(true, Ordering::SeqCst);
                                    paused.store(false, Ordering::SeqCst);
                                    sink = Some(new_sink);
                                }
                            }
                            Err(_) => {
                                if let Ok(mut slot) = error_slot.lock() {
                                    *slot = Some("Can't play this file".to_owned());
                                }
                                playing.store(false, Ordering::SeqCst);
                                paused.store(false, Ordering::SeqCst);
                            }
                        }
                    }
                    PlayerCommand::Pause => {
                        if let Some(s) = &sink {
                            s.pause();
                            paused.store(true, Ordering::SeqCst);
                        }
                    }
                    PlayerCommand::Resume => {
                        if let Some(s) = &sink {
                            s.play();
                            paused.store(false, Ordering::SeqCst);
                        }
                    }
                    PlayerCommand::Stop => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        playing.store(false, Ordering::SeqCst);
                        paused.store(false, Ordering::SeqCst);
                    }
                }
            }

            if let Some(s) = sink.take() {
                s.stop();
            }
            drop(stream);
        });

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(anyhow!("audio output unavailable: {e}")),
            Err(_) => return Err(anyhow!("audio thread exited during startup")),
        }

        Ok(Self {
            cmd_tx,
            is_playing_flag,
            is_paused_flag,
            error,
            tap,
        })
    }

    /// Stop any current playback and start playing `path`.
    pub fn play(&self, path: &PathBuf) {
        self.cmd_tx.send(PlayerCommand::Play(path.clone())).ok();
    }

    pub fn pause(&self) {
        self.cmd_tx.send(PlayerCommand::Pause).ok();
    }

    pub fn resume(&self) {
        self.cmd_tx.send(PlayerCommand::Resume).ok();
    }

    pub fn stop(&self) {
        self.cmd_tx.send(PlayerCommand::Stop).ok();
    }

    /// True while a sink is active (playing or paused).
    pub fn is_playing(&self) -> bool {
        self.is_playing_flag.load(Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused_flag.load(Ordering::SeqCst)
    }

    /// Shared sample tap for the visualizer's signal path.
    pub fn sample_tap(&self) -> Arc<Mutex<HeapRb<f32>>> {
        self.tap.clone()
    }

    /// Take the most recent playback error, if one occurred.
    pub fn take_error(&self) -> Option<String> {
        self.error.lock().ok().and_then(|mut slot| slot.take())
    }
}

/// Decode `path` and wire the tap into its signal path.
fn open_source(
    path: PathBuf,
    tap: Arc<Mutex<HeapRb<f32>>>,
) -> Result<TapSource<impl Source<Item = f32>>> {
    let file = File::open(path)?;
    let source = Decoder::new(BufReader::new(file))?;
    Ok(TapSource::new(source.convert_samples::<f32>(), tap))
}
