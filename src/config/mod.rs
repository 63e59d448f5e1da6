// src/config/mod.rs
//! Tuning constants for playback, analysis, and the trace renderer.

use std::time::Duration;

/// FFT analysis window, in samples.
pub const FFT_SIZE: usize = 1024;

/// Frequency bins produced per analysis pass (half the window).
pub const BIN_COUNT: usize = FFT_SIZE / 2;

/// Exponential blend of successive spectra. Higher = smoother, slower.
pub const SMOOTHING_TIME_CONSTANT: f32 = 0.7;

/// dB window mapped onto the 0..=255 byte range.
pub const MIN_DECIBELS: f32 = -100.0;
pub const MAX_DECIBELS: f32 = -30.0;

/// Capacity of the sample tap ring buffer (~370ms at 44.1kHz).
pub const TAP_CAPACITY: usize = 16384;

/// Trace stroke appearance.
pub const STROKE_WIDTH: f32 = 2.0;
pub const TRACE_COLOR: (u8, u8, u8) = (128, 128, 128);

/// Braille dot density of one terminal cell, the pixel ratio between
/// layout cells and drawable dots.
pub const DOT_RATIO_X: u16 = 2;
pub const DOT_RATIO_Y: u16 = 4;

/// Render loop frame interval (~30 fps).
pub const RENDER_TICK: Duration = Duration::from_millis(33);

/// UI event loop tick.
pub const UI_TICK: Duration = Duration::from_millis(100);
