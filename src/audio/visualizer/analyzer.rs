// src/audio/visualizer/analyzer.rs
//! Frequency analysis over the playback tap.

use std::sync::{Arc, Mutex};

use ringbuf::{traits::*, HeapRb};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

use crate::config::{BIN_COUNT, FFT_SIZE, MAX_DECIBELS, MIN_DECIBELS};

/// Source of byte frequency snapshots. Fills a caller-supplied buffer with
/// one magnitude per bin, 0..=255.
pub trait FrequencyAnalyzer {
    /// Number of frequency bins per snapshot.
    fn bin_count(&self) -> usize;

    /// Write the current snapshot into `out`, one byte per bin.
    fn byte_frequency_data(&mut self, out: &mut [u8]);
}

/// FFT-based analyzer reading the newest samples from an attached tap.
///
/// Successive spectra are blended with an exponential smoothing
/// time-constant before being mapped from dB onto the byte range, so the
/// trace responds without frame-to-frame jitter.
pub struct FftAnalyzer {
    /// Forward transform planned once for the fixed window size.
    fft: Arc<dyn Fft<f32>>,
    /// Ring buffer of recent samples from the currently attached source.
    tap: Option<Arc<Mutex<HeapRb<f32>>>>,
    /// Smoothed linear magnitude per bin.
    smoothed: Vec<f32>,
    smoothing: f32,
}

impl FftAnalyzer {
    pub fn new(smoothing: f32) -> Self {
        Self {
            fft: FftPlanner::new().plan_fft_forward(FFT_SIZE),
            tap: None,
            smoothed: vec![0.0; BIN_COUNT],
            smoothing,
        }
    }

    /// Attach a sample tap, replacing any previously attached one.
    pub fn attach(&mut self, tap: Arc<Mutex<HeapRb<f32>>>) {
        self.tap = Some(tap);
    }

    /// Copy the newest samples out of the tap without consuming them, at
    /// most one analysis window's worth.
    fn latest_window(&self) -> Vec<f32> {
        let Some(tap) = &self.tap else {
            return Vec::new();
        };
        let Ok(buf) = tap.lock() else {
            return Vec::new();
        };

        let available = buf.occupied_len();
        let take = available.min(FFT_SIZE);
        let start = available - take;
        buf.iter().skip(start).take(take).copied().collect()
    }
}

impl FrequencyAnalyzer for FftAnalyzer {
    fn bin_count(&self) -> usize {
        BIN_COUNT
    }

    fn byte_frequency_data(&mut self, out: &mut [u8]) {
        let samples = self.latest_window();

        if samples.is_empty() {
            // No source or no audio yet: identical to analyzing silence,
            // the smoothed spectrum decays toward zero.
            for s in &mut self.smoothed {
                *s *= self.smoothing;
            }
        } else {
            // Hann window to reduce spectral leakage
            let mut buffer: Vec<Complex<f32>> = samples
                .iter()
                .enumerate()
                .map(|(i, &sample)| {
                    let window = 0.5
                        * (1.0
                            - (2.0 * std::f32::consts::PI * i as f32 / FFT_SIZE as f32).cos());
                    Complex::new(sample * window, 0.0)
                })
                .collect();
            buffer.resize(FFT_SIZE, Complex::new(0.0, 0.0));

            self.fft.process(&mut buffer);

            let scale = 1.0 / FFT_SIZE as f32;
            for (s, c) in self.smoothed.iter_mut().zip(&buffer) {
                let mag = c.norm() * scale;
                *s = self.smoothing * *s + (1.0 - self.smoothing) * mag;
            }
        }

        // Map each smoothed magnitude from dB onto 0..=255.
        let db_range = MAX_DECIBELS - MIN_DECIBELS;
        for (byte, &s) in out.iter_mut().zip(&self.smoothed) {
            let db = 20.0 * s.max(1e-10).log10();
            let scaled = 255.0 * (db - MIN_DECIBELS) / db_range;
            *byte = scaled.clamp(0.0, 255.0) as u8;
        }
    }
}
