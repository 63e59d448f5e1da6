// src/audio/tap.rs
//! Pass-through source that taps decoded samples for the visualizer.

use std::sync::{Arc, Mutex};

use ringbuf::{traits::*, HeapRb};
use rodio::Source;

/// Wraps a playable source, copying every sample into a shared ring buffer
/// on its way to the audio output. Playback stays audible; the analyzer
/// reads the ring buffer on its own schedule.
pub struct TapSource<S> {
    inner: S,
    tap: Arc<Mutex<HeapRb<f32>>>,
}

impl<S> TapSource<S> {
    pub fn new(inner: S, tap: Arc<Mutex<HeapRb<f32>>>) -> Self {
        Self { inner, tap }
    }
}

impl<S> Iterator for TapSource<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.inner.next()?;

        if let Ok(mut buf) = self.tap.lock() {
            // Overwrite the oldest sample once full; the analyzer only ever
            // wants the newest window.
            if buf.is_full() {
                let _ = buf.try_pop();
            }
            let _ = buf.try_push(sample);
        }

        Some(sample)
    }
}

impl<S> Source for TapSource<S>
where
    S: Source<Item = f32>,
{
    fn current_frame_len(&self) -> Option<usize> {
        self.inner.current_frame_len()
    }

    fn channels(&self) -> u16 {
        self.inner.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<std::time::Duration> {
        self.inner.total_duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rodio::buffer::SamplesBuffer;

    fn tap(capacity: usize) -> Arc<Mutex<HeapRb<f32>>> {
        Arc::new(Mutex::new(HeapRb::new(capacity)))
    }

    #[test]
    fn passthrough_preserves_mono_samples() {
        let input: Vec<f32> = (0..100).map(|i| i as f32 / 100.0).collect();
        let source = SamplesBuffer::new(1, 44100, input.clone());
        let tapped = TapSource::new(source, tap(256));

        let output: Vec<f32> = tapped.collect();
        assert_eq!(output, input);
    }

    #[test]
    fn passthrough_preserves_stereo_samples() {
        let input: Vec<f32> = (0..200).map(|i| (i as f32 - 100.0) / 100.0).collect();
        let source = SamplesBuffer::new(2, 44100, input.clone());
        let tapped = TapSource::new(source, tap(256));

        let output: Vec<f32> = tapped.collect();
        assert_eq!(output, input);
    }

    #[test]
    fn tap_retains_the_newest_samples_when_full() {
        let input: Vec<f32> = (0..8).map(|i| i as f32).collect();
        let source = SamplesBuffer::new(1, 44100, input);
        let shared = tap(4);
        let tapped = TapSource::new(source, shared.clone());

        tapped.for_each(drop);

        let buf = shared.lock().unwrap();
        let kept: Vec<f32> = buf.iter().copied().collect();
        assert_eq!(kept, vec![4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn source_properties_are_forwarded() {
        let source = SamplesBuffer::new(2, 48000, vec![0.0f32; 16]);
        let tapped = TapSource::new(source, tap(16));
        assert_eq!(tapped.channels(), 2);
        assert_eq!(tapped.sample_rate(), 48000);
    }
}
