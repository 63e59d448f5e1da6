// src/audio/visualizer/mod.rs
//! Live frequency trace: an analyzer tapping the playback graph, a drawing
//! surface, and a free-running render loop that strokes one polyline per
//! frame while enabled.

mod analyzer;
mod surface;
mod trace;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use ringbuf::HeapRb;

use crate::config::{DOT_RATIO_X, DOT_RATIO_Y, RENDER_TICK, SMOOTHING_TIME_CONSTANT};

pub use analyzer::{FftAnalyzer, FrequencyAnalyzer};
pub use surface::{Polyline, StrokeStyle, Surface, TraceSurface};
pub use trace::draw_trace;

/// Cancellation handle for the render loop thread.
///
/// The loop free-runs from construction onward; dropping the handle leaves
/// it running for the life of the process, `cancel` stops and joins it.
pub struct RenderLoopHandle {
    running: Arc<AtomicBool>,
    thread: thread::JoinHandle<()>,
}

impl RenderLoopHandle {
    /// Stop the render loop and wait for the thread to exit.
    pub fn cancel(self) {
        self.running.store(false, Ordering::SeqCst);
        let _ = self.thread.join();
    }
}

/// Continuously renders the frequency spectrum of whatever source is
/// attached onto its surface.
///
/// Construction sizes the surface to the container and starts the render
/// loop; `start`/`stop` only gate the drawing work, they never touch the
/// loop itself.
pub struct Visualizer<S: Surface + Send + 'static> {
    surface: Arc<Mutex<S>>,
    analyzer: Arc<Mutex<FftAnalyzer>>,
    enabled: Arc<AtomicBool>,
    handle: Option<RenderLoopHandle>,
}

impl<S: Surface + Send + 'static> Visualizer<S> {
    /// Set up the analyzer and surface, then start the render loop.
    ///
    /// `cols` and `rows` are the container's layout size in cells; the
    /// surface gets that size times the braille dot ratio, in dots.
    pub fn new(mut surface: S, cols: u16, rows: u16) -> Self {
        surface.set_pixel_size(
            f32::from(cols * DOT_RATIO_X),
            f32::from(rows * DOT_RATIO_Y),
        );

        let surface = Arc::new(Mutex::new(surface));
        let analyzer = Arc::new(Mutex::new(FftAnalyzer::new(SMOOTHING_TIME_CONSTANT)));
        let enabled = Arc::new(AtomicBool::new(false));
        let running = Arc::new(AtomicBool::new(true));

        let thread = thread::spawn({
            let surface = surface.clone();
            let analyzer = analyzer.clone();
            let enabled = enabled.clone();
            let running = running.clone();

            move || {
                // One snapshot buffer per loop, refilled every tick.
                let bins = analyzer.lock().map(|a| a.bin_count()).unwrap_or_default();
                let mut fdata = vec![0u8; bins];

                while running.load(Ordering::SeqCst) {
                    if let (Ok(mut analyzer), Ok(mut surface)) =
                        (analyzer.lock(), surface.lock())
                    {
                        render_tick(
                            enabled.load(Ordering::SeqCst),
                            &mut *analyzer,
                            &mut fdata,
                            &mut *surface,
                        );
                    }
                    thread::sleep(RENDER_TICK);
                }
            }
        });

        Self {
            surface,
            analyzer,
            enabled,
            handle: Some(RenderLoopHandle { running, thread }),
        }
    }

    /// Route a playback sample tap into the analyzer, replacing any source
    /// attached earlier.
    pub fn attach_source(&self, tap: Arc<Mutex<HeapRb<f32>>>) {
        if let Ok(mut analyzer) = self.analyzer.lock() {
            analyzer.attach(tap);
        }
    }

    /// Enable drawing. Idempotent.
    pub fn start(&self) {
        self.enabled.store(true, Ordering::SeqCst);
    }

    /// Disable drawing and clear the surface. Idempotent.
    pub fn stop(&self) {
        self.enabled.store(false, Ordering::SeqCst);
        if let Ok(mut surface) = self.surface.lock() {
            surface.clear();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Resize the surface to a new container layout size. The surface is
    /// only ever sized here and at construction, never per tick, so the
    /// host must call this when the container changes.
    pub fn resize(&self, cols: u16, rows: u16) {
        if let Ok(mut surface) = self.surface.lock() {
            surface.set_pixel_size(
                f32::from(cols * DOT_RATIO_X),
                f32::from(rows * DOT_RATIO_Y),
            );
        }
    }

    /// Shared handle to the surface, for painting its contents.
    pub fn surface(&self) -> Arc<Mutex<S>> {
        self.surface.clone()
    }

    /// Take the render loop's cancellation handle. Returns `None` if it was
    /// already taken.
    pub fn teardown(&mut self) -> Option<RenderLoopHandle> {
        self.handle.take()
    }
}

/// One unit of render work: pull a snapshot and redraw the trace, or do
/// nothing at all while disabled.
fn render_tick<S: Surface + ?Sized>(
    enabled: bool,
    analyzer: &mut dyn FrequencyAnalyzer,
    fdata: &mut [u8],
    surface: &mut S,
) {
    if !enabled {
        return;
    }

    analyzer.byte_frequency_data(fdata);
    draw_trace(surface, fdata);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Analyzer double serving a fixed snapshot.
    struct FixedAnalyzer(Vec<u8>);

    impl FrequencyAnalyzer for FixedAnalyzer {
        fn bin_count(&self) -> usize {
            self.0.len()
        }

        fn byte_frequency_data(&mut self, out: &mut [u8]) {
            out.copy_from_slice(&self.0);
        }
    }

    fn surface(width: f32, height: f32) -> TraceSurface {
        let mut s = TraceSurface::new();
        s.set_pixel_size(width, height);
        s
    }

    #[test]
    fn disabled_tick_leaves_the_surface_untouched() {
        let mut analyzer = FixedAnalyzer(vec![200; 4]);
        let mut fdata = vec![0u8; 4];
        let mut s = surface(100.0, 50.0);

        render_tick(false, &mut analyzer, &mut fdata, &mut s);
        assert!(s.strokes().is_empty());
    }

    #[test]
    fn enabled_tick_draws_one_trace() {
        let mut analyzer = FixedAnalyzer(vec![128; 4]);
        let mut fdata = vec![0u8; 4];
        let mut s = surface(100.0, 50.0);

        render_tick(true, &mut analyzer, &mut fdata, &mut s);
        assert_eq!(s.strokes().len(), 1);
    }

    #[test]
    fn stop_then_start_resumes_with_an_identical_trace() {
        let mut analyzer = FixedAnalyzer(vec![64; 8]);
        let mut fdata = vec![0u8; 8];

        let mut uninterrupted = surface(100.0, 50.0);
        render_tick(true, &mut analyzer, &mut fdata, &mut uninterrupted);

        let mut toggled = surface(100.0, 50.0);
        render_tick(true, &mut analyzer, &mut fdata, &mut toggled);
        toggled.clear(); // stop()
        render_tick(false, &mut analyzer, &mut fdata, &mut toggled);
        render_tick(true, &mut analyzer, &mut fdata, &mut toggled);

        assert_eq!(uninterrupted.strokes(), toggled.strokes());
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let mut viz = Visualizer::new(TraceSurface::new(), 40, 10);

        viz.start();
        viz.start();
        assert!(viz.is_enabled());

        viz.stop();
        viz.stop();
        assert!(!viz.is_enabled());
        assert!(viz.surface().lock().unwrap().strokes().is_empty());

        if let Some(handle) = viz.teardown() {
            handle.cancel();
        }
    }

    #[test]
    fn construction_sizes_the_surface_to_the_container() {
        let mut viz = Visualizer::new(TraceSurface::new(), 40, 10);
        {
            let s = viz.surface();
            let s = s.lock().unwrap();
            assert_eq!(s.pixel_width(), 80.0);
            assert_eq!(s.pixel_height(), 40.0);
        }
        if let Some(handle) = viz.teardown() {
            handle.cancel();
        }
    }

    #[test]
    fn resize_updates_the_surface_dimensions() {
        let mut viz = Visualizer::new(TraceSurface::new(), 40, 10);
        viz.resize(60, 20);
        {
            let s = viz.surface();
            let s = s.lock().unwrap();
            assert_eq!(s.pixel_width(), 120.0);
            assert_eq!(s.pixel_height(), 80.0);
        }
        if let Some(handle) = viz.teardown() {
            handle.cancel();
        }
    }

    #[test]
    fn teardown_yields_the_handle_once() {
        let mut viz = Visualizer::new(TraceSurface::new(), 10, 10);
        let handle = viz.teardown();
        assert!(handle.is_some());
        assert!(viz.teardown().is_none());
        handle.unwrap().cancel();
    }
}
