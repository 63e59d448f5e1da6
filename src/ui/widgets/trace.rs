// src/ui/widgets/trace.rs
//! Paints the visualizer surface onto a braille canvas.

use std::sync::Mutex;

use ratatui::{
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders,
    },
    Frame,
};

use crate::audio::visualizer::{Surface, TraceSurface};

/// Render the frequency trace band by replaying the surface's display list.
///
/// Surface coordinates run top-down; the canvas y axis runs bottom-up, so
/// points are flipped on the way through.
pub fn render_trace(f: &mut Frame<'_>, area: Rect, surface: &Mutex<TraceSurface>) {
    let block = Block::default().borders(Borders::ALL).title("Visualizer");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Ok(surface) = surface.lock() else {
        return;
    };

    let width = f64::from(surface.pixel_width()).max(1.0);
    let height = f64::from(surface.pixel_height()).max(1.0);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            for polyline in surface.strokes() {
                let (r, g, b) = polyline.style.color;
                let color = Color::Rgb(r, g, b);

                for pair in polyline.points.windows(2) {
                    ctx.draw(&CanvasLine {
                        x1: f64::from(pair[0].0),
                        y1: height - f64::from(pair[0].1),
                        x2: f64::from(pair[1].0),
                        y2: height - f64::from(pair[1].1),
                        color,
                    });
                }
            }
        });

    f.render_widget(canvas, inner);
}
