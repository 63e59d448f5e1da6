// src/audio/visualizer/trace.rs
//! Frequency frame to polyline geometry.

use crate::config::{STROKE_WIDTH, TRACE_COLOR};

use super::surface::{StrokeStyle, Surface};

/// Draw one frequency snapshot as a connected trace across the surface.
///
/// Each bin becomes a point: magnitudes are normalized to `byte / 256` and
/// scaled to the surface height, while x advances by `width / bin_count` per
/// bin. A final segment returns to the vertical midline at the right edge.
pub fn draw_trace<S: Surface + ?Sized>(surface: &mut S, fdata: &[u8]) {
    let width = surface.pixel_width();
    let height = surface.pixel_height();

    surface.clear();
    surface.begin_path();

    let slice_width = width / fdata.len() as f32;
    let mut x = 0.0;

    for (i, &byte) in fdata.iter().enumerate() {
        let v = byte as f32 / 256.0;
        let y = v * height;

        if i == 0 {
            surface.move_to(x, y);
        } else {
            surface.line_to(x, y);
        }

        x += slice_width;
    }

    surface.line_to(width, height / 2.0);
    surface.stroke(StrokeStyle {
        width: STROKE_WIDTH,
        color: TRACE_COLOR,
    });
}
