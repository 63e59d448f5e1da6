// src/audio/visualizer/surface.rs
//! Drawing surface abstraction for the trace renderer.

/// Stroke appearance for a committed path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Stroke width in surface pixels.
    pub width: f32,
    /// RGB stroke color.
    pub color: (u8, u8, u8),
}

/// One committed polyline: the points of a subpath plus its stroke style.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<(f32, f32)>,
    pub style: StrokeStyle,
}

/// A 2D raster surface: settable pixel dimensions, clearing, path
/// construction, and stroking. Coordinates are in surface pixels with the
/// origin at the top-left and y growing downward.
pub trait Surface {
    fn pixel_width(&self) -> f32;
    fn pixel_height(&self) -> f32;

    /// Resize the pixel buffer. Resizing discards all surface content.
    fn set_pixel_size(&mut self, width: f32, height: f32);

    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Discard the current path and start a new one.
    fn begin_path(&mut self);

    /// Start a new subpath at the given point.
    fn move_to(&mut self, x: f32, y: f32);

    /// Extend the current subpath with a line segment. Without a preceding
    /// `move_to` this starts a subpath at the given point.
    fn line_to(&mut self, x: f32, y: f32);

    /// Commit the current path as drawn content.
    fn stroke(&mut self, style: StrokeStyle);
}

/// Display-list surface: records stroked polylines instead of rasterizing
/// them. The trace widget replays the list onto a terminal canvas, and tests
/// inspect it directly.
#[derive(Debug, Default)]
pub struct TraceSurface {
    width: f32,
    height: f32,
    /// Subpaths of the in-progress path.
    path: Vec<Vec<(f32, f32)>>,
    /// Committed polylines, cleared by `clear` and `set_pixel_size`.
    strokes: Vec<Polyline>,
}

impl TraceSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed polylines, oldest first.
    pub fn strokes(&self) -> &[Polyline] {
        &self.strokes
    }
}

impl Surface for TraceSurface {
    fn pixel_width(&self) -> f32 {
        self.width
    }

    fn pixel_height(&self) -> f32 {
        self.height
    }

    fn set_pixel_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.path.clear();
        self.strokes.clear();
    }

    fn clear(&mut self) {
        self.strokes.clear();
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.path.push(vec![(x, y)]);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        match self.path.last_mut() {
            Some(subpath) => subpath.push((x, y)),
            None => self.path.push(vec![(x, y)]),
        }
    }

    fn stroke(&mut self, style: StrokeStyle) {
        for subpath in &self.path {
            // A single point has no extent to stroke.
            if subpath.len() >= 2 {
                self.strokes.push(Polyline {
                    points: subpath.clone(),
                    style,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLE: StrokeStyle = StrokeStyle {
        width: 2.0,
        color: (128, 128, 128),
    };

    #[test]
    fn resize_sets_dimensions_and_discards_content() {
        let mut surface = TraceSurface::new();
        surface.set_pixel_size(100.0, 50.0);
        surface.move_to(0.0, 0.0);
        surface.line_to(10.0, 10.0);
        surface.stroke(STYLE);
        assert_eq!(surface.strokes().len(), 1);

        surface.set_pixel_size(200.0, 80.0);
        assert_eq!(surface.pixel_width(), 200.0);
        assert_eq!(surface.pixel_height(), 80.0);
        assert!(surface.strokes().is_empty());
    }

    #[test]
    fn stroke_commits_polyline_points_in_order() {
        let mut surface = TraceSurface::new();
        surface.set_pixel_size(100.0, 100.0);
        surface.begin_path();
        surface.move_to(0.0, 1.0);
        surface.line_to(2.0, 3.0);
        surface.line_to(4.0, 5.0);
        surface.stroke(STYLE);

        let strokes = surface.strokes();
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].points, vec![(0.0, 1.0), (2.0, 3.0), (4.0, 5.0)]);
        assert_eq!(strokes[0].style, STYLE);
    }

    #[test]
    fn line_to_without_move_to_starts_a_subpath() {
        let mut surface = TraceSurface::new();
        surface.line_to(1.0, 1.0);
        surface.line_to(2.0, 2.0);
        surface.stroke(STYLE);
        assert_eq!(surface.strokes().len(), 1);
    }

    #[test]
    fn single_point_subpath_is_not_stroked() {
        let mut surface = TraceSurface::new();
        surface.move_to(5.0, 5.0);
        surface.stroke(STYLE);
        assert!(surface.strokes().is_empty());
    }

    #[test]
    fn clear_removes_committed_strokes() {
        let mut surface = TraceSurface::new();
        surface.move_to(0.0, 0.0);
        surface.line_to(1.0, 1.0);
        surface.stroke(STYLE);
        surface.clear();
        assert!(surface.strokes().is_empty());
    }
}
