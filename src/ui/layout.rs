// src/ui/layout.rs
//! Pane layout: picker and player columns over the trace band.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Computed pane areas.
#[derive(Debug, Clone, Copy)]
pub struct ComputedLayout {
    /// File picker column.
    pub files: Rect,
    /// Player panel column.
    pub player: Rect,
    /// Bottom band holding the frequency trace.
    pub trace: Rect,
}

/// Split the terminal: main panes on top, the trace band across the bottom.
pub fn compute_layout(area: Rect) -> ComputedLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(vertical[0]);

    ComputedLayout {
        files: columns[0],
        player: columns[1],
        trace: vertical[1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panes_tile_the_full_area() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = compute_layout(area);

        assert_eq!(layout.files.width + layout.player.width, area.width);
        assert_eq!(layout.files.height, layout.player.height);
        assert_eq!(layout.trace.width, area.width);
        assert_eq!(
            layout.files.height + layout.trace.height,
            area.height
        );
    }

    #[test]
    fn trace_band_sits_at_the_bottom() {
        let layout = compute_layout(Rect::new(0, 0, 80, 30));
        assert_eq!(layout.trace.y, layout.files.height);
        assert_eq!(layout.trace.bottom(), 30);
    }
}
