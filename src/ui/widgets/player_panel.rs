// src/ui/widgets/player_panel.rs
//! Player panel: title line, transport state, progress.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::audio::TrackMetadata;

/// Everything the player panel displays.
pub struct PlayerPanelView<'a> {
    /// Metadata-derived title of the current track, if any.
    pub title: Option<&'a str>,
    pub metadata: Option<&'a TrackMetadata>,
    pub elapsed: u64,
    pub duration: u64,
    pub is_playing: bool,
    pub is_paused: bool,
    pub visualizer_on: bool,
    /// Playback error to surface, if any.
    pub status: Option<&'a str>,
}

/// Render the player panel.
pub fn render_player_panel(f: &mut Frame<'_>, area: Rect, view: &PlayerPanelView<'_>) {
    f.render_widget(
        Block::default().borders(Borders::ALL).title("Player"),
        area,
    );

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    match view.title {
        Some(title) => lines.push(Line::from(Span::styled(
            title.to_owned(),
            Style::default().add_modifier(Modifier::BOLD),
        ))),
        None => lines.push(Line::from("No track playing")),
    }
    if let Some(meta) = view.metadata {
        lines.push(Line::from(format!("Duration: {}s", meta.duration_secs)));
        for (key, value) in &meta.properties {
            lines.push(Line::from(format!("{key}: {value}")));
        }
    }
    if let Some(status) = view.status {
        lines.push(Line::from(Span::styled(
            status.to_owned(),
            Style::default().fg(Color::Red),
        )));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner[0]);

    // Transport state: stop, play/pause, visualizer toggle
    let play_pause = if !view.is_playing {
        Span::styled(" \u{23f5} ", Style::default().fg(Color::Gray))
    } else if view.is_paused {
        Span::styled(" \u{23f5} ", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" \u{23f8} ", Style::default().fg(Color::Green))
    };
    let visualize = if view.visualizer_on {
        Span::styled(" \u{2301} ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" \u{2301} ", Style::default().fg(Color::DarkGray))
    };

    let controls = Line::from(vec![
        Span::styled(" \u{23f9} ", Style::default().fg(Color::Red)),
        Span::raw(" "),
        play_pause,
        Span::raw(" "),
        visualize,
    ]);
    f.render_widget(
        Paragraph::new(controls).alignment(Alignment::Center),
        inner[1],
    );

    // Progress with a time label
    let ratio = (view.elapsed as f64 / view.duration.max(1) as f64).clamp(0.0, 1.0);
    let time_label = format!(
        "{:02}:{:02} / {:02}:{:02}",
        view.elapsed / 60,
        view.elapsed % 60,
        view.duration / 60,
        view.duration % 60
    );
    f.render_widget(
        Gauge::default()
            .gauge_style(
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::ITALIC),
            )
            .ratio(ratio)
            .label(time_label),
        inner[2],
    );
}
