// src/ui/tui.rs
//! Terminal setup and the event loop.

use std::{
    io,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{self, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use crate::{app::App, config::UI_TICK};

/// Run the player until the user quits.
pub fn run() -> Result<()> {
    // Construct the app before touching the terminal so a missing audio
    // device fails with a readable error instead of a garbled screen.
    let (cols, rows) = crossterm::terminal::size()?;
    let mut app = App::new(Rect::new(0, 0, cols, rows))?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| app.draw(f))?;

        let timeout = UI_TICK
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let CEvent::Key(key) = event::read()? {
                if app.on_key(key) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= UI_TICK {
            last_tick = Instant::now();
            app.on_tick();
        }
    }

    app.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
