// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, session events)
// - Handing user actions to the session driver

pub mod app;
pub mod layout;
pub mod ui;

use crate::config::Config;
use crate::logging::LogBuffer;
use crate::omdb::OmdbClient;
use crate::render::reconcile::HttpPosterLoader;
use crate::session::driver::{Driver, SessionEvent};
use crate::session::Session;
use anyhow::{Context, Result};
use app::{Action, App};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// This function sets up the terminal, runs the event loop, and cleans up
/// when done.
pub async fn run_tui(log_buffer: LogBuffer, config: Config) -> Result<()> {
    let client = OmdbClient::new(&config.omdb).context("Failed to create OMDb client")?;
    let loader = HttpPosterLoader::new(
        config.display.poster_sizing(),
        config.display.poster_timeout(),
    )
    .context("Failed to create poster loader")?;
    let (mut driver, mut session_rx) = Driver::new(
        Session::new(config.display.skeleton_count),
        Arc::new(client),
        Arc::new(loader),
        config.display.settle_delay(),
    );
    let mut app = App::new(
        log_buffer,
        config.display.card_width,
        config.display.poster_min_rows,
    );

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, &mut driver, &mut session_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with tokio::select!:
/// 1. Keyboard input
/// 2. Timer ticks (spinner animation, periodic redraw)
/// 3. Session events from the driver's background tasks
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    driver: &mut Driver<OmdbClient, HttpPosterLoader>,
    session_rx: &mut mpsc::UnboundedReceiver<SessionEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(120));

    loop {
        let width = terminal.size().context("Failed to read terminal size")?.width;
        app.sync_viewport(width, driver.session());
        terminal
            .draw(|f| ui::draw(f, app, driver.session()))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key)) = event::read() {
                        if let Some(action) = app.handle_key(key, driver.session()) {
                            apply_action(driver, action);
                        }
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            Some(event) = session_rx.recv() => {
                driver.handle(event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn apply_action(driver: &mut Driver<OmdbClient, HttpPosterLoader>, action: Action) {
    match action {
        Action::Submit(query) => {
            driver.submit(&query);
        }
        Action::Sort(key) => {
            driver.change_sort(key);
        }
    }
}
