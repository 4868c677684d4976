// reelsearch - Movie search for the terminal
//
// Searches OMDb and shows the matches as a grid of movie cards, with
// loading skeletons, poster fallbacks and client-side sorting.
//
// Architecture:
// - Session: owned state machine over an element tree (dom) of cards
// - Driver: runs searches, settle delays and poster loads as tokio tasks
// - TUI (ratatui): draws the tree and turns keys into session actions
// - Headless: `reelsearch search <query>` prints the same cards as text

mod cli;
mod config;
mod dom;
mod headless;
mod logging;
mod movie;
mod omdb;
mod render;
mod session;
mod sort;
mod tui;
mod util;

use anyhow::Result;
use cli::CliAction;
use config::{Config, LoggingConfig};
use logging::{LogBuffer, TuiLogLayer};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Open the rolling JSON log file, if it can be created
///
/// Returns `None` (after a warning) so a bad log directory never blocks startup.
fn file_writer(
    logging: &LoggingConfig,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    match logging.appender() {
        // Writes happen on a background thread
        Ok(appender) => Some(tracing_appender::non_blocking(appender)),
        Err(e) => {
            eprintln!(
                "Warning: Could not open log file in {:?}: {}",
                logging.file_dir, e
            );
            None
        }
    }
}

/// Initialize tracing
///
/// In TUI mode logs go to the in-memory buffer (prevents garbling the
/// display); otherwise to stderr, keeping stdout for results. File logging
/// is optional and additive, in JSON for structured parsing.
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_tracing(config: &Config, tui: bool, log_buffer: &LogBuffer) -> Option<WorkerGuard> {
    let default_filter = format!("reelsearch={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (file_layer, guard) = match config
        .logging
        .file_enabled
        .then(|| file_writer(&config.logging))
        .flatten()
    {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    let tui_layer = tui.then(|| TuiLogLayer::new(log_buffer.clone()));
    let stderr_layer = (!tui).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --edit, --update)
    let action = cli::handle_cli();
    if action == CliAction::Exit {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();
    let config = Config::from_env();

    let tui = config.enable_tui && action == CliAction::Run;
    let log_buffer = LogBuffer::new();

    // The guard must live until exit so buffered file logs flush
    let _file_guard = init_tracing(&config, tui, &log_buffer);

    tracing::debug!("reelsearch {} starting", config::VERSION);

    match action {
        CliAction::Search { query, sort } => {
            headless::run_search(&config, &query, sort).await?;
        }
        CliAction::Run if tui => {
            tracing::info!("Starting TUI");
            if let Err(e) = tui::run_tui(log_buffer, config).await {
                tracing::error!("TUI error: {:?}", e);
                return Err(e);
            }
        }
        CliAction::Run => {
            // REELSEARCH_NO_TUI without a query has nothing to show
            eprintln!("TUI disabled (REELSEARCH_NO_TUI). Use `reelsearch search <query>`.");
        }
        CliAction::Exit => {}
    }

    tracing::debug!("Shutdown complete");
    Ok(())
}
